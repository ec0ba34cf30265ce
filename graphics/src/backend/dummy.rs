//! Dummy upload backend for testing and headless runs.
//!
//! This backend doesn't create GPU resources; it records what would have
//! been uploaded so tests and the headless binary can inspect it.

use std::sync::{Mutex, MutexGuard};

use miterline_core::mesh::MeshBuffers;

use super::{BufferBinding, MeshUploader, buffer_label, buffer_uploads};
use crate::error::GraphicsError;

/// A buffer the dummy backend was asked to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Debug label, `<mesh label>.<attribute>`.
    pub label: String,
    /// Size in bytes.
    pub size: u64,
    /// How the buffer would be bound.
    pub binding: BufferBinding,
}

/// Mesh handle returned by [`DummyBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DummyMesh {
    /// Mesh label.
    pub label: String,
    /// Number of vertices per vertex buffer.
    pub vertex_count: u32,
    /// Number of indices stored.
    pub index_count: u32,
    /// Number of indices a draw call uses.
    pub draw_index_count: u32,
}

/// Dummy upload backend.
#[derive(Debug, Default)]
pub struct DummyBackend {
    uploads: Mutex<Vec<UploadRecord>>,
}

impl DummyBackend {
    /// Create a new dummy backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the backend name.
    pub fn name(&self) -> &'static str {
        "Dummy Backend"
    }

    /// All buffers created so far, in creation order.
    pub fn uploads(&self) -> Vec<UploadRecord> {
        self.records().clone()
    }

    /// Total bytes uploaded so far.
    pub fn uploaded_bytes(&self) -> u64 {
        self.records().iter().map(|record| record.size).sum()
    }

    /// Forget recorded uploads.
    pub fn clear(&self) {
        self.records().clear();
    }

    fn records(&self) -> MutexGuard<'_, Vec<UploadRecord>> {
        // A panic while holding the lock leaves the list itself intact.
        self.uploads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MeshUploader for DummyBackend {
    type Mesh = DummyMesh;

    fn upload(&self, buffers: &MeshBuffers) -> Result<DummyMesh, GraphicsError> {
        let mesh = buffers.to_cpu_mesh();
        let uploads = buffer_uploads(&mesh)?;

        let mut records = self.records();
        for upload in &uploads {
            let record = UploadRecord {
                label: buffer_label(&mesh, upload),
                size: upload.data.len() as u64,
                binding: upload.binding,
            };
            log::trace!(
                "DummyBackend: creating buffer {:?} (size: {}, {:?})",
                record.label,
                record.size,
                record.binding
            );
            records.push(record);
        }

        Ok(DummyMesh {
            label: mesh.label().unwrap_or("mesh").to_string(),
            vertex_count: mesh.vertex_count(),
            index_count: mesh.index_count(),
            draw_index_count: mesh.draw_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miterline_core::path::Path;

    #[test]
    fn test_dummy_backend_name() {
        assert_eq!(DummyBackend::new().name(), "Dummy Backend");
    }

    #[test]
    fn test_upload_demo_path() {
        let backend = DummyBackend::new();
        let mesh = backend
            .upload(&MeshBuffers::from_path(&Path::demo()))
            .unwrap();

        assert_eq!(mesh.vertex_count, 10);
        assert_eq!(mesh.index_count, 30);
        assert_eq!(mesh.draw_index_count, 24);

        let uploads = backend.uploads();
        assert_eq!(uploads.len(), 5);
        assert_eq!(uploads[0].size, 10 * 12);
        assert_eq!(uploads[1].size, 10 * 4);
        assert_eq!(uploads[4].size, 30 * 2);
        assert_eq!(backend.uploaded_bytes(), 120 + 40 + 120 + 120 + 60);
    }

    #[test]
    fn test_clear() {
        let backend = DummyBackend::new();
        backend
            .upload(&MeshBuffers::from_path(&Path::demo()))
            .unwrap();
        backend.clear();
        assert!(backend.uploads().is_empty());
    }
}
