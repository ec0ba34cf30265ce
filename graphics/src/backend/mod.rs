//! GPU buffer upload.
//!
//! A polyline mesh becomes four vertex buffers (one per attribute) and one
//! `u16` index buffer. Backends implement [`MeshUploader`] to turn
//! [`MeshBuffers`] into their own mesh handle.
//!
//! # Available Backends
//!
//! - `dummy` (default): Records uploads without touching a GPU
//! - `wgpu-backend` (default): Creates wgpu buffers on a caller-provided device

#[cfg(feature = "dummy")]
pub mod dummy;

#[cfg(feature = "wgpu-backend")]
pub mod wgpu_backend;

use miterline_core::mesh::{CpuMesh, MeshBuffers};

use crate::error::GraphicsError;

/// Turns mesh buffers into a backend mesh.
pub trait MeshUploader {
    /// The uploaded mesh handle.
    type Mesh;

    /// Upload all five buffers of a polyline.
    ///
    /// A one-point path uploads normally and draws zero indices.
    fn upload(&self, buffers: &MeshBuffers) -> Result<Self::Mesh, GraphicsError>;
}

/// What a buffer is bound as when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferBinding {
    /// Vertex buffer in the given slot.
    Vertex { slot: u32 },
    /// 16-bit index buffer.
    Index,
}

/// One buffer to create, borrowed from a [`CpuMesh`].
#[derive(Debug, Clone, Copy)]
pub struct BufferUpload<'a> {
    /// Attribute name, or `"indices"`.
    pub name: &'static str,
    /// How the buffer is bound.
    pub binding: BufferBinding,
    /// Raw contents.
    pub data: &'a [u8],
}

/// List the buffers of a mesh in binding order, vertex slots first.
///
/// Fails if the layout is inconsistent or a slot has no data.
pub fn buffer_uploads(mesh: &CpuMesh) -> Result<Vec<BufferUpload<'_>>, GraphicsError> {
    let layout = mesh.layout();
    layout.validate().map_err(GraphicsError::InvalidParameter)?;

    let mut uploads = Vec::with_capacity(layout.buffer_count() + 1);
    for slot in 0..layout.buffer_count() {
        let name = layout
            .attributes_for_buffer(slot as u32)
            .next()
            .map(|attribute| attribute.semantic.name())
            .unwrap_or("unused");
        let data = mesh
            .vertex_buffer_data(slot)
            .filter(|data| !data.is_empty())
            .ok_or_else(|| {
                GraphicsError::ResourceCreationFailed(format!(
                    "vertex buffer slot {slot} ({name}) has no data"
                ))
            })?;
        uploads.push(BufferUpload {
            name,
            binding: BufferBinding::Vertex { slot: slot as u32 },
            data,
        });
    }

    uploads.push(BufferUpload {
        name: "indices",
        binding: BufferBinding::Index,
        data: mesh.index_data(),
    });
    Ok(uploads)
}

/// Debug label for one buffer of a mesh.
pub(crate) fn buffer_label(mesh: &CpuMesh, upload: &BufferUpload<'_>) -> String {
    format!("{}.{}", mesh.label().unwrap_or("mesh"), upload.name)
}
