//! CPU-side mesh bytes ready for upload.
//!
//! [`CpuMesh`] holds raw vertex bytes per buffer slot, 16-bit index bytes,
//! and the number of indices that may be drawn.

use std::sync::Arc;

use super::layout::VertexLayout;

/// Size in bytes of one index.
pub const INDEX_SIZE: usize = std::mem::size_of::<u16>();

/// A CPU-side indexed triangle-list mesh holding raw vertex and index data.
///
/// # Multi-Buffer Support
///
/// Each buffer slot of the [`VertexLayout`] stores its own byte data.
/// The number of buffers always matches the layout's buffer count.
#[derive(Clone)]
pub struct CpuMesh {
    layout: Arc<VertexLayout>,
    vertex_buffers: Vec<Vec<u8>>,
    vertex_count: u32,
    index_data: Vec<u8>,
    index_count: u32,
    draw_count: u32,
    label: Option<String>,
}

impl CpuMesh {
    /// Create a new empty CpuMesh with the given layout.
    ///
    /// Vertex buffers are initialized as empty vectors matching
    /// the layout's buffer count.
    pub fn new(layout: Arc<VertexLayout>) -> Self {
        let buffer_count = layout.buffer_count();
        Self {
            layout,
            vertex_buffers: vec![Vec::new(); buffer_count],
            vertex_count: 0,
            index_data: Vec::new(),
            index_count: 0,
            draw_count: 0,
            label: None,
        }
    }

    /// Set raw vertex data for a specific buffer slot.
    ///
    /// Vertex count is inferred from the data length and stride.
    pub fn with_vertex_data(mut self, buffer_index: usize, data: Vec<u8>) -> Self {
        let stride = self.layout.buffer_stride(buffer_index) as usize;
        if stride > 0 {
            self.vertex_count = (data.len() / stride) as u32;
        }
        if buffer_index < self.vertex_buffers.len() {
            self.vertex_buffers[buffer_index] = data;
        }
        self
    }

    /// Set index data as u16 indices.
    ///
    /// The draw count defaults to the full index count.
    pub fn with_indices_u16(mut self, indices: &[u16]) -> Self {
        self.index_data = bytemuck::cast_slice(indices).to_vec();
        self.index_count = indices.len() as u32;
        self.draw_count = self.index_count;
        self
    }

    /// Limit the number of indices drawn, clamped to the index count.
    pub fn with_draw_count(mut self, count: u32) -> Self {
        self.draw_count = count.min(self.index_count);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the vertex layout.
    pub fn layout(&self) -> &Arc<VertexLayout> {
        &self.layout
    }

    /// Get raw vertex data for a specific buffer slot.
    pub fn vertex_buffer_data(&self, index: usize) -> Option<&[u8]> {
        self.vertex_buffers.get(index).map(|v| v.as_slice())
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Get the raw index data.
    pub fn index_data(&self) -> &[u8] {
        &self.index_data
    }

    /// Get the number of indices stored.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Get the number of indices to draw.
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// Get the debug label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the number of vertex buffers.
    pub fn buffer_count(&self) -> usize {
        self.vertex_buffers.len()
    }
}

impl std::fmt::Debug for CpuMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuMesh")
            .field("label", &self.label)
            .field("vertex_count", &self.vertex_count)
            .field("buffer_count", &self.vertex_buffers.len())
            .field("index_count", &self.index_count)
            .field("draw_count", &self.draw_count)
            .field("layout", &self.layout.label)
            .finish()
    }
}
