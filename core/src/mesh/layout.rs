//! Vertex layout definitions for polyline meshes.
//!
//! A polyline mesh keeps each attribute in its own vertex buffer, so the
//! layout has one buffer slot per attribute:
//!
//! | slot / location | attribute  | format   | stride |
//! |-----------------|------------|----------|--------|
//! | 0               | position   | `Float3` | 12     |
//! | 1               | direction  | `Float`  | 4      |
//! | 2               | next       | `Float3` | 12     |
//! | 3               | previous   | `Float3` | 12     |
//!
//! Layouts are shared via `Arc`; every polyline mesh uses the same one.
//!
//! # Example
//!
//! ```
//! use miterline_core::mesh::{PolylineAttribute, VertexLayout};
//!
//! let layout = VertexLayout::polyline();
//! assert_eq!(layout.buffer_count(), 4);
//! assert_eq!(layout.buffer_stride(PolylineAttribute::Direction.location() as usize), 4);
//! ```

use std::sync::Arc;

/// Semantic meaning of a polyline vertex attribute.
///
/// The discriminant order is the shader input location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolylineAttribute {
    /// The path point this vertex was duplicated from.
    Position,
    /// Side of the centerline, `-1.0` or `1.0`.
    Direction,
    /// The following path point (clamped at the last point).
    Next,
    /// The preceding path point (clamped at the first point).
    Previous,
}

impl PolylineAttribute {
    /// All attributes in location order.
    pub const ALL: [Self; 4] = [Self::Position, Self::Direction, Self::Next, Self::Previous];

    /// Shader input location (and buffer slot) of this attribute.
    pub fn location(&self) -> u32 {
        match self {
            Self::Position => 0,
            Self::Direction => 1,
            Self::Next => 2,
            Self::Previous => 3,
        }
    }

    /// Number of `f32` components per vertex.
    pub fn components(&self) -> u32 {
        self.format().components()
    }

    /// Data format of this attribute.
    pub fn format(&self) -> VertexAttributeFormat {
        match self {
            Self::Direction => VertexAttributeFormat::Float,
            Self::Position | Self::Next | Self::Previous => VertexAttributeFormat::Float3,
        }
    }

    /// Name of the matching vertex shader input.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Direction => "direction",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

/// Format of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttributeFormat {
    /// Single 32-bit float.
    Float,
    /// Three 32-bit floats.
    Float3,
}

impl VertexAttributeFormat {
    /// Get the size in bytes of this format.
    pub fn size(&self) -> usize {
        self.components() as usize * std::mem::size_of::<f32>()
    }

    /// Number of scalar components.
    pub fn components(&self) -> u32 {
        match self {
            Self::Float => 1,
            Self::Float3 => 3,
        }
    }
}

/// Describes a single vertex buffer binding. Every buffer advances per vertex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexBufferLayout {
    /// Stride in bytes between consecutive elements.
    pub stride: u32,
}

impl VertexBufferLayout {
    /// Create a new per-vertex buffer layout with the given stride.
    pub fn new(stride: u32) -> Self {
        Self { stride }
    }
}

/// A single vertex attribute description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Semantic meaning of this attribute.
    pub semantic: PolylineAttribute,
    /// Data format of this attribute.
    pub format: VertexAttributeFormat,
    /// Byte offset within the vertex buffer.
    pub offset: u32,
    /// Index of the vertex buffer this attribute reads from.
    pub buffer_index: u32,
}

impl VertexAttribute {
    /// Create a new vertex attribute.
    pub fn new(
        semantic: PolylineAttribute,
        format: VertexAttributeFormat,
        offset: u32,
        buffer_index: u32,
    ) -> Self {
        Self {
            semantic,
            format,
            offset,
            buffer_index,
        }
    }

    /// Create a tightly packed attribute in its own buffer slot.
    pub fn packed(semantic: PolylineAttribute) -> Self {
        Self::new(semantic, semantic.format(), 0, semantic.location())
    }

    /// Shader input location of this attribute.
    pub fn shader_location(&self) -> u32 {
        self.semantic.location()
    }
}

/// Describes the layout of vertex data across one or more buffers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    /// Descriptions of each vertex buffer binding.
    pub buffers: Vec<VertexBufferLayout>,
    /// The vertex attributes, each referencing a buffer by index.
    pub attributes: Vec<VertexAttribute>,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl VertexLayout {
    /// Create a new empty vertex layout.
    pub fn new() -> Self {
        Self {
            buffers: Vec::new(),
            attributes: Vec::new(),
            label: None,
        }
    }

    /// The four-buffer layout of a polyline mesh.
    pub fn polyline() -> Arc<Self> {
        let layout = PolylineAttribute::ALL
            .iter()
            .fold(Self::new(), |layout, attribute| {
                layout
                    .with_buffer(VertexBufferLayout::new(attribute.format().size() as u32))
                    .with_attribute(VertexAttribute::packed(*attribute))
            })
            .with_label("polyline");
        Arc::new(layout)
    }

    /// Add a vertex buffer binding.
    pub fn with_buffer(mut self, buffer: VertexBufferLayout) -> Self {
        self.buffers.push(buffer);
        self
    }

    /// Add a vertex attribute.
    pub fn with_attribute(mut self, attribute: VertexAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of vertex buffers.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Get the stride for a specific buffer.
    pub fn buffer_stride(&self, buffer_index: usize) -> u32 {
        self.buffers
            .get(buffer_index)
            .map(|b| b.stride)
            .unwrap_or(0)
    }

    /// Get an attribute by semantic.
    pub fn get_attribute(&self, semantic: PolylineAttribute) -> Option<&VertexAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.semantic == semantic)
    }

    /// Get all attributes for a specific buffer.
    pub fn attributes_for_buffer(
        &self,
        buffer_index: u32,
    ) -> impl Iterator<Item = &VertexAttribute> {
        self.attributes
            .iter()
            .filter(move |attr| attr.buffer_index == buffer_index)
    }

    /// Validate the layout (check that all attributes reference valid buffers).
    pub fn validate(&self) -> Result<(), String> {
        for attr in &self.attributes {
            if attr.buffer_index as usize >= self.buffers.len() {
                return Err(format!(
                    "Attribute {:?} references buffer {} but only {} buffers defined",
                    attr.semantic,
                    attr.buffer_index,
                    self.buffers.len()
                ));
            }
            let stride = self.buffer_stride(attr.buffer_index as usize);
            if attr.offset as usize + attr.format.size() > stride as usize {
                return Err(format!(
                    "Attribute {:?} ends at byte {} past the buffer stride {}",
                    attr.semantic,
                    attr.offset as usize + attr.format.size(),
                    stride
                ));
            }
        }
        Ok(())
    }
}

impl Default for VertexLayout {
    fn default() -> Self {
        Self::new()
    }
}
