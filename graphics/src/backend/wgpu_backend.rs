//! wgpu upload backend.
//!
//! Buffers are created on a device owned by the caller's graphics context.

use miterline_core::mesh::{MeshBuffers, VertexAttributeFormat, VertexLayout};
use wgpu::util::DeviceExt;

use super::{BufferBinding, MeshUploader, buffer_label, buffer_uploads};
use crate::error::GraphicsError;
use crate::uniforms::LineUniforms;

/// Uploads polyline meshes to a wgpu device.
#[derive(Debug)]
pub struct WgpuUploader<'a> {
    device: &'a wgpu::Device,
}

impl<'a> WgpuUploader<'a> {
    /// Create an uploader for `device`.
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Vertex buffer layouts matching [`VertexLayout::polyline`].
    pub fn vertex_buffer_layouts() -> WgpuVertexLayouts {
        WgpuVertexLayouts::from_layout(&VertexLayout::polyline())
    }

    /// Create a uniform buffer holding `uniforms`.
    pub fn create_uniform_buffer(&self, uniforms: &LineUniforms) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("LineUniforms"),
                contents: uniforms.as_bytes(),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
    }
}

impl MeshUploader for WgpuUploader<'_> {
    type Mesh = WgpuMesh;

    fn upload(&self, buffers: &MeshBuffers) -> Result<WgpuMesh, GraphicsError> {
        let mesh = buffers.to_cpu_mesh();

        let mut vertex_buffers = Vec::new();
        let mut index_buffer = None;
        for upload in buffer_uploads(&mesh)? {
            let label = buffer_label(&mesh, &upload);
            let usage = match upload.binding {
                BufferBinding::Vertex { .. } => wgpu::BufferUsages::VERTEX,
                BufferBinding::Index => wgpu::BufferUsages::INDEX,
            };
            let buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&label),
                    contents: upload.data,
                    usage,
                });
            match upload.binding {
                BufferBinding::Vertex { .. } => vertex_buffers.push(buffer),
                BufferBinding::Index => index_buffer = Some(buffer),
            }
        }

        let index_buffer = index_buffer.ok_or_else(|| {
            GraphicsError::ResourceCreationFailed("mesh has no index buffer".to_string())
        })?;

        log::debug!(
            "Uploaded {:?}: {} vertex buffers, {} indices ({} drawn)",
            mesh.label(),
            vertex_buffers.len(),
            mesh.index_count(),
            mesh.draw_count()
        );

        Ok(WgpuMesh {
            vertex_buffers,
            index_buffer,
            draw_count: mesh.draw_count(),
        })
    }
}

/// A polyline mesh living in wgpu buffers.
#[derive(Debug)]
pub struct WgpuMesh {
    vertex_buffers: Vec<wgpu::Buffer>,
    index_buffer: wgpu::Buffer,
    draw_count: u32,
}

impl WgpuMesh {
    /// Number of indices drawn.
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    /// Bind the buffers and issue the indexed draw.
    ///
    /// The pipeline and uniform bind group must already be set.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for (slot, buffer) in self.vertex_buffers.iter().enumerate() {
            render_pass.set_vertex_buffer(slot as u32, buffer.slice(..));
        }
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        if self.draw_count > 0 {
            render_pass.draw_indexed(0..self.draw_count, 0, 0..1);
        }
    }
}

/// Owned attribute lists for building `wgpu::VertexBufferLayout`s.
#[derive(Debug, Clone)]
pub struct WgpuVertexLayouts {
    buffers: Vec<(u64, Vec<wgpu::VertexAttribute>)>,
}

impl WgpuVertexLayouts {
    /// Convert a vertex layout.
    pub fn from_layout(layout: &VertexLayout) -> Self {
        let buffers = layout
            .buffers
            .iter()
            .enumerate()
            .map(|(buffer_idx, buffer)| {
                let attributes = layout
                    .attributes_for_buffer(buffer_idx as u32)
                    .map(|attr| wgpu::VertexAttribute {
                        format: convert_vertex_format(attr.format),
                        offset: attr.offset as u64,
                        shader_location: attr.shader_location(),
                    })
                    .collect();
                (buffer.stride as u64, attributes)
            })
            .collect();
        Self { buffers }
    }

    /// Layouts to pass to `wgpu::VertexState::buffers`.
    pub fn layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.buffers
            .iter()
            .map(|(stride, attributes)| wgpu::VertexBufferLayout {
                array_stride: *stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes,
            })
            .collect()
    }
}

fn convert_vertex_format(format: VertexAttributeFormat) -> wgpu::VertexFormat {
    match format {
        VertexAttributeFormat::Float => wgpu::VertexFormat::Float32,
        VertexAttributeFormat::Float3 => wgpu::VertexFormat::Float32x3,
    }
}
