//! # Miterline Graphics
//!
//! The GPU-facing half of the thick line renderer.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`shader`] - Shader program trait and a naga-backed GLSL implementation
//! - [`uniforms`] - The `LineUniforms` block and line style
//! - [`backend`] - Mesh upload: a recording dummy backend and a wgpu backend
//!
//! Geometry comes from `miterline-core`; the main mesh types are
//! re-exported here.
//!
//! ## Example
//!
//! ```
//! use miterline_graphics::backend::MeshUploader;
//! use miterline_graphics::{DummyBackend, MeshBuffers, Path};
//!
//! let backend = DummyBackend::new();
//! let mesh = backend.upload(&MeshBuffers::from_path(&Path::demo())).unwrap();
//! assert_eq!(mesh.draw_index_count, 24);
//! ```

pub mod backend;
pub mod error;
pub mod shader;
pub mod uniforms;

// Re-export main types for convenience
#[cfg(feature = "dummy")]
pub use backend::dummy::DummyBackend;
pub use backend::MeshUploader;
pub use error::GraphicsError;
pub use miterline_core::mesh::{CpuMesh, MeshBuffers, PolylineAttribute, VertexLayout};
pub use miterline_core::path::Path;
pub use shader::{GlslProgram, ShaderProgram, ShaderSource, ShaderStage, UniformLocation};
pub use uniforms::{LineStyle, LineUniforms};

/// Graphics library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the graphics subsystem.
pub fn init() {
    log::info!("Miterline Graphics v{} initialized", VERSION);
}
