//! CPU-side polyline mesh types.
//!
//! This module turns a [`Path`](crate::path::Path) into GPU-ready data:
//!
//! - [`expand`] - The pure expansion operations (duplicate, relative, indices)
//! - [`MeshBuffers`] - The five flat buffers for one path and their counts
//! - [`VertexLayout`] - Describes the four attribute buffers
//! - [`CpuMesh`] - Raw bytes per buffer slot, ready for upload
//!
//! These types are re-exported by `miterline-graphics` for convenience.

mod buffers;
mod data;
pub mod expand;
mod layout;

pub use buffers::MeshBuffers;
pub use data::{CpuMesh, INDEX_SIZE};
pub use layout::{
    PolylineAttribute, VertexAttribute, VertexAttributeFormat, VertexBufferLayout, VertexLayout,
};
