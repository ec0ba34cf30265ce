//! # Miterline Core
//!
//! GPU-agnostic geometry for thick mitered polylines.
//!
//! A [`Path`](path::Path) is expanded into a quad-strip mesh whose
//! vertices carry their point, a side signal, and both neighbouring
//! points. The vertex shader uses those to push each vertex sideways in
//! screen space and miter the joins.
//!
//! ```
//! use miterline_core::mesh::MeshBuffers;
//! use miterline_core::path::Path;
//!
//! let buffers = MeshBuffers::from_path(&Path::demo());
//! assert_eq!(buffers.draw_index_count(), 24);
//! ```

pub mod input;
pub mod math;
pub mod mesh;
pub mod path;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the core library version.
pub fn init() {
    log::info!("Miterline Core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
