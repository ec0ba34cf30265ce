//! Shared fixtures for the graphics integration tests.

#![allow(dead_code)]

use miterline_graphics::{MeshBuffers, Path};

/// Initialize logging once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A named test path.
#[derive(Debug, Clone, Copy)]
pub enum Fixture {
    /// The five-point demo path.
    Demo,
    /// A single point; nothing to draw.
    SinglePoint,
    /// Two points; one segment.
    Segment,
    /// A closed square (first point repeated at the end).
    Square,
    /// The longest path 16-bit indices allow.
    Max,
}

impl Fixture {
    pub fn path(self) -> Path {
        let points: Vec<[f32; 3]> = match self {
            Self::Demo => return Path::demo(),
            Self::SinglePoint => vec![[0.5, 0.5, 0.0]],
            Self::Segment => vec![[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
            Self::Square => vec![
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, 0.5, 0.0],
                [-0.5, -0.5, 0.0],
            ],
            Self::Max => (0..Path::MAX_POINTS)
                .map(|i| [i as f32 * 0.001, (i % 2) as f32, 0.0])
                .collect(),
        };
        Path::from_arrays(&points).expect("fixture path is valid")
    }

    pub fn buffers(self) -> MeshBuffers {
        MeshBuffers::from_path(&self.path())
    }
}
