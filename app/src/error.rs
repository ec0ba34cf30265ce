//! Application error type.

use std::fmt;
use std::path::PathBuf;

use miterline_core::path::PathError;
use miterline_graphics::GraphicsError;

/// Errors surfaced by the miterline driver.
#[derive(Debug)]
pub enum AppError {
    /// A path file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The path description was invalid.
    Path(PathError),
    /// Shader or upload failure.
    Graphics(GraphicsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Path(e) => write!(f, "invalid path: {e}"),
            Self::Graphics(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Path(e) => Some(e),
            Self::Graphics(e) => Some(e),
        }
    }
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        Self::Path(e)
    }
}

impl From<GraphicsError> for AppError {
    fn from(e: GraphicsError) -> Self {
        Self::Graphics(e)
    }
}
