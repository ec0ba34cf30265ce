//! Graphics error types.

use std::fmt;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// A shader source file could not be read.
    ShaderLoadFailed(String),
    /// A shader failed to parse or validate.
    ShaderCompilationFailed(String),
    /// The program was used before both stages were registered and linked.
    ProgramNotLinked,
    /// A program is already linked and replacing it was not allowed.
    ProgramAlreadyRegistered,
    /// Failed to create a GPU resource.
    ResourceCreationFailed(String),
    /// An invalid parameter was provided.
    InvalidParameter(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderLoadFailed(msg) => write!(f, "shader load failed: {msg}"),
            Self::ShaderCompilationFailed(msg) => write!(f, "shader compilation failed: {msg}"),
            Self::ProgramNotLinked => write!(f, "shader program is not linked"),
            Self::ProgramAlreadyRegistered => {
                write!(f, "shader program already registered, erase not allowed")
            }
            Self::ResourceCreationFailed(msg) => write!(f, "resource creation failed: {msg}"),
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}
