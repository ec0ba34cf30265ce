//! Shader program abstraction.
//!
//! The line renderer needs very little from its shader program: the two
//! GLSL stages are registered, the program is linked, and uniform names
//! are resolved to locations the caller can write to.
//!
//! # Overview
//!
//! - [`ShaderProgram`] - The collaborator trait the renderer talks to
//! - [`GlslProgram`] - Implementation backed by naga's GLSL front-end
//! - [`ShaderSource`] - Vertex and fragment text, optionally tied to files
//! - [`load_program`] - Register both stages and link in one call
//!
//! # Example
//!
//! ```
//! use miterline_graphics::shader::{GlslProgram, ShaderProgram, ShaderSource, load_program};
//!
//! let mut program = GlslProgram::new();
//! load_program(&mut program, &ShaderSource::bundled(), false).unwrap();
//! assert!(program.uniform_location("thickness").is_some());
//! ```

mod glsl;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::GraphicsError;

pub use glsl::GlslProgram;

/// File name of the bundled vertex shader.
pub const VERTEX_FILE_NAME: &str = "line.vert";

/// File name of the bundled fragment shader.
pub const FRAGMENT_FILE_NAME: &str = "line.frag";

const BUNDLED_VERTEX: &str = include_str!("../../shaders/line.vert");
const BUNDLED_FRAGMENT: &str = include_str!("../../shaders/line.frag");

/// Programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Fragment => write!(f, "fragment"),
        }
    }
}

/// Where a uniform lives once the program is linked.
///
/// Uniforms are members of a uniform block, so a location is the block's
/// bind group and binding plus the member's byte offset inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation {
    /// Bind group (`set` in GLSL).
    pub group: u32,
    /// Binding within the group.
    pub binding: u32,
    /// Byte offset of the member inside its block.
    pub offset: u32,
}

/// A linkable shader program.
pub trait ShaderProgram {
    /// Compile one stage and keep it until the next link.
    ///
    /// A stage that fails to compile leaves any previously registered
    /// source for that stage untouched.
    fn register_shader(&mut self, stage: ShaderStage, source: &str) -> Result<(), GraphicsError>;

    /// Link the registered stages into the active program.
    ///
    /// If a program is already linked and `erase_if_program_registered` is
    /// false this fails with [`GraphicsError::ProgramAlreadyRegistered`].
    /// A failed link keeps the previous program active.
    fn register_program(&mut self, erase_if_program_registered: bool)
    -> Result<(), GraphicsError>;

    /// Resolve a uniform by name in the active program.
    fn uniform_location(&self, name: &str) -> Option<UniformLocation>;

    /// Whether a program has been linked.
    fn is_linked(&self) -> bool;
}

/// Vertex and fragment shader text.
///
/// Sources read with [`from_files`](Self::from_files) remember their paths
/// so they can be re-read with [`reload`](Self::reload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex shader GLSL.
    pub vertex: String,
    /// Fragment shader GLSL.
    pub fragment: String,
    files: Option<(PathBuf, PathBuf)>,
}

impl ShaderSource {
    /// Create a source from in-memory text.
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            files: None,
        }
    }

    /// The shaders compiled into this crate.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_VERTEX, BUNDLED_FRAGMENT)
    }

    /// Directory holding the bundled shader files in the source tree.
    pub fn bundled_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders")
    }

    /// Read both stages from disk.
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, GraphicsError> {
        let vertex_path = vertex_path.as_ref();
        let fragment_path = fragment_path.as_ref();
        Ok(Self {
            vertex: read_source(vertex_path)?,
            fragment: read_source(fragment_path)?,
            files: Some((vertex_path.to_path_buf(), fragment_path.to_path_buf())),
        })
    }

    /// Read `line.vert` and `line.frag` from a directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, GraphicsError> {
        let dir = dir.as_ref();
        Self::from_files(dir.join(VERTEX_FILE_NAME), dir.join(FRAGMENT_FILE_NAME))
    }

    /// Paths the source was read from, if any.
    pub fn paths(&self) -> Option<(&Path, &Path)> {
        self.files
            .as_ref()
            .map(|(vertex, fragment)| (vertex.as_path(), fragment.as_path()))
    }

    /// Re-read the files this source came from.
    ///
    /// In-memory sources have nothing to re-read and are returned as is.
    pub fn reload(&self) -> Result<Self, GraphicsError> {
        match &self.files {
            Some((vertex, fragment)) => Self::from_files(vertex, fragment),
            None => Ok(self.clone()),
        }
    }

    /// Source text for one stage.
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

fn read_source(path: &Path) -> Result<String, GraphicsError> {
    fs::read_to_string(path)
        .map_err(|e| GraphicsError::ShaderLoadFailed(format!("{}: {e}", path.display())))
}

/// Register both stages of `source` and link them.
///
/// Every failure is logged before it is returned, so a caller that only
/// wants to keep running on the old program can ignore the result.
pub fn load_program<P: ShaderProgram + ?Sized>(
    program: &mut P,
    source: &ShaderSource,
    erase_if_program_registered: bool,
) -> Result<(), GraphicsError> {
    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        if let Err(e) = program.register_shader(stage, source.stage(stage)) {
            log::error!("Failed to register {stage} shader: {e}");
            return Err(e);
        }
    }

    if let Err(e) = program.register_program(erase_if_program_registered) {
        log::error!("Failed to link shader program: {e}");
        return Err(e);
    }

    log::info!("Shader program linked");
    Ok(())
}
