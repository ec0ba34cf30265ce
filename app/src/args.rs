//! Command line arguments.
//!
//! Uses clap for parsing with help text (`--help`) and validation.

use std::path::PathBuf;

use clap::Parser;
use miterline_core::input::KeyCode;
use miterline_core::path::Path;
use miterline_graphics::{GraphicsError, LineStyle, ShaderSource};

use crate::error::AppError;
use crate::input::parse_key_name;

/// Aspect ratio of the 1920x1080 viewer window.
pub const DEFAULT_ASPECT: f32 = 1920.0 / 1080.0;

/// Miterline thick line renderer arguments.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "miterline",
    version,
    about = "Expand a polyline into a thick mitered line mesh",
    long_about = "Expands a polyline into the vertex and index buffers a screen-space \
        thick line shader draws, links the line shaders and uploads the mesh.\n\n\
        Points are given as `x,y[,z]` separated by `;` or newlines. Lines \
        starting with `#` in a path file are comments."
)]
pub struct Args {
    /// Path points, e.g. "0,-1,0; 1,-1,0; 0,0,0"
    #[arg(long, conflicts_with = "path_file")]
    pub points: Option<String>,

    /// Read path points from a file
    #[arg(long, value_name = "FILE")]
    pub path_file: Option<PathBuf>,

    /// Directory containing line.vert and line.frag
    #[arg(long, value_name = "DIR")]
    pub shader_dir: Option<PathBuf>,

    /// Line thickness in normalized device units
    #[arg(long, default_value_t = 0.3)]
    pub thickness: f32,

    /// Use the incoming segment normal at joins instead of a miter
    #[arg(long)]
    pub no_miter: bool,

    /// Viewport aspect ratio (width / height)
    #[arg(long, default_value_t = DEFAULT_ASPECT)]
    pub aspect: f32,

    /// Scene time in seconds used for the frame uniforms
    #[arg(long, default_value_t = 0.0)]
    pub time: f32,

    /// Keys to replay through the input dispatcher, e.g. --press r --press escape
    #[arg(long, value_parser = parse_key_arg)]
    pub press: Vec<KeyCode>,

    /// Print all generated buffers to stdout
    #[arg(long)]
    pub dump: bool,
}

fn parse_key_arg(name: &str) -> Result<KeyCode, String> {
    parse_key_name(name).ok_or_else(|| format!("unknown key '{name}'"))
}

impl Default for Args {
    fn default() -> Self {
        Self {
            points: None,
            path_file: None,
            shader_dir: None,
            thickness: LineStyle::default().thickness,
            no_miter: false,
            aspect: DEFAULT_ASPECT,
            time: 0.0,
            press: Vec::new(),
            dump: false,
        }
    }
}

impl Args {
    /// The path to draw: `--points`, then `--path-file`, then the demo path.
    pub fn path(&self) -> Result<Path, AppError> {
        if let Some(points) = &self.points {
            return Ok(points.parse()?);
        }
        if let Some(file) = &self.path_file {
            let text = std::fs::read_to_string(file).map_err(|source| AppError::Io {
                path: file.clone(),
                source,
            })?;
            return Ok(text.parse()?);
        }
        Ok(Path::demo())
    }

    /// Line appearance from the style flags.
    pub fn style(&self) -> LineStyle {
        LineStyle::default()
            .with_thickness(self.thickness)
            .with_miter(!self.no_miter)
    }

    /// Shader sources from `--shader-dir`, or the bundled shader directory.
    ///
    /// Sources are read from disk so they can be reloaded while running.
    /// Without `--shader-dir`, a binary that no longer sees its source tree
    /// uses the shaders compiled into it.
    pub fn shader_source(&self) -> Result<ShaderSource, GraphicsError> {
        match &self.shader_dir {
            Some(dir) => ShaderSource::from_dir(dir),
            None => source_or_bundled(&ShaderSource::bundled_dir()),
        }
    }
}

fn source_or_bundled(dir: &std::path::Path) -> Result<ShaderSource, GraphicsError> {
    if dir.is_dir() {
        return ShaderSource::from_dir(dir);
    }
    log::warn!(
        "Shader directory {} not found, using built-in shaders (reload disabled)",
        dir.display()
    );
    Ok(ShaderSource::bundled())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["miterline"]).unwrap();
        assert_eq!(args.thickness, 0.3);
        assert!(!args.no_miter);
        assert_eq!(args.aspect, DEFAULT_ASPECT);
        assert_eq!(args.time, 0.0);
        assert!(args.press.is_empty());
        assert_eq!(args.path().unwrap(), Path::demo());
        assert!(args.style().miter);
    }

    #[test]
    fn test_points_argument() {
        let args =
            Args::try_parse_from(["miterline", "--points", "0,0,0; 1,0,0; 1,1"]).unwrap();
        let path = args.path().unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_points_and_file_conflict() {
        let result = Args::try_parse_from([
            "miterline",
            "--points",
            "0,0,0",
            "--path-file",
            "path.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_style_flags() {
        let args =
            Args::try_parse_from(["miterline", "--thickness", "0.1", "--no-miter"]).unwrap();
        let style = args.style();
        assert_eq!(style.thickness, 0.1);
        assert!(!style.miter);
    }

    #[test]
    fn test_press_keys() {
        let args =
            Args::try_parse_from(["miterline", "--press", "r", "--press", "Escape"]).unwrap();
        assert_eq!(args.press, [KeyCode::R, KeyCode::Escape]);
        assert!(Args::try_parse_from(["miterline", "--press", "nope"]).is_err());
    }

    #[test]
    fn test_missing_path_file() {
        let args = Args {
            path_file: Some(PathBuf::from("no/such/path.txt")),
            ..Args::default()
        };
        assert!(matches!(args.path(), Err(AppError::Io { .. })));
    }

    #[test]
    fn test_invalid_points() {
        let args = Args {
            points: Some("1,2,x".to_string()),
            ..Args::default()
        };
        assert!(matches!(args.path(), Err(AppError::Path(_))));
    }

    #[test]
    fn test_default_shader_source_reads_bundled_files() {
        let source = Args::default().shader_source().unwrap();
        assert!(source.paths().is_some());
        assert_eq!(source.vertex, ShaderSource::bundled().vertex);
    }

    #[test]
    fn test_missing_bundled_dir_uses_builtin_shaders() {
        let source = source_or_bundled(std::path::Path::new("no/such/shaders")).unwrap();
        assert!(source.paths().is_none());
        assert_eq!(source.vertex, ShaderSource::bundled().vertex);
        assert_eq!(source.fragment, ShaderSource::bundled().fragment);

        // Reloading keeps the built-in copy.
        let reloaded = source.reload().unwrap();
        assert_eq!(reloaded.vertex, source.vertex);
    }

    #[test]
    fn test_explicit_missing_shader_dir_fails() {
        let args = Args {
            shader_dir: Some(PathBuf::from("no/such/shaders")),
            ..Args::default()
        };
        assert!(args.shader_source().is_err());
    }
}
