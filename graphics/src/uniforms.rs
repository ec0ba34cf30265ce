//! Uniform data for the line shaders.

use miterline_core::math::{SceneTransforms, mat4_to_cols_array_2d};

/// Uniform names the line shaders are expected to declare.
pub const UNIFORM_NAMES: [&str; 7] = [
    "model",
    "view",
    "projection",
    "color",
    "thickness",
    "aspect",
    "miter",
];

/// Appearance of a drawn line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Line width in normalized device units.
    pub thickness: f32,
    /// Miter interior joins instead of using the incoming segment normal.
    pub miter: bool,
    /// RGBA color.
    pub color: [f32; 4],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            thickness: 0.3,
            miter: true,
            color: [0.8, 0.8, 0.8, 1.0],
        }
    }
}

impl LineStyle {
    /// Set the thickness.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        self.thickness = thickness;
        self
    }

    /// Enable or disable mitered joins.
    pub fn with_miter(mut self, miter: bool) -> Self {
        self.miter = miter;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// Contents of the `LineUniforms` block (std140).
///
/// Matrices are column-major. The struct is padded to a multiple of 16
/// bytes so it can be copied straight into a uniform buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub thickness: f32,
    pub aspect: f32,
    /// `1` for mitered joins, `0` otherwise.
    pub miter: i32,
    pub _padding: f32,
}

impl LineUniforms {
    /// Size of the block in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Build the block from frame transforms and a line style.
    pub fn new(transforms: &SceneTransforms, aspect: f32, style: &LineStyle) -> Self {
        Self {
            model: mat4_to_cols_array_2d(&transforms.model),
            view: mat4_to_cols_array_2d(&transforms.view),
            projection: mat4_to_cols_array_2d(&transforms.projection),
            color: style.color,
            thickness: style.thickness,
            aspect,
            miter: i32::from(style.miter),
            _padding: 0.0,
        }
    }

    /// Uniforms for the spinning scene after `elapsed_secs` seconds.
    pub fn for_frame(elapsed_secs: f32, aspect: f32, style: &LineStyle) -> Self {
        Self::new(&SceneTransforms::at(elapsed_secs, aspect), aspect, style)
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
