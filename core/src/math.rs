//! Math type aliases and camera helpers.
//!
//! Path points are plain `f32` vectors; the helpers below build the
//! model/view/projection matrices a line renderer feeds its uniforms with.

pub use nalgebra;

/// 3D vector (f32). Also the type of a path point.
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Vertical field of view used by [`SceneTransforms::at`].
pub const DEFAULT_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

/// Rotation speed of the model around +X, in degrees per second.
pub const MODEL_SPIN_DEG_PER_SEC: f32 = 10.0;

/// Near plane of the default projection.
pub const DEFAULT_Z_NEAR: f32 = 0.1;

/// Far plane of the default projection.
pub const DEFAULT_Z_FAR: f32 = 1000.0;

/// Build a right-handed perspective projection with depth range [0, 1] (wgpu/Vulkan convention).
pub fn perspective_rh(yfov: f32, aspect: f32, znear: f32, zfar: f32) -> Mat4 {
    let f = 1.0 / (yfov / 2.0).tan();
    let nf = 1.0 / (znear - zfar);
    #[rustfmt::skip]
    let result = Mat4::new(
        f / aspect, 0.0,  0.0,              0.0,
        0.0,        f,    0.0,              0.0,
        0.0,        0.0,  zfar * nf,        znear * zfar * nf,
        0.0,        0.0,  -1.0,             0.0,
    );
    result
}

/// Build a translation-only 4x4 matrix.
pub fn translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Build a rotation around the X axis (radians).
pub fn rotation_x(angle: f32) -> Mat4 {
    nalgebra::Rotation3::from_axis_angle(&Vec3::x_axis(), angle).to_homogeneous()
}

/// Convert a 4x4 matrix to a column-major `[[f32; 4]; 4]` array.
pub fn mat4_to_cols_array_2d(m: &Mat4) -> [[f32; 4]; 4] {
    let s = m.as_slice();
    [
        [s[0], s[1], s[2], s[3]],
        [s[4], s[5], s[6], s[7]],
        [s[8], s[9], s[10], s[11]],
        [s[12], s[13], s[14], s[15]],
    ]
}

/// Model, view and projection matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl SceneTransforms {
    /// Transforms of the spinning line scene after `elapsed_secs` seconds.
    ///
    /// The camera sits 3 units back along +Z; the model spins around +X
    /// at [`MODEL_SPIN_DEG_PER_SEC`].
    pub fn at(elapsed_secs: f32, aspect: f32) -> Self {
        let angle = (elapsed_secs * MODEL_SPIN_DEG_PER_SEC).to_radians();
        Self {
            model: rotation_x(angle),
            view: translation(Vec3::new(0.0, 0.0, -3.0)),
            projection: perspective_rh(DEFAULT_FOV_Y, aspect, DEFAULT_Z_NEAR, DEFAULT_Z_FAR),
        }
    }
}
