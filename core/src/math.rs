//! Math type aliases and helper functions.
//!
//! All rendering math is f32 and backed by `nalgebra`.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// 2D unsigned integer vector, used for resolutions and texture dimensions.
pub type UVec2 = nalgebra::Vector2<u32>;

/// 4x4 matrix (f32).
pub type Mat4 = nalgebra::Matrix4<f32>;

/// Build a right-handed perspective projection with depth range [0, 1].
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

/// Build a right-handed orthographic projection with depth range [0, 1].
pub fn orthographic_rh(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    #[rustfmt::skip]
    let result = Mat4::new(
        2.0 / rml, 0.0,       0.0,         -(right + left) / rml,
        0.0,       2.0 / tmb, 0.0,         -(top + bottom) / tmb,
        0.0,       0.0,       -1.0 / fmn,  -near / fmn,
        0.0,       0.0,       0.0,          1.0,
    );
    result
}

/// Right-handed look-at view matrix.
pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    let eye_point = nalgebra::Point3::from(*eye);
    let target_point = nalgebra::Point3::from(*target);
    nalgebra::Isometry3::look_at_rh(&eye_point, &target_point, up).to_homogeneous()
}

/// Build a translation-only 4x4 matrix.
pub fn mat4_from_translation(t: Vec3) -> Mat4 {
    Mat4::new_translation(&t)
}

/// Extract the translation column of an affine matrix.
pub fn mat4_translation(m: &Mat4) -> Vec3 {
    Vec3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)])
}

/// Invert a matrix, falling back to identity for singular input.
pub fn mat4_inverse_or_identity(m: &Mat4) -> Mat4 {
    m.try_inverse().unwrap_or_else(Mat4::identity)
}

/// Transform a point by an affine matrix (w = 1).
pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    m.transform_point(&nalgebra::Point3::from(*p)).coords
}

/// Largest axis scale of an affine matrix.
pub fn max_axis_scale(m: &Mat4) -> f32 {
    let x = Vec3::new(m[(0, 0)], m[(1, 0)], m[(2, 0)]).norm();
    let y = Vec3::new(m[(0, 1)], m[(1, 1)], m[(2, 1)]).norm();
    let z = Vec3::new(m[(0, 2)], m[(1, 2)], m[(2, 2)]).norm();
    x.max(y).max(z)
}
