//! Transform factory
//!
//! Named constructors for every matrix the pipeline uses, so row/column
//! indexing and composition order live in one place.

use super::math::{Mat4, Vec4};

/// Identity with the translation column set
pub fn translate(tx: f32, ty: f32, tz: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m[(0, 3)] = tx;
    m[(1, 3)] = ty;
    m[(2, 3)] = tz;
    m
}

/// Uniform scale, diagonal (s, s, s, 1)
pub fn scale(s: f32) -> Mat4 {
    let mut m = Mat4::IDENTITY;
    m[(0, 0)] = s;
    m[(1, 1)] = s;
    m[(2, 2)] = s;
    m
}

pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m[(1, 1)] = c;
    m[(1, 2)] = -s;
    m[(2, 1)] = s;
    m[(2, 2)] = c;
    m
}

pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m[(0, 0)] = c;
    m[(0, 2)] = s;
    m[(2, 0)] = -s;
    m[(2, 2)] = c;
    m
}

pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    let mut m = Mat4::IDENTITY;
    m[(0, 0)] = c;
    m[(0, 1)] = -s;
    m[(1, 0)] = s;
    m[(1, 1)] = c;
    m
}

/// Symmetric frustum projection (right-handed, camera looks down -z)
///
/// After the divide, view-space z = -near maps to NDC -1 and z = -far to +1.
/// Clip-space w equals the negated view-space z.
pub fn perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let t = (fov / 2.0).tan();
    let mut m = Mat4::ZERO;
    m[(0, 0)] = 1.0 / (aspect * t);
    m[(1, 1)] = 1.0 / t;
    m[(2, 2)] = -(far + near) / (far - near);
    m[(2, 3)] = -(2.0 * far * near) / (far - near);
    m[(3, 2)] = -1.0;
    m
}

/// Object to world: `Translate * RotateY * RotateX * Scale`, so scale applies
/// first and translation last. Only `scale_factors.x` is used.
pub fn model_matrix(position: Vec4, rotation: Vec4, scale_factors: Vec4) -> Mat4 {
    translate(position.x, position.y, position.z)
        * rotate_y(rotation.y)
        * rotate_x(rotation.x)
        * scale(scale_factors.x)
}

/// World to view. The camera has no orientation, so this is the inverse
/// of its translation.
pub fn view_matrix(camera_position: Vec4) -> Mat4 {
    translate(-camera_position.x, -camera_position.y, -camera_position.z)
}
