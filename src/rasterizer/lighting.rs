//! Phong reflection lighting
//!
//! Ambient + Lambert diffuse + mirror-reflection specular, evaluated for a
//! single point light. Positions are world space.

use super::math::{Vec3, Vec4};
use super::types::{Color, Light, Material};

/// Unclamped lighting result in unit range per channel
pub fn light_rgb(point: Vec4, normal: Vec4, material: &Material, light: &Light, eye: Vec4) -> Vec3 {
    let l = (light.position - point).normalized();
    let n = normal.normalized();
    let v = (eye - point).normalized();

    let n_dot_l = n.dot(l);
    let diffuse = n_dot_l.max(0.0);

    // Mirror of L about N
    let r = (n * (2.0 * n_dot_l) - l).normalized();
    let specular = if diffuse > 0.0 {
        r.dot(v).max(0.0).powf(material.shininess)
    } else {
        0.0
    };

    material.ambient.mul_elem(light.ambient)
        + material.diffuse.mul_elem(light.color) * diffuse
        + material.specular.mul_elem(light.color) * specular
}

/// Final display color for a surface point (alpha forced to 255)
pub fn shade(point: Vec4, normal: Vec4, material: &Material, light: &Light, eye: Vec4) -> Color {
    Color::from_unit_rgb(light_rgb(point, normal, material, light, eye))
}
