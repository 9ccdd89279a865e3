//! Scene objects
//!
//! Every object is an instance of the shared unit cube with its own pose
//! and material.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{model_matrix, Instance, Mat4, Material, MaterialPreset, Vec3, Vec4, CUBE};

/// A cube placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub position: Vec4,
    /// Euler angles in radians (x, y, z). The model matrix uses x and y.
    #[serde(default)]
    pub rotation: Vec4,
    /// Uniform scale in `x`
    #[serde(default = "unit_scale")]
    pub scale: Vec4,
    #[serde(default)]
    pub material: Material,
}

fn unit_scale() -> Vec4 {
    Vec4::new(1.0, 1.0, 1.0, 1.0)
}

impl SceneObject {
    pub fn cube(position: Vec4, material: Material) -> Self {
        Self {
            position,
            rotation: Vec4::ZERO,
            scale: unit_scale(),
            material,
        }
    }

    pub fn with_rotation(mut self, x: f32, y: f32) -> Self {
        self.rotation = Vec4::new(x, y, 0.0, 0.0);
        self
    }

    pub fn with_scale(mut self, s: f32) -> Self {
        self.scale = Vec4::new(s, s, s, 1.0);
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        model_matrix(self.position, self.rotation, self.scale)
    }

    /// What the pipeline draws for this object
    pub fn instance(&self) -> Instance<'_> {
        Instance {
            mesh: &CUBE,
            model: self.model_matrix(),
            material: &self.material,
        }
    }

    /// Color the material's preset was built from
    pub fn base_color(&self) -> Vec3 {
        match MaterialPreset::classify(&self.material) {
            MaterialPreset::Shiny => self.material.diffuse.scale(1.25),
            _ => self.material.diffuse,
        }
    }
}
