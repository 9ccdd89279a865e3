//! Render context: the scene plus everything needed to draw it
//!
//! Owned by the frame loop. Only the editor mutates it, and only between
//! frames; the pipeline reads it.

use serde::{Serialize, Deserialize};
use crate::rasterizer::{
    render_frame, FrameStats, Framebuffer, Material, MaterialPreset, RenderSettings, Vec3, Vec4,
};
use super::SceneObject;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderContext {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
    #[serde(default)]
    pub settings: RenderSettings,
}

impl RenderContext {
    pub fn new(objects: Vec<SceneObject>, settings: RenderSettings) -> Self {
        Self { objects, settings }
    }

    /// Draw one frame into `fb`
    pub fn render(&self, fb: &mut Framebuffer) -> FrameStats {
        render_frame(fb, &self.settings, self.objects.iter().map(SceneObject::instance))
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        default_scene()
    }
}

/// A few cubes in front of the camera, lit from the upper right
pub fn default_scene() -> RenderContext {
    let objects = vec![
        SceneObject::cube(
            Vec4::point(-1.5, 0.0, -6.0),
            Material::plastic(Vec3::new(0.9, 0.2, 0.2)),
        )
        .with_rotation(0.4, 0.6),
        SceneObject::cube(
            Vec4::point(1.5, 0.0, -6.0),
            MaterialPreset::Shiny.build(Vec3::new(0.2, 0.8, 0.3)),
        )
        .with_rotation(-0.3, -0.5),
        SceneObject::cube(
            Vec4::point(0.0, 1.5, -9.0),
            MaterialPreset::Matte.build(Vec3::new(0.2, 0.4, 0.9)),
        )
        .with_rotation(0.2, 0.8)
        .with_scale(1.5),
    ];
    RenderContext::new(objects, RenderSettings::default())
}
