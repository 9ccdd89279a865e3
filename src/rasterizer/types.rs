//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::{Vec3, Vec4};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    /// Dark grey clear color
    pub const BACKGROUND: Color = Color { r: 0x33, g: 0x33, b: 0x33, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale unit-range channels to 0-255, clamped. Alpha is always opaque.
    pub fn from_unit_rgb(c: Vec3) -> Self {
        fn channel(v: f32) -> u8 {
            (v * 255.0).clamp(0.0, 255.0) as u8
        }
        Self::new(channel(c.x), channel(c.y), channel(c.z))
    }

    /// Pack as 0xAARRGGBB
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// Phong material coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Reflects the ambient light color
    pub ambient: Vec3,
    /// Base color under direct light
    pub diffuse: Vec3,
    /// Reflects the highlight color
    pub specular: Vec3,
    /// Specular exponent, higher = tighter highlight
    pub shininess: f32,
}

/// Named material recipes applied on top of a base color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialPreset {
    Matte,
    Plastic,
    Shiny,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 3] = [MaterialPreset::Matte, MaterialPreset::Plastic, MaterialPreset::Shiny];

    pub fn label(&self) -> &'static str {
        match self {
            MaterialPreset::Matte => "matte",
            MaterialPreset::Plastic => "plastic",
            MaterialPreset::Shiny => "shiny",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MaterialPreset::Matte => MaterialPreset::Plastic,
            MaterialPreset::Plastic => MaterialPreset::Shiny,
            MaterialPreset::Shiny => MaterialPreset::Matte,
        }
    }

    pub fn build(self, base: Vec3) -> Material {
        match self {
            MaterialPreset::Matte => Material {
                ambient: base,
                diffuse: base,
                specular: Vec3::ZERO,
                shininess: 1.0,
            },
            MaterialPreset::Plastic => Material {
                ambient: base,
                diffuse: base,
                specular: Vec3::splat(0.5),
                shininess: 32.0,
            },
            MaterialPreset::Shiny => Material {
                ambient: base.scale(0.5),
                diffuse: base.scale(0.8),
                specular: Vec3::ONE,
                shininess: 128.0,
            },
        }
    }

    /// Best guess at which preset produced a material
    pub fn classify(material: &Material) -> Self {
        if material.specular == Vec3::ZERO {
            MaterialPreset::Matte
        } else if material.shininess >= 100.0 {
            MaterialPreset::Shiny
        } else {
            MaterialPreset::Plastic
        }
    }
}

impl Material {
    pub fn plastic(base: Vec3) -> Self {
        MaterialPreset::Plastic.build(base)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::plastic(Vec3::new(0.8, 0.8, 0.8))
    }
}

/// Camera state. No orientation: it always looks down -z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec4,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Camera {
    /// Field-of-view limits in degrees
    pub const FOV_RANGE_DEG: (f32, f32) = (10.0, 150.0);

    pub fn fov_range() -> (f32, f32) {
        let (lo, hi) = Self::FOV_RANGE_DEG;
        (lo.to_radians(), hi.to_radians())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec4::ORIGIN,
            fov: 60f32.to_radians(),
        }
    }
}

/// Single point light plus scene-wide ambient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec4,
    pub color: Vec3,
    pub ambient: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec4::point(3.0, 4.0, 0.0),
            color: Vec3::ONE,
            ambient: Vec3::splat(0.2),
        }
    }
}

/// Pixel rectangle inside the framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Overlap with another rectangle (may be empty)
    pub fn intersect(&self, other: &Viewport) -> Viewport {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        Viewport::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Shading mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    /// One lighting evaluation per triangle, at its centroid
    Flat,
    /// One lighting evaluation per covered pixel (position interpolated, face normal)
    #[default]
    PerPixel,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::PerPixel,
            ShadingMode::PerPixel => ShadingMode::Flat,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShadingMode::Flat => "flat",
            ShadingMode::PerPixel => "per-pixel",
        }
    }
}

/// Everything the pipeline reads besides the objects themselves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub camera: Camera,
    #[serde(default)]
    pub light: Light,
    #[serde(default)]
    pub shading: ShadingMode,
    /// Target rectangle and scissor. None = whole framebuffer, no scissor.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

fn default_background() -> Color {
    Color::BACKGROUND
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    100.0
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            camera: Camera::default(),
            light: Light::default(),
            shading: ShadingMode::PerPixel,
            viewport: None,
            background: default_background(),
            near: default_near(),
            far: default_far(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_layout() {
        let c = Color::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_argb(), 0xFF123456);
        assert_eq!(Color::from_argb(0xFF123456), c);
    }

    #[test]
    fn test_from_unit_rgb_clamps() {
        let c = Color::from_unit_rgb(Vec3::new(2.0, -1.0, 0.5));
        assert_eq!(c, Color::new(255, 0, 127));
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_viewport_intersect() {
        let a = Viewport::new(0, 0, 100, 100);
        let b = Viewport::new(50, 80, 100, 100);
        assert_eq!(a.intersect(&b), Viewport::new(50, 80, 50, 20));
        let c = Viewport::new(200, 200, 10, 10);
        assert_eq!(a.intersect(&c).width, 0);
    }

    #[test]
    fn test_preset_cycle_and_classify() {
        for preset in MaterialPreset::ALL {
            let m = preset.build(Vec3::new(1.0, 0.0, 0.0));
            assert_eq!(MaterialPreset::classify(&m), preset);
        }
        assert_eq!(MaterialPreset::Shiny.next(), MaterialPreset::Matte);
    }
}
