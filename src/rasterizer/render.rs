//! Frame buffers and scanline triangle fill

use std::path::Path;
use super::lighting::shade;
use super::math::Vec4;
use super::types::{Color, Light, Material, Viewport};

/// Depth value a cleared pixel holds
pub const FAR_DEPTH: f32 = f32::MAX;

/// Color + depth buffers for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u32>, // 0xAARRGGBB, row-major, top row first
    pub zbuffer: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![Color::BLACK.to_argb(); width * height],
            zbuffer: vec![FAR_DEPTH; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
        self.zbuffer.fill(FAR_DEPTH);
    }

    /// The whole buffer as a rectangle
    pub fn bounds(&self) -> Viewport {
        Viewport::new(0, 0, self.width as i32, self.height as i32)
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.zbuffer[y * self.width + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color.to_argb();
        }
    }

    /// Strict less-than depth test; on success stores `z` and returns true.
    /// Equal depth keeps the earlier write.
    pub fn test_and_set_depth(&mut self, x: usize, y: usize, z: f32) -> bool {
        if x < self.width && y < self.height {
            let idx = y * self.width + x;
            if z < self.zbuffer[idx] {
                self.zbuffer[idx] = z;
                return true;
            }
        }
        false
    }

    /// Convert to RGBA bytes (for texture upload), reusing `out`
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for &argb in &self.pixels {
            let c = Color::from_argb(argb);
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    /// Save the color buffer as a PNG image
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), image::ImageError> {
        let mut bytes = Vec::new();
        self.write_rgba(&mut bytes);
        image::save_buffer(
            path,
            &bytes,
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgba8,
        )
    }
}

/// One triangle corner after projection, all attributes bundled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: i32,
    pub y: i32,
    /// Perspective-divided depth (NDC z)
    pub depth: f32,
    /// World-space position for per-pixel lighting
    pub world: Vec4,
}

impl ScreenVertex {
    pub fn new(x: i32, y: i32, depth: f32, world: Vec4) -> Self {
        Self { x, y, depth, world }
    }
}

/// How a covered pixel gets its color
#[derive(Debug, Clone, Copy)]
pub enum FragmentShading<'a> {
    /// Precomputed once per triangle
    Flat(Color),
    /// Evaluated per pixel from the interpolated world position
    Lit {
        normal: Vec4,
        material: &'a Material,
        light: &'a Light,
        eye: Vec4,
    },
}

/// Interpolated attributes at one end of a scanline span
#[derive(Clone, Copy)]
struct SpanEnd {
    x: i32,
    depth: f32,
    world: Vec4,
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn edge_point(from: &ScreenVertex, to: &ScreenVertex, t: f32) -> SpanEnd {
    SpanEnd {
        x: lerp(from.x as f32, to.x as f32, t) as i32,
        depth: lerp(from.depth, to.depth, t),
        world: from.world.lerp(to.world, t),
    }
}

/// Scanline-fill a triangle with depth testing
///
/// Pixels outside the framebuffer or outside `scissor` are discarded.
/// Triangles with zero screen height draw nothing. Returns the number of
/// pixels written.
pub fn fill_triangle(
    fb: &mut Framebuffer,
    mut verts: [ScreenVertex; 3],
    shading: &FragmentShading,
    scissor: Option<&Viewport>,
) -> usize {
    // One sort keeps every attribute attached to its vertex
    verts.sort_by_key(|v| v.y);
    let [v1, v2, v3] = verts;

    // Edge arithmetic in i64: projected coordinates may sit at the i32 limits
    let (y1, y2, y3) = (v1.y as i64, v2.y as i64, v3.y as i64);
    let total_height = y3 - y1;
    if total_height == 0 {
        return 0;
    }

    let clip = match scissor {
        Some(s) => fb.bounds().intersect(s),
        None => fb.bounds(),
    };
    if clip.width == 0 || clip.height == 0 {
        return 0;
    }

    let upper_height = y2 - y1;
    let row_start = v1.y.max(clip.y);
    let row_end = v3.y.min(clip.y + clip.height);

    let mut written = 0;
    for y in row_start..row_end {
        let i = y as i64 - y1;
        let lower = i > upper_height || upper_height == 0;
        let segment_height = if lower { y3 - y2 } else { upper_height };
        let alpha = i as f32 / total_height as f32;
        let beta = (i - if lower { upper_height } else { 0 }) as f32 / segment_height as f32;

        let mut a = edge_point(&v1, &v3, alpha);
        let mut b = if lower {
            edge_point(&v2, &v3, beta)
        } else {
            edge_point(&v1, &v2, beta)
        };
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }

        let span = (b.x as i64 - a.x as i64) as f32;
        let col_start = a.x.max(clip.x);
        let col_end = b.x.min(clip.x + clip.width - 1);
        for x in col_start..=col_end {
            let phi = if b.x == a.x { 1.0 } else { (x as i64 - a.x as i64) as f32 / span };
            let depth = lerp(a.depth, b.depth, phi);

            let (px, py) = (x as usize, y as usize);
            if !fb.test_and_set_depth(px, py, depth) {
                continue;
            }
            let color = match shading {
                FragmentShading::Flat(color) => *color,
                FragmentShading::Lit { normal, material, light, eye } => {
                    let world = a.world.lerp(b.world, phi);
                    shade(world, *normal, material, light, *eye)
                }
            };
            fb.set_pixel(px, py, color);
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::math::Vec3;

    fn sv(x: i32, y: i32, depth: f32) -> ScreenVertex {
        ScreenVertex::new(x, y, depth, Vec4::ORIGIN)
    }

    fn covering_triangle(depth: f32) -> [ScreenVertex; 3] {
        [sv(0, 0, depth), sv(30, 2, depth), sv(5, 30, depth)]
    }

    fn count_color(fb: &Framebuffer, color: Color) -> usize {
        fb.pixels.iter().filter(|&&p| p == color.to_argb()).count()
    }

    #[test]
    fn test_clear_resets_both_buffers() {
        let mut fb = Framebuffer::new(4, 3);
        assert!(fb.test_and_set_depth(1, 1, 0.5));
        fb.set_pixel(1, 1, Color::RED);
        fb.clear(Color::BACKGROUND);
        assert!(fb.pixels.iter().all(|&p| p == 0xFF333333));
        assert!(fb.zbuffer.iter().all(|&z| z == FAR_DEPTH));
    }

    #[test]
    fn test_fill_covers_interior_pixel() {
        let mut fb = Framebuffer::new(40, 40);
        let written = fill_triangle(&mut fb, covering_triangle(0.5), &FragmentShading::Flat(Color::RED), None);
        assert!(written > 0);
        assert_eq!(fb.pixel(10, 10), Some(Color::RED.to_argb()));
        assert_eq!(fb.depth(10, 10), Some(0.5));
        assert_eq!(count_color(&fb, Color::RED), written);
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let tri = covering_triangle(0.25);
        let mut a = Framebuffer::new(40, 40);
        let mut b = Framebuffer::new(40, 40);
        fill_triangle(&mut a, tri, &FragmentShading::Flat(Color::GREEN), None);
        fill_triangle(&mut b, [tri[2], tri[0], tri[1]], &FragmentShading::Flat(Color::GREEN), None);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn test_zero_height_draws_nothing() {
        let mut fb = Framebuffer::new(20, 20);
        let tri = [sv(0, 5, 0.0), sv(10, 5, 0.0), sv(19, 5, 0.0)];
        assert_eq!(fill_triangle(&mut fb, tri, &FragmentShading::Flat(Color::RED), None), 0);
        assert_eq!(count_color(&fb, Color::RED), 0);
    }

    #[test]
    fn test_flat_top_and_flat_bottom() {
        let mut fb = Framebuffer::new(20, 20);
        let flat_top = [sv(2, 2, 0.0), sv(12, 2, 0.0), sv(7, 12, 0.0)];
        assert!(fill_triangle(&mut fb, flat_top, &FragmentShading::Flat(Color::RED), None) > 0);
        let flat_bottom = [sv(7, 2, 0.0), sv(2, 12, 0.0), sv(12, 12, 0.0)];
        assert!(fill_triangle(&mut fb, flat_bottom, &FragmentShading::Flat(Color::BLUE), None) > 0);
    }

    #[test]
    fn test_depth_interpolates_across_triangle() {
        let mut fb = Framebuffer::new(64, 64);
        let tri = [sv(0, 0, 0.0), sv(60, 0, 1.0), sv(0, 60, 0.0)];
        fill_triangle(&mut fb, tri, &FragmentShading::Flat(Color::RED), None);
        let left = fb.depth(1, 10).unwrap_or(FAR_DEPTH);
        let right = fb.depth(40, 10).unwrap_or(FAR_DEPTH);
        assert!(left < right);
        assert!(right <= 1.0);
    }

    #[test]
    fn test_equal_depth_is_idempotent() {
        let tri = covering_triangle(0.5);
        let mut once = Framebuffer::new(40, 40);
        fill_triangle(&mut once, tri, &FragmentShading::Flat(Color::RED), None);

        let mut twice = Framebuffer::new(40, 40);
        fill_triangle(&mut twice, tri, &FragmentShading::Flat(Color::RED), None);
        let second = fill_triangle(&mut twice, tri, &FragmentShading::Flat(Color::GREEN), None);

        // Ties keep the first write
        assert_eq!(second, 0);
        assert_eq!(once.pixels, twice.pixels);
        assert_eq!(once.zbuffer, twice.zbuffer);
    }

    #[test]
    fn test_painter_order_independent() {
        let near = covering_triangle(0.5);
        let far = [sv(2, 0, 0.8), sv(35, 5, 0.8), sv(8, 35, 0.8)];

        let mut ab = Framebuffer::new(40, 40);
        fill_triangle(&mut ab, near, &FragmentShading::Flat(Color::RED), None);
        fill_triangle(&mut ab, far, &FragmentShading::Flat(Color::GREEN), None);

        let mut ba = Framebuffer::new(40, 40);
        fill_triangle(&mut ba, far, &FragmentShading::Flat(Color::GREEN), None);
        fill_triangle(&mut ba, near, &FragmentShading::Flat(Color::RED), None);

        assert_eq!(ab.pixels, ba.pixels);
        assert_eq!(ab.pixel(10, 10), Some(Color::RED.to_argb()));
        assert_eq!(ab.depth(10, 10), Some(0.5));
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let mut fb = Framebuffer::new(20, 10);
        let tri = [sv(i32::MIN, i32::MIN, 0.5), sv(i32::MAX, 0, 0.5), sv(0, i32::MAX, 0.5)];
        let written = fill_triangle(&mut fb, tri, &FragmentShading::Flat(Color::RED), None);
        assert!(written <= 20 * 10);
        assert_eq!(count_color(&fb, Color::RED), written);
    }

    #[test]
    fn test_offscreen_pixels_discarded() {
        let mut fb = Framebuffer::new(10, 10);
        let tri = [sv(-50, -50, 0.0), sv(60, -40, 0.0), sv(0, 60, 0.0)];
        let written = fill_triangle(&mut fb, tri, &FragmentShading::Flat(Color::RED), None);
        assert!(written > 0 && written <= 100);
        assert_eq!(count_color(&fb, Color::RED), written);
    }

    #[test]
    fn test_scissor_limits_writes() {
        let mut fb = Framebuffer::new(40, 40);
        let scissor = Viewport::new(5, 5, 10, 10);
        fill_triangle(&mut fb, [sv(0, 0, 0.0), sv(39, 0, 0.0), sv(0, 39, 0.0)], &FragmentShading::Flat(Color::RED), Some(&scissor));
        for y in 0..40 {
            for x in 0..40 {
                if fb.pixel(x, y) == Some(Color::RED.to_argb()) {
                    assert!(scissor.contains(x as i32, y as i32), "({}, {}) escaped scissor", x, y);
                }
            }
        }
        assert_eq!(fb.pixel(7, 7), Some(Color::RED.to_argb()));
    }

    #[test]
    fn test_lit_shading_uses_world_position() {
        let material = Material {
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ZERO,
            shininess: 1.0,
        };
        let light = Light {
            position: Vec4::point(0.0, 0.0, 0.0),
            color: Vec3::ONE,
            ambient: Vec3::ZERO,
        };
        // A wide floor under a light at its left edge: brightness falls off to the right
        let tri = [
            ScreenVertex::new(0, 0, 0.5, Vec4::point(0.0, -1.0, 0.0)),
            ScreenVertex::new(60, 0, 0.5, Vec4::point(20.0, -1.0, 0.0)),
            ScreenVertex::new(0, 20, 0.5, Vec4::point(0.0, -1.0, -20.0)),
        ];
        let shading = FragmentShading::Lit {
            normal: Vec4::direction(0.0, 1.0, 0.0),
            material: &material,
            light: &light,
            eye: Vec4::point(0.0, 5.0, 0.0),
        };
        let mut fb = Framebuffer::new(64, 24);
        fill_triangle(&mut fb, tri, &shading, None);
        let near = Color::from_argb(fb.pixel(1, 1).unwrap_or(0));
        let far = Color::from_argb(fb.pixel(40, 1).unwrap_or(0));
        assert!(near.r > far.r);
        assert_eq!(near.a, 255);
    }

    #[test]
    fn test_write_rgba_byte_order() {
        let mut fb = Framebuffer::new(1, 1);
        fb.set_pixel(0, 0, Color::new(1, 2, 3));
        let mut bytes = Vec::new();
        fb.write_rgba(&mut bytes);
        assert_eq!(bytes, vec![1, 2, 3, 255]);
    }
}
