//! Frame orchestration
//!
//! Per frame: clear, build camera matrices, then for each instance
//! transform to view space, clip against the near plane, back-face cull,
//! project, map to the viewport and rasterize.

use super::clip::{clip_near, ClipVertex};
use super::lighting::shade;
use super::math::Mat4;
use super::mesh::Mesh;
use super::render::{fill_triangle, FragmentShading, Framebuffer, ScreenVertex};
use super::transform::{perspective, view_matrix};
use super::types::{Material, RenderSettings, ShadingMode, Viewport};

/// |w| below this is treated as unprojectable
const W_EPSILON: f32 = 1e-6;

/// Projected pixel coordinates are clamped to +/- this before snapping
const SCREEN_LIMIT: f32 = (1 << 24) as f32;

/// One mesh placed in the world
#[derive(Debug, Clone, Copy)]
pub struct Instance<'a> {
    pub mesh: &'a Mesh<'a>,
    pub model: Mat4,
    pub material: &'a Material,
}

/// What happened to the geometry of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    /// Faces entirely behind the near plane
    pub clipped: usize,
    pub culled: usize,
    /// Triangles dropped by the w guard
    pub unprojectable: usize,
    pub rasterized: usize,
    pub pixels: usize,
}

impl FrameStats {
    pub fn accumulate(&mut self, other: &FrameStats) {
        self.faces += other.faces;
        self.clipped += other.clipped;
        self.culled += other.culled;
        self.unprojectable += other.unprojectable;
        self.rasterized += other.rasterized;
        self.pixels += other.pixels;
    }
}

/// Camera matrices and viewport mapping shared by every instance in a frame
struct FrameSetup {
    view: Mat4,
    projection: Mat4,
    viewport: Viewport,
    scissor: Option<Viewport>,
    near_z: f32,
}

impl FrameSetup {
    fn new(fb: &Framebuffer, settings: &RenderSettings) -> Self {
        let viewport = settings.viewport.unwrap_or_else(|| fb.bounds());
        Self {
            view: view_matrix(settings.camera.position),
            projection: perspective(settings.camera.fov, viewport.aspect(), settings.near, settings.far),
            viewport,
            scissor: settings.viewport,
            near_z: -settings.near,
        }
    }

    /// View space to pixel coordinates. None if w is too close to zero.
    fn project(&self, v: &ClipVertex) -> Option<ScreenVertex> {
        let clip = self.projection * v.view;
        if clip.w.abs() < W_EPSILON {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let ndc_z = clip.z / clip.w;

        // Screen rows grow downward, NDC y grows upward
        let vp = &self.viewport;
        let sx = (ndc_x + 1.0) * 0.5 * vp.width as f32 + vp.x as f32;
        let sy = (1.0 - ndc_y) * 0.5 * vp.height as f32 + vp.y as f32;
        let snap = |s: f32| s.floor().clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i32;
        Some(ScreenVertex::new(snap(sx), snap(sy), ndc_z, v.world))
    }
}

/// Render a whole frame: clears `fb`, then draws every instance
pub fn render_frame<'a, I>(fb: &mut Framebuffer, settings: &RenderSettings, instances: I) -> FrameStats
where
    I: IntoIterator<Item = Instance<'a>>,
{
    fb.clear(settings.background);

    let setup = FrameSetup::new(fb, settings);
    let mut stats = FrameStats::default();
    let mut scratch = Scratch::default();
    for instance in instances {
        let s = draw_instance(fb, settings, &setup, &instance, &mut scratch);
        stats.accumulate(&s);
    }
    stats
}

/// Reused per-frame buffers
#[derive(Default)]
struct Scratch {
    vertices: Vec<ClipVertex>,
    clipped: Vec<ClipVertex>,
}

fn draw_instance(
    fb: &mut Framebuffer,
    settings: &RenderSettings,
    setup: &FrameSetup,
    instance: &Instance,
    scratch: &mut Scratch,
) -> FrameStats {
    let mut stats = FrameStats::default();

    scratch.vertices.clear();
    scratch.vertices.extend(instance.mesh.vertices.iter().map(|&local| {
        let world = instance.model * local;
        ClipVertex::new(setup.view * world, world)
    }));

    let eye = settings.camera.position;
    for face in instance.mesh.faces {
        stats.faces += 1;
        let tri = face.map(|i| scratch.vertices[i]);

        scratch.clipped.clear();
        if clip_near(&tri, setup.near_z, &mut scratch.clipped) == 0 {
            stats.clipped += 1;
            continue;
        }

        for corners in scratch.clipped.chunks_exact(3) {
            let (a, b, c) = (&corners[0], &corners[1], &corners[2]);

            // Camera sits at the view-space origin
            let view_normal = (b.view - a.view).cross(c.view - a.view).normalized();
            if view_normal.dot(-a.view) <= 0.0 {
                stats.culled += 1;
                continue;
            }

            let screen = match (setup.project(a), setup.project(b), setup.project(c)) {
                (Some(sa), Some(sb), Some(sc)) => [sa, sb, sc],
                _ => {
                    stats.unprojectable += 1;
                    continue;
                }
            };

            let world_normal = (b.world - a.world).cross(c.world - a.world).normalized();
            let shading = match settings.shading {
                ShadingMode::Flat => {
                    let centroid = ((a.world + b.world + c.world) * (1.0 / 3.0)).as_point();
                    FragmentShading::Flat(shade(centroid, world_normal, instance.material, &settings.light, eye))
                }
                ShadingMode::PerPixel => FragmentShading::Lit {
                    normal: world_normal,
                    material: instance.material,
                    light: &settings.light,
                    eye,
                },
            };

            stats.rasterized += 1;
            stats.pixels += fill_triangle(fb, screen, &shading, setup.scissor.as_ref());
        }
    }
    stats
}
