//! CPU software rasterizer
//!
//! Features:
//! - Homogeneous transforms with a symmetric perspective frustum
//! - Sutherland-Hodgman near-plane clipping
//! - Scanline fill with a per-pixel depth test
//! - Phong reflection, flat (per triangle) or per pixel

mod math;
mod transform;
mod types;
mod mesh;
mod lighting;
mod clip;
mod render;
mod pipeline;

pub use math::*;
pub use transform::*;
pub use types::*;
pub use mesh::*;
pub use lighting::*;
pub use clip::*;
pub use render::*;
pub use pipeline::*;

/// Window / framebuffer dimensions
pub const WIDTH: usize = 800;
pub const HEIGHT: usize = 600;
