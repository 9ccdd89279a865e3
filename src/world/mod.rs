//! World module - the scene the pipeline draws
//!
//! - Cube objects with pose and Phong material
//! - Render context (objects, camera, light, viewport, shading mode)
//! - RON scene files

mod geometry;
mod scene;
mod scene_file;

pub use geometry::*;
pub use scene::*;
pub use scene_file::*;
