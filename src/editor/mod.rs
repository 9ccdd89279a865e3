//! Scene editor
//!
//! Keyboard-driven editing of the render context between frames:
//! - Select, add, delete, move, rotate and scale cubes
//! - Cycle material presets
//! - Fly the camera, move the light, change the field of view
//! - Shading mode and inset viewport toggles

mod state;
mod actions;
mod input;

pub use state::*;
pub use actions::*;
pub use input::*;
