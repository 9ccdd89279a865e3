//! Immediate-mode overlay drawn on top of the blitted framebuffer

mod hud;

pub use hud::*;
