//! Application state
//!
//! Owns the render context, the editor state and the framebuffer, and
//! carries out the file work the editor asks for.

use tracing::{debug, error, info, warn};
use crate::config::AppConfig;
use crate::editor::{apply_action, EditorAction, EditorRequest, EditorState};
use crate::rasterizer::{FrameStats, Framebuffer, ShadingMode, HEIGHT, WIDTH};
use crate::world::{load_scene, save_scene, RenderContext, SceneFileError};

/// Seconds between debug frame-stat log lines
const STATS_LOG_INTERVAL: f64 = 5.0;

/// Load the scene file, or fall back to the built-in scene
pub fn load_or_default(config: &AppConfig) -> RenderContext {
    let path = &config.scene_path;
    let mut ctx = match load_scene(path) {
        Ok(ctx) => {
            info!(path = %path.display(), objects = ctx.objects.len(), "Loaded scene");
            ctx
        }
        Err(SceneFileError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Scene file not found, using default scene");
            RenderContext::default()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to load scene, using default scene");
            RenderContext::default()
        }
    };
    if config.flat {
        ctx.settings.shading = ShadingMode::Flat;
    }
    ctx
}

pub struct AppState {
    pub config: AppConfig,
    pub ctx: RenderContext,
    pub editor: EditorState,
    pub fb: Framebuffer,
    /// RGBA bytes handed to the window texture
    pub rgba: Vec<u8>,
    /// Stats of the last rendered frame
    pub stats: FrameStats,
    pub screenshot_index: u32,
    pub quit: bool,
    last_stats_log: f64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let ctx = load_or_default(&config);
        let editor = EditorState::new(ctx.objects.len());
        Self {
            config,
            ctx,
            editor,
            fb: Framebuffer::new(WIDTH, HEIGHT),
            rgba: Vec::with_capacity(WIDTH * HEIGHT * 4),
            stats: FrameStats::default(),
            screenshot_index: 0,
            quit: false,
            last_stats_log: 0.0,
        }
    }

    /// Apply this frame's editor actions and any requests they produce
    pub fn update(&mut self, actions: &[EditorAction], now: f64) {
        for &action in actions {
            if let Some(request) = apply_action(&mut self.ctx, &mut self.editor, action, now) {
                self.handle_request(request, now);
            }
        }
    }

    /// Render into the framebuffer and refresh the RGBA copy
    pub fn render(&mut self, now: f64) {
        self.stats = self.ctx.render(&mut self.fb);
        self.fb.write_rgba(&mut self.rgba);

        if now - self.last_stats_log >= STATS_LOG_INTERVAL {
            self.last_stats_log = now;
            let s = &self.stats;
            debug!(
                faces = s.faces,
                clipped = s.clipped,
                culled = s.culled,
                unprojectable = s.unprojectable,
                rasterized = s.rasterized,
                pixels = s.pixels,
                "frame"
            );
        }
    }

    pub fn handle_request(&mut self, request: EditorRequest, now: f64) {
        match request {
            EditorRequest::Screenshot => self.screenshot(now),
            EditorRequest::SaveScene => match save_scene(&self.ctx, &self.config.scene_path) {
                Ok(()) => {
                    info!(path = %self.config.scene_path.display(), "Saved scene");
                    self.editor.set_status(&format!("Saved {}", self.config.scene_path.display()), 2.0, now);
                }
                Err(e) => {
                    error!(path = %self.config.scene_path.display(), error = %e, "Failed to save scene");
                    self.editor.set_status(&format!("Save failed: {}", e), 4.0, now);
                }
            },
            EditorRequest::ReloadScene => match load_scene(&self.config.scene_path) {
                Ok(ctx) => {
                    info!(path = %self.config.scene_path.display(), objects = ctx.objects.len(), "Reloaded scene");
                    self.ctx = ctx;
                    self.editor.clamp_selection(self.ctx.objects.len());
                    self.editor.set_status("Scene reloaded", 2.0, now);
                }
                Err(e) => {
                    error!(path = %self.config.scene_path.display(), error = %e, "Failed to reload scene");
                    self.editor.set_status(&format!("Reload failed: {}", e), 4.0, now);
                }
            },
            EditorRequest::Quit => {
                info!("Quit requested");
                self.quit = true;
            }
        }
    }

    /// Write the current framebuffer to the next free `shot_NNNN.png`
    fn screenshot(&mut self, now: f64) {
        let mut path = self.config.screenshot_path(self.screenshot_index);
        while path.exists() {
            self.screenshot_index += 1;
            path = self.config.screenshot_path(self.screenshot_index);
        }

        if let Err(e) = std::fs::create_dir_all(&self.config.screenshot_dir) {
            error!(dir = %self.config.screenshot_dir.display(), error = %e, "Failed to create screenshot directory");
            self.editor.set_status(&format!("Screenshot failed: {}", e), 4.0, now);
            return;
        }

        match self.fb.save_png(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Saved screenshot");
                self.editor.set_status(&format!("Screenshot {}", path.display()), 2.0, now);
                self.screenshot_index += 1;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to save screenshot");
                self.editor.set_status(&format!("Screenshot failed: {}", e), 4.0, now);
            }
        }
    }
}
