//! Scanline Cubes: CPU software renderer for cube scenes
//!
//! Every pixel is produced on the CPU:
//! - Perspective projection with near-plane clipping
//! - Scanline triangle fill with a depth buffer
//! - Phong lighting, flat or per pixel
//!
//! The finished framebuffer is uploaded as a texture and blitted to the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod world;
mod editor;
mod ui;
mod config;
mod app;

use macroquad::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;
use rasterizer::{HEIGHT, WIDTH};
use app::AppState;
use config::AppConfig;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Scanline Cubes v{}", VERSION),
        window_width: WIDTH as i32,
        window_height: HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_args(std::env::args());
    info!(
        scene = %config.scene_path.display(),
        shots = %config.screenshot_dir.display(),
        flat = config.flat,
        "Starting Scanline Cubes v{}",
        VERSION
    );

    let mut app = AppState::new(config);

    loop {
        let now = get_time();
        let dt = get_frame_time();

        let actions = editor::poll_actions(dt);
        app.update(&actions, now);
        if app.quit {
            break;
        }

        app.render(now);

        clear_background(BLACK);
        let texture = Texture2D::from_rgba8(app.fb.width as u16, app.fb.height as u16, &app.rgba);
        texture.set_filter(FilterMode::Nearest);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        if app.editor.show_hud {
            let lines = ui::hud_lines(&app.ctx, &app.editor, &app.stats, get_fps() as f32);
            ui::draw_hud(&lines);
        }
        ui::draw_status_bar(&app.editor, now);

        next_frame().await;
    }

    info!("Exiting");
}
