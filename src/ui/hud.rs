//! On-screen overlay: scene info, frame stats, status bar

use macroquad::prelude::{draw_rectangle, draw_text, screen_height, screen_width, Color};
use crate::editor::EditorState;
use crate::rasterizer::{FrameStats, Vec4};
use crate::world::RenderContext;

const KEY_HINTS: &str =
    "Tab: select | N: add | Del: remove | M: material | F: shading | V: viewport | P: shot | F5/F9: save/load";

fn fmt_point(p: Vec4) -> String {
    format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z)
}

/// Text lines of the info overlay
pub fn hud_lines(ctx: &RenderContext, state: &EditorState, stats: &FrameStats, fps: f32) -> Vec<String> {
    let settings = &ctx.settings;
    let mut lines = vec![
        format!("{:.0} fps  {} tris  {} px", fps, stats.rasterized, stats.pixels),
        format!(
            "culled {}  clipped {}  dropped {}",
            stats.culled, stats.clipped, stats.unprojectable
        ),
        format!(
            "camera {}  fov {:.0}",
            fmt_point(settings.camera.position),
            settings.camera.fov.to_degrees()
        ),
        format!("light {}", fmt_point(settings.light.position)),
        format!("shading {}", settings.shading.label()),
    ];

    match state.selected.and_then(|i| ctx.objects.get(i).map(|obj| (i, obj))) {
        Some((i, obj)) => lines.push(format!(
            "cube {}/{} at {}  scale {:.2}",
            i + 1,
            ctx.objects.len(),
            fmt_point(obj.position),
            obj.scale.x
        )),
        None => lines.push(format!("no selection ({} cubes)", ctx.objects.len())),
    }
    lines
}

/// Draw the overlay in the top-left corner
pub fn draw_hud(lines: &[String]) {
    let line_h = 18.0;
    let h = lines.len() as f32 * line_h + 8.0;
    draw_rectangle(4.0, 4.0, 340.0, h, Color::from_rgba(20, 20, 25, 180));
    for (i, line) in lines.iter().enumerate() {
        let y = (4.0 + line_h * (i as f32 + 1.0)).floor();
        draw_text(line, 10.0, y, 16.0, Color::from_rgba(220, 220, 220, 255));
    }
}

/// Bottom bar with the status message and key hints
pub fn draw_status_bar(state: &EditorState, now: f64) {
    let (w, h) = (screen_width(), screen_height());
    let bar_h = 22.0;
    let y = h - bar_h;
    draw_rectangle(0.0, y.floor(), w, bar_h, Color::from_rgba(40, 40, 45, 255));

    if let Some(msg) = state.get_status(now) {
        draw_text(msg, 8.0, (y + 15.0).floor(), 16.0, Color::from_rgba(100, 255, 100, 255));
    }

    let hint_width = KEY_HINTS.len() as f32 * 6.0; // Approximate width
    draw_text(
        KEY_HINTS,
        (w - hint_width - 8.0).floor(),
        (y + 15.0).floor(),
        14.0,
        Color::from_rgba(100, 100, 100, 255),
    );
}
