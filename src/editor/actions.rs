//! Scene-editing actions
//!
//! Input is turned into `EditorAction`s; `apply_action` performs the scene
//! edits. Anything that touches files or the window comes back as an
//! `EditorRequest` for the frame loop to carry out.

use tracing::info;
use crate::rasterizer::{Camera, MaterialPreset, Vec3, Vec4, Viewport, HEIGHT, WIDTH};
use crate::world::{RenderContext, SceneObject};
use super::EditorState;

/// Smallest / largest uniform scale
const SCALE_RANGE: (f32, f32) = (0.1, 10.0);
/// Distance in front of the camera where new cubes appear
const SPAWN_DISTANCE: f32 = 5.0;
/// How long status messages stay up (seconds)
const STATUS_SECS: f64 = 2.0;

/// Base colors handed out to new cubes
const PALETTE: [Vec3; 6] = [
    Vec3::new(0.9, 0.2, 0.2),
    Vec3::new(0.2, 0.8, 0.3),
    Vec3::new(0.2, 0.4, 0.9),
    Vec3::new(0.9, 0.8, 0.2),
    Vec3::new(0.8, 0.3, 0.8),
    Vec3::new(0.2, 0.8, 0.8),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorAction {
    SelectNext,
    AddCube,
    DeleteSelected,
    /// World-space offset for the selected cube
    MoveSelected(Vec3),
    /// Radians around x and y
    RotateSelected { x: f32, y: f32 },
    /// Multiplier applied to the uniform scale
    ScaleSelected(f32),
    CycleMaterial,
    MoveCamera(Vec3),
    MoveLight(Vec3),
    /// Radians added to the field of view
    ChangeFov(f32),
    ToggleShading,
    ToggleViewport,
    ToggleHud,
    Screenshot,
    SaveScene,
    ReloadScene,
    Quit,
}

/// Work the frame loop has to do on the editor's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRequest {
    Screenshot,
    SaveScene,
    ReloadScene,
    Quit,
}

/// Centered inset used when the viewport is toggled on
pub fn inset_viewport() -> Viewport {
    let (w, h) = (WIDTH as i32, HEIGHT as i32);
    Viewport::new(w / 4, h / 4, w / 2, h / 2)
}

fn offset(d: Vec3) -> Vec4 {
    Vec4::direction(d.x, d.y, d.z)
}

fn selected_mut<'a>(ctx: &'a mut RenderContext, state: &EditorState) -> Option<&'a mut SceneObject> {
    state.selected.and_then(move |i| ctx.objects.get_mut(i))
}

/// Apply one action. Continuous actions (moves, rotations) stay quiet;
/// discrete ones set a status message and log it.
pub fn apply_action(
    ctx: &mut RenderContext,
    state: &mut EditorState,
    action: EditorAction,
    now: f64,
) -> Option<EditorRequest> {
    let status = |state: &mut EditorState, msg: String| {
        info!(status = %msg, "editor");
        state.set_status(&msg, STATUS_SECS, now);
    };

    match action {
        EditorAction::SelectNext => {
            if ctx.objects.is_empty() {
                state.selected = None;
            } else {
                let next = state.selected.map_or(0, |i| (i + 1) % ctx.objects.len());
                state.selected = Some(next);
                status(state, format!("Selected cube {}/{}", next + 1, ctx.objects.len()));
            }
        }
        EditorAction::AddCube => {
            let camera = ctx.settings.camera.position;
            let position = Vec4::point(camera.x, camera.y, camera.z - SPAWN_DISTANCE);
            let base = PALETTE[state.palette_index % PALETTE.len()];
            state.palette_index += 1;
            ctx.objects.push(SceneObject::cube(position, MaterialPreset::Plastic.build(base)));
            state.selected = Some(ctx.objects.len() - 1);
            status(state, format!("Added cube ({} total)", ctx.objects.len()));
        }
        EditorAction::DeleteSelected => {
            if let Some(i) = state.selected.filter(|&i| i < ctx.objects.len()) {
                ctx.objects.remove(i);
                state.clamp_selection(ctx.objects.len());
                status(state, format!("Removed cube ({} left)", ctx.objects.len()));
            }
        }
        EditorAction::MoveSelected(delta) => {
            if let Some(obj) = selected_mut(ctx, state) {
                obj.position = obj.position + offset(delta);
            }
        }
        EditorAction::RotateSelected { x, y } => {
            if let Some(obj) = selected_mut(ctx, state) {
                obj.rotation.x += x;
                obj.rotation.y += y;
            }
        }
        EditorAction::ScaleSelected(factor) => {
            if let Some(obj) = selected_mut(ctx, state) {
                let s = (obj.scale.x * factor).clamp(SCALE_RANGE.0, SCALE_RANGE.1);
                obj.scale = Vec4::new(s, s, s, 1.0);
            }
        }
        EditorAction::CycleMaterial => {
            if let Some(obj) = selected_mut(ctx, state) {
                let preset = MaterialPreset::classify(&obj.material).next();
                obj.material = preset.build(obj.base_color());
                status(state, format!("Material: {}", preset.label()));
            }
        }
        EditorAction::MoveCamera(delta) => {
            let camera = &mut ctx.settings.camera;
            camera.position = camera.position + offset(delta);
        }
        EditorAction::MoveLight(delta) => {
            let light = &mut ctx.settings.light;
            light.position = light.position + offset(delta);
        }
        EditorAction::ChangeFov(delta) => {
            let camera = &mut ctx.settings.camera;
            let (lo, hi) = Camera::fov_range();
            camera.fov = (camera.fov + delta).clamp(lo, hi);
        }
        EditorAction::ToggleShading => {
            ctx.settings.shading = ctx.settings.shading.toggled();
            let label = ctx.settings.shading.label();
            status(state, format!("Shading: {}", label));
        }
        EditorAction::ToggleViewport => {
            ctx.settings.viewport = match ctx.settings.viewport {
                Some(_) => None,
                None => Some(inset_viewport()),
            };
            let label = if ctx.settings.viewport.is_some() { "inset" } else { "full" };
            status(state, format!("Viewport: {}", label));
        }
        EditorAction::ToggleHud => {
            state.show_hud = !state.show_hud;
        }
        EditorAction::Screenshot => return Some(EditorRequest::Screenshot),
        EditorAction::SaveScene => return Some(EditorRequest::SaveScene),
        EditorAction::ReloadScene => return Some(EditorRequest::ReloadScene),
        EditorAction::Quit => return Some(EditorRequest::Quit),
    }
    None
}
