//! Keyboard bindings
//!
//! Held keys produce continuous actions scaled by frame time; pressed keys
//! produce one action each.

use macroquad::input::{is_key_down, is_key_pressed, KeyCode};
use crate::rasterizer::Vec3;
use super::EditorAction;

/// World units per second
const MOVE_SPEED: f32 = 3.0;
/// Radians per second
const TURN_SPEED: f32 = 1.5;
/// Scale factor per second while held
const GROW_RATE: f32 = 1.5;
/// Field-of-view change, radians per second
const FOV_SPEED: f32 = 0.8;

/// Sum of +1/-1 for a pair of held keys
fn axis(neg: KeyCode, pos: KeyCode) -> f32 {
    let mut v = 0.0;
    if is_key_down(neg) {
        v -= 1.0;
    }
    if is_key_down(pos) {
        v += 1.0;
    }
    v
}

/// Poll the keyboard for this frame's actions
pub fn poll_actions(dt: f32) -> Vec<EditorAction> {
    let mut actions = Vec::new();
    let shift_down = is_key_down(KeyCode::LeftShift) || is_key_down(KeyCode::RightShift);

    // Arrows + PageUp/PageDown: selected cube, or the light with Shift
    let arrows = Vec3::new(
        axis(KeyCode::Left, KeyCode::Right),
        axis(KeyCode::PageDown, KeyCode::PageUp),
        axis(KeyCode::Up, KeyCode::Down),
    );
    if arrows != Vec3::ZERO {
        let step = arrows.scale(MOVE_SPEED * dt);
        actions.push(if shift_down {
            EditorAction::MoveLight(step)
        } else {
            EditorAction::MoveSelected(step)
        });
    }

    // Camera (WASD + Q/E)
    let fly = Vec3::new(
        axis(KeyCode::A, KeyCode::D),
        axis(KeyCode::Q, KeyCode::E),
        axis(KeyCode::W, KeyCode::S),
    );
    if fly != Vec3::ZERO {
        actions.push(EditorAction::MoveCamera(fly.scale(MOVE_SPEED * dt)));
    }

    let (pitch, yaw) = (axis(KeyCode::I, KeyCode::K), axis(KeyCode::J, KeyCode::L));
    if pitch != 0.0 || yaw != 0.0 {
        actions.push(EditorAction::RotateSelected {
            x: pitch * TURN_SPEED * dt,
            y: yaw * TURN_SPEED * dt,
        });
    }

    let grow = axis(KeyCode::Minus, KeyCode::Equal);
    if grow != 0.0 {
        actions.push(EditorAction::ScaleSelected(GROW_RATE.powf(grow * dt)));
    }

    let zoom = axis(KeyCode::Z, KeyCode::X);
    if zoom != 0.0 {
        actions.push(EditorAction::ChangeFov(zoom * FOV_SPEED * dt));
    }

    let pressed = [
        (KeyCode::Tab, EditorAction::SelectNext),
        (KeyCode::N, EditorAction::AddCube),
        (KeyCode::Delete, EditorAction::DeleteSelected),
        (KeyCode::Backspace, EditorAction::DeleteSelected),
        (KeyCode::M, EditorAction::CycleMaterial),
        (KeyCode::F, EditorAction::ToggleShading),
        (KeyCode::V, EditorAction::ToggleViewport),
        (KeyCode::H, EditorAction::ToggleHud),
        (KeyCode::P, EditorAction::Screenshot),
        (KeyCode::F5, EditorAction::SaveScene),
        (KeyCode::F9, EditorAction::ReloadScene),
        (KeyCode::Escape, EditorAction::Quit),
    ];
    for (key, action) in pressed {
        if is_key_pressed(key) {
            actions.push(action);
        }
    }

    actions
}
