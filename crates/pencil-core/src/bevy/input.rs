//! Input systems: cursor tracking, mouse drag/sketch, keyboard shortcuts.

use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{CursorState, MainCamera, SessionRes, SketchState};

/// Unprojects the cursor into world space via the sandbox camera.
pub fn track_cursor(
    mut cursor: ResMut<CursorState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(screen) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };

    if let Ok(world) = camera.viewport_to_world_2d(camera_transform, screen) {
        cursor.world = Some(world);
    }
}

/// Left button drives both interactions: pressing over a draggable shape
/// starts a drag; pressing over empty space starts a pencil sketch that
/// becomes a fixed polyline on release.
pub fn handle_mouse_input(
    buttons: Res<ButtonInput<MouseButton>>,
    cursor: Res<CursorState>,
    mut session: ResMut<SessionRes>,
    mut sketch: ResMut<SketchState>,
) {
    let point = cursor.world.map(|v| [v.x, v.y]);

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(p) = point {
            if !session.0.attach_mouse(p) {
                sketch.begin(p);
            }
        }
    } else if buttons.pressed(MouseButton::Left) {
        if let Some(p) = point {
            if session.0.is_dragging() {
                session.0.move_mouse(p);
            } else {
                sketch.extend(p);
            }
        }
    }

    if buttons.just_released(MouseButton::Left) {
        session.0.detach_mouse();
        if let Some(points) = sketch.finish() {
            if let Err(err) = session.0.spawn_polyline(points) {
                tracing::warn!(%err, "sketched polyline rejected");
            }
        }
    }
}

/// C spawns a circle, B a box, X clears everything user-spawned,
/// Escape or Q quits.
pub fn handle_keyboard_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<SessionRes>,
    mut exit: MessageWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::KeyC) {
        if let Err(err) = session.0.add_circle() {
            tracing::warn!(%err, "circle spawn rejected");
        }
    }
    if keys.just_pressed(KeyCode::KeyB) {
        if let Err(err) = session.0.add_box() {
            tracing::warn!(%err, "box spawn rejected");
        }
    }
    if keys.just_pressed(KeyCode::KeyX) {
        session.0.clear_dynamic();
    }
    if keys.just_pressed(KeyCode::Escape) || keys.just_pressed(KeyCode::KeyQ) {
        exit.write(AppExit::Success);
    }
}
