//! Gizmo-backed rendering and camera fitting.
//!
//! `Gizmos` implements the crate's [`DrawBackend`], so the frame renderer
//! stays ignorant of Bevy.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{MainCamera, SessionRes, SketchState};
use crate::binding::Pose;
use crate::render::{self, DrawBackend};
use crate::session::{WORLD_MAX, WORLD_MIN};

fn to_bevy_color(color: render::Color) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, color.a)
}

impl DrawBackend for Gizmos<'_, '_> {
    fn draw_circle(&mut self, pose: Pose, radius: f32, color: render::Color) {
        let isometry = Isometry2d::new(
            Vec2::from(pose.translation),
            Rot2::radians(pose.rotation),
        );
        self.circle_2d(isometry, radius, to_bevy_color(color));
    }

    fn draw_box(&mut self, pose: Pose, half_extents: [f32; 2], color: render::Color) {
        let isometry = Isometry2d::new(
            Vec2::from(pose.translation),
            Rot2::radians(pose.rotation),
        );
        self.rect_2d(isometry, 2.0 * Vec2::from(half_extents), to_bevy_color(color));
    }

    fn draw_polyline(&mut self, vertices: &[[f32; 2]], color: render::Color) {
        for pair in vertices.windows(2) {
            self.line_2d(
                Vec2::from(pair[0]),
                Vec2::from(pair[1]),
                to_bevy_color(color),
            );
        }
    }
}

/// Issues all draw calls for the current frame.
pub fn render_scene(mut gizmos: Gizmos, session: Res<SessionRes>, sketch: Res<SketchState>) {
    render::render_frame(&session.0, sketch.points(), &mut gizmos);
}

/// Keeps the orthographic scale such that the whole world rect stays
/// visible whatever the window size.
pub fn fit_camera(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Projection, With<MainCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok(mut projection) = cameras.single_mut() else {
        return;
    };

    let (width, height) = (window.width(), window.height());
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    let world_width = WORLD_MAX[0] - WORLD_MIN[0];
    let world_height = WORLD_MAX[1] - WORLD_MIN[1];
    let scale = (world_width / width).max(world_height / height);

    if let Projection::Orthographic(ortho) = projection.as_mut() {
        ortho.scale = scale;
    }
}
