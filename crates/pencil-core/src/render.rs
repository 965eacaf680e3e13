//! Frame rendering: a pure consumer of session state.
//!
//! `render_frame` reads each binding's current pose and forwards draw calls
//! to a [`DrawBackend`]. It touches no physics or input state, so it can be
//! driven by gizmos, a test recorder, or anything else.

use serde::{Deserialize, Serialize};

use crate::binding::{Pose, ShapeBinding};
use crate::session::WorldSession;
use crate::shape::Shape;

/// RGBA color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Fixed per-category palette. Background/static shapes are distinct from
/// user-spawned ones.
pub mod palette {
    use super::Color;

    pub const WALLS: Color = Color::rgb(64, 64, 64);
    pub const RED_CIRCLE: Color = Color::rgb(255, 0, 0);
    pub const WHITE_BOX: Color = Color::rgb(255, 255, 255);
    pub const SPAWNED: Color = Color::rgb(0, 0, 0);
    pub const SKETCH: Color = Color::rgb(153, 153, 153);
}

/// Sink for draw calls. The pose carries the body translation and rotation;
/// shape extents are passed alongside.
pub trait DrawBackend {
    fn draw_circle(&mut self, pose: Pose, radius: f32, color: Color);
    fn draw_box(&mut self, pose: Pose, half_extents: [f32; 2], color: Color);
    fn draw_polyline(&mut self, vertices: &[[f32; 2]], color: Color);
}

/// Draws one frame: the in-progress sketch, the walls and decorations, then
/// every live binding with its current transform.
pub fn render_frame(session: &WorldSession, sketch: &[[f32; 2]], backend: &mut impl DrawBackend) {
    if sketch.len() >= 2 {
        backend.draw_polyline(sketch, palette::SKETCH);
    }

    draw_binding(session, session.walls(), palette::WALLS, backend);
    draw_binding(session, session.red_circle(), palette::RED_CIRCLE, backend);
    draw_binding(session, session.white_box(), palette::WHITE_BOX, backend);

    for binding in session.circles() {
        draw_binding(session, binding, palette::SPAWNED, backend);
    }
    for binding in session.boxes() {
        draw_binding(session, binding, palette::SPAWNED, backend);
    }
    for binding in session.polylines() {
        draw_binding(session, binding, palette::SPAWNED, backend);
    }
}

fn draw_binding(
    session: &WorldSession,
    binding: &ShapeBinding,
    color: Color,
    backend: &mut impl DrawBackend,
) {
    let pose = binding.pose(session.physics());
    match binding.shape() {
        Shape::Circle { radius, .. } => backend.draw_circle(pose, *radius, color),
        Shape::Box { half_extents, .. } => backend.draw_box(pose, *half_extents, color),
        // Polyline bodies are fixed at the origin; vertices are world-space.
        Shape::Polyline { vertices } => backend.draw_polyline(vertices, color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingBackend {
        circles: Vec<(Pose, f32, Color)>,
        boxes: Vec<(Pose, [f32; 2], Color)>,
        polylines: Vec<(usize, Color)>,
    }

    impl DrawBackend for RecordingBackend {
        fn draw_circle(&mut self, pose: Pose, radius: f32, color: Color) {
            self.circles.push((pose, radius, color));
        }

        fn draw_box(&mut self, pose: Pose, half_extents: [f32; 2], color: Color) {
            self.boxes.push((pose, half_extents, color));
        }

        fn draw_polyline(&mut self, vertices: &[[f32; 2]], color: Color) {
            self.polylines.push((vertices.len(), color));
        }
    }

    #[test]
    fn test_render_covers_statics_and_spawned() {
        let mut session = WorldSession::default();
        session.spawn_circle([0.0, 5.0], 0.5).unwrap();
        session.spawn_box([2.0, 5.0], [0.6, 0.3]).unwrap();

        let mut backend = RecordingBackend::default();
        render_frame(&session, &[], &mut backend);

        // Red decoration + one spawned circle.
        assert_eq!(backend.circles.len(), 2);
        assert_eq!(backend.circles[0].2, palette::RED_CIRCLE);
        assert_eq!(backend.circles[1].2, palette::SPAWNED);

        // White decoration + one spawned box.
        assert_eq!(backend.boxes.len(), 2);
        assert_eq!(backend.boxes[0].2, palette::WHITE_BOX);

        // The boundary walls.
        assert_eq!(backend.polylines.len(), 1);
        assert_eq!(backend.polylines[0], (4, palette::WALLS));
    }

    #[test]
    fn test_sketch_drawn_only_with_two_points() {
        let session = WorldSession::default();

        let mut backend = RecordingBackend::default();
        render_frame(&session, &[[0.0, 0.0]], &mut backend);
        assert_eq!(backend.polylines.len(), 1); // walls only

        let mut backend = RecordingBackend::default();
        render_frame(&session, &[[0.0, 0.0], [1.0, 1.0]], &mut backend);
        assert_eq!(backend.polylines.len(), 2); // sketch + walls
        assert_eq!(backend.polylines[0].1, palette::SKETCH);
    }

    #[test]
    fn test_render_reads_live_pose() {
        let mut session = WorldSession::default();
        session.spawn_circle([0.0, 6.0], 0.5).unwrap();
        session.step_n(30);

        let mut backend = RecordingBackend::default();
        render_frame(&session, &[], &mut backend);

        let (pose, radius, _) = backend.circles[1];
        assert_eq!(radius, 0.5);
        assert!(pose.translation[1] < 6.0, "pose not read from live body");
    }
}
