//! Bevy glue for the sandbox: resources, the plugin, input and gizmo
//! rendering systems.
//!
//! All simulation logic lives in the plain modules of this crate; the
//! systems here only translate window/input events into session calls and
//! forward draw calls to gizmos. Everything except winit (gated behind the
//! `windowed` feature at the Cargo level) builds headless for tests.

pub mod input;
pub mod plugin;
pub mod render;

pub use plugin::{PencilHeadlessPlugin, PencilSandboxPlugin};

use bevy::prelude::*;

use crate::session::WorldSession;

/// Marker for the single sandbox camera.
#[derive(Component, Debug, Clone, Default)]
pub struct MainCamera;

/// The world session, exclusively owned as a Bevy resource.
#[derive(Resource, Default)]
pub struct SessionRes(pub WorldSession);

/// Last known cursor position in world space (after camera unprojection).
/// `None` until the cursor first enters the window.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct CursorState {
    pub world: Option<Vec2>,
}

/// The polyline being sketched while the pointer is held over empty space.
#[derive(Resource, Debug, Default)]
pub struct SketchState {
    points: Vec<[f32; 2]>,
    active: bool,
}

impl SketchState {
    /// Points closer together than this are collapsed, so a jittering
    /// cursor does not produce hundreds of near-coincident segments.
    const MIN_POINT_SPACING: f32 = 0.05;

    pub fn begin(&mut self, point: [f32; 2]) {
        self.points.clear();
        self.points.push(point);
        self.active = true;
    }

    pub fn extend(&mut self, point: [f32; 2]) {
        if !self.active {
            return;
        }
        if let Some(last) = self.points.last() {
            let dx = point[0] - last[0];
            let dy = point[1] - last[1];
            if (dx * dx + dy * dy).sqrt() < Self::MIN_POINT_SPACING {
                return;
            }
        }
        self.points.push(point);
    }

    /// Ends the sketch. Returns the path if it has enough vertices to form
    /// a polyline, `None` otherwise (a plain click is not a sketch).
    pub fn finish(&mut self) -> Option<Vec<[f32; 2]>> {
        if !self.active {
            return None;
        }
        self.active = false;
        let points = std::mem::take(&mut self.points);
        (points.len() >= 2).then_some(points)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[[f32; 2]] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sketch_dedupes_close_points() {
        let mut sketch = SketchState::default();
        sketch.begin([0.0, 0.0]);
        sketch.extend([0.01, 0.0]); // below spacing, dropped
        sketch.extend([1.0, 0.0]);
        assert_eq!(sketch.points().len(), 2);

        let path = sketch.finish().expect("two distinct points");
        assert_eq!(path, vec![[0.0, 0.0], [1.0, 0.0]]);
        assert!(!sketch.is_active());
    }

    #[test]
    fn test_click_without_movement_is_not_a_sketch() {
        let mut sketch = SketchState::default();
        sketch.begin([0.0, 0.0]);
        sketch.extend([0.02, 0.0]);
        assert!(sketch.finish().is_none());
    }

    #[test]
    fn test_finish_while_inactive_is_none() {
        let mut sketch = SketchState::default();
        assert!(sketch.finish().is_none());
    }
}
