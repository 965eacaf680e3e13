//! Bevy plugins for the sandbox.
//!
//! Provides:
//! - `PencilHeadlessPlugin`: logic only (session, input, fixed stepping),
//!   used with `MinimalPlugins` in tests
//! - `PencilSandboxPlugin`: headless plugin + camera and gizmo rendering
//!
//! Per-frame order is the session contract: input systems run chained in
//! `Update` (they may mutate the drag joint), the simulation advances on
//! the fixed schedule, and rendering reads poses last.

use bevy::prelude::*;

use crate::bevy::{input, render, CursorState, MainCamera, SessionRes, SketchState};
use crate::physics::PHYSICS_DT;
use crate::session::{WorldSession, WORLD_MAX, WORLD_MIN};

/// Logic-only plugin without rendering or window dependencies.
///
/// The input systems read `ButtonInput` resources and no-op while no
/// window/camera exists, so the whole plugin runs headless.
pub struct PencilHeadlessPlugin {
    pub seed: u64,
}

impl Default for PencilHeadlessPlugin {
    fn default() -> Self {
        Self { seed: 12345 }
    }
}

impl Plugin for PencilHeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(PHYSICS_DT)));

        app.insert_resource(SessionRes(WorldSession::new(self.seed)))
            .init_resource::<CursorState>()
            .init_resource::<SketchState>();

        app.add_systems(
            Update,
            (
                input::track_cursor,
                input::handle_mouse_input,
                input::handle_keyboard_input,
            )
                .chain(),
        );

        app.add_systems(FixedUpdate, step_simulation);
    }
}

/// Full sandbox plugin: headless logic plus camera and gizmo rendering.
pub struct PencilSandboxPlugin {
    pub seed: u64,
}

impl Default for PencilSandboxPlugin {
    fn default() -> Self {
        Self { seed: 12345 }
    }
}

impl Plugin for PencilSandboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PencilHeadlessPlugin { seed: self.seed });

        app.add_systems(Startup, setup_camera);

        app.add_systems(
            Update,
            (render::fit_camera, render::render_scene)
                .chain()
                .after(input::handle_keyboard_input),
        );
    }
}

/// Spawns the camera centred on the world rect; `fit_camera` keeps the
/// projection scale matched to the window.
fn setup_camera(mut commands: Commands) {
    let center_x = f32::midpoint(WORLD_MIN[0], WORLD_MAX[0]);
    let center_y = f32::midpoint(WORLD_MIN[1], WORLD_MAX[1]);
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(center_x, center_y, 0.0),
    ));
    tracing::info!("sandbox camera spawned");
}

/// Advances the simulation by one fixed timestep.
pub fn step_simulation(mut session: ResMut<SessionRes>) {
    session.0.step();
}
