//! Windowed entry point for the pencil-physics sandbox.
//!
//! Controls: left-drag a shape to pull it around, left-drag over empty
//! space to sketch a polyline obstacle, C/B to drop a circle/box,
//! X to clear, Escape to quit.

use bevy::prelude::*;
use bevy::window::{Window, WindowPlugin};
use pencil_core::bevy::PencilSandboxPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Pencil Physics".to_string(),
            resolution: (1280, 720).into(),
            ..default()
        }),
        ..default()
    }));

    app.add_plugins(PencilSandboxPlugin::default());

    tracing::info!("starting pencil-physics sandbox");
    app.run();
}
