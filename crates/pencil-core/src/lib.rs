//! Pencil Physics Core Library
//!
//! A minimal interactive 2D physics sandbox built on `Rapier2D`: circles,
//! boxes and sketched polylines are bound one-to-one to rigid bodies, and
//! the user can drag dynamic shapes around with a soft mouse joint.
//!
//! The plain modules hold all simulation logic and run headless; the
//! [`bevy`] module wires them into a windowed app.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod binding;
pub mod drag;
pub mod physics;
pub mod render;
pub mod session;
pub mod shape;

// Bevy integration
pub mod bevy;

pub use binding::{BodyMotion, Pose, ShapeBinding};
pub use drag::{DragController, DragState};
pub use physics::{MouseJointParams, PhysicsWorld, PHYSICS_DT, default_gravity};
pub use render::{Color, DrawBackend, render_frame};
pub use session::{WorldSession, WORLD_MAX, WORLD_MIN};
pub use shape::{GeometryError, Shape};
