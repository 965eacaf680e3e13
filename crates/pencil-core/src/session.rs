//! World session: owner of the physics world and every body lifetime.
//!
//! The session is passed explicitly to input handling, stepping and
//! rendering; there are no globals. Per-frame order is a contract the
//! caller upholds: drain input (may mutate the drag joint), advance the
//! simulation, then render.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rapier2d::prelude::RigidBodyHandle;

use crate::binding::{BodyMotion, ShapeBinding};
use crate::drag::DragController;
use crate::physics::PhysicsWorld;
use crate::shape::{GeometryError, Shape};

/// World bounds, fixed configuration: x ∈ [-8, 8], y ∈ [0, 9].
pub const WORLD_MIN: [f32; 2] = [-8.0, 0.0];
pub const WORLD_MAX: [f32; 2] = [8.0, 9.0];

/// Where scatter-spawned shapes appear, near the top-left of the world.
pub const SPAWN_POINT: [f32; 2] = [-5.0, 7.0];
const SPAWN_SCATTER: f32 = 0.5;

/// Default sizes for scatter-spawned shapes.
pub const DEFAULT_CIRCLE_RADIUS: f32 = 0.5;
pub const DEFAULT_BOX_HALF_EXTENTS: [f32; 2] = [0.6, 0.3];

const DEFAULT_SEED: u64 = 12345;

/// Owns the physics world, the static boundary and decorations, and the
/// live collections of circle/box/polyline bindings.
pub struct WorldSession {
    physics: PhysicsWorld,
    walls: ShapeBinding,
    red_circle: ShapeBinding,
    white_box: ShapeBinding,
    circles: Vec<ShapeBinding>,
    boxes: Vec<ShapeBinding>,
    polylines: Vec<ShapeBinding>,
    drag: DragController,
    rng: ChaCha8Rng,
}

impl Default for WorldSession {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl WorldSession {
    /// Creates the physics world, the four-segment boundary walls spanning
    /// the world bounds, and the two fixed decorations (red circle, white
    /// box). The seed drives scatter spawning only.
    pub fn new(seed: u64) -> Self {
        let mut physics = PhysicsWorld::new();

        let wall_vertices = vec![
            [WORLD_MIN[0], WORLD_MAX[1]],
            [WORLD_MIN[0], WORLD_MIN[1]],
            [WORLD_MAX[0], WORLD_MIN[1]],
            [WORLD_MAX[0], WORLD_MAX[1]],
        ];
        let walls = ShapeBinding::spawn(
            Shape::polyline(wall_vertices),
            &mut physics,
            BodyMotion::Fixed,
        )
        .expect("boundary geometry is valid");

        let red_circle = ShapeBinding::spawn(
            Shape::circle([-5.0, 2.0], 0.5),
            &mut physics,
            BodyMotion::Fixed,
        )
        .expect("decoration geometry is valid");
        let white_box = ShapeBinding::spawn(
            Shape::rect([5.0, 2.0], [0.9, 0.9]),
            &mut physics,
            BodyMotion::Fixed,
        )
        .expect("decoration geometry is valid");

        tracing::info!(seed, "world session initialized");

        Self {
            physics,
            walls,
            red_circle,
            white_box,
            circles: Vec::new(),
            boxes: Vec::new(),
            polylines: Vec::new(),
            drag: DragController::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Advances the simulation by exactly one fixed timestep.
    pub fn step(&mut self) {
        self.physics.step();
    }

    /// Advances the simulation by multiple fixed timesteps.
    pub fn step_n(&mut self, n: u32) {
        self.physics.step_n(n);
    }

    /// Spawns a dynamic circle and appends it to the circle collection.
    pub fn spawn_circle(&mut self, center: [f32; 2], radius: f32) -> Result<(), GeometryError> {
        let binding = ShapeBinding::spawn(
            Shape::circle(center, radius),
            &mut self.physics,
            BodyMotion::Dynamic,
        )?;
        self.circles.push(binding);
        Ok(())
    }

    /// Spawns a dynamic box and appends it to the box collection.
    pub fn spawn_box(
        &mut self,
        center: [f32; 2],
        half_extents: [f32; 2],
    ) -> Result<(), GeometryError> {
        let binding = ShapeBinding::spawn(
            Shape::rect(center, half_extents),
            &mut self.physics,
            BodyMotion::Dynamic,
        )?;
        self.boxes.push(binding);
        Ok(())
    }

    /// Spawns a fixed polyline obstacle (a sketched line).
    pub fn spawn_polyline(&mut self, vertices: Vec<[f32; 2]>) -> Result<(), GeometryError> {
        let binding = ShapeBinding::spawn(
            Shape::polyline(vertices),
            &mut self.physics,
            BodyMotion::Fixed,
        )?;
        self.polylines.push(binding);
        Ok(())
    }

    /// Spawns a default-size circle scattered around the spawn point.
    pub fn add_circle(&mut self) -> Result<(), GeometryError> {
        let center = self.scatter_position();
        self.spawn_circle(center, DEFAULT_CIRCLE_RADIUS)
    }

    /// Spawns a default-size box scattered around the spawn point.
    pub fn add_box(&mut self) -> Result<(), GeometryError> {
        let center = self.scatter_position();
        self.spawn_box(center, DEFAULT_BOX_HALF_EXTENTS)
    }

    /// Draws one scatter offset from the deterministic RNG.
    /// Every call consumes exactly two random numbers.
    fn scatter_position(&mut self) -> [f32; 2] {
        let dx: f32 = self.rng.random_range(-1.0..1.0);
        let dy: f32 = self.rng.random_range(-1.0..1.0);
        [
            SPAWN_POINT[0] + SPAWN_SCATTER * dx,
            SPAWN_POINT[1] + SPAWN_SCATTER * dy,
        ]
    }

    /// Despawns every circle, box and polyline binding; walls and
    /// decorations stay. An in-progress drag is released first so the
    /// joint never outlives its target body.
    pub fn clear_dynamic(&mut self) {
        self.drag.detach(&mut self.physics);
        for binding in self.circles.drain(..) {
            binding.despawn(&mut self.physics);
        }
        for binding in self.boxes.drain(..) {
            binding.despawn(&mut self.physics);
        }
        for binding in self.polylines.drain(..) {
            binding.despawn(&mut self.physics);
        }
        tracing::info!("cleared all user-spawned bindings");
    }

    /// Pointer-down: hit-tests circles (insertion order), then boxes, and
    /// attaches the drag joint to the first hit, anchored on the walls.
    /// Returns whether a drag started.
    pub fn attach_mouse(&mut self, point: [f32; 2]) -> bool {
        self.drag.attach(
            &mut self.physics,
            self.walls.body_handle(),
            self.circles.iter().chain(self.boxes.iter()),
            point,
        )
    }

    /// Pointer-move: retargets the drag joint. Safe no-op while idle.
    pub fn move_mouse(&mut self, point: [f32; 2]) {
        self.drag.move_to(&mut self.physics, point);
    }

    /// Pointer-up: releases the drag joint. Idempotent.
    pub fn detach_mouse(&mut self) {
        self.drag.detach(&mut self.physics);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Body currently held by the drag joint, if any.
    pub fn drag_target(&self) -> Option<RigidBodyHandle> {
        self.drag.target_body()
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn walls(&self) -> &ShapeBinding {
        &self.walls
    }

    pub fn red_circle(&self) -> &ShapeBinding {
        &self.red_circle
    }

    pub fn white_box(&self) -> &ShapeBinding {
        &self.white_box
    }

    pub fn circles(&self) -> &[ShapeBinding] {
        &self.circles
    }

    pub fn boxes(&self) -> &[ShapeBinding] {
        &self.boxes
    }

    pub fn polylines(&self) -> &[ShapeBinding] {
        &self.polylines
    }

    /// Deterministic hash of the underlying physics state.
    pub fn state_hash(&self) -> u64 {
        self.physics.compute_hash()
    }
}
