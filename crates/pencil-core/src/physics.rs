//! Physics simulation using `Rapier2D` with deterministic behavior.
//!
//! The rest of the crate treats the solver as a black box reached only
//! through this wrapper: body creation/removal, stepping, and the soft
//! mouse joint used for dragging.

use std::collections::hash_map::DefaultHasher;
use std::f32::consts::TAU;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed timestep for physics simulation (60Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Number of solver iterations per step. Fixed so that identically
/// initialized worlds stay bit-identical under identical stepping.
pub const SOLVER_ITERATIONS: usize = 8;

/// Default gravity vector (downward, in m/s²).
pub fn default_gravity() -> Vector {
    Vector::new(0.0, -9.8)
}

/// Parameters of the soft drag constraint.
///
/// The joint behaves like a damped spring rather than a rigid link, so a
/// fast-moving cursor cannot inject unbounded energy into the target body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MouseJointParams {
    /// Maximum correcting force the joint may apply, per axis.
    pub max_force: f32,
    /// Spring softness frequency in Hz.
    pub frequency_hz: f32,
    /// Spring damping ratio (1.0 = critically damped).
    pub damping_ratio: f32,
}

impl Default for MouseJointParams {
    fn default() -> Self {
        Self {
            max_force: 100.0,
            frequency_hz: 2.0,
            damping_ratio: 0.5,
        }
    }
}

/// Converts a softness frequency and damping ratio into force-based motor
/// stiffness and damping coefficients for a body of the given mass.
pub fn spring_coefficients(mass: f32, frequency_hz: f32, damping_ratio: f32) -> (f32, f32) {
    let omega = TAU * frequency_hz;
    let stiffness = mass * omega * omega;
    let damping = 2.0 * mass * damping_ratio * omega;
    (stiffness, damping)
}

/// Physics world containing all `Rapier2D` components for deterministic simulation.
#[derive(Serialize, Deserialize)]
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    #[serde(skip, default = "PhysicsPipeline::new")]
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub gravity: Vector,
    pub frame: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("frame", &self.frame)
            .field("rigid_body_count", &self.rigid_body_set.len())
            .field("collider_count", &self.collider_set.len())
            .field("joint_count", &self.impulse_joint_set.len())
            .field("gravity", &self.gravity)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings.
    pub fn new() -> Self {
        Self::with_gravity(default_gravity())
    }

    /// Creates a new physics world with custom gravity.
    pub fn with_gravity(gravity: Vector) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: PHYSICS_DT,
            num_solver_iterations: NonZeroUsize::new(SOLVER_ITERATIONS)
                .unwrap_or(NonZeroUsize::MIN)
                .into(),
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity,
            frame: 0,
        }
    }

    /// Advances the physics simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.frame += 1;
    }

    /// Advances the physics simulation by multiple steps.
    pub fn step_n(&mut self, n: u32) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Adds a rigid body to the world and returns its handle.
    pub fn add_rigid_body(&mut self, rigid_body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(rigid_body)
    }

    /// Adds a collider attached to a rigid body.
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Removes a rigid body together with its attached colliders and joints.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    /// Gets an immutable reference to a rigid body.
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Gets a mutable reference to a rigid body.
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Creates the drag joint: a soft two-axis position motor pulling the
    /// grabbed point of `target` toward `point`, anchored on `anchor`.
    ///
    /// `anchor` must be a fixed body placed at the world origin (the
    /// boundary walls), so its local frame coincides with world space.
    /// Returns `None` if `target` no longer exists.
    pub fn insert_mouse_joint(
        &mut self,
        anchor: RigidBodyHandle,
        target: RigidBodyHandle,
        point: [f32; 2],
        params: &MouseJointParams,
    ) -> Option<ImpulseJointHandle> {
        let body = self.rigid_body_set.get(target)?;
        let grab = body
            .position()
            .inverse_transform_point(Vector::new(point[0], point[1]));
        let (stiffness, damping) =
            spring_coefficients(body.mass(), params.frequency_hz, params.damping_ratio);

        let joint = GenericJointBuilder::new(JointAxesMask::empty())
            .local_anchor1(Vector::new(point[0], point[1]))
            .local_anchor2(grab)
            .motor_model(JointAxis::LinX, MotorModel::ForceBased)
            .motor_model(JointAxis::LinY, MotorModel::ForceBased)
            .motor_position(JointAxis::LinX, 0.0, stiffness, damping)
            .motor_position(JointAxis::LinY, 0.0, stiffness, damping)
            .motor_max_force(JointAxis::LinX, params.max_force)
            .motor_max_force(JointAxis::LinY, params.max_force)
            .contacts_enabled(true)
            .build();

        Some(self.impulse_joint_set.insert(anchor, target, joint, true))
    }

    /// Moves the world-space target of a drag joint.
    pub fn set_mouse_target(&mut self, handle: ImpulseJointHandle, point: [f32; 2]) {
        if let Some(joint) = self.impulse_joint_set.get_mut(handle, true) {
            joint.data.set_local_anchor1(Vector::new(point[0], point[1]));
        }
    }

    /// Destroys a joint. Safe to call with an already-removed handle.
    pub fn remove_joint(&mut self, handle: ImpulseJointHandle) {
        self.impulse_joint_set.remove(handle, true);
    }

    /// Number of live impulse joints.
    pub fn joint_count(&self) -> usize {
        self.impulse_joint_set.len()
    }

    /// Computes a deterministic hash of the current physics state.
    /// Two identically driven worlds must agree on this at every frame.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.frame.hash(&mut hasher);

        for (handle, body) in self.rigid_body_set.iter() {
            let (index, generation) = handle.into_raw_parts();
            index.hash(&mut hasher);
            generation.hash(&mut hasher);

            let pos = body.translation();
            hash_f32(pos.x, &mut hasher);
            hash_f32(pos.y, &mut hasher);

            hash_f32(body.rotation().angle(), &mut hasher);

            let linvel = body.linvel();
            hash_f32(linvel.x, &mut hasher);
            hash_f32(linvel.y, &mut hasher);

            hash_f32(body.angvel(), &mut hasher);
        }

        hasher.finish()
    }

    /// Returns the current simulation frame number.
    pub fn current_frame(&self) -> u64 {
        self.frame
    }
}

/// Hashes a f32 value by converting to bits.
fn hash_f32(value: f32, hasher: &mut impl Hasher) {
    value.to_bits().hash(hasher);
}
