//! Shape↔body bindings.
//!
//! A `ShapeBinding` pairs one drawable [`Shape`] with exactly one rigid body
//! in the physics world. The body is the source of truth for pose once
//! simulation starts; the shape parameters never change after spawn.
//!
//! Despawning consumes the binding, so a body handle can never be
//! dereferenced after its body left the world.

use rapier2d::prelude::*;

use crate::physics::PhysicsWorld;
use crate::shape::{GeometryError, Shape};

/// Whether the backing body participates in dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMotion {
    /// Affected by gravity and constraints.
    Dynamic,
    /// Infinite mass, fixed in place (walls, decorations, sketched lines).
    Fixed,
}

/// A body pose sampled for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: [f32; 2],
    /// Rotation angle in radians.
    pub rotation: f32,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        translation: [0.0, 0.0],
        rotation: 0.0,
    };
}

/// One drawable shape bound to one simulated rigid body.
#[derive(Debug)]
pub struct ShapeBinding {
    shape: Shape,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    motion: BodyMotion,
}

impl ShapeBinding {
    /// Validates the geometry, creates the rigid body and collider, and
    /// registers both in the world. Polylines are always spawned fixed
    /// regardless of `motion`.
    pub fn spawn(
        shape: Shape,
        world: &mut PhysicsWorld,
        motion: BodyMotion,
    ) -> Result<Self, GeometryError> {
        shape.validate()?;

        let motion = match shape {
            Shape::Polyline { .. } => BodyMotion::Fixed,
            _ => motion,
        };

        let translation = shape.spawn_translation();
        let builder = match motion {
            BodyMotion::Dynamic => RigidBodyBuilder::dynamic().ccd_enabled(true),
            BodyMotion::Fixed => RigidBodyBuilder::fixed(),
        };
        let body = world.add_rigid_body(
            builder
                .translation(Vector::new(translation[0], translation[1]))
                .build(),
        );

        let collider = match &shape {
            Shape::Circle { radius, .. } => ColliderBuilder::ball(*radius)
                .restitution(0.3)
                .friction(0.3)
                .density(1.0)
                .build(),
            Shape::Box { half_extents, .. } => {
                ColliderBuilder::cuboid(half_extents[0], half_extents[1])
                    .restitution(0.3)
                    .friction(0.3)
                    .density(1.0)
                    .build()
            }
            Shape::Polyline { vertices } => {
                let points = vertices
                    .iter()
                    .map(|v| Vector::new(v[0], v[1]))
                    .collect::<Vec<_>>();
                ColliderBuilder::polyline(points, None).friction(0.3).build()
            }
        };
        let collider = world.add_collider(collider, body);

        Ok(Self {
            shape,
            body,
            collider,
            motion,
        })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn is_dynamic(&self) -> bool {
        self.motion == BodyMotion::Dynamic
    }

    /// Reads the live body pose. Constant for fixed bodies.
    pub fn pose(&self, world: &PhysicsWorld) -> Pose {
        world
            .get_rigid_body(self.body)
            .map_or(Pose::IDENTITY, |body| Pose {
                translation: [body.translation().x, body.translation().y],
                rotation: body.rotation().angle(),
            })
    }

    /// Hit test against the current body frame: the world point is carried
    /// into body-local space (inverse translation and rotation) before
    /// testing the local geometry, so rotated boxes report correct hits.
    pub fn contains(&self, world: &PhysicsWorld, point: [f32; 2]) -> bool {
        if matches!(self.shape, Shape::Polyline { .. }) {
            return false;
        }
        let Some(body) = world.get_rigid_body(self.body) else {
            return false;
        };
        let local = body
            .position()
            .inverse_transform_point(Vector::new(point[0], point[1]));
        self.shape.contains_local([local.x, local.y])
    }

    /// Destroys the backing body (and its collider) in the world. Takes the
    /// binding by value: once despawned it cannot be touched again.
    pub fn despawn(self, world: &mut PhysicsWorld) {
        world.remove_rigid_body(self.body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawned_circle_contains_its_center() {
        let mut world = PhysicsWorld::new();
        let binding = ShapeBinding::spawn(
            Shape::circle([-5.0, 7.0], 0.5),
            &mut world,
            BodyMotion::Dynamic,
        )
        .expect("valid circle");

        assert!(binding.contains(&world, [-5.0, 7.0]));
        assert!(binding.contains(&world, [-4.5, 7.0]));
        assert!(!binding.contains(&world, [-4.4, 7.0]));
    }

    #[test]
    fn test_invalid_geometry_leaves_world_unchanged() {
        let mut world = PhysicsWorld::new();
        let result = ShapeBinding::spawn(
            Shape::circle([0.0, 0.0], -1.0),
            &mut world,
            BodyMotion::Dynamic,
        );
        assert!(matches!(result, Err(GeometryError::NonPositiveRadius(_))));
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
    }

    #[test]
    fn test_polyline_forced_fixed_and_never_hit() {
        let mut world = PhysicsWorld::new();
        let binding = ShapeBinding::spawn(
            Shape::polyline(vec![[-1.0, 0.0], [1.0, 0.0]]),
            &mut world,
            BodyMotion::Dynamic,
        )
        .expect("valid polyline");

        assert!(!binding.is_dynamic());
        assert!(!binding.contains(&world, [0.0, 0.0]));
        let body = world.get_rigid_body(binding.body_handle()).unwrap();
        assert!(body.is_fixed());
    }

    #[test]
    fn test_rotated_box_hit_test() {
        let mut world = PhysicsWorld::new();
        let binding = ShapeBinding::spawn(
            Shape::rect([0.0, 0.0], [1.0, 0.1]),
            &mut world,
            BodyMotion::Dynamic,
        )
        .expect("valid box");

        // Rotate the thin box 90°: a point that was inside along x is now
        // outside, and vice versa along y.
        let body = world.get_rigid_body_mut(binding.body_handle()).unwrap();
        body.set_rotation(Rotation::from_angle(std::f32::consts::FRAC_PI_2), true);

        assert!(!binding.contains(&world, [0.8, 0.0]));
        assert!(binding.contains(&world, [0.0, 0.8]));
        assert!(binding.contains(&world, [0.0, 0.0]));
    }

    #[test]
    fn test_fixed_body_pose_is_constant() {
        let mut world = PhysicsWorld::new();
        let binding = ShapeBinding::spawn(
            Shape::circle([-5.0, 2.0], 0.5),
            &mut world,
            BodyMotion::Fixed,
        )
        .expect("valid circle");

        let before = binding.pose(&world);
        world.step_n(30);
        let after = binding.pose(&world);
        assert_eq!(before, after);
        assert_eq!(after.translation, [-5.0, 2.0]);
    }

    #[test]
    fn test_despawn_removes_body() {
        let mut world = PhysicsWorld::new();
        let binding = ShapeBinding::spawn(
            Shape::circle([0.0, 5.0], 0.5),
            &mut world,
            BodyMotion::Dynamic,
        )
        .expect("valid circle");
        let handle = binding.body_handle();

        binding.despawn(&mut world);
        assert!(world.get_rigid_body(handle).is_none());
        assert_eq!(world.collider_set.len(), 0);
    }
}
