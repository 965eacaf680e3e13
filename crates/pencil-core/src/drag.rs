//! Mouse drag state machine.
//!
//! `Idle` and `Dragging` strictly alternate. The joint handle only exists
//! inside the `Dragging` variant, so there is no separate "attached" flag
//! that could fall out of sync with it. Move/detach while idle are safe
//! no-ops, never errors.

use rapier2d::prelude::{ImpulseJointHandle, RigidBodyHandle};

use crate::binding::ShapeBinding;
use crate::physics::{MouseJointParams, PhysicsWorld};

/// Current drag state.
#[derive(Debug, Clone, Copy, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        joint: ImpulseJointHandle,
        body: RigidBodyHandle,
    },
}

/// Governs the pointer-driven drag interaction.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    params: MouseJointParams,
}

impl DragController {
    pub fn new(params: MouseJointParams) -> Self {
        Self {
            state: DragState::Idle,
            params,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Body currently being dragged, if any.
    pub fn target_body(&self) -> Option<RigidBodyHandle> {
        match self.state {
            DragState::Dragging { body, .. } => Some(body),
            DragState::Idle => None,
        }
    }

    /// Pointer-down at `point`: hit-tests `candidates` in iteration order
    /// and attaches a drag joint to the first match, anchored on `anchor`
    /// (a fixed body at the world origin). First match wins, so creation
    /// order decides between overlapping shapes.
    ///
    /// Returns whether a drag started. A press with no hit, or while a drag
    /// is already in progress, changes nothing.
    pub fn attach<'a, I>(
        &mut self,
        world: &mut PhysicsWorld,
        anchor: RigidBodyHandle,
        candidates: I,
        point: [f32; 2],
    ) -> bool
    where
        I: IntoIterator<Item = &'a ShapeBinding>,
    {
        if self.is_dragging() {
            return false;
        }

        let Some(body) = candidates
            .into_iter()
            .find(|binding| binding.contains(world, point))
            .map(ShapeBinding::body_handle)
        else {
            return false;
        };

        match world.insert_mouse_joint(anchor, body, point, &self.params) {
            Some(joint) => {
                tracing::debug!(?body, x = point[0], y = point[1], "drag attached");
                self.state = DragState::Dragging { joint, body };
                true
            }
            None => false,
        }
    }

    /// Pointer-move: retargets the live joint to `point`. No-op while idle.
    pub fn move_to(&mut self, world: &mut PhysicsWorld, point: [f32; 2]) {
        if let DragState::Dragging { joint, .. } = self.state {
            world.set_mouse_target(joint, point);
        }
    }

    /// Pointer-up: destroys the joint and returns to idle. Idempotent.
    pub fn detach(&mut self, world: &mut PhysicsWorld) {
        if let DragState::Dragging { joint, .. } = std::mem::take(&mut self.state) {
            world.remove_joint(joint);
            tracing::debug!("drag detached");
        }
    }
}
