//! Rigid body handle and a reference point-mass body.
//!
//! [`RigidBody`] is the write seam of the controller: everything it does to
//! the simulation goes through `set_linear_velocity`, `apply_impulse` and
//! `set_rotation`. `teleport` exists for replicas applying snapshots.
//! [`SimBody`] implements it with a point mass that can be
//! integrated against a [`PhysicsQuery`] world.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ray::{PhysicsQuery, Ray};

/// Smallest mass a [`SimBody`] may have.
const MIN_MASS: f32 = 1e-4;

/// Handle to a dynamic rigid body.
pub trait RigidBody {
    /// World-space position of the body origin.
    fn position(&self) -> Vec3;

    /// Moves the body origin without changing its velocity.
    fn teleport(&mut self, position: Vec3);

    /// Current orientation.
    fn rotation(&self) -> Quat;

    /// Overwrites the orientation.
    fn set_rotation(&mut self, rotation: Quat);

    /// Current linear velocity.
    fn linear_velocity(&self) -> Vec3;

    /// Overwrites the linear velocity.
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// Applies an instantaneous impulse (velocity change of `impulse / mass`).
    fn apply_impulse(&mut self, impulse: Vec3);
}

/// Point-mass body with a foot offset for ground snapping.
///
/// The body origin sits `foot_offset` above the feet, so a body standing on
/// flat ground at height 0 has `position.y == foot_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimBody {
    /// Body origin
    pub position: Vec3,
    /// Orientation (body forward is +Z)
    pub rotation: Quat,
    /// Linear velocity
    pub velocity: Vec3,
    /// Mass used by impulses
    pub mass: f32,
    /// Distance from origin down to the feet
    pub foot_offset: f32,
}

impl SimBody {
    /// Creates a resting body of unit mass at `position`.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            mass: 1.0,
            foot_offset: 1.0,
        }
    }

    /// Sets the mass. Non-positive values are clamped to a small epsilon.
    #[must_use]
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass.max(MIN_MASS);
        self
    }

    /// Sets the foot offset (made non-negative).
    #[must_use]
    pub fn with_foot_offset(mut self, foot_offset: f32) -> Self {
        self.foot_offset = foot_offset.abs();
        self
    }

    /// Sets the initial velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Advances the body by `dt` seconds under `gravity`.
    ///
    /// Semi-implicit Euler, then a downward probe at the new horizontal
    /// position starting from the pre-step origin height. If the body is not
    /// rising and its feet reached the probed surface during the step, it is
    /// snapped onto the surface and its vertical velocity is zeroed. Returns
    /// `true` when the body rests on a surface after the step.
    pub fn integrate<W: PhysicsQuery + ?Sized>(&mut self, dt: f32, gravity: Vec3, world: &W) -> bool {
        let start_height = self.position.y;
        self.velocity += gravity * dt;
        self.position += self.velocity * dt;

        if self.velocity.y > 0.0 {
            return false;
        }

        let probe_origin = Vec3::new(self.position.x, start_height.max(self.position.y), self.position.z);
        let reach = probe_origin.y - self.position.y + self.foot_offset;
        let Some(hit) = world.raycast(&Ray::down(probe_origin), reach) else {
            return false;
        };

        trace!(surface = hit.point.y, "body landed");
        self.position.y = hit.point.y + self.foot_offset;
        self.velocity.y = 0.0;
        true
    }
}

impl Default for SimBody {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl RigidBody for SimBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation.normalize();
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }
}
