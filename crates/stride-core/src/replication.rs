//! Authoritative motion snapshots.
//!
//! The authority captures one [`MotionSnapshot`] per player per tick; the
//! network layer ships them to replicas, which overwrite their local body
//! state with [`MotionSnapshot::apply_to`]. The controller itself never
//! applies snapshots.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use stride_physics::RigidBody;

use crate::session::PlayerId;

/// Replicated body state for one player at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSnapshot {
    /// Player the snapshot describes
    pub player: PlayerId,
    /// Authority tick that produced it
    pub tick: u64,
    /// Body position
    pub position: Vec3,
    /// Body orientation
    pub rotation: Quat,
    /// Linear velocity
    pub velocity: Vec3,
    /// Authority's grounded flag
    pub grounded: bool,
}

impl MotionSnapshot {
    /// Captures `body`'s state.
    #[must_use]
    pub fn capture<B: RigidBody + ?Sized>(player: PlayerId, tick: u64, body: &B, grounded: bool) -> Self {
        Self {
            player,
            tick,
            position: body.position(),
            rotation: body.rotation(),
            velocity: body.linear_velocity(),
            grounded,
        }
    }

    /// Writes the snapshot's position, rotation and velocity into `body`.
    pub fn apply_to<B: RigidBody + ?Sized>(&self, body: &mut B) {
        body.teleport(self.position);
        body.set_rotation(self.rotation);
        body.set_linear_velocity(self.velocity);
    }
}
