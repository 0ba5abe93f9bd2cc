//! The player motion controller.
//!
//! [`PlayerMotionController`] owns one character's input latch, ground
//! sensor and grounded flag, plus handles to its rigid body and camera rig.
//! An external scheduler drives it through three lifecycle calls:
//!
//! 1. [`on_create`](PlayerMotionController::on_create) at spawn
//! 2. [`on_network_start`](PlayerMotionController::on_network_start) once the
//!    network layer knows who owns the character
//! 3. [`on_fixed_tick`](PlayerMotionController::on_fixed_tick) every physics
//!    step, with the elapsed times and this peer's [`NetworkRole`]
//!
//! # Tick order
//!
//! Under the owner gate:
//! 1. Cast for ground and slope; cache `grounded`
//! 2. Derive the camera-relative move direction
//! 3. Turn the body toward it (rate `move_speed` degrees per second of
//!    frame time)
//!
//! Under the owner-and-authority gate:
//! 4. If slope-permitted, write velocity (grounded: direct; airborne: blend)
//! 5. If a jump is pending and grounded, apply the impulse and clear the latch
//!
//! # Example
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use stride_core::authority::NetworkRole;
//! use stride_core::camera::CameraBasis;
//! use stride_core::config::MotionConfig;
//! use stride_core::controller::{MotionDeps, PlayerMotionController, TickContext, VelocityUpdate};
//! use stride_physics::{Collider, RigidBody, SimBody, StaticWorld};
//!
//! let world = StaticWorld::from_colliders(vec![Collider::ground_plane(0.0)]);
//! let deps = MotionDeps::new(SimBody::new(Vec3::new(0.0, 1.0, 0.0)), CameraBasis::default());
//! let mut controller = PlayerMotionController::on_create(MotionConfig::default(), deps).unwrap();
//!
//! controller.on_network_start(NetworkRole::OwnerAndAuthority);
//! controller.set_move_input(Vec2::new(0.0, 1.0));
//!
//! let ctx = TickContext::new(0.02, NetworkRole::OwnerAndAuthority);
//! let report = controller.on_fixed_tick(&ctx, &world);
//!
//! assert_eq!(report.velocity, VelocityUpdate::Grounded);
//! assert_eq!(controller.body().linear_velocity(), Vec3::new(0.0, 0.0, 5.0));
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use stride_physics::{PhysicsQuery, RigidBody, WORLD_UP};
use tracing::{debug, trace};

use crate::authority::NetworkRole;
use crate::camera::CameraRig;
use crate::config::{JumpLatchPolicy, MotionConfig};
use crate::error::SpawnError;
use crate::input::{InputLatch, InputPhase};
use crate::motion::{
    air_blend, airborne_velocity, facing_rotation, grounded_velocity, move_direction,
    planar_basis, rotate_towards,
};
use crate::sensor::GroundSensor;

// =============================================================================
// Dependencies and tick context
// =============================================================================

/// Collaborators handed to [`PlayerMotionController::on_create`].
///
/// Both are optional so that a spawner wired from data can report a missing
/// body or camera as a [`SpawnError`] instead of failing mid-game.
#[derive(Debug, Clone)]
pub struct MotionDeps<B, C> {
    /// Rigid body the controller drives
    pub body: Option<B>,
    /// Camera rig used for camera-relative input
    pub camera: Option<C>,
}

impl<B, C> MotionDeps<B, C> {
    /// Both collaborators present.
    #[must_use]
    pub fn new(body: B, camera: C) -> Self {
        Self {
            body: Some(body),
            camera: Some(camera),
        }
    }
}

impl<B, C> Default for MotionDeps<B, C> {
    fn default() -> Self {
        Self {
            body: None,
            camera: None,
        }
    }
}

/// Per-tick inputs supplied by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickContext {
    /// Fixed physics step (seconds); drives air control
    pub fixed_dt: f32,
    /// Render frame time (seconds); drives facing rotation
    pub frame_dt: f32,
    /// This peer's role for the character this tick
    pub role: NetworkRole,
}

impl TickContext {
    /// Context whose frame time equals the fixed step.
    #[must_use]
    pub const fn new(fixed_dt: f32, role: NetworkRole) -> Self {
        Self {
            fixed_dt,
            frame_dt: fixed_dt,
            role,
        }
    }

    /// Overrides the frame time.
    #[must_use]
    pub const fn with_frame_dt(mut self, frame_dt: f32) -> Self {
        self.frame_dt = frame_dt;
        self
    }
}

// =============================================================================
// Tick report
// =============================================================================

/// What the velocity step did this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VelocityUpdate {
    /// This peer may not apply physics.
    #[default]
    NotApplied,
    /// The surface below is too steep; velocity carried over untouched.
    SlopeBlocked,
    /// Horizontal velocity set directly.
    Grounded,
    /// Horizontal velocity blended toward the target.
    Airborne,
}

/// Summary of one [`PlayerMotionController::on_fixed_tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Role the tick ran under
    pub role: NetworkRole,
    /// Cached grounded flag (false when sensors did not run)
    pub grounded: bool,
    /// Slope check result (false when sensors did not run)
    pub slope_permitted: bool,
    /// Facing rotation was updated
    pub rotated: bool,
    /// Velocity step outcome
    pub velocity: VelocityUpdate,
    /// Jump impulse was applied
    pub jumped: bool,
}

impl TickReport {
    fn idle(role: NetworkRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Networked player motion controller for one character.
#[derive(Debug, Clone)]
pub struct PlayerMotionController<B, C> {
    config: MotionConfig,
    sensor: GroundSensor,
    latch: InputLatch,
    grounded: bool,
    move_direction: Vec3,
    role: NetworkRole,
    body: B,
    camera: C,
}

impl<B: RigidBody, C: CameraRig> PlayerMotionController<B, C> {
    /// Spawns a controller.
    ///
    /// The role starts as [`NetworkRole::Remote`] until
    /// [`on_network_start`](Self::on_network_start) or the first tick.
    ///
    /// # Errors
    ///
    /// - [`SpawnError::Config`] if `config` fails validation
    /// - [`SpawnError::MissingBody`] / [`SpawnError::MissingCamera`] if a
    ///   collaborator is absent
    pub fn on_create(config: MotionConfig, deps: MotionDeps<B, C>) -> Result<Self, SpawnError> {
        config.validate()?;
        let body = deps.body.ok_or(SpawnError::MissingBody)?;
        let camera = deps.camera.ok_or(SpawnError::MissingCamera)?;

        debug!(
            move_speed = config.move_speed,
            jump_force = config.jump_force,
            slope_limit = config.slope_limit_degrees,
            "motion controller created"
        );

        Ok(Self {
            sensor: GroundSensor::from_config(&config),
            config,
            latch: InputLatch::new(),
            grounded: false,
            move_direction: Vec3::ZERO,
            role: NetworkRole::Remote,
            body,
            camera,
        })
    }

    /// Records the role assigned when the character becomes networked.
    pub fn on_network_start(&mut self, role: NetworkRole) {
        self.role = role;
        debug!(%role, "motion controller network start");
    }

    /// Overwrites the latched move vector. Ignored unless this peer owns the
    /// character.
    pub fn set_move_input(&mut self, input: Vec2) {
        if !self.role.samples_input() {
            trace!(role = %self.role, "move input ignored");
            return;
        }
        self.latch.set_move_input(input);
    }

    /// Handles a jump button event.
    ///
    /// Latches a jump only for a `Performed` event while a fresh ground cast
    /// succeeds. Ignored unless this peer owns the character. Returns whether
    /// a jump is pending after the call.
    pub fn request_jump<W: PhysicsQuery + ?Sized>(&mut self, phase: InputPhase, world: &W) -> bool {
        if !self.role.samples_input() {
            trace!(role = %self.role, "jump request ignored");
            return false;
        }
        let grounded =
            phase == InputPhase::Performed && self.sensor.is_grounded(world, self.body.position());
        let pending = self.latch.latch_jump(phase, grounded);
        trace!(?phase, grounded, pending, "jump requested");
        pending
    }

    /// Runs one fixed physics step.
    pub fn on_fixed_tick<W: PhysicsQuery + ?Sized>(&mut self, ctx: &TickContext, world: &W) -> TickReport {
        self.role = ctx.role;
        if !ctx.role.runs_sensors() {
            return TickReport::idle(ctx.role);
        }

        let reading = self.sensor.probe(world, self.body.position());
        self.grounded = reading.grounded;

        let rotated = self.update_facing(ctx.frame_dt);

        let mut report = TickReport {
            role: ctx.role,
            grounded: reading.grounded,
            slope_permitted: reading.slope_permitted,
            rotated,
            velocity: VelocityUpdate::NotApplied,
            jumped: false,
        };

        if !ctx.role.applies_physics() {
            trace!(role = %ctx.role, grounded = self.grounded, "tick without physics authority");
            return report;
        }

        report.velocity = if reading.slope_permitted {
            self.apply_velocity(ctx.fixed_dt)
        } else {
            VelocityUpdate::SlopeBlocked
        };
        report.jumped = self.resolve_jump();

        trace!(
            grounded = report.grounded,
            velocity = ?report.velocity,
            jumped = report.jumped,
            "tick resolved"
        );
        report
    }

    /// Ends the controller's life, handing the collaborators back.
    pub fn on_despawn(self) -> (B, C) {
        debug!(role = %self.role, "motion controller despawned");
        (self.body, self.camera)
    }

    fn update_facing(&mut self, frame_dt: f32) -> bool {
        let (forward, right) = planar_basis(&self.camera);
        self.move_direction = move_direction(self.latch.move_input(), forward, right);
        if self.move_direction == Vec3::ZERO {
            return false;
        }
        let target = facing_rotation(self.move_direction);
        let step = self.config.move_speed * frame_dt;
        let next = rotate_towards(self.body.rotation(), target, step);
        self.body.set_rotation(next);
        true
    }

    fn apply_velocity(&mut self, fixed_dt: f32) -> VelocityUpdate {
        let desired = self.move_direction * self.config.move_speed;
        let current = self.body.linear_velocity();
        if self.grounded {
            self.body.set_linear_velocity(grounded_velocity(current, desired));
            VelocityUpdate::Grounded
        } else {
            let blend = air_blend(fixed_dt, self.config.air_control_force);
            self.body.set_linear_velocity(airborne_velocity(current, desired, blend));
            VelocityUpdate::Airborne
        }
    }

    fn resolve_jump(&mut self) -> bool {
        if !self.latch.pending_jump() {
            return false;
        }
        if self.grounded {
            self.body.apply_impulse(WORLD_UP * self.config.jump_force);
            self.latch.clear_jump();
            debug!(force = self.config.jump_force, "jump impulse applied");
            return true;
        }
        if self.config.jump_latch == JumpLatchPolicy::DropWhenAirborne {
            self.latch.clear_jump();
            debug!("pending jump dropped while airborne");
        }
        false
    }
}

impl<B, C> PlayerMotionController<B, C> {
    /// Spawn-time configuration.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Role seen on the most recent tick or network start.
    #[must_use]
    pub fn role(&self) -> NetworkRole {
        self.role
    }

    /// Grounded flag cached by the last sensor run.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Returns `true` if a jump is latched.
    #[must_use]
    pub fn pending_jump(&self) -> bool {
        self.latch.pending_jump()
    }

    /// Latched move vector.
    #[must_use]
    pub fn move_input(&self) -> Vec2 {
        self.latch.move_input()
    }

    /// Move direction derived on the last sensor-running tick.
    #[must_use]
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    /// The driven body.
    #[must_use]
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutable access to the body, for the physics engine and replication.
    #[must_use]
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// The camera rig.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the camera rig.
    #[must_use]
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }
}
