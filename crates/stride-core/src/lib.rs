//! # Stride Core
//!
//! Networked player motion controller.
//!
//! Each fixed tick the controller senses the ground below a character, turns
//! it toward its camera-relative move direction, and (on the peer that both
//! owns and simulates the character) writes its velocity and resolves jumps.
//!
//! ## Architecture
//!
//! - **Input**: [`input::InputLatch`] holds the latest move vector and a
//!   pending-jump flag between ticks
//! - **Sensing**: [`sensor::GroundSensor`] casts down for ground and slope
//! - **Resolution**: [`motion`] holds the pure direction, rotation and
//!   velocity math
//! - **Authority**: [`authority::NetworkRole`] gates which steps run
//! - **Controller**: [`controller::PlayerMotionController`] ties them together
//!   behind explicit lifecycle calls
//! - **Session**: [`session::Session`] drives many controllers with
//!   [`replication::MotionSnapshot`]s flowing from host to replicas
//!
//! ## Usage
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use stride_core::{NetworkRole, OrbitCamera, PeerId, Session};
//! use stride_core::stride_physics::{Collider, StaticWorld};
//!
//! let world = StaticWorld::from_colliders(vec![Collider::ground_plane(0.0)]);
//! let me = PeerId::new(0);
//! let mut session = Session::new(world, me, true);
//!
//! let player = session.spawn(me, Vec3::new(0.0, 1.0, 0.0), OrbitCamera::default()).unwrap();
//! assert_eq!(session.role(player), Some(NetworkRole::OwnerAndAuthority));
//!
//! session.set_move_input(player, Vec2::new(0.0, 1.0));
//! let reports = session.step(0.02, 0.02);
//! assert!(reports[0].1.grounded);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the physics seams
pub use stride_physics;

pub mod authority;
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod motion;
pub mod replication;
pub mod sensor;
pub mod session;

pub use authority::NetworkRole;
pub use camera::{CameraBasis, CameraRig, OrbitCamera};
pub use config::{JumpLatchPolicy, MotionConfig};
pub use controller::{MotionDeps, PlayerMotionController, TickContext, TickReport, VelocityUpdate};
pub use error::{ConfigError, SpawnError};
pub use input::{InputLatch, InputPhase};
pub use replication::MotionSnapshot;
pub use sensor::{GroundReading, GroundSensor};
pub use session::{PeerId, PlayerId, Session};

#[cfg(test)]
mod tests;
