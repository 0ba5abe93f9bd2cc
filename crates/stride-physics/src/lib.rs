//! # Stride Physics
//!
//! Physical-world collaborators for the stride motion controller.
//!
//! The controller never talks to a concrete physics engine. It sees the world
//! through two narrow seams defined here:
//!
//! - [`PhysicsQuery`]: a ray query returning the nearest tagged surface
//! - [`RigidBody`]: a body handle with linear velocity, rotation and impulses
//!
//! A small reference implementation of both is included so the controller can
//! run headless and under test:
//!
//! - [`StaticWorld`]: an ordered set of static [`Collider`]s (planes, ramps,
//!   blocks, spheres) answering ray queries
//! - [`SimBody`]: a point-mass body with gravity integration and ground snapping
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec3;
//! use stride_physics::{Collider, PhysicsQuery, Ray, StaticWorld, SurfaceTags};
//!
//! let mut world = StaticWorld::new();
//! world.add(Collider::ground_plane(0.0));
//!
//! let hit = world
//!     .raycast(&Ray::down(Vec3::new(0.0, 1.0, 0.0)), 5.0)
//!     .expect("flat ground below");
//! assert!((hit.distance - 1.0).abs() < 1e-5);
//! assert!(hit.tags.contains(SurfaceTags::GROUND));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod ray;
pub mod shape;
pub mod world;

// Re-exports for convenience
pub use body::{RigidBody, SimBody};
pub use ray::{PhysicsQuery, Ray, RayHit};
pub use shape::{Collider, Shape};
pub use world::StaticWorld;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// World up axis. Every "vertical" in the workspace means this vector.
pub const WORLD_UP: glam::Vec3 = glam::Vec3::Y;

/// Default gravity applied by [`SimBody::integrate`] callers (m/s^2).
pub const DEFAULT_GRAVITY: glam::Vec3 = glam::Vec3::new(0.0, -9.81, 0.0);

bitflags! {
    /// Classification tags carried by colliders and reported in ray hits.
    ///
    /// A surface may carry several tags at once. The ground sensor only
    /// accepts hits whose tags contain [`SurfaceTags::GROUND`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SurfaceTags: u8 {
        /// Walkable ground.
        const GROUND = 0b0000_0001;
        /// Vertical or decorative geometry that is not walkable.
        const WALL = 0b0000_0010;
        /// Another player's body.
        const PLAYER = 0b0000_0100;
    }
}

impl Default for SurfaceTags {
    fn default() -> Self {
        Self::empty()
    }
}
