//! Ray queries against the physical world.
//!
//! [`PhysicsQuery`] is the only way the controller reads world geometry. It
//! answers "what is the nearest surface along this ray, within this
//! distance?" and reports the hit point, surface normal and tags.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{SurfaceTags, WORLD_UP};

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction (zero for a degenerate ray that hits nothing)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// A zero direction produces a degenerate ray that never hits.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Creates a ray pointing straight down from `origin`.
    #[must_use]
    pub fn down(origin: Vec3) -> Self {
        Self {
            origin,
            direction: -WORLD_UP,
        }
    }

    /// Returns the point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Returns `true` if the direction is zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec3::ZERO
    }
}

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// World-space point where the ray met the surface
    pub point: Vec3,
    /// Unit surface normal, facing the ray origin
    pub normal: Vec3,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// Tags of the surface that was hit
    pub tags: SurfaceTags,
}

impl RayHit {
    /// Angle between the hit normal and world up, in degrees.
    #[must_use]
    pub fn slope_degrees(&self) -> f32 {
        self.normal.angle_between(WORLD_UP).to_degrees()
    }
}

/// Ray-cast capability of a physics world.
///
/// # Contract
///
/// - Returns the nearest hit whose distance lies in `[0, max_distance]`.
/// - `f32::INFINITY` as `max_distance` means unbounded.
/// - Rays starting inside a solid do not report that solid.
/// - Degenerate rays never hit.
pub trait PhysicsQuery {
    /// Casts `ray` and returns the nearest hit within `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;
}

impl<T: PhysicsQuery + ?Sized> PhysicsQuery for &T {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        (**self).raycast(ray, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, -4.0, 0.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(ray.direction, Vec3::NEG_Y);
    }

    #[test]
    fn zero_direction_is_degenerate() {
        let ray = Ray::new(Vec3::ONE, Vec3::ZERO);
        assert!(ray.is_degenerate());
    }

    #[test]
    fn down_points_against_world_up() {
        let ray = Ray::down(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.direction, -WORLD_UP);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn slope_of_flat_hit_is_zero() {
        let hit = RayHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 1.0,
            tags: SurfaceTags::GROUND,
        };
        assert!(hit.slope_degrees().abs() < 1e-4);
    }

    #[test]
    fn slope_of_wall_hit_is_ninety() {
        let hit = RayHit {
            point: Vec3::ZERO,
            normal: Vec3::X,
            distance: 1.0,
            tags: SurfaceTags::WALL,
        };
        assert!((hit.slope_degrees() - 90.0).abs() < 1e-3);
    }
}
