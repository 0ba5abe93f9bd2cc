//! Ground and slope sensing.
//!
//! Two independent downward casts answer two different questions:
//!
//! - *grounded*: is a `GROUND`-tagged surface within the probe distance?
//! - *slope-permitted*: is whatever lies below, at any distance, gentle
//!   enough to accelerate on?
//!
//! They may disagree. A body two units above a 60° wall-tagged rock is not
//! grounded and not slope-permitted; a body ten units above flat ground is
//! slope-permitted but not grounded.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_physics::{PhysicsQuery, Ray, SurfaceTags};

use crate::config::MotionConfig;

/// Slack (degrees) when comparing a measured slope against the limit, so a
/// surface built at exactly the limit stays walkable despite rounding.
const SLOPE_TOLERANCE_DEGREES: f32 = 1e-3;

/// Result of both casts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundReading {
    /// A ground-tagged surface is within the probe distance
    pub grounded: bool,
    /// The surface below is within the slope limit (or absent)
    pub slope_permitted: bool,
}

/// Downward ray sensor parameterised by probe length and slope limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSensor {
    probe_distance: f32,
    slope_limit_degrees: f32,
}

impl GroundSensor {
    /// Creates a sensor.
    #[must_use]
    pub const fn new(probe_distance: f32, slope_limit_degrees: f32) -> Self {
        Self {
            probe_distance,
            slope_limit_degrees,
        }
    }

    /// Creates a sensor from a motion config.
    #[must_use]
    pub const fn from_config(config: &MotionConfig) -> Self {
        Self::new(config.ground_probe_distance, config.slope_limit_degrees)
    }

    /// Probe length used by [`GroundSensor::is_grounded`].
    #[must_use]
    pub const fn probe_distance(&self) -> f32 {
        self.probe_distance
    }

    /// Steepest permitted slope in degrees.
    #[must_use]
    pub const fn slope_limit_degrees(&self) -> f32 {
        self.slope_limit_degrees
    }

    /// Returns `true` if the nearest surface within the probe distance below
    /// `position` is tagged `GROUND`.
    ///
    /// A nearer surface without the tag shadows ground further down.
    pub fn is_grounded<W: PhysicsQuery + ?Sized>(&self, world: &W, position: Vec3) -> bool {
        world
            .raycast(&Ray::down(position), self.probe_distance)
            .is_some_and(|hit| hit.tags.contains(SurfaceTags::GROUND))
    }

    /// Angle in degrees between world up and the normal of the first surface
    /// below `position`, at any distance. `None` if nothing is below.
    pub fn slope_angle_degrees<W: PhysicsQuery + ?Sized>(&self, world: &W, position: Vec3) -> Option<f32> {
        world
            .raycast(&Ray::down(position), f32::INFINITY)
            .map(|hit| hit.slope_degrees())
    }

    /// Returns `true` if the surface below is at most the slope limit, or if
    /// there is no surface below at all.
    pub fn can_move_on_slope<W: PhysicsQuery + ?Sized>(&self, world: &W, position: Vec3) -> bool {
        self.slope_angle_degrees(world, position)
            .map_or(true, |angle| angle <= self.slope_limit_degrees + SLOPE_TOLERANCE_DEGREES)
    }

    /// Runs both casts.
    pub fn probe<W: PhysicsQuery + ?Sized>(&self, world: &W, position: Vec3) -> GroundReading {
        GroundReading {
            grounded: self.is_grounded(world, position),
            slope_permitted: self.can_move_on_slope(world, position),
        }
    }
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self::from_config(&MotionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_physics::{Collider, StaticWorld};

    fn flat() -> StaticWorld {
        StaticWorld::from_colliders(vec![Collider::ground_plane(0.0)])
    }

    fn ramp(degrees: f32, tags: SurfaceTags) -> StaticWorld {
        StaticWorld::from_colliders(vec![Collider::ramp(Vec3::ZERO, degrees, tags)])
    }

    mod grounded_tests {
        use super::*;

        #[test]
        fn standing_on_flat_ground() {
            assert!(GroundSensor::default().is_grounded(&flat(), Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn within_probe_distance_counts() {
            assert!(GroundSensor::default().is_grounded(&flat(), Vec3::new(0.0, 4.9, 0.0)));
        }

        #[test]
        fn beyond_probe_distance_is_airborne() {
            assert!(!GroundSensor::default().is_grounded(&flat(), Vec3::new(0.0, 5.1, 0.0)));
        }

        #[test]
        fn untagged_surface_is_not_ground() {
            let world = StaticWorld::from_colliders(vec![Collider::new(
                Collider::ground_plane(0.0).shape,
                SurfaceTags::WALL,
            )]);
            assert!(!GroundSensor::default().is_grounded(&world, Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn nearer_untagged_surface_shadows_ground() {
            let mut world = flat();
            world.add(Collider::block(
                Vec3::new(-1.0, 0.0, -1.0),
                Vec3::new(1.0, 0.5, 1.0),
                SurfaceTags::WALL,
            ));
            assert!(!GroundSensor::default().is_grounded(&world, Vec3::new(0.0, 1.5, 0.0)));
        }

        #[test]
        fn empty_world_is_airborne() {
            assert!(!GroundSensor::default().is_grounded(&StaticWorld::new(), Vec3::ZERO));
        }

        #[test]
        fn custom_probe_distance() {
            let sensor = GroundSensor::new(0.5, 45.0);
            assert!(!sensor.is_grounded(&flat(), Vec3::new(0.0, 1.0, 0.0)));
            assert!(sensor.is_grounded(&flat(), Vec3::new(0.0, 0.4, 0.0)));
        }
    }

    mod slope_tests {
        use super::*;

        #[test]
        fn flat_ground_is_permitted() {
            let sensor = GroundSensor::default();
            let angle = sensor.slope_angle_degrees(&flat(), Vec3::new(0.0, 1.0, 0.0)).unwrap();
            assert!(angle.abs() < 1e-3);
            assert!(sensor.can_move_on_slope(&flat(), Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn steep_slope_is_blocked() {
            let world = ramp(60.0, SurfaceTags::GROUND);
            assert!(!GroundSensor::default().can_move_on_slope(&world, Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn slope_at_limit_is_permitted() {
            let world = ramp(45.0, SurfaceTags::GROUND);
            assert!(GroundSensor::default().can_move_on_slope(&world, Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn slope_at_custom_limit_is_permitted() {
            for degrees in [10.0, 30.0, 45.0, 60.0] {
                let sensor = GroundSensor::new(5.0, degrees);
                let world = ramp(degrees, SurfaceTags::GROUND);
                assert!(
                    sensor.can_move_on_slope(&world, Vec3::new(0.0, 1.0, 0.0)),
                    "{degrees} degree ramp blocked at a {degrees} degree limit"
                );
            }
        }

        #[test]
        fn slope_just_over_limit_is_blocked() {
            let sensor = GroundSensor::new(5.0, 30.0);
            let world = ramp(30.1, SurfaceTags::GROUND);
            assert!(!sensor.can_move_on_slope(&world, Vec3::new(0.0, 1.0, 0.0)));
        }

        #[test]
        fn nothing_below_is_permitted() {
            let sensor = GroundSensor::default();
            assert_eq!(sensor.slope_angle_degrees(&StaticWorld::new(), Vec3::ZERO), None);
            assert!(sensor.can_move_on_slope(&StaticWorld::new(), Vec3::ZERO));
        }

        #[test]
        fn slope_ignores_probe_distance() {
            let world = ramp(60.0, SurfaceTags::GROUND);
            assert!(!GroundSensor::default().can_move_on_slope(&world, Vec3::new(0.0, 100.0, 0.0)));
        }

        #[test]
        fn slope_ignores_tags() {
            let world = ramp(10.0, SurfaceTags::WALL);
            assert!(GroundSensor::default().can_move_on_slope(&world, Vec3::new(0.0, 1.0, 0.0)));
        }
    }

    mod probe_tests {
        use super::*;

        #[test]
        fn high_above_flat_ground_disagrees() {
            let reading = GroundSensor::default().probe(&flat(), Vec3::new(0.0, 10.0, 0.0));
            assert!(!reading.grounded);
            assert!(reading.slope_permitted);
        }

        #[test]
        fn on_steep_ground_is_grounded_but_blocked() {
            let world = ramp(60.0, SurfaceTags::GROUND);
            let reading = GroundSensor::default().probe(&world, Vec3::new(0.0, 1.0, 0.0));
            assert!(reading.grounded);
            assert!(!reading.slope_permitted);
        }

        #[test]
        fn from_config_copies_fields() {
            let config = MotionConfig {
                ground_probe_distance: 2.0,
                slope_limit_degrees: 30.0,
                ..MotionConfig::default()
            };
            let sensor = GroundSensor::from_config(&config);
            assert_eq!(sensor.probe_distance(), 2.0);
            assert_eq!(sensor.slope_limit_degrees(), 30.0);
        }
    }
}
