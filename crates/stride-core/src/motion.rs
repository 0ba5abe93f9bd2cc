//! Motion resolution math.
//!
//! Pure functions used by the controller each fixed tick. Nothing here reads
//! the world or touches a body, which keeps every step independently
//! testable.
//!
//! Conventions: world up is +Y, a body's forward axis is +Z, angles passed
//! across the API are in degrees.

use glam::{Quat, Vec2, Vec3};

use crate::camera::CameraRig;

/// Projects `v` onto the horizontal plane and normalizes it.
///
/// Returns zero when `v` is vertical or zero.
#[must_use]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// Camera forward and right, flattened onto the ground plane.
#[must_use]
pub fn planar_basis<C: CameraRig + ?Sized>(camera: &C) -> (Vec3, Vec3) {
    (flatten(camera.forward()), flatten(camera.right()))
}

/// Camera-relative move direction for a stick `input` (x = right, y = forward).
///
/// Unit length, or zero when the input (or the basis) is zero.
///
/// ```
/// use glam::{Vec2, Vec3};
/// use stride_core::motion::move_direction;
///
/// let dir = move_direction(Vec2::new(0.0, 1.0), Vec3::Z, Vec3::NEG_X);
/// assert_eq!(dir, Vec3::Z);
/// assert_eq!(move_direction(Vec2::ZERO, Vec3::Z, Vec3::NEG_X), Vec3::ZERO);
/// ```
#[must_use]
pub fn move_direction(input: Vec2, forward: Vec3, right: Vec3) -> Vec3 {
    (forward * input.y + right * input.x).normalize_or_zero()
}

/// Rotation that turns the body's forward axis (+Z) toward `direction`,
/// keeping world up as up.
///
/// Only the horizontal part of `direction` is used.
#[must_use]
pub fn facing_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Rotates `from` toward `to` by at most `max_degrees`.
///
/// Reaches `to` exactly once the remaining angle is within the step.
/// Negative steps are treated as zero.
#[must_use]
pub fn rotate_towards(from: Quat, to: Quat, max_degrees: f32) -> Quat {
    let angle = from.angle_between(to);
    let max_step = max_degrees.max(0.0).to_radians();
    if angle <= max_step || angle <= f32::EPSILON {
        return to;
    }
    from.slerp(to, max_step / angle)
}

/// Grounded update: horizontal velocity snaps to `desired`, vertical kept.
#[must_use]
pub fn grounded_velocity(current: Vec3, desired: Vec3) -> Vec3 {
    Vec3::new(desired.x, current.y, desired.z)
}

/// Fraction of the gap closed per airborne tick, clamped to `[0, 1]`.
#[must_use]
pub fn air_blend(fixed_dt: f32, air_control_force: f32) -> f32 {
    (fixed_dt * air_control_force).clamp(0.0, 1.0)
}

/// Airborne update: horizontal velocity moves `blend` of the way toward
/// `desired`, vertical kept.
#[must_use]
pub fn airborne_velocity(current: Vec3, desired: Vec3, blend: f32) -> Vec3 {
    let horizontal = Vec2::new(current.x, current.z).lerp(Vec2::new(desired.x, desired.z), blend);
    Vec3::new(horizontal.x, current.y, horizontal.y)
}
