//! Camera rig collaborator.
//!
//! Movement is camera-relative: "forward" on the stick means the camera's
//! forward projected onto the ground plane. The controller only needs the
//! camera's forward and right vectors; the rig updates them on its own
//! schedule.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Source of the camera's world-space basis vectors.
pub trait CameraRig {
    /// Unit forward vector.
    fn forward(&self) -> Vec3;

    /// Unit right vector.
    fn right(&self) -> Vec3;
}

impl<T: CameraRig + ?Sized> CameraRig for &T {
    fn forward(&self) -> Vec3 {
        (**self).forward()
    }

    fn right(&self) -> Vec3 {
        (**self).right()
    }
}

/// A fixed forward/right pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraBasis {
    /// Forward vector
    pub forward: Vec3,
    /// Right vector
    pub right: Vec3,
}

impl CameraBasis {
    /// Camera looking along `forward` with world up as its up vector.
    ///
    /// Right is `forward x up` (right-handed, Y up), so a camera looking down
    /// +Z has right = -X.
    #[must_use]
    pub fn looking_along(forward: Vec3) -> Self {
        let forward = forward.normalize_or_zero();
        let right = forward.cross(stride_physics::WORLD_UP).normalize_or_zero();
        Self { forward, right }
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::looking_along(Vec3::Z)
    }
}

impl CameraRig for CameraBasis {
    fn forward(&self) -> Vec3 {
        self.forward
    }

    fn right(&self) -> Vec3 {
        self.right
    }
}

/// Third-person orbit camera described by yaw and pitch (radians).
///
/// Yaw 0 looks along +Z; positive pitch looks up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrbitCamera {
    /// Rotation about world up
    pub yaw: f32,
    /// Elevation above the horizon
    pub pitch: f32,
}

impl OrbitCamera {
    /// Creates an orbit camera.
    #[must_use]
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    fn orientation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.pitch)
    }
}

impl CameraRig for OrbitCamera {
    fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    fn right(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_X
    }
}
