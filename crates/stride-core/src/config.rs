//! Per-instance motion tuning.
//!
//! A [`MotionConfig`] is fixed when a character spawns and never changes for
//! the lifetime of that controller. It is usually loaded from JSON:
//!
//! ```json
//! {
//!   "moveSpeed": 5.0,
//!   "jumpForce": 5.0,
//!   "slopeLimitDegrees": 45.0,
//!   "airControlForce": 5.0
//! }
//! ```
//!
//! Missing fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What happens to a pending jump when a tick resolves while airborne.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JumpLatchPolicy {
    /// The latch stays set and fires on the next grounded tick.
    #[default]
    Retain,
    /// The latch is cleared and the request is lost.
    DropWhenAirborne,
}

/// Motion tuning for one player character.
///
/// # Example
///
/// ```
/// use stride_core::config::MotionConfig;
///
/// let config = MotionConfig::from_json_str(r#"{ "moveSpeed": 7.5 }"#).unwrap();
/// assert_eq!(config.move_speed, 7.5);
/// assert_eq!(config.jump_force, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotionConfig {
    /// Horizontal speed (units/s); also the facing turn rate in degrees/s
    pub move_speed: f32,
    /// Magnitude of the upward jump impulse
    pub jump_force: f32,
    /// Steepest walkable slope, degrees from world up
    pub slope_limit_degrees: f32,
    /// Airborne blend rate toward the desired horizontal velocity
    pub air_control_force: f32,
    /// Length of the grounded probe below the body origin
    pub ground_probe_distance: f32,
    /// Treatment of jumps pending on an airborne tick
    pub jump_latch: JumpLatchPolicy,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 5.0,
            slope_limit_degrees: 45.0,
            air_control_force: 5.0,
            ground_probe_distance: 5.0,
            jump_latch: JumpLatchPolicy::Retain,
        }
    }
}

impl MotionConfig {
    /// Parses a JSON document and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// the errors of [`MotionConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every scalar is finite and in range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.move_speed.is_finite() || self.move_speed < 0.0 {
            return Err(invalid("move_speed", "must be finite and >= 0"));
        }
        if !self.jump_force.is_finite() || self.jump_force < 0.0 {
            return Err(invalid("jump_force", "must be finite and >= 0"));
        }
        if !self.slope_limit_degrees.is_finite()
            || !(0.0..=180.0).contains(&self.slope_limit_degrees)
        {
            return Err(invalid("slope_limit_degrees", "must be within [0, 180]"));
        }
        if !self.air_control_force.is_finite() || self.air_control_force < 0.0 {
            return Err(invalid("air_control_force", "must be finite and >= 0"));
        }
        if !self.ground_probe_distance.is_finite() || self.ground_probe_distance <= 0.0 {
            return Err(invalid("ground_probe_distance", "must be finite and > 0"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
