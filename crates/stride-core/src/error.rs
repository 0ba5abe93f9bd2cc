//! Error types for configuration and spawning.
//!
//! Only construction can fail. Once a controller exists, every runtime
//! condition (no ground, zero input, rejected jump) is an ordinary branch.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration could not be loaded or is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its legal range.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Offending field name
        field: &'static str,
        /// Human-readable constraint
        reason: &'static str,
    },

    /// The JSON document could not be parsed.
    #[error("failed to parse motion config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("failed to read motion config from {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A controller could not be spawned.
///
/// Missing collaborators are misconfigurations of the spawning code, so they
/// are reported once at spawn time instead of being checked every tick.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// No rigid body was supplied.
    #[error("player motion controller spawned without a rigid body")]
    MissingBody,

    /// No camera rig was supplied.
    #[error("player motion controller spawned without a camera rig")]
    MissingCamera,

    /// The supplied configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
