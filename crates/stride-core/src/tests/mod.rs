//! Cross-module tests for the motion controller and session.
//!
//! - `scenarios.rs`: end-to-end movement scenarios through the session
//! - `determinism.rs`: seeded input scripts replay identically
//! - `properties.rs`: proptest checks of the per-tick guarantees
//! - `helpers.rs`: worlds, spawners and input scripts shared by the above

mod helpers;
mod properties;

pub use helpers::*;
