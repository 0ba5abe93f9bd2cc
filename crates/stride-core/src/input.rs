//! Latched player input.
//!
//! The input binding layer writes here between ticks; the motion resolver
//! reads the latch once per fixed tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Phase of a button event as reported by the input binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputPhase {
    /// The control started actuating.
    Started,
    /// The control completed its interaction (the edge that triggers a jump).
    Performed,
    /// The control was released or interrupted.
    Canceled,
}

/// Latest move vector and the pending-jump flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputLatch {
    move_input: Vec2,
    pending_jump: bool,
}

impl InputLatch {
    /// Creates an empty latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latched move vector (x = strafe right, y = forward).
    #[must_use]
    pub fn move_input(&self) -> Vec2 {
        self.move_input
    }

    /// Returns `true` if a jump is waiting to be resolved.
    #[must_use]
    pub fn pending_jump(&self) -> bool {
        self.pending_jump
    }

    /// Overwrites the move vector.
    pub fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input;
    }

    /// Latches a jump if `phase` is `Performed` and the body is `grounded`.
    ///
    /// Returns `true` if the latch is set after the call. A second request
    /// while one is pending changes nothing.
    pub fn latch_jump(&mut self, phase: InputPhase, grounded: bool) -> bool {
        if phase == InputPhase::Performed && grounded {
            self.pending_jump = true;
        }
        self.pending_jump
    }

    /// Consumes the pending jump, returning whether one was pending.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.pending_jump)
    }

    /// Drops any pending jump.
    pub fn clear_jump(&mut self) {
        self.pending_jump = false;
    }
}
