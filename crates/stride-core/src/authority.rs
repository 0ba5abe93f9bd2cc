//! Ownership and authority gating.
//!
//! The network layer decides, per tick and per character, whether this peer
//! owns the character (drives its input) and whether it is the authoritative
//! host (commits its physics). Both facts are folded into one
//! [`NetworkRole`] so every legal combination is spelled out.
//!
//! | role                | input | sensors + facing | velocity + jump |
//! |---------------------|-------|------------------|-----------------|
//! | `Remote`            | no    | no               | no              |
//! | `Owner`             | yes   | yes              | no              |
//! | `Authority`         | no    | no               | no              |
//! | `OwnerAndAuthority` | yes   | yes              | yes             |
//!
//! Physics is nested inside the owner gate: an authority that does not own
//! the character leaves it alone.

use std::fmt;

use serde::{Deserialize, Serialize};

/// This peer's relationship to one character instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkRole {
    /// Neither owner nor authority: an observing replica.
    #[default]
    Remote,
    /// Owning client without physics authority.
    Owner,
    /// Authoritative host that does not own the character.
    Authority,
    /// Host that also owns the character.
    OwnerAndAuthority,
}

impl NetworkRole {
    /// Builds a role from the network layer's two flags.
    ///
    /// ```
    /// use stride_core::authority::NetworkRole;
    ///
    /// assert_eq!(NetworkRole::from_flags(true, true), NetworkRole::OwnerAndAuthority);
    /// assert_eq!(NetworkRole::from_flags(false, false), NetworkRole::Remote);
    /// ```
    #[must_use]
    pub const fn from_flags(is_owner: bool, is_authority: bool) -> Self {
        match (is_owner, is_authority) {
            (false, false) => Self::Remote,
            (true, false) => Self::Owner,
            (false, true) => Self::Authority,
            (true, true) => Self::OwnerAndAuthority,
        }
    }

    /// Returns `true` if this peer owns the character.
    #[must_use]
    pub const fn is_owner(self) -> bool {
        matches!(self, Self::Owner | Self::OwnerAndAuthority)
    }

    /// Returns `true` if this peer is the authoritative host.
    #[must_use]
    pub const fn is_authority(self) -> bool {
        matches!(self, Self::Authority | Self::OwnerAndAuthority)
    }

    /// May latch move input and jump requests.
    #[must_use]
    pub const fn samples_input(self) -> bool {
        self.is_owner()
    }

    /// May run the ground/slope sensor and update facing.
    #[must_use]
    pub const fn runs_sensors(self) -> bool {
        self.is_owner()
    }

    /// May write velocity and apply the jump impulse.
    #[must_use]
    pub const fn applies_physics(self) -> bool {
        self.is_owner() && self.is_authority()
    }
}

impl fmt::Display for NetworkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "Remote"),
            Self::Owner => write!(f, "Owner"),
            Self::Authority => write!(f, "Authority"),
            Self::OwnerAndAuthority => write!(f, "OwnerAndAuthority"),
        }
    }
}
