//! Fixed-tick session driving every player controller on one peer.
//!
//! A [`Session`] stands in for the networking engine's scheduler. It owns the
//! static world and one [`PlayerMotionController`] per spawned player, derives
//! each player's [`NetworkRole`] from the local peer and host flag, and runs
//! the tick loop:
//!
//! 1. **TICK**: run every controller (parallel over players with rayon)
//! 2. **INTEGRATE**: on the host, advance each body under gravity
//! 3. **REPORT**: sort reports by player id, advance the tick counter
//!
//! Players never touch each other's bodies, so the parallel phase needs no
//! locking.
//!
//! # Determinism
//!
//! Players are stored in a `BTreeMap` and reports are sorted by
//! [`PlayerId`], so identical spawn order and inputs produce identical
//! state regardless of thread scheduling. Player ids are allocated
//! sequentially; peers that spawn in the same order agree on ids.
//!
//! # Example
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use stride_core::camera::OrbitCamera;
//! use stride_core::session::{PeerId, Session};
//! use stride_physics::{Collider, StaticWorld};
//!
//! let world = StaticWorld::from_colliders(vec![Collider::ground_plane(0.0)]);
//! let host = PeerId::new(0);
//! let mut session = Session::new(world, host, true);
//!
//! let player = session.spawn(host, Vec3::new(0.0, 1.0, 0.0), OrbitCamera::default()).unwrap();
//! session.set_move_input(player, Vec2::new(0.0, 1.0));
//!
//! for _ in 0..50 {
//!     session.step(0.02, 0.02);
//! }
//!
//! assert_eq!(session.tick(), 50);
//! assert!(session.body(player).unwrap().position.z > 4.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use glam::{Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use stride_physics::{SimBody, StaticWorld, DEFAULT_GRAVITY};
use tracing::{debug, trace, warn};

use crate::authority::NetworkRole;
use crate::camera::OrbitCamera;
use crate::config::MotionConfig;
use crate::controller::{MotionDeps, PlayerMotionController, TickContext, TickReport};
use crate::error::SpawnError;
use crate::input::InputPhase;
use crate::replication::MotionSnapshot;

/// Controller type driven by a [`Session`].
pub type SessionController = PlayerMotionController<SimBody, OrbitCamera>;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a spawned player, unique within a session.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u64);

impl PlayerId {
    /// Creates a `PlayerId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a network peer (a connected client or the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerId(u32);

impl PeerId {
    /// Creates a `PeerId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer{}", self.0)
    }
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone)]
struct PlayerSlot {
    owner: PeerId,
    role: NetworkRole,
    controller: SessionController,
    last_snapshot: Option<u64>,
}

/// All players simulated on one peer.
#[derive(Debug, Clone)]
pub struct Session {
    world: StaticWorld,
    config: MotionConfig,
    gravity: Vec3,
    local_peer: PeerId,
    is_host: bool,
    tick: u64,
    next_player: u64,
    players: BTreeMap<PlayerId, PlayerSlot>,
}

impl Session {
    /// Creates an empty session at tick 0 with the default motion config.
    #[must_use]
    pub fn new(world: StaticWorld, local_peer: PeerId, is_host: bool) -> Self {
        Self {
            world,
            config: MotionConfig::default(),
            gravity: DEFAULT_GRAVITY,
            local_peer,
            is_host,
            tick: 0,
            next_player: 0,
            players: BTreeMap::new(),
        }
    }

    /// Sets the config used for subsequent spawns.
    #[must_use]
    pub fn with_config(mut self, config: MotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the gravity used by host integration.
    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Number of completed steps.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The static world.
    #[must_use]
    pub fn world(&self) -> &StaticWorld {
        &self.world
    }

    /// Config used for spawns.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// This peer's id.
    #[must_use]
    pub fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    /// Returns `true` if this peer is the authority.
    #[must_use]
    pub fn is_host(&self) -> bool {
        self.is_host
    }

    /// Number of live players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no players are spawned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Live player ids in ascending order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    /// This peer's role for `player`.
    #[must_use]
    pub fn role(&self, player: PlayerId) -> Option<NetworkRole> {
        self.players.get(&player).map(|slot| slot.role)
    }

    /// Owning peer of `player`.
    #[must_use]
    pub fn owner(&self, player: PlayerId) -> Option<PeerId> {
        self.players.get(&player).map(|slot| slot.owner)
    }

    /// The controller for `player`.
    #[must_use]
    pub fn controller(&self, player: PlayerId) -> Option<&SessionController> {
        self.players.get(&player).map(|slot| &slot.controller)
    }

    /// The body of `player`.
    #[must_use]
    pub fn body(&self, player: PlayerId) -> Option<&SimBody> {
        self.controller(player).map(PlayerMotionController::body)
    }

    /// Spawns a player owned by `owner` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::Config`] if the session config is invalid.
    pub fn spawn(&mut self, owner: PeerId, position: Vec3, camera: OrbitCamera) -> Result<PlayerId, SpawnError> {
        let deps = MotionDeps::new(SimBody::new(position), camera);
        let mut controller = match PlayerMotionController::on_create(self.config, deps) {
            Ok(controller) => controller,
            Err(err) => {
                warn!(%owner, error = %err, "player spawn rejected");
                return Err(err);
            }
        };

        let id = PlayerId::new(self.next_player);
        self.next_player += 1;

        let role = NetworkRole::from_flags(owner == self.local_peer, self.is_host);
        controller.on_network_start(role);
        debug!(player = %id, %owner, %role, "player spawned");

        self.players.insert(
            id,
            PlayerSlot {
                owner,
                role,
                controller,
                last_snapshot: None,
            },
        );
        Ok(id)
    }

    /// Removes `player`, returning its final body.
    pub fn despawn(&mut self, player: PlayerId) -> Option<SimBody> {
        let slot = self.players.remove(&player)?;
        debug!(%player, "player despawned");
        let (body, _camera) = slot.controller.on_despawn();
        Some(body)
    }

    /// Forwards a move vector to `player`. Returns `false` for unknown players.
    pub fn set_move_input(&mut self, player: PlayerId, input: Vec2) -> bool {
        let Some(slot) = self.players.get_mut(&player) else {
            return false;
        };
        slot.controller.set_move_input(input);
        true
    }

    /// Forwards a jump event to `player`. Returns whether a jump is pending.
    pub fn request_jump(&mut self, player: PlayerId, phase: InputPhase) -> bool {
        let Some(slot) = self.players.get_mut(&player) else {
            return false;
        };
        slot.controller.request_jump(phase, &self.world)
    }

    /// Replaces `player`'s camera. Returns `false` for unknown players.
    pub fn set_camera(&mut self, player: PlayerId, camera: OrbitCamera) -> bool {
        let Some(slot) = self.players.get_mut(&player) else {
            return false;
        };
        *slot.controller.camera_mut() = camera;
        true
    }

    /// Runs one fixed step for every player.
    ///
    /// Returns one report per player, in player-id order.
    pub fn step(&mut self, fixed_dt: f32, frame_dt: f32) -> Vec<(PlayerId, TickReport)> {
        let world = &self.world;
        let gravity = self.gravity;
        let is_host = self.is_host;

        let mut reports: Vec<(PlayerId, TickReport)> = self
            .players
            .par_iter_mut()
            .map(|(id, slot)| {
                let ctx = TickContext::new(fixed_dt, slot.role).with_frame_dt(frame_dt);
                let report = slot.controller.on_fixed_tick(&ctx, world);
                if is_host {
                    slot.controller.body_mut().integrate(fixed_dt, gravity, world);
                }
                (*id, report)
            })
            .collect();

        reports.sort_by_key(|(id, _)| *id);
        self.tick += 1;
        trace!(tick = self.tick, players = reports.len(), "session step");
        reports
    }

    /// One snapshot per player at the current tick. Empty on replicas.
    #[must_use]
    pub fn snapshots(&self) -> Vec<MotionSnapshot> {
        if !self.is_host {
            return Vec::new();
        }
        self.players
            .iter()
            .map(|(id, slot)| {
                MotionSnapshot::capture(*id, self.tick, slot.controller.body(), slot.controller.is_grounded())
            })
            .collect()
    }

    /// Applies authority snapshots to known players.
    ///
    /// Ignored on the host. Snapshots for unknown players, or older than one
    /// already applied, are skipped. Returns the number applied.
    pub fn apply_snapshots(&mut self, snapshots: &[MotionSnapshot]) -> usize {
        if self.is_host {
            debug!(count = snapshots.len(), "host ignores snapshots");
            return 0;
        }
        let mut applied = 0;
        for snapshot in snapshots {
            let Some(slot) = self.players.get_mut(&snapshot.player) else {
                trace!(player = %snapshot.player, "snapshot for unknown player");
                continue;
            };
            if slot.last_snapshot.is_some_and(|last| snapshot.tick < last) {
                trace!(player = %snapshot.player, tick = snapshot.tick, "stale snapshot");
                continue;
            }
            snapshot.apply_to(slot.controller.body_mut());
            slot.last_snapshot = Some(snapshot.tick);
            applied += 1;
        }
        applied
    }
}
