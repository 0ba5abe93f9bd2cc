//! Test worlds, spawners and seeded input scripts.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_physics::{Collider, SimBody, StaticWorld, SurfaceTags};

use crate::authority::NetworkRole;
use crate::camera::{CameraBasis, OrbitCamera};
use crate::config::MotionConfig;
use crate::controller::{MotionDeps, PlayerMotionController};
use crate::input::InputPhase;
use crate::replication::MotionSnapshot;
use crate::session::{PeerId, PlayerId, Session};

/// Peer acting as host in session tests.
pub const HOST: PeerId = PeerId::new(0);

/// Peer acting as a remote client in session tests.
pub const CLIENT: PeerId = PeerId::new(1);

/// Fixed step used throughout the suites (50 Hz).
pub const FIXED_DT: f32 = 0.02;

// =============================================================================
// Worlds
// =============================================================================

/// Infinite ground plane at height 0.
pub fn flat_world() -> StaticWorld {
    StaticWorld::from_colliders(vec![Collider::ground_plane(0.0)])
}

/// A single ground-tagged ramp through the origin.
pub fn ramp_world(slope_degrees: f32) -> StaticWorld {
    StaticWorld::from_colliders(vec![Collider::ramp(Vec3::ZERO, slope_degrees, SurfaceTags::GROUND)])
}

/// Flat ground for `z > 0`, rising into a ramp of `slope_degrees` for `z < 0`.
pub fn valley_world(slope_degrees: f32) -> StaticWorld {
    StaticWorld::from_colliders(vec![
        Collider::ground_plane(0.0),
        Collider::ramp(Vec3::ZERO, slope_degrees, SurfaceTags::GROUND),
    ])
}

// =============================================================================
// Spawners
// =============================================================================

/// Controller at `position` with the given role and a camera looking down +Z.
pub fn spawn_controller(position: Vec3, role: NetworkRole) -> PlayerMotionController<SimBody, CameraBasis> {
    spawn_controller_with(MotionConfig::default(), position, role)
}

/// Controller with a custom config.
pub fn spawn_controller_with(
    config: MotionConfig,
    position: Vec3,
    role: NetworkRole,
) -> PlayerMotionController<SimBody, CameraBasis> {
    let deps = MotionDeps::new(SimBody::new(position), CameraBasis::default());
    let mut controller = PlayerMotionController::on_create(config, deps).unwrap();
    controller.on_network_start(role);
    controller
}

/// Host session with `count` host-owned players spaced along X on `world`.
pub fn host_session(world: StaticWorld, count: usize) -> (Session, Vec<PlayerId>) {
    let mut session = Session::new(world, HOST, true);
    let ids = (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let position = Vec3::new(i as f32 * 4.0, 1.0, 2.0);
            session.spawn(HOST, position, OrbitCamera::default()).unwrap()
        })
        .collect();
    (session, ids)
}

// =============================================================================
// Input scripts
// =============================================================================

/// One tick of scripted input for one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    /// Stick vector
    pub move_input: Vec2,
    /// Press jump this tick
    pub jump: bool,
    /// Camera yaw (radians)
    pub yaw: f32,
}

/// Generates `ticks` steps of random input from `seed`.
pub fn input_script(seed: u64, ticks: usize) -> Vec<ScriptStep> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut yaw = 0.0f32;
    (0..ticks)
        .map(|_| {
            yaw += rng.gen_range(-0.1f32..=0.1);
            ScriptStep {
                move_input: Vec2::new(rng.gen_range(-1.0f32..=1.0), rng.gen_range(-1.0f32..=1.0)),
                jump: rng.gen_bool(0.05),
                yaw,
            }
        })
        .collect()
}

/// Feeds `script` to every player in `players` (one script row per tick) and
/// collects the host snapshots after each step.
pub fn run_script(session: &mut Session, players: &[PlayerId], script: &[ScriptStep]) -> Vec<MotionSnapshot> {
    let mut out = Vec::new();
    for step in script {
        for (i, player) in players.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f32 * 0.5;
            session.set_camera(*player, OrbitCamera::new(step.yaw + offset, 0.0));
            session.set_move_input(*player, step.move_input);
            if step.jump {
                session.request_jump(*player, InputPhase::Performed);
            }
        }
        session.step(FIXED_DT, FIXED_DT);
        out.extend(session.snapshots());
    }
    out
}
