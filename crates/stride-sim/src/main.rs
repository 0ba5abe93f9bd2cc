//! Headless host/client run of the stride motion controller.
//!
//! Usage: `stride-sim [config.json|-] [ticks] [seed]`
//!
//! Spawns one host-owned player on a host session and mirrors it on a
//! client session, drives it with a seeded input script, forwards every host
//! snapshot to the client and prints each snapshot as a JSON line.

use anyhow::{bail, Context, Result};
use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_core::camera::OrbitCamera;
use stride_core::config::MotionConfig;
use stride_core::input::InputPhase;
use stride_core::session::{PeerId, Session};
use stride_physics::{Collider, StaticWorld, SurfaceTags};
use tracing::{debug, info};

const FIXED_DT: f32 = 0.02;
const DEFAULT_TICKS: u64 = 500;
const DEFAULT_SEED: u64 = 42;

const HOST: PeerId = PeerId::new(0);
const CLIENT: PeerId = PeerId::new(1);

struct Args {
    config: MotionConfig,
    ticks: u64,
    seed: u64,
}

fn parse_args(args: &[String]) -> Result<Args> {
    if args.len() > 3 {
        bail!("usage: stride-sim [config.json|-] [ticks] [seed]");
    }

    let config = match args.first().map(String::as_str) {
        None | Some("-") => MotionConfig::default(),
        Some(path) => MotionConfig::load(path).with_context(|| format!("loading motion config from {path}"))?,
    };

    let ticks = match args.get(1) {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid tick count {raw:?}"))?,
        None => DEFAULT_TICKS,
    };
    let seed = match args.get(2) {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("invalid seed {raw:?}"))?,
        None => DEFAULT_SEED,
    };

    Ok(Args { config, ticks, seed })
}

/// Flat ground, a walkable ramp rising beyond z = -8 and a wall-tagged
/// block to the east.
fn build_world() -> StaticWorld {
    let mut world = StaticWorld::new();
    world.add(Collider::ground_plane(0.0));
    world.add(Collider::ramp(Vec3::new(0.0, 0.0, -8.0), 20.0, SurfaceTags::GROUND));
    world.add(Collider::block(
        Vec3::new(12.0, 0.0, -4.0),
        Vec3::new(14.0, 6.0, 4.0),
        SurfaceTags::WALL,
    ));
    world
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Args { config, ticks, seed } = parse_args(&args)?;
    info!(ticks, seed, "starting stride-sim");

    let world = build_world();
    let spawn_at = Vec3::new(0.0, 1.0, 4.0);

    let mut host = Session::new(world.clone(), HOST, true).with_config(config);
    let mut client = Session::new(world, CLIENT, false).with_config(config);

    let player = host
        .spawn(HOST, spawn_at, OrbitCamera::default())
        .context("spawning host player")?;
    let mirrored = client
        .spawn(HOST, spawn_at, OrbitCamera::default())
        .context("spawning client mirror")?;
    if mirrored != player {
        bail!("host and client disagree on player id ({player} vs {mirrored})");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut yaw = 0.0f32;
    let mut stick = Vec2::ZERO;

    for tick in 0..ticks {
        // Hold each stick direction for a short while, like a player would
        if tick % 25 == 0 {
            stick = Vec2::new(rng.gen_range(-1.0f32..=1.0), rng.gen_range(-1.0f32..=1.0));
            debug!(tick, x = stick.x, y = stick.y, "new stick input");
        }
        yaw += rng.gen_range(-0.05f32..=0.05);

        host.set_camera(player, OrbitCamera::new(yaw, -0.2));
        host.set_move_input(player, stick);
        if rng.gen_bool(0.02) && host.request_jump(player, InputPhase::Performed) {
            debug!(tick, "jump latched");
        }

        host.step(FIXED_DT, FIXED_DT);
        client.step(FIXED_DT, FIXED_DT);

        let snapshots = host.snapshots();
        client.apply_snapshots(&snapshots);
        for snapshot in &snapshots {
            println!("{}", serde_json::to_string(snapshot).context("encoding snapshot")?);
        }
    }

    let (Some(truth), Some(mirror)) = (host.body(player), client.body(player)) else {
        bail!("player {player} vanished during the run");
    };
    info!(
        x = truth.position.x,
        y = truth.position.y,
        z = truth.position.z,
        drift = (truth.position - mirror.position).length(),
        "run complete"
    );
    Ok(())
}
