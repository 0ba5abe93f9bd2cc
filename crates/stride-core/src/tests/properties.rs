//! Property tests for the per-tick guarantees.

use glam::{Vec2, Vec3};
use proptest::prelude::*;

use crate::authority::NetworkRole;
use crate::camera::{CameraRig, OrbitCamera};
use crate::config::MotionConfig;
use crate::controller::{MotionDeps, PlayerMotionController, TickContext, VelocityUpdate};
use crate::input::InputPhase;
use crate::motion::{flatten, move_direction};
use stride_physics::SimBody;

use super::helpers::{flat_world, ramp_world, spawn_controller, spawn_controller_with, FIXED_DT};

fn host_ctx() -> TickContext {
    TickContext::new(FIXED_DT, NetworkRole::OwnerAndAuthority)
}

fn orbit_controller(position: Vec3, yaw: f32, pitch: f32) -> PlayerMotionController<SimBody, OrbitCamera> {
    let deps = MotionDeps::new(SimBody::new(position), OrbitCamera::new(yaw, pitch));
    let mut controller = PlayerMotionController::on_create(MotionConfig::default(), deps).unwrap();
    controller.on_network_start(NetworkRole::OwnerAndAuthority);
    controller
}

fn any_velocity() -> impl Strategy<Value = Vec3> {
    (-20.0f32..20.0, -20.0f32..20.0, -20.0f32..20.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn any_stick() -> impl Strategy<Value = Vec2> {
    (-1.0f32..=1.0, -1.0f32..=1.0).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn zero_input_never_rotates(
        yaw in -3.1f32..3.1,
        velocity in any_velocity(),
        height in 0.5f32..30.0,
    ) {
        let mut controller = orbit_controller(Vec3::new(0.0, height, 0.0), yaw, 0.0);
        controller.body_mut().velocity = velocity;
        let before = controller.body().rotation;

        let report = controller.on_fixed_tick(&host_ctx(), &flat_world());

        prop_assert!(!report.rotated);
        prop_assert_eq!(controller.move_direction(), Vec3::ZERO);
        prop_assert_eq!(controller.body().rotation, before);
    }

    #[test]
    fn grounded_velocity_follows_camera_relative_input(
        yaw in -3.1f32..3.1,
        pitch in -1.2f32..1.2,
        stick in any_stick(),
        velocity in any_velocity(),
    ) {
        prop_assume!(stick.length() > 0.05);
        let mut controller = orbit_controller(Vec3::new(0.0, 1.0, 0.0), yaw, pitch);
        controller.body_mut().velocity = velocity;
        controller.set_move_input(stick);

        let report = controller.on_fixed_tick(&host_ctx(), &flat_world());
        prop_assert_eq!(report.velocity, VelocityUpdate::Grounded);

        let camera = OrbitCamera::new(yaw, pitch);
        let expected = move_direction(stick, flatten(camera.forward()), flatten(camera.right()));
        let v = controller.body().velocity;
        let horizontal = Vec3::new(v.x, 0.0, v.z);
        prop_assert!((horizontal - expected * 5.0).length() < 1e-4);
        prop_assert_eq!(v.y, velocity.y);
    }

    #[test]
    fn airborne_change_is_bounded_by_blend(
        stick in any_stick(),
        velocity in any_velocity(),
        force in 0.0f32..60.0,
        dt in 0.001f32..0.1,
    ) {
        let config = MotionConfig { air_control_force: force, ..MotionConfig::default() };
        let mut controller = spawn_controller_with(config, Vec3::new(0.0, 20.0, 0.0), NetworkRole::OwnerAndAuthority);
        controller.body_mut().velocity = velocity;
        controller.set_move_input(stick);

        let report = controller.on_fixed_tick(&TickContext::new(dt, NetworkRole::OwnerAndAuthority), &flat_world());
        prop_assert_eq!(report.velocity, VelocityUpdate::Airborne);

        let target = controller.move_direction() * 5.0;
        let v = controller.body().velocity;
        let gap = Vec2::new(target.x - velocity.x, target.z - velocity.z).length();
        let moved = Vec2::new(v.x - velocity.x, v.z - velocity.z).length();
        let blend = (dt * force).min(1.0);
        prop_assert!(moved <= blend * gap + 1e-4);
        prop_assert!((moved - blend * gap).abs() < 1e-3);
        prop_assert_eq!(v.y, velocity.y);
    }

    #[test]
    fn steep_slope_leaves_velocity(
        slope in 45.5f32..85.0,
        stick in any_stick(),
        velocity in any_velocity(),
    ) {
        let mut controller = spawn_controller(Vec3::new(0.0, 1.0, 0.0), NetworkRole::OwnerAndAuthority);
        controller.body_mut().velocity = velocity;
        controller.set_move_input(stick);

        let report = controller.on_fixed_tick(&host_ctx(), &ramp_world(slope));

        prop_assert_eq!(report.velocity, VelocityUpdate::SlopeBlocked);
        prop_assert_eq!(controller.body().velocity, velocity);
    }

    #[test]
    fn impulse_iff_requested_and_grounded(
        height in 0.1f32..12.0,
        requested in any::<bool>(),
    ) {
        prop_assume!((height - 5.0).abs() > 1e-3);
        let mut controller = spawn_controller(Vec3::new(0.0, height, 0.0), NetworkRole::OwnerAndAuthority);
        if requested {
            controller.request_jump(InputPhase::Performed, &flat_world());
        }

        let report = controller.on_fixed_tick(&host_ctx(), &flat_world());

        let grounded = height < 5.0;
        prop_assert_eq!(report.grounded, grounded);
        prop_assert_eq!(report.jumped, requested && grounded);
        prop_assert_eq!(controller.body().velocity.y > 0.0, requested && grounded);
    }

    #[test]
    fn remote_never_mutates(
        stick in any_stick(),
        velocity in any_velocity(),
        height in 0.5f32..10.0,
        jump in any::<bool>(),
    ) {
        let mut controller = spawn_controller(Vec3::new(0.0, height, 0.0), NetworkRole::Remote);
        controller.body_mut().velocity = velocity;
        controller.set_move_input(stick);
        if jump {
            controller.request_jump(InputPhase::Performed, &flat_world());
        }
        let before = *controller.body();

        let report = controller.on_fixed_tick(&TickContext::new(FIXED_DT, NetworkRole::Remote), &flat_world());

        prop_assert_eq!(report.velocity, VelocityUpdate::NotApplied);
        prop_assert_eq!(*controller.body(), before);
        prop_assert!(!controller.pending_jump());
    }
}
