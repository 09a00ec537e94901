//! 位姿控制器集成测试
//!
//! 覆盖控制类型分发表、偏移组合和闭环收敛。

mod common;

use approx::assert_relative_eq;
use common::mock_body::{BodyCall, MockBody};
use physmc_body::{ForceMode, PhysicsBody, PoseFn, PoseSource, RigidBody};
use physmc_control::{ControllerState, PoseController};
use physmc_types::{ControlType, ControllerSettings, OutputBound, PidGains, Pose, Quat, Vec3};
use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

fn unit_gains(control_type: ControlType) -> ControllerSettings {
    ControllerSettings::for_control_type(control_type).with_gains(
        PidGains::proportional(1.0, 100.0),
        PidGains::proportional(1.0, 100.0),
    )
}

/// 目标：平移 (2, 0, 0)，绕 z 旋转一个小角度
fn offset_target() -> Pose {
    Pose::new(
        Vec3::new(2.0, 0.0, 0.0),
        Quat::from_axis_angle(&Vec3::z_axis(), 0.2),
    )
}

fn run_one_tick(control_type: ControlType) -> Vec<BodyCall> {
    let mut controller = PoseController::new();
    controller
        .init(
            Some(offset_target()),
            Some(MockBody::default()),
            &unit_gains(control_type),
            None,
        )
        .unwrap();
    controller.update(0.01);
    controller.body_mut().unwrap().take_calls()
}

#[test]
fn test_dispatch_table() {
    let loc = Vec3::new(2.0, 0.0, 0.0);
    let rot = Vec3::new(0.0, 0.0, (0.1f64).sin());

    let calls = run_one_tick(ControlType::Velocity);
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], BodyCall::LinearVelocity(loc));
    match calls[1] {
        BodyCall::AngularVelocity(v) => assert_relative_eq!(v, rot, epsilon = 1e-12),
        ref other => panic!("unexpected call {other:?}"),
    }

    let calls = run_one_tick(ControlType::Acceleration);
    assert_eq!(calls[0], BodyCall::Force(loc, ForceMode::Acceleration));
    assert!(matches!(calls[1], BodyCall::Torque(_, ForceMode::Acceleration)));

    let calls = run_one_tick(ControlType::Force);
    assert_eq!(calls[0], BodyCall::Force(loc, ForceMode::Force));
    assert!(matches!(calls[1], BodyCall::Torque(_, ForceMode::Force)));

    let calls = run_one_tick(ControlType::Impulse);
    assert_eq!(calls[0], BodyCall::Impulse(loc));
    assert!(matches!(calls[1], BodyCall::AngularImpulse(_)));

    let calls = run_one_tick(ControlType::Position);
    assert_eq!(calls, vec![BodyCall::Teleport(offset_target())]);

    let calls = run_one_tick(ControlType::None);
    assert!(calls.is_empty());
}

#[test]
fn test_location_before_rotation() {
    let calls = run_one_tick(ControlType::Impulse);
    assert!(matches!(calls[0], BodyCall::Impulse(_)));
    assert!(matches!(calls[1], BodyCall::AngularImpulse(_)));
}

#[test]
fn test_split_control_types() {
    let settings =
        unit_gains(ControlType::Velocity).with_rotation_control_type(ControlType::Position);
    let mut controller = PoseController::new();
    controller
        .init(Some(offset_target()), Some(MockBody::default()), &settings, None)
        .unwrap();
    let tick = controller.update(0.01).unwrap();
    assert_eq!(tick.rotation_output, Vec3::zeros());

    let calls = controller.body_mut().unwrap().take_calls();
    assert_eq!(calls[0], BodyCall::LinearVelocity(Vec3::new(2.0, 0.0, 0.0)));
    // 只传送姿态，位置保持原点
    assert_eq!(
        calls[1],
        BodyCall::Teleport(Pose::from_rotation(offset_target().rotation))
    );
}

#[test]
fn test_output_clamped_to_max() {
    let settings = ControllerSettings::for_control_type(ControlType::Velocity).with_gains(
        PidGains::proportional(100.0, 20.0),
        PidGains::proportional(1.0, 1.0),
    );
    let mut controller = PoseController::new();
    controller
        .init(
            Some(Pose::from_position(Vec3::new(1.0, -1.0, 0.1))),
            Some(MockBody::default()),
            &settings,
            None,
        )
        .unwrap();
    let tick = controller.update(0.01).unwrap();
    assert_eq!(tick.location_output, Vec3::new(20.0, -20.0, 10.0));

    let sphere = settings.with_output_bound(OutputBound::Sphere);
    controller
        .init(
            Some(Pose::from_position(Vec3::new(1.0, -1.0, 0.1))),
            Some(MockBody::default()),
            &sphere,
            None,
        )
        .unwrap();
    let tick = controller.update(0.01).unwrap();
    assert_relative_eq!(tick.location_output.norm(), 20.0, epsilon = 1e-9);
}

#[test]
fn test_moving_target_through_shared_state() {
    let target = Rc::new(RefCell::new(Pose::identity()));
    let source = {
        let target = Rc::clone(&target);
        PoseFn(move || *target.borrow())
    };

    let mut controller = PoseController::new();
    controller
        .init(
            Some(source),
            Some(MockBody::default()),
            &unit_gains(ControlType::Velocity),
            None,
        )
        .unwrap();

    let tick = controller.update(0.01).unwrap();
    assert_eq!(tick.location_error, Vec3::zeros());

    *target.borrow_mut() = Pose::from_position(Vec3::new(0.0, 3.0, 0.0));
    let tick = controller.update(0.01).unwrap();
    assert_eq!(tick.location_error, Vec3::new(0.0, 3.0, 0.0));
}

#[test]
fn test_offset_follows_target_rotation() {
    // 刚体在参考（目标初始位姿）右侧 1 个单位
    let reference = Pose::identity();
    let body = MockBody::at(Pose::from_position(Vec3::new(0.0, -1.0, 0.0)));
    let target = Rc::new(RefCell::new(reference));
    let source = {
        let target = Rc::clone(&target);
        PoseFn(move || *target.borrow())
    };

    let mut controller = PoseController::new();
    controller
        .init(
            Some(source),
            Some(body),
            &unit_gains(ControlType::Position),
            Some(reference),
        )
        .unwrap();

    // 目标绕 z 转 90°：刚体应被放到 (1, 0, 0)
    *target.borrow_mut() = Pose::from_rotation(Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2));
    controller.update(0.01).unwrap();
    let pose = controller.body().unwrap().pose();
    assert_relative_eq!(pose.position, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(pose.rotation.angle(), FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_velocity_control_converges() {
    let target = Pose::new(
        Vec3::new(0.5, -0.25, 1.0),
        Quat::from_euler_angles(0.2, -0.1, 0.4),
    );
    let settings = ControllerSettings::for_control_type(ControlType::Velocity).with_gains(
        PidGains::proportional(10.0, 20.0),
        PidGains::proportional(12.0, 15.0),
    );
    let mut controller = PoseController::new();
    controller
        .init(Some(target), Some(RigidBody::default()), &settings, None)
        .unwrap();

    let dt = 0.01;
    for _ in 0..500 {
        controller.update(dt).unwrap();
        controller.body_mut().unwrap().step(dt);
    }

    let body = controller.body().unwrap();
    let pose = body.current_pose();
    assert!((pose.position - target.position).norm() < 1e-2);
    assert!(pose.rotation.angle_to(&target.rotation) < 1e-2);
}

#[test]
fn test_acceleration_control_converges() {
    let target = Pose::from_position(Vec3::new(0.3, 0.0, -0.2));
    let settings = ControllerSettings::for_control_type(ControlType::Acceleration);
    let mut controller = PoseController::new();
    controller
        .init(Some(target), Some(RigidBody::default()), &settings, None)
        .unwrap();

    let dt = 0.001;
    for _ in 0..3000 {
        controller.update(dt).unwrap();
        controller.body_mut().unwrap().step(dt);
    }

    let pose = controller.body().unwrap().current_pose();
    assert!((pose.position - target.position).norm() < 1e-2);
}

#[test]
fn test_controller_lifecycle() {
    let mut controller: PoseController<MockBody, Pose> = PoseController::new();
    assert_eq!(controller.state(), ControllerState::Uninitialized);

    controller
        .init(
            Some(Pose::identity()),
            Some(MockBody::default()),
            &unit_gains(ControlType::Force),
            None,
        )
        .unwrap();
    assert_eq!(controller.state(), ControllerState::Configured);

    controller.update(0.01);
    assert_eq!(controller.state(), ControllerState::Active);

    controller.clear();
    assert_eq!(controller.state(), ControllerState::Disabled);
    controller.body_mut().unwrap().take_calls();
    assert!(controller.update(0.01).is_none());
    assert!(controller.body().unwrap().calls.is_empty());
}
