//! 集成测试场景：一只共享的骨骼手 + 一个三帧抓取序列

use physmc_sdk::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub const FINGERS: [&str; 3] = ["index_01", "middle_01", "thumb_01"];

pub type SharedHand = Rc<RefCell<SkeletalBody>>;

pub fn shared_hand() -> SharedHand {
    let hand = SkeletalBody::new("hand_r", RigidBody::default())
        .with_joints(FINGERS)
        .expect("finger names are unique");
    Rc::new(RefCell::new(hand))
}

/// 张开 -> 半握 -> 握拳，手指绕 y 轴弯曲
pub fn fist_sequence() -> GraspSequence {
    let bend = |angle: f64| -> GraspKeyframe {
        FINGERS
            .iter()
            .map(|joint| (joint.to_string(), Quat::from_euler_angles(0.0, angle, 0.0)))
            .collect()
    };
    GraspSequence::new("fist")
        .with_frame(bend(0.0))
        .with_frame(bend(0.6))
        .with_frame(bend(1.2))
}

/// 只有比例项的速度控制（离散步长下稳定）
pub fn velocity_settings() -> ControllerSettings {
    ControllerSettings::for_control_type(ControlType::Velocity).with_gains(
        PidGains::proportional(10.0, 20.0),
        PidGains::proportional(12.0, 15.0),
    )
}
