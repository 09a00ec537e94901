//! Mock 刚体
//!
//! 记录每一次执行调用，便于断言分发结果。

use physmc_body::{ForceMode, PhysicsBody};
use physmc_types::{Pose, Vec3};

/// 一次执行调用
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCall {
    Teleport(Pose),
    LinearVelocity(Vec3),
    AngularVelocity(Vec3),
    Force(Vec3, ForceMode),
    Torque(Vec3, ForceMode),
    Impulse(Vec3),
    AngularImpulse(Vec3),
}

/// 记录调用的刚体（位姿只随传送改变）
#[derive(Debug, Clone, Default)]
pub struct MockBody {
    pub pose: Pose,
    pub calls: Vec<BodyCall>,
}

impl MockBody {
    pub fn at(pose: Pose) -> Self {
        Self {
            pose,
            calls: Vec::new(),
        }
    }

    /// 取出并清空记录
    pub fn take_calls(&mut self) -> Vec<BodyCall> {
        std::mem::take(&mut self.calls)
    }
}

impl PhysicsBody for MockBody {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
        self.calls.push(BodyCall::Teleport(pose));
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.calls.push(BodyCall::LinearVelocity(velocity));
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.calls.push(BodyCall::AngularVelocity(velocity));
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.calls.push(BodyCall::Force(force, mode));
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.calls.push(BodyCall::Torque(torque, mode));
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.calls.push(BodyCall::Impulse(impulse));
    }

    fn add_angular_impulse(&mut self, impulse: Vec3) {
        self.calls.push(BodyCall::AngularImpulse(impulse));
    }
}
