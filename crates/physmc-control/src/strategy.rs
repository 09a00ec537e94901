//! 执行策略
//!
//! 控制类型在配置时绑定为函数指针，之后每个 tick 直接调用，热路径上没有分支表。
//!
//! | 控制类型 | 平移 | 旋转 |
//! |---|---|---|
//! | Position | 传送到目标位置 | 传送到目标姿态 |
//! | Velocity | 设置线速度 | 设置角速度 |
//! | Acceleration | 加速度模式施加力 | 加速度模式施加力矩 |
//! | Force | 施加力 | 施加力矩 |
//! | Impulse | 施加线冲量 | 施加角冲量 |
//! | None | 不执行 | 不执行 |
//!
//! 两个轴组都是 `Position` 时合并为一次整体传送。

use physmc_body::{ForceMode, PhysicsBody};
use physmc_types::{AxisGroup, ControlType, Pose, Vec3};
use std::fmt;
use tracing::trace;

/// 把 PID 输出作用到刚体上的函数
type DriveFn = fn(&mut dyn PhysicsBody, Vec3);

fn set_linear_velocity(body: &mut dyn PhysicsBody, v: Vec3) {
    body.set_linear_velocity(v);
}

fn set_angular_velocity(body: &mut dyn PhysicsBody, v: Vec3) {
    body.set_angular_velocity(v);
}

fn add_acceleration(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_force(v, ForceMode::Acceleration);
}

fn add_angular_acceleration(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_torque(v, ForceMode::Acceleration);
}

fn add_force(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_force(v, ForceMode::Force);
}

fn add_torque(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_torque(v, ForceMode::Force);
}

fn add_impulse(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_impulse(v);
}

fn add_angular_impulse(body: &mut dyn PhysicsBody, v: Vec3) {
    body.add_angular_impulse(v);
}

#[derive(Clone, Copy)]
enum Command {
    Idle,
    Teleport,
    Drive(DriveFn),
}

/// 单个轴组（平移或旋转）的执行器
#[derive(Clone, Copy)]
pub struct AxisActuator {
    group: AxisGroup,
    control_type: ControlType,
    command: Command,
}

impl AxisActuator {
    /// 绑定轴组和控制类型
    pub fn bind(group: AxisGroup, control_type: ControlType) -> Self {
        let command = match (group, control_type) {
            (_, ControlType::None) => Command::Idle,
            (_, ControlType::Position) => Command::Teleport,
            (AxisGroup::Location, ControlType::Velocity) => Command::Drive(set_linear_velocity),
            (AxisGroup::Location, ControlType::Acceleration) => Command::Drive(add_acceleration),
            (AxisGroup::Location, ControlType::Force) => Command::Drive(add_force),
            (AxisGroup::Location, ControlType::Impulse) => Command::Drive(add_impulse),
            (AxisGroup::Rotation, ControlType::Velocity) => Command::Drive(set_angular_velocity),
            (AxisGroup::Rotation, ControlType::Acceleration) => {
                Command::Drive(add_angular_acceleration)
            },
            (AxisGroup::Rotation, ControlType::Force) => Command::Drive(add_torque),
            (AxisGroup::Rotation, ControlType::Impulse) => Command::Drive(add_angular_impulse),
        };
        AxisActuator {
            group,
            control_type,
            command,
        }
    }

    /// 不执行任何动作
    pub fn idle(group: AxisGroup) -> Self {
        AxisActuator::bind(group, ControlType::None)
    }

    pub fn group(&self) -> AxisGroup {
        self.group
    }

    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    /// 是否需要该轴组的 PID 输出
    pub fn uses_pid(&self) -> bool {
        matches!(self.command, Command::Drive(_))
    }

    /// 执行一次
    ///
    /// `target` 是组合偏移后的目标位姿，仅 `Position` 使用；`output` 是该轴组的 PID 输出。
    pub fn apply(&self, body: &mut dyn PhysicsBody, target: &Pose, output: Vec3) {
        match self.command {
            Command::Idle => trace!("No {} actuation bound, skipping", self.group),
            Command::Teleport => match self.group {
                AxisGroup::Location => body.teleport_location(target.position),
                AxisGroup::Rotation => body.teleport_rotation(target.rotation),
            },
            Command::Drive(drive) => drive(body, output),
        }
    }
}

impl fmt::Debug for AxisActuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisActuator")
            .field("group", &self.group)
            .field("control_type", &self.control_type)
            .finish()
    }
}

/// 平移 + 旋转执行策略
#[derive(Debug, Clone, Copy)]
pub struct ActuationStrategy {
    location: AxisActuator,
    rotation: AxisActuator,
}

impl ActuationStrategy {
    /// 分别绑定平移和旋转的控制类型
    pub fn bind(location: ControlType, rotation: ControlType) -> Self {
        ActuationStrategy {
            location: AxisActuator::bind(AxisGroup::Location, location),
            rotation: AxisActuator::bind(AxisGroup::Rotation, rotation),
        }
    }

    /// 惰性策略
    pub fn none() -> Self {
        ActuationStrategy::bind(ControlType::None, ControlType::None)
    }

    pub fn location(&self) -> &AxisActuator {
        &self.location
    }

    pub fn rotation(&self) -> &AxisActuator {
        &self.rotation
    }

    /// 两个轴组都不执行
    pub fn is_inert(&self) -> bool {
        self.location.control_type == ControlType::None
            && self.rotation.control_type == ControlType::None
    }

    /// 执行一次：先平移后旋转
    pub fn apply(
        &self,
        body: &mut dyn PhysicsBody,
        target: &Pose,
        location_output: Vec3,
        rotation_output: Vec3,
    ) {
        if matches!(self.location.command, Command::Teleport)
            && matches!(self.rotation.command, Command::Teleport)
        {
            body.teleport(*target);
            return;
        }
        self.location.apply(body, target, location_output);
        self.rotation.apply(body, target, rotation_output);
    }
}

impl Default for ActuationStrategy {
    fn default() -> Self {
        ActuationStrategy::none()
    }
}
