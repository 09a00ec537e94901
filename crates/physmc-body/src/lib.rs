//! # PhysMC Body Layer
//!
//! 物理执行能力抽象层：控制核心只依赖这里的 trait，不直接接触物理引擎。
//!
//! - [`PoseSource`] - 只读位姿来源（跟踪设备、驱动物体）
//! - [`PhysicsBody`] - 受控刚体：传送 / 设置速度 / 施加力、力矩、冲量
//! - [`JointDrives`] - 关节角度驱动（抓取用）
//! - [`LinearDrives`] - 线性约束位置驱动（平行夹爪手指用）
//!
//! 参考实现：
//!
//! - [`RigidBody`] - 单刚体（对应静态网格）
//! - [`SkeletalBody`] - 多刚体 + 命名关节（对应骨骼网格）
//! - [`PrismaticJoint`] - 单个线性约束（对应夹爪手指约束）
//!
//! 参考实现只做半隐式欧拉积分，没有碰撞、摩擦和重力。

use physmc_types::{Pose, Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

pub mod prismatic;
pub mod rigid;
pub mod skeletal;

pub use prismatic::{LinearMotion, PrismaticJoint};
pub use rigid::RigidBody;
pub use skeletal::{JointState, SkeletalBody};

/// 执行层统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    #[error("Joint '{0}' not found")]
    UnknownJoint(String),
    #[error("Invalid mass: {0} (must be > 0)")]
    InvalidMass(f64),
    #[error("Duplicate body or joint name: '{0}'")]
    DuplicateName(String),
    #[error("Invalid linear limit: {0} (must be >= 0)")]
    InvalidLimit(f64),
}

/// 力的施加方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceMode {
    /// 普通力（受质量影响）
    #[default]
    Force,
    /// 加速度（与质量无关）
    Acceleration,
}

/// 关节角度驱动参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularDrive {
    /// 弹簧强度
    pub spring: f64,
    /// 阻尼
    pub damping: f64,
    /// 力限制（0 表示不限制）
    pub force_limit: f64,
}

impl AngularDrive {
    pub const fn new(spring: f64, damping: f64, force_limit: f64) -> Self {
        AngularDrive {
            spring,
            damping,
            force_limit,
        }
    }
}

/// 线性约束的平移轴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearAxis {
    X,
    Y,
    Z,
}

impl LinearAxis {
    /// 按 X、Y、Z 的顺序
    pub const ALL: [LinearAxis; 3] = [LinearAxis::X, LinearAxis::Y, LinearAxis::Z];

    pub fn index(self) -> usize {
        match self {
            LinearAxis::X => 0,
            LinearAxis::Y => 1,
            LinearAxis::Z => 2,
        }
    }

    /// 只有本轴分量为 `value` 的向量
    pub fn vector(self, value: f64) -> Vec3 {
        let mut v = Vec3::zeros();
        v[self.index()] = value;
        v
    }
}

impl std::fmt::Display for LinearAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinearAxis::X => f.write_str("X"),
            LinearAxis::Y => f.write_str("Y"),
            LinearAxis::Z => f.write_str("Z"),
        }
    }
}

/// 线性位置驱动参数
///
/// `force = spring * (target - position) + damping * (target_velocity - velocity)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDrive {
    pub spring: f64,
    pub damping: f64,
    /// 力限制（0 表示不限制）
    pub force_limit: f64,
}

impl LinearDrive {
    pub const fn new(spring: f64, damping: f64, force_limit: f64) -> Self {
        LinearDrive {
            spring,
            damping,
            force_limit,
        }
    }
}

/// 只读位姿来源
pub trait PoseSource {
    fn current_pose(&self) -> Pose;
}

impl PoseSource for Pose {
    fn current_pose(&self) -> Pose {
        *self
    }
}

impl<P: PoseSource + ?Sized> PoseSource for &P {
    fn current_pose(&self) -> Pose {
        (**self).current_pose()
    }
}

impl<P: PoseSource + ?Sized> PoseSource for Box<P> {
    fn current_pose(&self) -> Pose {
        (**self).current_pose()
    }
}

/// 单线程共享的位姿来源（引擎侧同时持有并更新）
impl<P: PoseSource + ?Sized> PoseSource for Rc<RefCell<P>> {
    fn current_pose(&self) -> Pose {
        self.borrow().current_pose()
    }
}

/// 闭包位姿来源
///
/// 位姿需要现场计算（如跟踪设备读数加标定）时使用。
///
/// ```rust
/// use physmc_body::{PoseFn, PoseSource};
/// use physmc_types::{Pose, Vec3};
///
/// let source = PoseFn(|| Pose::from_position(Vec3::new(0.0, 0.0, 1.0)));
/// assert_eq!(source.current_pose().position.z, 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PoseFn<F>(pub F);

impl<F: Fn() -> Pose> PoseSource for PoseFn<F> {
    fn current_pose(&self) -> Pose {
        (self.0)()
    }
}

/// 受控刚体的执行能力
///
/// 所有命令只影响当前物理步（力、冲量累加器或速度），传送除外。
pub trait PhysicsBody {
    /// 当前世界位姿
    fn pose(&self) -> Pose;

    /// 带物理传送（保留速度）
    fn teleport(&mut self, pose: Pose);

    /// 设置线速度
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// 设置角速度（rad/s）
    fn set_angular_velocity(&mut self, velocity: Vec3);

    /// 施加力
    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    /// 施加力矩（rad）
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode);

    /// 施加线冲量
    fn add_impulse(&mut self, impulse: Vec3);

    /// 施加角冲量（rad）
    fn add_angular_impulse(&mut self, impulse: Vec3);

    /// 只传送位置，保留姿态
    fn teleport_location(&mut self, position: Vec3) {
        let pose = self.pose().with_position(position);
        self.teleport(pose);
    }

    /// 只传送姿态，保留位置
    fn teleport_rotation(&mut self, rotation: Quat) {
        let pose = self.pose().with_rotation(rotation);
        self.teleport(pose);
    }

    /// 清零速度后传送
    fn halt_and_teleport(&mut self, pose: Pose) {
        self.set_linear_velocity(Vec3::zeros());
        self.set_angular_velocity(Vec3::zeros());
        self.teleport(pose);
    }
}

impl<B: PhysicsBody + ?Sized> PhysicsBody for &mut B {
    fn pose(&self) -> Pose {
        (**self).pose()
    }
    fn teleport(&mut self, pose: Pose) {
        (**self).teleport(pose)
    }
    fn set_linear_velocity(&mut self, velocity: Vec3) {
        (**self).set_linear_velocity(velocity)
    }
    fn set_angular_velocity(&mut self, velocity: Vec3) {
        (**self).set_angular_velocity(velocity)
    }
    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        (**self).add_force(force, mode)
    }
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        (**self).add_torque(torque, mode)
    }
    fn add_impulse(&mut self, impulse: Vec3) {
        (**self).add_impulse(impulse)
    }
    fn add_angular_impulse(&mut self, impulse: Vec3) {
        (**self).add_angular_impulse(impulse)
    }
}

impl<B: PhysicsBody + ?Sized> PhysicsBody for Box<B> {
    fn pose(&self) -> Pose {
        (**self).pose()
    }
    fn teleport(&mut self, pose: Pose) {
        (**self).teleport(pose)
    }
    fn set_linear_velocity(&mut self, velocity: Vec3) {
        (**self).set_linear_velocity(velocity)
    }
    fn set_angular_velocity(&mut self, velocity: Vec3) {
        (**self).set_angular_velocity(velocity)
    }
    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        (**self).add_force(force, mode)
    }
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        (**self).add_torque(torque, mode)
    }
    fn add_impulse(&mut self, impulse: Vec3) {
        (**self).add_impulse(impulse)
    }
    fn add_angular_impulse(&mut self, impulse: Vec3) {
        (**self).add_angular_impulse(impulse)
    }
}

/// 单线程共享的刚体
///
/// 位姿控制器和抓取执行器作用于同一个骨骼体时使用。每次调用只短暂借用，
/// 调用方不能在持有 `borrow_mut()` 的同时驱动控制器。
impl<B: PhysicsBody + ?Sized> PhysicsBody for Rc<RefCell<B>> {
    fn pose(&self) -> Pose {
        self.borrow().pose()
    }
    fn teleport(&mut self, pose: Pose) {
        self.borrow_mut().teleport(pose)
    }
    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.borrow_mut().set_linear_velocity(velocity)
    }
    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.borrow_mut().set_angular_velocity(velocity)
    }
    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.borrow_mut().add_force(force, mode)
    }
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.borrow_mut().add_torque(torque, mode)
    }
    fn add_impulse(&mut self, impulse: Vec3) {
        self.borrow_mut().add_impulse(impulse)
    }
    fn add_angular_impulse(&mut self, impulse: Vec3) {
        self.borrow_mut().add_angular_impulse(impulse)
    }
}

/// 关节角度驱动能力
pub trait JointDrives {
    /// 是否存在该关节
    fn has_joint(&self, joint: &str) -> bool;

    /// 设置关节的目标姿态和驱动参数
    fn drive_joint(&mut self, joint: &str, target: Quat, drive: AngularDrive)
    -> Result<(), BodyError>;
}

impl<H: JointDrives + ?Sized> JointDrives for &mut H {
    fn has_joint(&self, joint: &str) -> bool {
        (**self).has_joint(joint)
    }

    fn drive_joint(
        &mut self,
        joint: &str,
        target: Quat,
        drive: AngularDrive,
    ) -> Result<(), BodyError> {
        (**self).drive_joint(joint, target, drive)
    }
}

impl<H: JointDrives + ?Sized> JointDrives for Rc<RefCell<H>> {
    fn has_joint(&self, joint: &str) -> bool {
        self.borrow().has_joint(joint)
    }

    fn drive_joint(
        &mut self,
        joint: &str,
        target: Quat,
        drive: AngularDrive,
    ) -> Result<(), BodyError> {
        self.borrow_mut().drive_joint(joint, target, drive)
    }
}

/// 线性约束位置驱动能力
pub trait LinearDrives {
    /// 线性限位（单侧行程）
    fn linear_limit(&self) -> f64;

    /// 该轴是否为限位运动（而非锁定或自由）
    fn is_axis_limited(&self, axis: LinearAxis) -> bool;

    /// 设置驱动参数，只在 `axis` 上启用位置驱动
    fn set_linear_drive(&mut self, axis: LinearAxis, drive: LinearDrive);

    /// 设置位置驱动目标（约束坐标系）
    fn set_linear_target(&mut self, target: Vec3);
}

impl<C: LinearDrives + ?Sized> LinearDrives for &mut C {
    fn linear_limit(&self) -> f64 {
        (**self).linear_limit()
    }
    fn is_axis_limited(&self, axis: LinearAxis) -> bool {
        (**self).is_axis_limited(axis)
    }
    fn set_linear_drive(&mut self, axis: LinearAxis, drive: LinearDrive) {
        (**self).set_linear_drive(axis, drive)
    }
    fn set_linear_target(&mut self, target: Vec3) {
        (**self).set_linear_target(target)
    }
}

impl<C: LinearDrives + ?Sized> LinearDrives for Rc<RefCell<C>> {
    fn linear_limit(&self) -> f64 {
        self.borrow().linear_limit()
    }
    fn is_axis_limited(&self, axis: LinearAxis) -> bool {
        self.borrow().is_axis_limited(axis)
    }
    fn set_linear_drive(&mut self, axis: LinearAxis, drive: LinearDrive) {
        self.borrow_mut().set_linear_drive(axis, drive)
    }
    fn set_linear_target(&mut self, target: Vec3) {
        self.borrow_mut().set_linear_target(target)
    }
}
