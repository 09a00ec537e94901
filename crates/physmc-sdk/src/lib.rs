//! PhysMC SDK - 物理驱动的位姿控制与抓取
//!
//! 让一个物理刚体（或骨骼体）通过 PID 闭环跟随目标位姿，同时用扳机输入驱动手部关节
//! 在抓取关键帧之间插值。所有运动都经由物理调用（速度、加速度、力、冲量或传送）产生，
//! 刚体仍参与碰撞。
//!
//! # 架构设计
//!
//! 从底层到高层：
//!
//! - **数据层** (`types`): 位姿、控制类型、增益、配置、错误
//! - **执行层** (`body`): 物理能力 trait 及参考刚体 / 骨骼体 / 线性约束
//! - **控制层** (`control`): PID、位姿误差、控制策略、位姿控制器、增益调节
//! - **抓取层** (`grasp`): 关键帧序列、抓取执行器、平行夹爪
//! - **工具层** (`tools`, feature `tools`): TOML 配置文件、跟踪统计
//!
//! # 快速开始
//!
//! ```rust
//! use physmc_sdk::prelude::*;
//!
//! let target = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));
//! let settings = ControllerSettings::for_control_type(ControlType::Position);
//!
//! let mut controller = PoseController::new();
//! controller
//!     .init(Some(target), Some(RigidBody::default()), &settings, None)
//!     .unwrap();
//! controller.update(0.01);
//!
//! let body = controller.body().unwrap();
//! assert_eq!(body.pose().position, target.position);
//! ```

pub mod logging;
pub mod prelude;

// 子 crate 按层导出
pub use physmc_body as body;
pub use physmc_control as control;
pub use physmc_grasp as grasp;
#[cfg(feature = "tools")]
pub use physmc_tools as tools;
pub use physmc_types as types;

// --- 常用类型 ---

// 数据层
pub use physmc_types::{
    AxisGroup, ControlError, ControlType, ControllerSettings, GraspDriveSettings,
    GripperControlType, GripperSettings, OutputBound, PidGains, Pose, Quat, Vec3,
};

// 执行层
pub use physmc_body::{
    AngularDrive, BodyError, ForceMode, JointDrives, LinearAxis, LinearDrive, LinearDrives,
    LinearMotion, PhysicsBody, PoseFn, PoseSource, PrismaticJoint, RigidBody, SkeletalBody,
};

// 控制层
pub use physmc_control::{
    ControllerState, GainTuner, PoseController, TickDiagnostics, TunedTerm, VectorPid,
};

// 抓取层
pub use physmc_grasp::{
    FramePosition, GraspExecutor, GraspKeyframe, GraspSequence, ParallelGripper,
};
