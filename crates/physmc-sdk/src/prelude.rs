//! Prelude 模块
//!
//! 常用类型的便捷导入：
//!
//! ```rust
//! use physmc_sdk::prelude::*;
//! ```

// 数据层
pub use crate::types::{
    ControlError, ControlType, ControllerSettings, GraspDriveSettings, GripperControlType,
    GripperSettings, OutputBound, PidGains, Pose, Quat, Vec3,
};

// 执行层（trait 需要在作用域内才能调用方法）
pub use crate::body::{
    JointDrives, LinearDrives, PhysicsBody, PoseFn, PoseSource, PrismaticJoint, RigidBody,
    SkeletalBody,
};

// 控制层
pub use crate::control::{GainTuner, PoseController};

// 抓取层
pub use crate::grasp::{GraspExecutor, GraspKeyframe, GraspSequence, ParallelGripper};
