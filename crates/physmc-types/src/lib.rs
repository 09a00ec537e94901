//! # PhysMC Types
//!
//! 物理驱动运动控制的基础数据模型（无状态、无日志、无物理引擎依赖）。
//!
//! ## 包含模块
//!
//! - `pose` - 位姿（位置 + 单位四元数）及刚体变换组合
//! - `control` - 控制类型（Position / Velocity / Acceleration / Force / Impulse）及夹爪控制类型
//! - `gains` - PID 增益与按控制类型的预设
//! - `settings` - 控制器、抓取驱动与平行夹爪配置
//! - `error` - 分层错误类型
//!
//! ## Feature Flags
//!
//! - `serde` - 为配置类型启用序列化（同时启用 nalgebra 的 `serde-serialize`）

pub mod control;
pub mod error;
pub mod gains;
pub mod pose;
pub mod settings;

// 重新导出常用类型
pub use control::{AxisGroup, ControlType, GripperControlType};
pub use error::{ControlError, Result};
pub use gains::{OutputBound, PidGains};
pub use pose::{Pose, Quat, Vec3};
pub use settings::{ControllerSettings, GraspDriveSettings, GripperSettings};
