//! # PhysMC Control
//!
//! 物理驱动的位姿控制核心。
//!
//! ## 模块
//!
//! - `pid` - 标量 / 三轴 PID（`ScalarPid` / `VectorPid`）
//! - `pose_error` - 位置误差和最短弧姿态误差
//! - `strategy` - 控制类型到物理调用的绑定
//! - `controller` - 每 tick 执行的位姿控制器
//! - `tuning` - 运行时增益调节
//!
//! 数据流：
//!
//! ```text
//! target pose ─┐
//!              ├─> PoseError ─> VectorPid(loc) ─┐
//! body pose ───┘             └> VectorPid(rot) ─┴─> ActuationStrategy ─> PhysicsBody
//! ```

pub mod controller;
pub mod pid;
pub mod pose_error;
pub mod strategy;
pub mod tuning;

pub use controller::{ControllerState, PoseController, TickDiagnostics};
pub use pid::{Pid, PidMode, PidSignal, ScalarPid, VectorPid};
pub use pose_error::{PoseError, effective_target, rotation_delta, rotation_error};
pub use strategy::{ActuationStrategy, AxisActuator};
pub use tuning::{GainTuner, TunedTerm};
