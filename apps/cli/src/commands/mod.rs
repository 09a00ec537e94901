//! 命令定义和实现

pub mod config;
pub mod grasp;
pub mod gripper;
pub mod track;
pub mod tune;

pub use config::ConfigCommand;
pub use grasp::GraspCommand;
pub use gripper::GripperCommand;
pub use track::TrackCommand;
pub use tune::TuneCommand;
