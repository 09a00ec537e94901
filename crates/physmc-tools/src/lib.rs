//! # PhysMC Tools - 共享配置和统计
//!
//! **依赖原则**: 只依赖 `physmc-types`，不依赖控制核心
//!
//! ## 包含模块
//!
//! - `config` - TOML 配置文件（控制器 + 抓取驱动）
//! - `statistics` - 跟踪误差统计（可选）
//!
//! ## Feature Flags
//!
//! - `default` - 无默认 features
//! - `full` - 启用所有功能（包含 statistics）
//! - `statistics` - 启用统计模块

pub mod config;

// ⭐ 可选模块（通过 feature flags 控制）
#[cfg(feature = "statistics")]
pub mod statistics;

// 重新导出常用类型
pub use config::{ConfigError, ControlConfig};
#[cfg(feature = "statistics")]
pub use statistics::{ErrorSummary, TrackingStats};
