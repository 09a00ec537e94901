//! 错误类型体系
//!
//! 控制核心的错误全部可恢复：最终都退化为"本 tick 不执行"。
//!
//! - **配置错误**: 缺少刚体/目标、增益非法，在 `init` 时检测
//! - **前置条件违规**: `dt` 不是有限正数
//! - **数据错误**: 关键帧引用了骨架上不存在的关节；序列帧数不足

use crate::control::AxisGroup;
use thiserror::Error;

/// 控制错误类型
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControlError {
    // ==================== Configuration Errors ====================
    /// 未提供受控刚体
    #[error("No controlled body attached")]
    MissingBody,

    /// 未提供目标位姿来源
    #[error("No target pose source attached")]
    MissingTarget,

    /// 增益非法
    #[error("Invalid {group} gains: {reason}")]
    InvalidGains {
        /// 轴组
        group: AxisGroup,
        /// 原因
        reason: String,
    },

    /// 其他配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    // ==================== Precondition Violations ====================
    /// 时间步长不是有限正数
    #[error("Invalid time step: {dt} (must be finite and > 0)")]
    InvalidTimeStep {
        /// 传入的时间步长（秒）
        dt: f64,
    },

    // ==================== Data Errors ====================
    /// 关节不存在
    #[error("Joint '{joint}' not found on the controlled skeleton")]
    UnknownJoint {
        /// 关节名
        joint: String,
    },

    /// 抓取序列帧数不足
    #[error("Grasp sequence '{name}' has {frames} frame(s), at least 2 required")]
    SequenceTooShort {
        /// 序列名
        name: String,
        /// 实际帧数
        frames: usize,
    },
}

impl ControlError {
    /// 是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::MissingBody | Self::MissingTarget | Self::InvalidGains { .. } | Self::Config(_)
        )
    }

    /// 是否为数据错误
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::UnknownJoint { .. } | Self::SequenceTooShort { .. })
    }

    /// 是否为调用方前置条件违规
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::InvalidTimeStep { .. })
    }

    /// 检查时间步长是否为有限正数
    pub fn check_time_step(dt: f64) -> Result<()> {
        if dt > 0.0 && dt.is_finite() {
            Ok(())
        } else {
            Err(Self::InvalidTimeStep { dt })
        }
    }

    /// 创建增益错误
    pub fn invalid_gains(group: AxisGroup, reason: impl Into<String>) -> Self {
        Self::InvalidGains {
            group,
            reason: reason.into(),
        }
    }

    /// 创建关节缺失错误
    pub fn unknown_joint(joint: impl Into<String>) -> Self {
        Self::UnknownJoint {
            joint: joint.into(),
        }
    }

    /// 创建序列过短错误
    pub fn sequence_too_short(name: impl Into<String>, frames: usize) -> Self {
        Self::SequenceTooShort {
            name: name.into(),
            frames,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, ControlError>;
