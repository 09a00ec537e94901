//! 控制类型
//!
//! 描述执行命令的物理语义：
//!
//! - `Position` - 带物理传送到目标位姿（绕过 PID）
//! - `Velocity` - 直接设置速度：距离(rad) / 时间，与质量无关
//! - `Acceleration` - 直接施加加速度：距离(rad) / 时间²，与质量无关
//! - `Force` - 施加力（力矩）：质量 * 距离(rad) / 时间²
//! - `Impulse` - 施加冲量：质量 * 距离(rad) / 时间

use crate::gains::PidGains;
use std::fmt;
use std::str::FromStr;

/// 控制类型
///
/// 在配置时选定一次，控制器生命周期内不再变化。
/// `None` 是显式的"未配置"惰性状态，不产生任何执行动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ControlType {
    /// 不执行
    #[default]
    None,
    /// 传送
    Position,
    /// 速度
    Velocity,
    /// 加速度（与质量无关的力）
    Acceleration,
    /// 力 / 力矩
    Force,
    /// 冲量
    Impulse,
}

impl ControlType {
    /// 全部控制类型（按声明顺序）
    pub const ALL: [ControlType; 6] = [
        ControlType::None,
        ControlType::Position,
        ControlType::Velocity,
        ControlType::Acceleration,
        ControlType::Force,
        ControlType::Impulse,
    ];

    /// 是否需要 PID 输出
    ///
    /// `Position` 直接传送，`None` 不执行，二者都不运行 PID。
    pub fn uses_pid(self) -> bool {
        !matches!(self, ControlType::None | ControlType::Position)
    }

    /// 小写名称（配置文件和 CLI 使用）
    pub fn as_str(self) -> &'static str {
        match self {
            ControlType::None => "none",
            ControlType::Position => "position",
            ControlType::Velocity => "velocity",
            ControlType::Acceleration => "acceleration",
            ControlType::Force => "force",
            ControlType::Impulse => "impulse",
        }
    }

    /// 该控制类型的推荐增益 `(location, rotation)`
    ///
    /// - `Velocity`: 输出直接是速度，增益和上限都小
    /// - `Acceleration` / `Force`: 输出是加速度或力，增益大
    /// - 其他类型沿用默认增益
    pub fn preset_gains(self) -> (PidGains, PidGains) {
        match self {
            ControlType::Velocity => (PidGains::VELOCITY_LOCATION, PidGains::VELOCITY_ROTATION),
            _ => (
                PidGains::ACCELERATION_LOCATION,
                PidGains::ACCELERATION_ROTATION,
            ),
        }
    }
}

impl fmt::Display for ControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析未知控制类型名称时的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control type '{0}' (expected one of: none, position, velocity, acceleration, force, impulse)")]
pub struct ParseControlTypeError(pub String);

impl FromStr for ControlType {
    type Err = ParseControlTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ControlType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == lower)
            .ok_or_else(|| ParseControlTypeError(s.to_string()))
    }
}

/// 平行夹爪控制类型
///
/// 目前只有 `LinearDrive` 有执行动作，其余类型绑定后保持惰性。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GripperControlType {
    /// 不执行
    #[default]
    None,
    /// 直接设置手指位置
    Position,
    /// 约束的线性位置驱动（弹簧 + 阻尼）
    LinearDrive,
    /// 加速度
    Acceleration,
    /// 力
    Force,
}

impl GripperControlType {
    /// 全部夹爪控制类型（按声明顺序）
    pub const ALL: [GripperControlType; 5] = [
        GripperControlType::None,
        GripperControlType::Position,
        GripperControlType::LinearDrive,
        GripperControlType::Acceleration,
        GripperControlType::Force,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GripperControlType::None => "none",
            GripperControlType::Position => "position",
            GripperControlType::LinearDrive => "linear_drive",
            GripperControlType::Acceleration => "acceleration",
            GripperControlType::Force => "force",
        }
    }

    /// 是否有执行动作
    pub fn is_implemented(self) -> bool {
        matches!(self, GripperControlType::LinearDrive)
    }
}

impl fmt::Display for GripperControlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 解析未知夹爪控制类型名称时的错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gripper control type '{0}' (expected one of: none, position, linear_drive, acceleration, force)")]
pub struct ParseGripperControlTypeError(pub String);

impl FromStr for GripperControlType {
    type Err = ParseGripperControlTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('-', "_");
        GripperControlType::ALL
            .into_iter()
            .find(|ct| ct.as_str() == lower)
            .ok_or_else(|| ParseGripperControlTypeError(s.to_string()))
    }
}

/// 轴组：平移或旋转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AxisGroup {
    /// 平移
    Location,
    /// 旋转
    Rotation,
}

impl fmt::Display for AxisGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisGroup::Location => f.write_str("location"),
            AxisGroup::Rotation => f.write_str("rotation"),
        }
    }
}
