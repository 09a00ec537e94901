//! 控制器配置
//!
//! 纯数据结构，不包含运行时状态。文件读写见 `physmc-tools`。

use crate::control::{AxisGroup, ControlType, GripperControlType};
use crate::error::ControlError;
use crate::gains::{OutputBound, PidGains};

/// 位姿控制器配置
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerSettings {
    /// 控制类型（平移；旋转未单独指定时也使用它）
    pub control_type: ControlType,

    /// 旋转控制类型
    ///
    /// `None` 表示与 `control_type` 相同。
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub rotation_control_type: Option<ControlType>,

    /// 平移 PID 增益
    pub location: PidGains,

    /// 旋转 PID 增益
    pub rotation: PidGains,

    /// 三轴输出限幅方式
    pub output_bound: OutputBound,
}

impl ControllerSettings {
    /// 使用某控制类型及其推荐增益
    pub fn for_control_type(control_type: ControlType) -> Self {
        let (location, rotation) = control_type.preset_gains();
        ControllerSettings {
            control_type,
            rotation_control_type: None,
            location,
            rotation,
            output_bound: OutputBound::default(),
        }
    }

    /// 设置平移和旋转增益
    pub fn with_gains(mut self, location: PidGains, rotation: PidGains) -> Self {
        self.location = location;
        self.rotation = rotation;
        self
    }

    /// 单独设置旋转控制类型
    pub fn with_rotation_control_type(mut self, control_type: ControlType) -> Self {
        self.rotation_control_type = Some(control_type);
        self
    }

    /// 设置限幅方式
    pub fn with_output_bound(mut self, bound: OutputBound) -> Self {
        self.output_bound = bound;
        self
    }

    /// 平移轴组的控制类型
    pub fn location_control_type(&self) -> ControlType {
        self.control_type
    }

    /// 旋转轴组的控制类型
    pub fn effective_rotation_control_type(&self) -> ControlType {
        self.rotation_control_type.unwrap_or(self.control_type)
    }

    /// 某轴组的增益
    pub fn gains(&self, group: AxisGroup) -> PidGains {
        match group {
            AxisGroup::Location => self.location,
            AxisGroup::Rotation => self.rotation,
        }
    }

    /// 检查两组增益
    pub fn validate(&self) -> Result<(), ControlError> {
        self.location.validate(AxisGroup::Location)?;
        self.rotation.validate(AxisGroup::Rotation)?;
        Ok(())
    }
}

impl Default for ControllerSettings {
    fn default() -> Self {
        ControllerSettings::for_control_type(ControlType::Acceleration)
    }
}

/// 抓取关节驱动配置
///
/// 弹簧强度随扳机深度线性增加：`spring = spring_base * (spring_multiplier * input + 1)`。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraspDriveSettings {
    /// 最小弹簧强度（松开时）
    pub spring_base: f64,
    /// 弹簧倍率
    pub spring_multiplier: f64,
    /// 阻尼
    pub damping: f64,
    /// 力限制（0 表示不限制）
    pub force_limit: f64,
}

impl GraspDriveSettings {
    /// 给定扳机输入下的弹簧强度（不做上限钳位）
    pub fn spring_at(&self, input: f64) -> f64 {
        self.spring_base * (self.spring_multiplier * input + 1.0)
    }
}

impl Default for GraspDriveSettings {
    fn default() -> Self {
        GraspDriveSettings {
            spring_base: 9000.0,
            spring_multiplier: 1.0,
            damping: 1000.0,
            force_limit: 0.0,
        }
    }
}

/// 平行夹爪配置
///
/// `LinearDrive` 下增益映射为约束驱动参数：`p` 弹簧、`d` 阻尼、`max_output` 力限制。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GripperSettings {
    pub control_type: GripperControlType,
    pub gains: PidGains,
}

impl GripperSettings {
    /// 使用某控制类型及默认增益
    pub fn for_control_type(control_type: GripperControlType) -> Self {
        GripperSettings {
            control_type,
            gains: PidGains::GRIPPER_LINEAR_DRIVE,
        }
    }

    /// 设置增益
    pub fn with_gains(mut self, gains: PidGains) -> Self {
        self.gains = gains;
        self
    }

    /// 检查增益
    pub fn validate(&self) -> Result<(), ControlError> {
        self.gains.validate(AxisGroup::Location)
    }
}

impl Default for GripperSettings {
    fn default() -> Self {
        GripperSettings::for_control_type(GripperControlType::LinearDrive)
    }
}
