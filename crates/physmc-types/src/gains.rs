//! PID 增益
//!
//! 一组标量增益 `{P, I, D, max_output}`，标量 PID 和三轴 PID 共用。

use crate::control::AxisGroup;
use crate::error::ControlError;
use std::fmt;

/// PID 增益
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains {
    /// 比例增益
    pub p: f64,
    /// 积分增益
    pub i: f64,
    /// 微分增益
    pub d: f64,
    /// 输出绝对值上限
    #[cfg_attr(feature = "serde", serde(rename = "max"))]
    pub max_output: f64,
}

impl PidGains {
    /// 速度控制 - 平移
    pub const VELOCITY_LOCATION: Self = PidGains::new(10.0, 0.1, 1.0, 20.0);
    /// 速度控制 - 旋转
    pub const VELOCITY_ROTATION: Self = PidGains::new(12.0, 0.1, 1.0, 15.0);
    /// 加速度 / 力控制 - 平移
    pub const ACCELERATION_LOCATION: Self = PidGains::new(2000.0, 100.0, 50.0, 10000.0);
    /// 加速度 / 力控制 - 旋转
    pub const ACCELERATION_ROTATION: Self = PidGains::new(2000.0, 100.0, 400.0, 25000.0);
    /// 平行夹爪线性驱动：P 作弹簧、D 作阻尼、max 作力限制，I 不使用
    pub const GRIPPER_LINEAR_DRIVE: Self = PidGains::new(5000.0, 0.0, 200.0, 15000.0);

    /// 创建增益
    pub const fn new(p: f64, i: f64, d: f64, max_output: f64) -> Self {
        PidGains { p, i, d, max_output }
    }

    /// 纯比例
    pub const fn proportional(p: f64, max_output: f64) -> Self {
        PidGains::new(p, 0.0, 0.0, max_output)
    }

    /// 检查增益是否可用
    ///
    /// 负增益、负上限或非有限值都视为配置错误。
    pub fn validate(&self, group: AxisGroup) -> Result<(), ControlError> {
        let terms = [("P", self.p), ("I", self.i), ("D", self.d), ("max", self.max_output)];
        for (name, value) in terms {
            if !value.is_finite() {
                return Err(ControlError::invalid_gains(group, format!("{name} is not finite")));
            }
            if value < 0.0 {
                return Err(ControlError::invalid_gains(
                    group,
                    format!("{name} must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for PidGains {
    fn default() -> Self {
        PidGains::ACCELERATION_LOCATION
    }
}

impl fmt::Display for PidGains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[P={:.1}; I={:.1}; D={:.1}; Max={:.1}]",
            self.p, self.i, self.d, self.max_output
        )
    }
}

/// 三轴输出的限幅方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputBound {
    /// 每个分量钳位到 `[-max, max]`（最大分量不超过上限）
    #[default]
    Cube,
    /// 按欧氏范数缩放（向量长度不超过上限，方向不变）
    Sphere,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        assert!(PidGains::default().validate(AxisGroup::Location).is_ok());
        assert!(PidGains::new(0.0, 0.0, 0.0, 0.0).validate(AxisGroup::Rotation).is_ok());
    }

    #[test]
    fn test_validate_negative_max() {
        let err = PidGains::new(1.0, 0.0, 0.0, -1.0)
            .validate(AxisGroup::Rotation)
            .unwrap_err();
        assert!(err.is_config_error());
        let msg = err.to_string();
        assert!(msg.contains("rotation"));
        assert!(msg.contains("max"));
    }

    #[test]
    fn test_validate_nan() {
        let err = PidGains::new(f64::NAN, 0.0, 0.0, 1.0)
            .validate(AxisGroup::Location)
            .unwrap_err();
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_display() {
        let msg = format!("{}", PidGains::VELOCITY_LOCATION);
        assert_eq!(msg, "[P=10.0; I=0.1; D=1.0; Max=20.0]");
    }
}
