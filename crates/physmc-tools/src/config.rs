//! # 配置文件
//!
//! ```toml
//! [controller]
//! control_type = "velocity"
//! rotation_control_type = "position"   # 可选，缺省与 control_type 相同
//! output_bound = "cube"
//!
//! [controller.location]
//! p = 10.0
//! i = 0.1
//! d = 1.0
//! max = 20.0
//!
//! [controller.rotation]
//! p = 12.0
//! i = 0.1
//! d = 1.0
//! max = 15.0
//!
//! [grasp]
//! spring_base = 9000.0
//! spring_multiplier = 1.0
//! damping = 1000.0
//! force_limit = 0.0
//!
//! [gripper]
//! control_type = "linear_drive"
//!
//! [gripper.gains]     # p 弹簧、d 阻尼、max 力限制
//! p = 5000.0
//! i = 0.0
//! d = 200.0
//! max = 15000.0
//! ```
//!
//! 缺少的段落使用默认值。

use physmc_types::{
    ControlError, ControlType, ControllerSettings, GraspDriveSettings, GripperSettings,
};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// 配置文件错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 配置文件内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// 位姿控制器
    pub controller: ControllerSettings,
    /// 抓取关节驱动
    pub grasp: GraspDriveSettings,
    /// 平行夹爪
    pub gripper: GripperSettings,
}

impl ControlConfig {
    /// 某控制类型的推荐配置
    pub fn preset(control_type: ControlType) -> Self {
        ControlConfig {
            controller: ControllerSettings::for_control_type(control_type),
            grasp: GraspDriveSettings::default(),
            gripper: GripperSettings::default(),
        }
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 序列化为 TOML 文本
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 从文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 保存到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 检查增益、抓取和夹爪参数
    pub fn validate(&self) -> Result<(), ControlError> {
        self.controller.validate()?;
        self.gripper.validate()?;
        let grasp = &self.grasp;
        let fields = [
            ("spring_base", grasp.spring_base),
            ("spring_multiplier", grasp.spring_multiplier),
            ("damping", grasp.damping),
            ("force_limit", grasp.force_limit),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ControlError::Config(format!(
                    "grasp.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physmc_types::{GripperControlType, OutputBound, PidGains};
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ControlConfig::from_toml_str("").unwrap();
        assert_eq!(config, ControlConfig::default());
        assert_eq!(config.controller.control_type, ControlType::Acceleration);
        assert_eq!(config.grasp.spring_base, 9000.0);
    }

    #[test]
    fn test_parse_full_document() {
        let content = r#"
            [controller]
            control_type = "velocity"
            rotation_control_type = "position"
            output_bound = "sphere"

            [controller.location]
            p = 10.0
            i = 0.1
            d = 1.0
            max = 20.0

            [grasp]
            damping = 500.0
        "#;
        let config = ControlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.controller.control_type, ControlType::Velocity);
        assert_eq!(
            config.controller.effective_rotation_control_type(),
            ControlType::Position
        );
        assert_eq!(config.controller.output_bound, OutputBound::Sphere);
        assert_eq!(config.controller.location, PidGains::VELOCITY_LOCATION);
        // 未给出的旋转增益沿用默认值
        assert_eq!(config.controller.rotation, PidGains::ACCELERATION_ROTATION);
        assert_eq!(config.grasp.damping, 500.0);
        assert_eq!(config.grasp.spring_base, 9000.0);
    }

    #[test]
    fn test_parse_gripper_section() {
        let content = r#"
            [gripper]
            control_type = "none"

            [gripper.gains]
            p = 800.0
            i = 0.0
            d = 40.0
            max = 1200.0
        "#;
        let config = ControlConfig::from_toml_str(content).unwrap();
        assert_eq!(config.gripper.control_type, GripperControlType::None);
        assert_eq!(config.gripper.gains, PidGains::new(800.0, 0.0, 40.0, 1200.0));

        let config = ControlConfig::from_toml_str("").unwrap();
        assert_eq!(config.gripper.control_type, GripperControlType::LinearDrive);

        let err = ControlConfig::from_toml_str("[gripper]\ncontrol_type = \"impulse\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_control_type_rejected() {
        let err = ControlConfig::from_toml_str("[controller]\ncontrol_type = \"torque\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let config = ControlConfig::preset(ControlType::Velocity);
        config.save_to_file(file.path()).unwrap();

        let loaded = ControlConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let err = ControlConfig::load_from_file("/nonexistent/physmc.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = ControlConfig::default();
        assert!(config.validate().is_ok());

        config.grasp.damping = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("grasp.damping"));

        let mut config = ControlConfig::default();
        config.controller.location.max_output = -5.0;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = ControlConfig::default();
        config.gripper.gains.d = f64::INFINITY;
        assert!(config.validate().unwrap_err().is_config_error());
    }

    #[test]
    fn test_toml_contains_sections() {
        let text = ControlConfig::default().to_toml_string().unwrap();
        assert!(text.contains("[controller]"));
        assert!(text.contains("[grasp]"));
        assert!(text.contains("[gripper]"));
        assert!(text.contains("control_type = \"linear_drive\""));
        assert!(text.contains("control_type = \"acceleration\""));
    }
}
