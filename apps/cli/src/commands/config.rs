//! 配置管理命令
//!
//! 打印预设配置、生成配置文件、检查配置文件

use crate::validation::PathValidator;
use anyhow::{Context, Result};
use clap::Subcommand;
use physmc_sdk::ControlType;
use physmc_sdk::tools::ControlConfig;
use std::path::PathBuf;
use tracing::info;

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 打印某控制类型的推荐配置（TOML）
    Show {
        /// 控制类型（position / velocity / acceleration / force / impulse）
        #[arg(short, long, default_value = "acceleration")]
        control_type: ControlType,
    },

    /// 生成配置文件
    Init {
        /// 输出文件
        path: PathBuf,

        /// 控制类型
        #[arg(short, long, default_value = "acceleration")]
        control_type: ControlType,

        /// 覆盖已存在的文件
        #[arg(long)]
        force: bool,
    },

    /// 检查配置文件
    Check {
        /// 配置文件
        path: PathBuf,
    },
}

impl ConfigCommand {
    pub fn execute(self) -> Result<()> {
        match self {
            ConfigCommand::Show { control_type } => Self::show(control_type),
            ConfigCommand::Init {
                path,
                control_type,
                force,
            } => Self::init(path, control_type, force),
            ConfigCommand::Check { path } => Self::check(path),
        }
    }

    fn show(control_type: ControlType) -> Result<()> {
        let content = ControlConfig::preset(control_type).to_toml_string()?;
        print!("{}", content);
        Ok(())
    }

    fn init(path: PathBuf, control_type: ControlType, force: bool) -> Result<()> {
        PathValidator::new().validate_output_path(&path)?;
        if path.exists() && !force {
            anyhow::bail!("文件已存在: {}（使用 --force 覆盖）", path.display());
        }

        ControlConfig::preset(control_type)
            .save_to_file(&path)
            .with_context(|| format!("写入配置文件失败: {}", path.display()))?;
        info!("Wrote {} preset to {}", control_type, path.display());
        println!("✅ 已生成配置文件: {}", path.display());
        Ok(())
    }

    fn check(path: PathBuf) -> Result<()> {
        PathValidator::new().must_exist().validate_path(&path)?;
        let config = ControlConfig::load_from_file(&path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        config.validate()?;

        let controller = &config.controller;
        println!("✅ 配置有效: {}", path.display());
        println!(
            "  location: {} {}",
            controller.location_control_type(),
            controller.location
        );
        println!(
            "  rotation: {} {}",
            controller.effective_rotation_control_type(),
            controller.rotation
        );
        println!(
            "  grasp: spring {:.1} -> {:.1}, damping {:.1}",
            config.grasp.spring_at(0.0),
            config.grasp.spring_at(1.0),
            config.grasp.damping
        );
        Ok(())
    }
}
