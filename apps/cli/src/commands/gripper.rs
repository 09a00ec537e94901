//! 平行夹爪命令
//!
//! 两根参考手指（Y 轴限位）跟随扳机输入，每个采样点积分若干步后打印目标和实际位置

use crate::validation::{PathValidator, validate_time_step};
use anyhow::{Context, Result};
use clap::Args;
use physmc_sdk::tools::ControlConfig;
use physmc_sdk::{GripperControlType, GripperSettings, ParallelGripper, PrismaticJoint};
use std::path::PathBuf;
use tracing::info;

/// 夹爪命令参数
#[derive(Args, Debug)]
pub struct GripperCommand {
    /// 从 0 到 1 的采样步数
    #[arg(short, long, default_value_t = 4)]
    pub steps: usize,

    /// 手指单侧行程
    #[arg(long, default_value_t = 3.5)]
    pub limit: f64,

    /// 控制类型（覆盖配置文件）
    #[arg(short, long)]
    pub control_type: Option<GripperControlType>,

    /// 每个采样点积分的步数
    #[arg(long, default_value_t = 100)]
    pub settle: usize,

    /// 时间步长（秒）
    #[arg(long, default_value_t = 0.01)]
    pub dt: f64,

    /// 配置文件（使用其中的 [gripper] 段）
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GripperCommand {
    fn settings(&self) -> Result<GripperSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                PathValidator::new().must_exist().validate_path(path)?;
                let config = ControlConfig::load_from_file(path)
                    .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
                config.validate()?;
                config.gripper
            }
            None => GripperSettings::default(),
        };
        if let Some(control_type) = self.control_type {
            settings.control_type = control_type;
        }
        Ok(settings)
    }

    pub fn execute(self) -> Result<()> {
        if self.steps == 0 {
            anyhow::bail!("采样步数必须大于 0");
        }
        validate_time_step(self.dt)?;
        let settings = self.settings()?;
        let left = PrismaticJoint::finger(self.limit).context("手指行程无效")?;
        let right = PrismaticJoint::finger(self.limit).context("手指行程无效")?;

        let mut gripper = ParallelGripper::init(Some(left), Some(right), &settings)?;
        info!(
            "Sweeping gripper input over {} steps ({})",
            self.steps, settings.control_type
        );

        for i in 0..=self.steps {
            let input = i as f64 / self.steps as f64;
            let targets = gripper.update(input);
            for _ in 0..self.settle {
                gripper.left_mut().step(self.dt);
                gripper.right_mut().step(self.dt);
            }
            let Some((left, right)) = targets else {
                println!("input={:.3} idle", input);
                continue;
            };
            let axis = gripper.axis().map(|a| a.index()).unwrap_or_default();
            println!(
                "input={:.3} target={:.3}/{:.3} position={:.3}/{:.3}",
                input,
                left,
                right,
                gripper.left().position()[axis],
                gripper.right().position()[axis]
            );
        }
        Ok(())
    }
}
