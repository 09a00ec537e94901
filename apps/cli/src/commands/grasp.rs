//! 抓取命令
//!
//! 用内置的三帧握拳序列扫过扳机输入，打印每一步的关节目标

use crate::validation::PathValidator;
use anyhow::{Context, Result};
use clap::Args;
use physmc_sdk::tools::ControlConfig;
use physmc_sdk::{
    GraspDriveSettings, GraspExecutor, GraspKeyframe, GraspSequence, Quat, RigidBody,
    SkeletalBody,
};
use std::path::PathBuf;
use tracing::info;

/// 内置手部关节
const FINGERS: [&str; 5] = ["thumb_01", "index_01", "middle_01", "ring_01", "pinky_01"];

/// 抓取命令参数
#[derive(Args, Debug)]
pub struct GraspCommand {
    /// 从 0 到 1 的采样步数
    #[arg(short, long, default_value_t = 5)]
    pub steps: usize,

    /// 完全握拳时的弯曲角度（弧度）
    #[arg(long, default_value_t = 1.2)]
    pub curl: f64,

    /// 配置文件（使用其中的 [grasp] 段）
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GraspCommand {
    fn drive_settings(&self) -> Result<GraspDriveSettings> {
        let Some(path) = &self.config else {
            return Ok(GraspDriveSettings::default());
        };
        PathValidator::new().must_exist().validate_path(path)?;
        let config = ControlConfig::load_from_file(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        config.validate()?;
        Ok(config.grasp)
    }

    /// 张开 -> 半握 -> 握拳
    fn fist(&self) -> GraspSequence {
        let bend = |angle: f64| -> GraspKeyframe {
            FINGERS
                .iter()
                .map(|joint| (*joint, Quat::from_euler_angles(0.0, angle, 0.0)))
                .collect()
        };
        GraspSequence::new("fist")
            .with_frame(bend(0.0))
            .with_frame(bend(self.curl * 0.5))
            .with_frame(bend(self.curl))
    }

    pub fn execute(self) -> Result<()> {
        if self.steps == 0 {
            anyhow::bail!("采样步数必须大于 0");
        }
        let settings = self.drive_settings()?;
        let hand = SkeletalBody::new("hand_r", RigidBody::default()).with_joints(FINGERS)?;

        let mut executor = GraspExecutor::new(hand, settings);
        executor.load_sequence(self.fist());
        info!("Sweeping grasp input over {} steps", self.steps);

        let inputs = (0..=self.steps)
            .map(|i| i as f64 / self.steps as f64)
            .chain(std::iter::once(0.0));

        for input in inputs {
            let position = executor.update_grasp(input);
            let frame = match position {
                Some(p) => format!("frame={} alpha={:.3}", p.index, p.alpha),
                None => "released".to_string(),
            };
            let joints = FINGERS
                .iter()
                .filter_map(|name| {
                    let joint = executor.hand().joint(name)?;
                    Some(format!("{}={:.1}°", name, joint.target.angle().to_degrees()))
                })
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "input={:.3} {} spring={:.1} {}",
                input,
                frame,
                executor.spring(),
                joints
            );
        }
        Ok(())
    }
}
