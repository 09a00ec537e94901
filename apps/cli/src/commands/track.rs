//! 跟踪命令
//!
//! 在参考刚体上运行位姿控制器，输出误差统计

use crate::validation::{PathValidator, parse_vec3, validate_time_step};
use anyhow::{Context, Result};
use clap::Args;
use physmc_sdk::tools::{ControlConfig, ErrorSummary, TrackingStats};
use physmc_sdk::{ControlType, ControllerSettings, PoseController, Quat, RigidBody};
use physmc_sdk::{PhysicsBody, Pose};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// 跟踪命令参数
#[derive(Args, Debug)]
pub struct TrackCommand {
    /// 目标位置，逗号分隔：x,y,z
    #[arg(short, long, default_value = "0.3,0,-0.2", allow_hyphen_values = true)]
    pub target: String,

    /// 目标姿态（欧拉角，弧度）：roll,pitch,yaw
    #[arg(short, long, default_value = "0,0,0", allow_hyphen_values = true)]
    pub rotation: String,

    /// 控制类型（忽略 --config 时使用）
    #[arg(short, long, default_value = "acceleration")]
    pub control_type: ControlType,

    /// 单独指定旋转控制类型
    #[arg(long)]
    pub rotation_control_type: Option<ControlType>,

    /// 配置文件（覆盖 --control-type）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 时间步长（秒）
    #[arg(long, default_value_t = 0.001)]
    pub dt: f64,

    /// tick 数
    #[arg(short = 'n', long, default_value_t = 3000)]
    pub ticks: usize,

    /// 刚体质量（kg），转动惯量取相同数值
    #[arg(long, default_value_t = 1.0)]
    pub mass: f64,

    /// 收敛判定容差（位置 m / 姿态 rad）
    #[arg(long, default_value_t = 0.01)]
    pub tolerance: f64,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

/// 一次跟踪运行的结果
#[derive(Debug, Serialize)]
struct TrackReport {
    location_control_type: String,
    rotation_control_type: String,
    ticks: usize,
    dt: f64,
    final_position: [f64; 3],
    position: ErrorSummary,
    rotation: ErrorSummary,
    settled_at: Option<usize>,
}

impl TrackCommand {
    fn settings(&self) -> Result<ControllerSettings> {
        let mut settings = match &self.config {
            Some(path) => {
                PathValidator::new().must_exist().validate_path(path)?;
                let config = ControlConfig::load_from_file(path)
                    .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
                config.validate()?;
                config.controller
            },
            None => ControllerSettings::for_control_type(self.control_type),
        };
        if let Some(rotation) = self.rotation_control_type {
            settings = settings.with_rotation_control_type(rotation);
        }
        Ok(settings)
    }

    fn target(&self) -> Result<Pose> {
        let position = parse_vec3(&self.target)?;
        let euler = parse_vec3(&self.rotation)?;
        Ok(Pose::new(
            position,
            Quat::from_euler_angles(euler.x, euler.y, euler.z),
        ))
    }

    pub fn execute(self) -> Result<()> {
        validate_time_step(self.dt)?;
        let settings = self.settings()?;
        let target = self.target()?;
        let body = RigidBody::default().with_mass(self.mass, self.mass)?;

        let mut controller = PoseController::new();
        controller.init(Some(target), Some(body), &settings, None)?;
        info!(
            "Tracking {} with {} / {} control for {} ticks",
            target,
            settings.location_control_type(),
            settings.effective_rotation_control_type(),
            self.ticks
        );

        let mut stats = TrackingStats::new();
        for tick in 0..self.ticks {
            let Some(diag) = controller.update(self.dt) else {
                anyhow::bail!(
                    "控制器在第 {} 个 tick 未执行（控制类型 {} 不产生任何动作）",
                    tick,
                    settings.location_control_type()
                );
            };
            stats.record(diag.location_error.norm(), diag.rotation_error.norm());
            if let Some(body) = controller.body_mut() {
                body.step(self.dt);
            }
        }

        let final_pose = controller
            .body()
            .map(|body| body.pose())
            .context("控制器没有受控刚体")?;
        debug!("Final pose {}", final_pose);

        let report = TrackReport {
            location_control_type: settings.location_control_type().to_string(),
            rotation_control_type: settings.effective_rotation_control_type().to_string(),
            ticks: stats.sample_count(),
            dt: self.dt,
            final_position: [
                final_pose.position.x,
                final_pose.position.y,
                final_pose.position.z,
            ],
            position: stats.position(self.tolerance),
            rotation: stats.rotation(self.tolerance),
            settled_at: stats.settled_at(self.tolerance, self.tolerance),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report, final_pose);
        }
        Ok(())
    }
}

fn print_report(report: &TrackReport, final_pose: Pose) {
    println!(
        "location: {}  rotation: {}  ({} ticks, dt={})",
        report.location_control_type, report.rotation_control_type, report.ticks, report.dt
    );
    println!("final pose: {}", final_pose);
    for (name, summary) in [("position", &report.position), ("rotation", &report.rotation)] {
        println!(
            "{:<9} final={:.6} max={:.6} mean={:.6} rms={:.6}",
            name, summary.final_error, summary.max_error, summary.mean_error, summary.rms_error
        );
    }
    match report.settled_at {
        Some(tick) => println!("settled at tick {}", tick),
        None => println!("not settled"),
    }
}
