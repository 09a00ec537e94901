//! # PhysMC CLI
//!
//! 在参考物理体上运行位姿控制器和抓取执行器的命令行工具。
//!
//! ```bash
//! # 查看推荐配置
//! physmc-cli config show --control-type velocity
//!
//! # 生成并检查配置文件
//! physmc-cli config init hand.toml --control-type force
//! physmc-cli config check hand.toml
//!
//! # 跟踪目标位姿，输出误差统计
//! physmc-cli track --target 0.3,0,-0.2 --rotation 0,0,0.5 --dt 0.001 -n 3000
//!
//! # 扫过扳机输入
//! physmc-cli grasp --steps 4
//!
//! # 平行夹爪跟随扳机输入
//! physmc-cli gripper --steps 4 --limit 3.5
//!
//! # 增益调节
//! physmc-cli tune "t++g-"
//! ```
//!
//! 日志级别通过 `RUST_LOG` 控制，例如 `RUST_LOG=physmc_control=debug`。

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod validation;

use commands::{ConfigCommand, GraspCommand, GripperCommand, TrackCommand, TuneCommand};

/// PhysMC CLI - 物理驱动位姿控制命令行工具
#[derive(Parser, Debug)]
#[command(name = "physmc-cli")]
#[command(about = "Command-line simulator for physics-driven pose control", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 位姿跟踪仿真
    Track {
        #[command(flatten)]
        args: TrackCommand,
    },

    /// 抓取序列仿真
    Grasp {
        #[command(flatten)]
        args: GraspCommand,
    },

    /// 平行夹爪仿真
    Gripper {
        #[command(flatten)]
        args: GripperCommand,
    },

    /// 增益调节
    Tune {
        #[command(flatten)]
        args: TuneCommand,
    },
}

fn main() -> Result<()> {
    // 初始化日志
    physmc_sdk::logging::init_with_filter("physmc_cli=info");

    let cli = Cli::parse();

    match cli.command {
        Commands::Config(cmd) => cmd.execute(),
        Commands::Track { args } => args.execute(),
        Commands::Grasp { args } => args.execute(),
        Commands::Gripper { args } => args.execute(),
        Commands::Tune { args } => args.execute(),
    }
}
