//! 调参命令
//!
//! 按键脚本驱动增益调节器，打印每一步后的状态

use anyhow::Result;
use clap::Args;
use physmc_sdk::{ControlType, ControllerSettings, GainTuner};

/// 调参命令参数
#[derive(Args, Debug)]
pub struct TuneCommand {
    /// 按键序列：g 切换轴组，t 切换调节项，+ 增加，- 减少
    ///
    /// 例如 `t+++g-`
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// 初始增益使用的控制类型
    #[arg(short, long, default_value = "acceleration")]
    pub control_type: ControlType,
}

impl TuneCommand {
    pub fn execute(self) -> Result<()> {
        let settings = ControllerSettings::for_control_type(self.control_type);
        let mut tuner = GainTuner::new(&settings);
        println!("  {}", tuner);

        for key in self.keys.chars().filter(|c| !c.is_whitespace()) {
            match key {
                'g' | 'G' => tuner.switch_group(),
                't' | 'T' => tuner.switch_term(),
                '+' => tuner.increase(),
                '-' => tuner.decrease(),
                other => anyhow::bail!("未知按键 '{}'（可用: g t + -）", other),
            }
            println!("{} {}", key, tuner);
        }
        Ok(())
    }
}
