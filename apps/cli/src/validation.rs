//! 输入验证模块
//!
//! 解析和检查命令行参数

use anyhow::{Context, Result};
use physmc_sdk::Vec3;
use std::path::Path;

/// 解析 `x,y,z` 形式的三元组
pub fn parse_vec3(text: &str) -> Result<Vec3> {
    let values: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("解析三元组失败: '{}'", text))?;

    let [x, y, z] = values[..] else {
        anyhow::bail!("需要 3 个分量，得到 {} 个: '{}'", values.len(), text);
    };
    for (axis, value) in ["x", "y", "z"].iter().zip([x, y, z]) {
        if !value.is_finite() {
            anyhow::bail!("分量 {} 无效: {}", axis, value);
        }
    }
    Ok(Vec3::new(x, y, z))
}

/// 检查时间步长
pub fn validate_time_step(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        anyhow::bail!("时间步长必须为正数，得到 {}", dt);
    }
    Ok(())
}

/// 文件路径验证器
pub struct PathValidator {
    /// 是否检查文件存在
    check_exists: bool,
}

impl PathValidator {
    pub fn new() -> Self {
        Self {
            check_exists: false,
        }
    }

    /// 要求文件存在
    pub fn must_exist(mut self) -> Self {
        self.check_exists = true;
        self
    }

    /// 验证输入文件路径
    pub fn validate_path(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            anyhow::bail!("文件路径为空");
        }
        if self.check_exists && !path.exists() {
            anyhow::bail!("文件不存在: {}", path.display());
        }
        Ok(())
    }

    /// 验证输出路径（目录必须存在）
    pub fn validate_output_path(&self, path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            anyhow::bail!("文件路径为空");
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            anyhow::bail!("输出目录不存在: {}", parent.display());
        }
        Ok(())
    }
}

impl Default for PathValidator {
    fn default() -> Self {
        Self::new()
    }
}
