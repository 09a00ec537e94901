//! # 跟踪统计
//!
//! 汇总一次运行中每个 tick 的位置 / 姿态误差。
//!
//! 需要启用 `statistics` feature：
//! ```toml
//! physmc-tools = { workspace = true, features = ["statistics"] }
//! ```

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// 单组误差的汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    /// 最后一个样本
    pub final_error: f64,
    /// 最大值
    pub max_error: f64,
    /// 平均值
    pub mean_error: f64,
    /// 均方根
    pub rms_error: f64,
    /// 第一次低于容差的 tick（从 0 开始）
    pub settled_at: Option<usize>,
}

impl ErrorSummary {
    /// 计算误差汇总（误差取绝对值）
    pub fn calculate(errors: &[f64], tolerance: f64) -> Self {
        if errors.is_empty() {
            return Self {
                final_error: 0.0,
                max_error: 0.0,
                mean_error: 0.0,
                rms_error: 0.0,
                settled_at: None,
            };
        }

        let magnitudes: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
        let max = magnitudes.iter().fold(0.0f64, |acc, &e| acc.max(e));

        Self {
            final_error: magnitudes[magnitudes.len() - 1],
            max_error: max,
            mean_error: magnitudes.iter().mean(),
            rms_error: magnitudes.iter().quadratic_mean(),
            settled_at: magnitudes.iter().position(|&e| e <= tolerance),
        }
    }
}

/// 一次跟踪运行的统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingStats {
    position_errors: Vec<f64>,
    rotation_errors: Vec<f64>,
}

impl TrackingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个 tick 的误差（位置误差范数、姿态误差范数）
    pub fn record(&mut self, position_error: f64, rotation_error: f64) {
        self.position_errors.push(position_error);
        self.rotation_errors.push(rotation_error);
    }

    /// 样本数
    pub fn sample_count(&self) -> usize {
        self.position_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position_errors.is_empty()
    }

    /// 位置误差汇总
    pub fn position(&self, tolerance: f64) -> ErrorSummary {
        ErrorSummary::calculate(&self.position_errors, tolerance)
    }

    /// 姿态误差汇总
    pub fn rotation(&self, tolerance: f64) -> ErrorSummary {
        ErrorSummary::calculate(&self.rotation_errors, tolerance)
    }

    /// 位置和姿态都低于容差的第一个 tick
    pub fn settled_at(&self, position_tolerance: f64, rotation_tolerance: f64) -> Option<usize> {
        self.position_errors
            .iter()
            .zip(&self.rotation_errors)
            .position(|(p, r)| p.abs() <= position_tolerance && r.abs() <= rotation_tolerance)
    }
}
