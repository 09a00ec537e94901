//! 抓取关键帧与序列
//!
//! 序列从张开（第 0 帧）到完全闭合（最后一帧），扳机输入 `[0, 1]` 均匀映射到相邻帧之间。

use physmc_types::{ControlError, Quat, Result};
use std::collections::BTreeMap;

/// 输入达到 1 时使用的上限，避免落到最后一帧之外
const INPUT_CEILING: f64 = 0.999999;

/// 单个关键帧：关节名 -> 目标相对姿态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraspKeyframe {
    joints: BTreeMap<String, Quat>,
}

impl GraspKeyframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加关节目标（链式）
    pub fn with_joint(mut self, joint: impl Into<String>, target: Quat) -> Self {
        self.insert(joint, target);
        self
    }

    /// 设置关节目标，返回旧值
    pub fn insert(&mut self, joint: impl Into<String>, target: Quat) -> Option<Quat> {
        self.joints.insert(joint.into(), target)
    }

    pub fn get(&self, joint: &str) -> Option<&Quat> {
        self.joints.get(joint)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// 按关节名排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quat)> {
        self.joints.iter().map(|(name, q)| (name.as_str(), q))
    }

    /// 与 `upper` 插值
    ///
    /// 只保留两帧都有的关节；使用球面插值，退化时退回归一化线性插值。
    pub fn interpolate(&self, upper: &GraspKeyframe, alpha: f64) -> GraspKeyframe {
        let joints = self
            .joints
            .iter()
            .filter_map(|(name, lower)| {
                let upper = upper.joints.get(name)?;
                let q = lower
                    .try_slerp(upper, alpha, 1e-9)
                    .unwrap_or_else(|| lower.nlerp(upper, alpha));
                Some((name.clone(), q))
            })
            .collect();
        GraspKeyframe { joints }
    }
}

impl<S: Into<String>> FromIterator<(S, Quat)> for GraspKeyframe {
    fn from_iter<I: IntoIterator<Item = (S, Quat)>>(iter: I) -> Self {
        GraspKeyframe {
            joints: iter.into_iter().map(|(name, q)| (name.into(), q)).collect(),
        }
    }
}

/// 输入在序列中的位置：第 `index` 帧和第 `index + 1` 帧之间，比例 `alpha`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePosition {
    pub index: usize,
    pub alpha: f64,
}

/// 抓取序列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraspSequence {
    name: String,
    frames: Vec<GraspKeyframe>,
}

impl GraspSequence {
    pub fn new(name: impl Into<String>) -> Self {
        GraspSequence {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    /// 由帧列表创建
    pub fn from_frames(name: impl Into<String>, frames: Vec<GraspKeyframe>) -> Self {
        GraspSequence {
            name: name.into(),
            frames,
        }
    }

    /// 追加一帧（链式）
    pub fn with_frame(mut self, frame: GraspKeyframe) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn push_frame(&mut self, frame: GraspKeyframe) {
        self.frames.push(frame);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frames(&self) -> &[GraspKeyframe] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&GraspKeyframe> {
        self.frames.get(index)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 至少两帧才能插值
    pub fn is_playable(&self) -> bool {
        self.frames.len() >= 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_playable() {
            Ok(())
        } else {
            Err(ControlError::sequence_too_short(&self.name, self.frames.len()))
        }
    }

    /// 把扳机输入映射到帧位置
    ///
    /// ```text
    /// step  = 1 / (frames - 1)
    /// pos   = input / step        (input >= 1 时取 0.999999 / step)
    /// index = floor(pos)
    /// alpha = pos - index
    /// ```
    ///
    /// 负输入按 0 处理。帧数不足时返回 `None`。
    pub fn locate(&self, input: f64) -> Option<FramePosition> {
        if !self.is_playable() {
            return None;
        }
        let last_step = self.frames.len() - 2;
        let step = 1.0 / (self.frames.len() - 1) as f64;
        let input = input.max(0.0);
        let position = if input >= 1.0 {
            INPUT_CEILING / step
        } else {
            input / step
        };
        let index = (position.floor() as usize).min(last_step);
        Some(FramePosition {
            index,
            alpha: position - index as f64,
        })
    }

    /// 给定输入下的插值帧
    pub fn sample(&self, input: f64) -> Option<GraspKeyframe> {
        let FramePosition { index, alpha } = self.locate(input)?;
        let lower = self.frames.get(index)?;
        let upper = self.frames.get(index + 1)?;
        Some(lower.interpolate(upper, alpha))
    }
}
