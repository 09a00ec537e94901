//! 抓取执行器
//!
//! 根据扳机输入驱动手部关节：
//!
//! - 输入 > 0.001：进入抓取，弹簧强度随输入线性增加，关节目标在相邻关键帧之间插值
//! - 输入回落到 <= 0.001：松开，弹簧恢复基准值，关节回到第 0 帧
//!
//! 抓取过程中加载的新序列只会排队，松开时才生效，保证动作中途不会跳变。
//! 每个新激活的序列在第一次更新时先回到第 0 帧。

use crate::sequence::{FramePosition, GraspKeyframe, GraspSequence};
use physmc_body::{AngularDrive, JointDrives};
use physmc_types::{ControlError, GraspDriveSettings};
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// 视为"按下"的最小输入
pub const GRASP_INPUT_THRESHOLD: f64 = 0.001;

/// 抓取执行器
#[derive(Debug)]
pub struct GraspExecutor<H> {
    hand: H,
    settings: GraspDriveSettings,
    spring: f64,
    active: Option<GraspSequence>,
    queued: Option<GraspSequence>,
    is_grasping: bool,
    first_update: bool,
    /// 当前序列中已报告过的缺失关节
    missing_joints: BTreeSet<String>,
}

impl<H: JointDrives> GraspExecutor<H> {
    /// 创建执行器（尚未加载序列）
    pub fn new(hand: H, settings: GraspDriveSettings) -> Self {
        GraspExecutor {
            hand,
            spring: settings.spring_base,
            settings,
            active: None,
            queued: None,
            is_grasping: false,
            first_update: false,
            missing_joints: BTreeSet::new(),
        }
    }

    /// 加载序列
    ///
    /// 抓取中则排队（覆盖之前排队的序列），否则立即生效。
    pub fn load_sequence(&mut self, sequence: GraspSequence) {
        if self.is_grasping {
            debug!("Grasp '{}' queued until release", sequence.name());
            self.queued = Some(sequence);
        } else {
            self.activate(sequence);
        }
    }

    fn activate(&mut self, sequence: GraspSequence) {
        if let Err(e) = sequence.validate() {
            warn!("{}, grasp updates will be ignored", e);
        }
        debug!("Grasp '{}' active ({} frames)", sequence.name(), sequence.len());
        self.active = Some(sequence);
        self.first_update = true;
        self.missing_joints.clear();
    }

    /// 每个 tick 调用一次
    ///
    /// 返回本次插值的帧位置；未抓取、序列不可用时返回 `None`。
    pub fn update_grasp(&mut self, input: f64) -> Option<FramePosition> {
        if !self.active.as_ref().is_some_and(GraspSequence::is_playable) {
            trace!("No playable grasp sequence, ignoring input {:.3}", input);
            return None;
        }

        if self.first_update {
            self.drive_to_frame(0);
            self.first_update = false;
        }

        if input > GRASP_INPUT_THRESHOLD {
            if !self.is_grasping {
                debug!("Grasp started");
                self.is_grasping = true;
            }
            self.spring = self.settings.spring_at(input);

            let (position, target) = {
                let active = self.active.as_ref()?;
                let position = active.locate(input)?;
                let lower = active.frame(position.index)?;
                let upper = active.frame(position.index + 1)?;
                (position, lower.interpolate(upper, position.alpha))
            };
            self.drive(&target);
            Some(position)
        } else {
            if self.is_grasping {
                self.stop_grasping();
            }
            None
        }
    }

    /// 松开：弹簧恢复基准值，关节回到第 0 帧，排队的序列在此生效
    pub fn stop_grasping(&mut self) {
        self.spring = self.settings.spring_base;
        self.drive_to_frame(0);
        if let Some(next) = self.queued.take() {
            self.activate(next);
        }
        self.is_grasping = false;
        debug!("Grasp released");
    }

    /// 松开并卸载全部序列
    pub fn clear(&mut self) {
        if self.is_grasping {
            self.spring = self.settings.spring_base;
            self.drive_to_frame(0);
        }
        self.active = None;
        self.queued = None;
        self.is_grasping = false;
        self.first_update = false;
        self.missing_joints.clear();
        debug!("Grasp executor cleared");
    }

    fn drive_to_frame(&mut self, index: usize) {
        let Some(frame) = self.active.as_ref().and_then(|s| s.frame(index)).cloned() else {
            return;
        };
        self.drive(&frame);
    }

    /// 驱动帧内所有关节；骨架上不存在的关节跳过，每个关节每个序列只报告一次
    fn drive(&mut self, frame: &GraspKeyframe) {
        let drive = self.angular_drive();
        for (joint, target) in frame.iter() {
            if !self.hand.has_joint(joint) {
                if self.missing_joints.insert(joint.to_string()) {
                    warn!("{}, skipping", ControlError::unknown_joint(joint));
                }
                continue;
            }
            if let Err(e) = self.hand.drive_joint(joint, *target, drive) {
                warn!("Failed to drive joint '{}': {}", joint, e);
            }
        }
    }

    /// 当前的关节驱动参数
    pub fn angular_drive(&self) -> AngularDrive {
        AngularDrive::new(self.spring, self.settings.damping, self.settings.force_limit)
    }

    pub fn is_grasping(&self) -> bool {
        self.is_grasping
    }

    pub fn has_queued_sequence(&self) -> bool {
        self.queued.is_some()
    }

    pub fn active_sequence(&self) -> Option<&GraspSequence> {
        self.active.as_ref()
    }

    pub fn queued_sequence(&self) -> Option<&GraspSequence> {
        self.queued.as_ref()
    }

    /// 当前弹簧强度
    pub fn spring(&self) -> f64 {
        self.spring
    }

    pub fn settings(&self) -> &GraspDriveSettings {
        &self.settings
    }

    pub fn hand(&self) -> &H {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut H {
        &mut self.hand
    }

    pub fn into_hand(self) -> H {
        self.hand
    }
}
