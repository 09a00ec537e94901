//! Mock 手部骨架
//!
//! 记录每次关节驱动调用。

use physmc_body::{AngularDrive, BodyError, JointDrives};
use physmc_types::Quat;
use std::collections::BTreeSet;

/// 一次关节驱动
#[derive(Debug, Clone, PartialEq)]
pub struct DriveCall {
    pub joint: String,
    pub target: Quat,
    pub drive: AngularDrive,
}

#[derive(Debug, Clone, Default)]
pub struct MockHand {
    pub joints: BTreeSet<String>,
    pub calls: Vec<DriveCall>,
}

impl MockHand {
    pub fn with_joints(names: &[&str]) -> Self {
        Self {
            joints: names.iter().map(|s| s.to_string()).collect(),
            calls: Vec::new(),
        }
    }

    pub fn take_calls(&mut self) -> Vec<DriveCall> {
        std::mem::take(&mut self.calls)
    }

    /// 某关节最近一次的目标
    pub fn last_target(&self, joint: &str) -> Option<Quat> {
        self.calls
            .iter()
            .rev()
            .find(|c| c.joint == joint)
            .map(|c| c.target)
    }
}

impl JointDrives for MockHand {
    fn has_joint(&self, joint: &str) -> bool {
        self.joints.contains(joint)
    }

    fn drive_joint(
        &mut self,
        joint: &str,
        target: Quat,
        drive: AngularDrive,
    ) -> Result<(), BodyError> {
        if !self.joints.contains(joint) {
            return Err(BodyError::UnknownJoint(joint.to_string()));
        }
        self.calls.push(DriveCall {
            joint: joint.to_string(),
            target,
            drive,
        });
        Ok(())
    }
}
