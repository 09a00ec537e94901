//! Mock 夹爪手指约束
//!
//! 记录驱动配置和每次目标。

use physmc_body::{LinearAxis, LinearDrive, LinearDrives};
use physmc_types::Vec3;

#[derive(Debug, Clone, Default)]
pub struct MockFinger {
    pub limit: f64,
    pub limited: Vec<LinearAxis>,
    pub drives: Vec<(LinearAxis, LinearDrive)>,
    pub targets: Vec<Vec3>,
}

impl MockFinger {
    pub fn new(limit: f64, limited: &[LinearAxis]) -> Self {
        Self {
            limit,
            limited: limited.to_vec(),
            ..Self::default()
        }
    }

    pub fn last_target(&self) -> Option<Vec3> {
        self.targets.last().copied()
    }
}

impl LinearDrives for MockFinger {
    fn linear_limit(&self) -> f64 {
        self.limit
    }

    fn is_axis_limited(&self, axis: LinearAxis) -> bool {
        self.limited.contains(&axis)
    }

    fn set_linear_drive(&mut self, axis: LinearAxis, drive: LinearDrive) {
        self.drives.push((axis, drive));
    }

    fn set_linear_target(&mut self, target: Vec3) {
        self.targets.push(target);
    }
}
