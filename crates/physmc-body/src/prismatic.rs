//! 参考线性约束
//!
//! 每个平移轴独立设置为自由、限位或锁定。位置驱动只作用于一个轴，每步按
//! `spring / damping` 的时间常数向目标指数逼近，再按轴的运动方式钳位。
//! 力限制不参与参考积分。

use crate::{BodyError, LinearAxis, LinearDrive, LinearDrives};
use physmc_types::Vec3;
use tracing::trace;

/// 单轴运动方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinearMotion {
    Free,
    Limited,
    #[default]
    Locked,
}

/// 线性约束（夹爪手指相对夹爪基座）
#[derive(Debug, Clone, PartialEq)]
pub struct PrismaticJoint {
    limit: f64,
    motions: [LinearMotion; 3],
    drive: Option<(LinearAxis, LinearDrive)>,
    target: Vec3,
    position: Vec3,
}

impl PrismaticJoint {
    /// 全部轴锁定
    pub fn new(limit: f64) -> Result<Self, BodyError> {
        if !(limit >= 0.0 && limit.is_finite()) {
            return Err(BodyError::InvalidLimit(limit));
        }
        Ok(PrismaticJoint {
            limit,
            motions: [LinearMotion::Locked; 3],
            drive: None,
            target: Vec3::zeros(),
            position: Vec3::zeros(),
        })
    }

    /// 夹爪手指：Y 轴限位，X、Z 锁定
    pub fn finger(limit: f64) -> Result<Self, BodyError> {
        Ok(Self::new(limit)?.with_motion(LinearAxis::Y, LinearMotion::Limited))
    }

    pub fn with_motion(mut self, axis: LinearAxis, motion: LinearMotion) -> Self {
        self.motions[axis.index()] = motion;
        self
    }

    pub fn motion(&self, axis: LinearAxis) -> LinearMotion {
        self.motions[axis.index()]
    }

    /// 当前相对位置
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// 已启用的驱动轴和参数
    pub fn drive(&self) -> Option<(LinearAxis, LinearDrive)> {
        self.drive
    }

    /// 积分一步
    ///
    /// `dt` 不是有限正数时不做任何事。
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        if let Some((axis, drive)) = self.drive {
            let i = axis.index();
            let alpha = if drive.damping <= 0.0 {
                1.0
            } else {
                1.0 - (-(drive.spring / drive.damping) * dt).exp()
            };
            let alpha = alpha.clamp(0.0, 1.0);
            self.position[i] += (self.target[i] - self.position[i]) * alpha;
        }
        for axis in LinearAxis::ALL {
            let i = axis.index();
            self.position[i] = match self.motions[i] {
                LinearMotion::Free => self.position[i],
                LinearMotion::Limited => self.position[i].max(-self.limit).min(self.limit),
                LinearMotion::Locked => 0.0,
            };
        }
    }
}

impl LinearDrives for PrismaticJoint {
    fn linear_limit(&self) -> f64 {
        self.limit
    }

    fn is_axis_limited(&self, axis: LinearAxis) -> bool {
        self.motion(axis) == LinearMotion::Limited
    }

    fn set_linear_drive(&mut self, axis: LinearAxis, drive: LinearDrive) {
        trace!("Linear drive on {} axis, spring {:.1}", axis, drive.spring);
        self.drive = Some((axis, drive));
    }

    fn set_linear_target(&mut self, target: Vec3) {
        self.target = target;
    }
}
