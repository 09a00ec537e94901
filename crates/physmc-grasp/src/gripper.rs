//! 平行夹爪
//!
//! 两根手指各由一个线性约束驱动，扳机输入映射为对称的手指目标：
//!
//! - 输入 0：两指张开到各自限位
//! - 输入 0.5：两指位于中点
//! - 输入 1：两指合拢到反向限位
//!
//! 驱动轴在初始化时选定一次（第一个在两根手指上都限位的轴，按 X、Y、Z 顺序），
//! 之后每次更新直接调用绑定的目标函数。
//! Y 轴的手指朝向与 X、Z 相反，左右目标的符号随之互换。

use physmc_body::{LinearAxis, LinearDrive, LinearDrives};
use physmc_types::{ControlError, GripperControlType, GripperSettings};
use tracing::{debug, trace, warn};

/// `(input, left_limit, right_limit) -> (left, right)`
type TargetFn = fn(f64, f64, f64) -> (f64, f64);

fn targets_xz(input: f64, left_limit: f64, right_limit: f64) -> (f64, f64) {
    (
        (2.0 * input - 1.0) * left_limit,
        (1.0 - 2.0 * input) * right_limit,
    )
}

fn targets_y(input: f64, left_limit: f64, right_limit: f64) -> (f64, f64) {
    (
        (1.0 - 2.0 * input) * left_limit,
        (2.0 * input - 1.0) * right_limit,
    )
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Idle,
    Drive { axis: LinearAxis, targets: TargetFn },
}

/// 平行夹爪控制器
#[derive(Debug)]
pub struct ParallelGripper<C> {
    left: C,
    right: C,
    left_limit: f64,
    right_limit: f64,
    control_type: GripperControlType,
    command: Command,
}

impl<C: LinearDrives> ParallelGripper<C> {
    /// 绑定两根手指并按控制类型配置驱动
    ///
    /// 缺少任一手指或增益非法时返回错误。控制类型没有执行动作、或两根手指
    /// 没有共同的限位轴时，夹爪保持惰性。
    pub fn init(
        left: Option<C>,
        right: Option<C>,
        settings: &GripperSettings,
    ) -> Result<Self, ControlError> {
        let (Some(left), Some(right)) = (left, right) else {
            return Err(ControlError::MissingBody);
        };
        settings.validate()?;

        let mut gripper = ParallelGripper {
            left_limit: left.linear_limit(),
            right_limit: right.linear_limit(),
            left,
            right,
            control_type: settings.control_type,
            command: Command::Idle,
        };

        match settings.control_type {
            GripperControlType::None => {
                debug!("Gripper control type is none, gripper stays idle");
            }
            GripperControlType::LinearDrive => {
                let gains = settings.gains;
                gripper.setup_linear_drive(LinearDrive::new(gains.p, gains.d, gains.max_output));
            }
            other => {
                warn!("Gripper control type {} has no actuation, gripper stays idle", other);
            }
        }
        Ok(gripper)
    }

    fn setup_linear_drive(&mut self, drive: LinearDrive) {
        let axis = LinearAxis::ALL
            .into_iter()
            .find(|&a| self.left.is_axis_limited(a) && self.right.is_axis_limited(a));
        let Some(axis) = axis else {
            warn!("No linear axis is limited on both fingers, gripper stays idle");
            return;
        };

        self.left.set_linear_drive(axis, drive);
        self.right.set_linear_drive(axis, drive);
        let targets: TargetFn = match axis {
            LinearAxis::Y => targets_y,
            LinearAxis::X | LinearAxis::Z => targets_xz,
        };
        self.command = Command::Drive { axis, targets };
        debug!(
            "Gripper linear drive on {} axis, limits {:.3} / {:.3}",
            axis, self.left_limit, self.right_limit
        );
    }

    /// 每个 tick 调用一次
    ///
    /// 输入钳位到 `[0, 1]`；返回写入的 `(left, right)` 目标，惰性或输入为 NaN 时返回 `None`。
    pub fn update(&mut self, input: f64) -> Option<(f64, f64)> {
        let Command::Drive { axis, targets } = self.command else {
            return None;
        };
        if input.is_nan() {
            trace!("Gripper ignoring NaN input");
            return None;
        }
        let input = input.clamp(0.0, 1.0);
        let (left, right) = targets(input, self.left_limit, self.right_limit);
        self.left.set_linear_target(axis.vector(left));
        self.right.set_linear_target(axis.vector(right));
        Some((left, right))
    }

    /// 驱动轴（惰性时为 `None`）
    pub fn axis(&self) -> Option<LinearAxis> {
        match self.command {
            Command::Idle => None,
            Command::Drive { axis, .. } => Some(axis),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.command, Command::Idle)
    }

    pub fn control_type(&self) -> GripperControlType {
        self.control_type
    }

    /// `(left, right)` 限位
    pub fn limits(&self) -> (f64, f64) {
        (self.left_limit, self.right_limit)
    }

    pub fn left(&self) -> &C {
        &self.left
    }

    pub fn right(&self) -> &C {
        &self.right
    }

    pub fn left_mut(&mut self) -> &mut C {
        &mut self.left
    }

    pub fn right_mut(&mut self) -> &mut C {
        &mut self.right
    }

    /// 取回两根手指
    pub fn into_fingers(self) -> (C, C) {
        (self.left, self.right)
    }
}
