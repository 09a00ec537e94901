//! 位姿控制器
//!
//! 把 [`PoseError`]、两个 [`VectorPid`]（平移、旋转）和 [`ActuationStrategy`]
//! 组合为每个 tick 调用一次的 `update(dt)`。
//!
//! # 状态机
//!
//! ```text
//! Uninitialized --init--> Configured --update--> Active
//!        ^                    |  ^                  |
//!        |                    |  +------init--------+
//!        |                  clear                 clear
//!        |                    v                     v
//!        +---------------- Disabled <---------------+
//! ```
//!
//! `Disabled` 之后可以再次 `init`。配置错误不会中止：控制器进入 `Configured`，
//! 但绑定惰性策略，`update` 不执行任何动作。
//!
//! # 示例
//!
//! ```rust
//! use physmc_body::RigidBody;
//! use physmc_control::PoseController;
//! use physmc_types::{ControlType, ControllerSettings, PidGains, Pose, Vec3};
//!
//! let target = Pose::from_position(Vec3::new(10.0, 0.0, 0.0));
//! let settings = ControllerSettings::for_control_type(ControlType::Velocity)
//!     .with_gains(PidGains::proportional(1.0, 100.0), PidGains::proportional(1.0, 100.0));
//!
//! let mut controller = PoseController::new();
//! controller.init(Some(target), Some(RigidBody::default()), &settings, None).unwrap();
//!
//! let tick = controller.update(0.01).unwrap();
//! assert_eq!(tick.location_output, Vec3::new(10.0, 0.0, 0.0));
//! ```

use crate::pid::VectorPid;
use crate::pose_error::{PoseError, effective_target};
use crate::strategy::ActuationStrategy;
use physmc_body::{PhysicsBody, PoseSource};
use physmc_types::{AxisGroup, ControlError, ControllerSettings, PidGains, Pose, Result, Vec3};
use std::fmt;
use tracing::{debug, trace, warn};

/// 控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// 尚未配置
    Uninitialized,
    /// 已配置，尚未执行过
    Configured,
    /// 至少执行过一次
    Active,
    /// 已停用
    Disabled,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Uninitialized => "uninitialized",
            ControllerState::Configured => "configured",
            ControllerState::Active => "active",
            ControllerState::Disabled => "disabled",
        };
        f.write_str(name)
    }
}

/// 单个 tick 的误差和输出
///
/// 不使用 PID 的轴组（`Position` / `None`）输出为零向量。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDiagnostics {
    pub location_error: Vec3,
    pub location_output: Vec3,
    pub rotation_error: Vec3,
    pub rotation_output: Vec3,
}

/// 位姿控制器
///
/// - `B`: 受控刚体
/// - `T`: 目标位姿来源
pub struct PoseController<B, T> {
    body: Option<B>,
    target: Option<T>,
    settings: ControllerSettings,
    location_pid: VectorPid,
    rotation_pid: VectorPid,
    strategy: ActuationStrategy,
    local_offset: Option<Pose>,
    state: ControllerState,
    config_error: Option<ControlError>,
    last_tick: Option<TickDiagnostics>,
}

impl<B: PhysicsBody, T: PoseSource> PoseController<B, T> {
    /// 未配置的控制器
    pub fn new() -> Self {
        let settings = ControllerSettings::default();
        PoseController {
            body: None,
            target: None,
            location_pid: VectorPid::new(settings.location),
            rotation_pid: VectorPid::new(settings.rotation),
            settings,
            strategy: ActuationStrategy::none(),
            local_offset: None,
            state: ControllerState::Uninitialized,
            config_error: None,
            last_tick: None,
        }
    }

    /// 配置控制器
    ///
    /// - `offset_reference`: 偏移参考位姿。提供时，局部偏移在此刻一次性计算为
    ///   刚体当前位姿在参考坐标系下的表示，之后保持不变。
    ///
    /// 出错时记录日志并绑定惰性策略，错误同时保存在 [`config_error`](Self::config_error)。
    pub fn init(
        &mut self,
        target: Option<T>,
        body: Option<B>,
        settings: &ControllerSettings,
        offset_reference: Option<Pose>,
    ) -> Result<()> {
        self.body = body;
        self.target = target;
        self.settings = *settings;
        self.local_offset = None;
        self.last_tick = None;
        self.state = ControllerState::Configured;

        self.location_pid.init(settings.location, true);
        self.location_pid.set_output_bound(settings.output_bound);
        self.rotation_pid.init(settings.rotation, true);
        self.rotation_pid.set_output_bound(settings.output_bound);

        if let Err(e) = self.check_configuration() {
            warn!("Pose controller configuration rejected, actuation disabled: {}", e);
            self.strategy = ActuationStrategy::none();
            self.config_error = Some(e.clone());
            return Err(e);
        }
        self.config_error = None;

        if let (Some(reference), Some(body)) = (offset_reference, self.body.as_ref()) {
            let offset = body.pose().relative_to(&reference);
            debug!("Local target offset fixed at {}", offset);
            self.local_offset = Some(offset);
        }

        self.strategy = ActuationStrategy::bind(
            settings.location_control_type(),
            settings.effective_rotation_control_type(),
        );
        debug!(
            "Pose controller configured: location={} {}, rotation={} {}",
            settings.location_control_type(),
            settings.location,
            settings.effective_rotation_control_type(),
            settings.rotation
        );
        Ok(())
    }

    fn check_configuration(&self) -> Result<()> {
        if self.body.is_none() {
            return Err(ControlError::MissingBody);
        }
        if self.target.is_none() {
            return Err(ControlError::MissingTarget);
        }
        self.settings.validate()
    }

    /// 执行一个 tick
    ///
    /// 返回本次的误差和输出；未执行（未配置、已停用、惰性策略、`dt` 非有限正数）时返回 `None`。
    pub fn update(&mut self, dt: f64) -> Option<TickDiagnostics> {
        if !matches!(self.state, ControllerState::Configured | ControllerState::Active) {
            trace!("Pose controller is {}, skipping update", self.state);
            return None;
        }
        if self.strategy.is_inert() {
            trace!("Pose controller has no actuation bound, skipping update");
            return None;
        }
        if let Err(e) = ControlError::check_time_step(dt) {
            warn!("Pose controller: {}, skipping update", e);
            return None;
        }
        let (Some(body), Some(target)) = (self.body.as_mut(), self.target.as_ref()) else {
            return None;
        };

        let current = body.pose();
        let target_pose = target.current_pose();
        let error = PoseError::compute(&current, &target_pose, self.local_offset.as_ref());
        let goal = effective_target(&target_pose, self.local_offset.as_ref());

        let location_output = if self.strategy.location().uses_pid() {
            self.location_pid.update(error.position, dt)
        } else {
            Vec3::zeros()
        };
        let rotation_output = if self.strategy.rotation().uses_pid() {
            self.rotation_pid.update(error.rotation, dt)
        } else {
            Vec3::zeros()
        };

        self.strategy.apply(body, &goal, location_output, rotation_output);

        let tick = TickDiagnostics {
            location_error: error.position,
            location_output,
            rotation_error: error.rotation,
            rotation_output,
        };
        self.state = ControllerState::Active;
        self.last_tick = Some(tick);
        Some(tick)
    }

    /// 运行中重设平移增益
    ///
    /// `clear_errors = false` 时保留积分和微分记忆。
    pub fn reset_location(&mut self, gains: PidGains, clear_errors: bool) -> Result<()> {
        self.reset_group(AxisGroup::Location, gains, clear_errors)
    }

    /// 运行中重设旋转增益
    pub fn reset_rotation(&mut self, gains: PidGains, clear_errors: bool) -> Result<()> {
        self.reset_group(AxisGroup::Rotation, gains, clear_errors)
    }

    fn reset_group(&mut self, group: AxisGroup, gains: PidGains, clear_errors: bool) -> Result<()> {
        if let Err(e) = gains.validate(group) {
            warn!("Ignoring {} gain reset: {}", group, e);
            return Err(e);
        }
        match group {
            AxisGroup::Location => {
                self.settings.location = gains;
                self.location_pid.init(gains, clear_errors);
            },
            AxisGroup::Rotation => {
                self.settings.rotation = gains;
                self.rotation_pid.init(gains, clear_errors);
            },
        }
        debug!("{} gains reset to {} (clear_errors={})", group, gains, clear_errors);
        Ok(())
    }

    /// 停用控制器
    ///
    /// 两个轴组都绑定为惰性策略，PID 记忆清零。刚体和目标保留，可以再次 `init`。
    pub fn clear(&mut self) {
        self.strategy = ActuationStrategy::none();
        self.location_pid.reset();
        self.rotation_pid.reset();
        self.last_tick = None;
        if self.state != ControllerState::Uninitialized {
            self.state = ControllerState::Disabled;
        }
        debug!("Pose controller cleared");
    }

    /// 清零速度并传送到（组合偏移后的）目标位姿
    ///
    /// 缺少刚体或目标时返回 `false`。
    pub fn snap_to_target(&mut self) -> bool {
        let (Some(body), Some(target)) = (self.body.as_mut(), self.target.as_ref()) else {
            warn!("Cannot snap to target: body or target missing");
            return false;
        };
        let goal = effective_target(&target.current_pose(), self.local_offset.as_ref());
        body.halt_and_teleport(goal);
        trace!("Snapped body to {}", goal);
        true
    }

    /// 当前误差（不执行任何动作）
    pub fn current_error(&self) -> Option<PoseError> {
        let (body, target) = (self.body.as_ref()?, self.target.as_ref()?);
        Some(PoseError::compute(
            &body.pose(),
            &target.current_pose(),
            self.local_offset.as_ref(),
        ))
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn strategy(&self) -> &ActuationStrategy {
        &self.strategy
    }

    pub fn location_pid(&self) -> &VectorPid {
        &self.location_pid
    }

    pub fn rotation_pid(&self) -> &VectorPid {
        &self.rotation_pid
    }

    /// 固定的局部偏移
    pub fn local_offset(&self) -> Option<&Pose> {
        self.local_offset.as_ref()
    }

    /// 最近一次 `init` 的配置错误
    pub fn config_error(&self) -> Option<&ControlError> {
        self.config_error.as_ref()
    }

    /// 最近一次执行的 tick
    pub fn last_tick(&self) -> Option<&TickDiagnostics> {
        self.last_tick.as_ref()
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    pub fn body_mut(&mut self) -> Option<&mut B> {
        self.body.as_mut()
    }

    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }
}

impl<B: PhysicsBody, T: PoseSource> Default for PoseController<B, T> {
    fn default() -> Self {
        PoseController::new()
    }
}

impl<B, T> fmt::Debug for PoseController<B, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoseController")
            .field("state", &self.state)
            .field("settings", &self.settings)
            .field("strategy", &self.strategy)
            .field("local_offset", &self.local_offset)
            .field("has_body", &self.body.is_some())
            .field("has_target", &self.target.is_some())
            .finish()
    }
}
