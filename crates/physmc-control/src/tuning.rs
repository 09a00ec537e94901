//! 运行时增益调节
//!
//! 选择轴组和增益项后按步长增减，再把结果推送到控制器。步长本身也是一个可调项：
//! 增大时乘 10，减小时除以 10（不低于 0.1）。增益不会被调到负值。

use crate::controller::PoseController;
use physmc_body::{PhysicsBody, PoseSource};
use physmc_types::{AxisGroup, ControllerSettings, PidGains, Result};
use std::fmt;
use tracing::debug;

/// 默认步长
pub const DEFAULT_EDIT_DELTA: f64 = 10.0;

/// 步长下限
pub const MIN_EDIT_DELTA: f64 = 0.1;

/// 当前调节的项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TunedTerm {
    P,
    I,
    D,
    Max,
    /// 步长本身
    #[default]
    Delta,
}

impl TunedTerm {
    /// 循环切换：P → I → D → Max → Delta → P
    pub fn next(self) -> Self {
        match self {
            TunedTerm::P => TunedTerm::I,
            TunedTerm::I => TunedTerm::D,
            TunedTerm::D => TunedTerm::Max,
            TunedTerm::Max => TunedTerm::Delta,
            TunedTerm::Delta => TunedTerm::P,
        }
    }
}

impl fmt::Display for TunedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TunedTerm::P => "P",
            TunedTerm::I => "I",
            TunedTerm::D => "D",
            TunedTerm::Max => "Max",
            TunedTerm::Delta => "Delta",
        };
        f.write_str(name)
    }
}

/// 增益调节器
#[derive(Debug, Clone, PartialEq)]
pub struct GainTuner {
    group: AxisGroup,
    term: TunedTerm,
    delta: f64,
    location: PidGains,
    rotation: PidGains,
}

impl GainTuner {
    /// 从控制器配置开始调节（平移组、步长项、步长 10）
    pub fn new(settings: &ControllerSettings) -> Self {
        GainTuner {
            group: AxisGroup::Location,
            term: TunedTerm::default(),
            delta: DEFAULT_EDIT_DELTA,
            location: settings.location,
            rotation: settings.rotation,
        }
    }

    /// 在平移和旋转之间切换
    pub fn switch_group(&mut self) {
        self.group = match self.group {
            AxisGroup::Location => AxisGroup::Rotation,
            AxisGroup::Rotation => AxisGroup::Location,
        };
        debug!("Tuning {} gains", self.group);
    }

    /// 切换到下一项
    pub fn switch_term(&mut self) {
        self.select(self.term.next());
    }

    /// 直接选择某一项
    pub fn select(&mut self, term: TunedTerm) {
        self.term = term;
        debug!("Tuning term {}", self.term);
    }

    /// 按步长增加当前项
    pub fn increase(&mut self) {
        match self.term {
            TunedTerm::Delta => self.delta *= 10.0,
            term => self.adjust(term, self.delta),
        }
        debug!("{}", self);
    }

    /// 按步长减小当前项
    pub fn decrease(&mut self) {
        match self.term {
            TunedTerm::Delta => self.delta = (self.delta * 0.1).max(MIN_EDIT_DELTA),
            term => self.adjust(term, -self.delta),
        }
        debug!("{}", self);
    }

    fn adjust(&mut self, term: TunedTerm, amount: f64) {
        let gains = match self.group {
            AxisGroup::Location => &mut self.location,
            AxisGroup::Rotation => &mut self.rotation,
        };
        let value = match term {
            TunedTerm::P => &mut gains.p,
            TunedTerm::I => &mut gains.i,
            TunedTerm::D => &mut gains.d,
            TunedTerm::Max => &mut gains.max_output,
            TunedTerm::Delta => return,
        };
        *value = (*value + amount).max(0.0);
    }

    /// 把当前轴组的增益推送到控制器（清零误差记忆）
    pub fn apply_to<B: PhysicsBody, T: PoseSource>(
        &self,
        controller: &mut PoseController<B, T>,
    ) -> Result<()> {
        match self.group {
            AxisGroup::Location => controller.reset_location(self.location, true),
            AxisGroup::Rotation => controller.reset_rotation(self.rotation, true),
        }
    }

    pub fn group(&self) -> AxisGroup {
        self.group
    }

    pub fn term(&self) -> TunedTerm {
        self.term
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// 当前轴组的增益
    pub fn gains(&self) -> PidGains {
        match self.group {
            AxisGroup::Location => self.location,
            AxisGroup::Rotation => self.rotation,
        }
    }

    pub fn location(&self) -> PidGains {
        self.location
    }

    pub fn rotation(&self) -> PidGains {
        self.rotation
    }
}

impl fmt::Display for GainTuner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} Delta={:.1}",
            self.group,
            self.term,
            self.gains(),
            self.delta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physmc_body::RigidBody;
    use physmc_types::{ControlType, Pose};

    fn tuner() -> GainTuner {
        GainTuner::new(&ControllerSettings::for_control_type(ControlType::Velocity))
    }

    #[test]
    fn test_defaults() {
        let tuner = tuner();
        assert_eq!(tuner.group(), AxisGroup::Location);
        assert_eq!(tuner.term(), TunedTerm::Delta);
        assert_eq!(tuner.delta(), 10.0);
        assert_eq!(tuner.gains(), PidGains::VELOCITY_LOCATION);
    }

    #[test]
    fn test_term_cycle() {
        let mut tuner = tuner();
        let mut seen = Vec::new();
        for _ in 0..5 {
            tuner.switch_term();
            seen.push(tuner.term());
        }
        assert_eq!(
            seen,
            vec![TunedTerm::P, TunedTerm::I, TunedTerm::D, TunedTerm::Max, TunedTerm::Delta]
        );
    }

    #[test]
    fn test_delta_scaling() {
        let mut tuner = tuner();
        tuner.increase();
        assert_eq!(tuner.delta(), 100.0);
        for _ in 0..5 {
            tuner.decrease();
        }
        assert_eq!(tuner.delta(), MIN_EDIT_DELTA);
    }

    #[test]
    fn test_edits_selected_group_only() {
        let mut tuner = tuner();
        tuner.switch_group();
        tuner.select(TunedTerm::P);
        tuner.increase();
        assert_eq!(tuner.rotation().p, 22.0);
        assert_eq!(tuner.location(), PidGains::VELOCITY_LOCATION);
    }

    #[test]
    fn test_never_negative() {
        let mut tuner = tuner();
        tuner.select(TunedTerm::I);
        tuner.decrease();
        assert_eq!(tuner.location().i, 0.0);
    }

    #[test]
    fn test_apply_to_controller() {
        let settings = ControllerSettings::for_control_type(ControlType::Velocity);
        let mut controller: PoseController<RigidBody, Pose> = PoseController::new();
        controller
            .init(Some(Pose::identity()), Some(RigidBody::default()), &settings, None)
            .unwrap();

        let mut tuner = GainTuner::new(&settings);
        tuner.select(TunedTerm::Max);
        tuner.increase();
        tuner.apply_to(&mut controller).unwrap();
        assert_eq!(controller.settings().location.max_output, 30.0);
        assert_eq!(controller.location_pid().gains().max_output, 30.0);
    }

    #[test]
    fn test_display() {
        let msg = tuner().to_string();
        assert!(msg.starts_with("location Delta"));
        assert!(msg.contains("Delta=10.0"));
    }
}
