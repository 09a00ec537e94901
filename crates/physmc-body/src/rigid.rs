//! 参考刚体
//!
//! 半隐式欧拉积分：先用累加的力和加速度更新速度，再用新速度更新位姿。
//! 角速度在世界坐标系中表示（rad/s），转动惯量取各向同性标量。

use crate::{BodyError, ForceMode, PhysicsBody, PoseSource};
use physmc_types::{Pose, Quat, Vec3};

/// 单刚体
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pose: Pose,
    linear_velocity: Vec3,
    angular_velocity: Vec3,
    mass: f64,
    inertia: f64,
    /// 本步累加的力
    force: Vec3,
    /// 本步累加的力矩
    torque: Vec3,
    /// 本步累加的（与质量无关的）线加速度
    acceleration: Vec3,
    /// 本步累加的（与质量无关的）角加速度
    angular_acceleration: Vec3,
}

impl RigidBody {
    /// 单位质量、单位惯量，静止于 `pose`
    pub fn new(pose: Pose) -> Self {
        RigidBody {
            pose,
            linear_velocity: Vec3::zeros(),
            angular_velocity: Vec3::zeros(),
            mass: 1.0,
            inertia: 1.0,
            force: Vec3::zeros(),
            torque: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            angular_acceleration: Vec3::zeros(),
        }
    }

    /// 设置质量和转动惯量
    pub fn with_mass(mut self, mass: f64, inertia: f64) -> Result<Self, BodyError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(BodyError::InvalidMass(mass));
        }
        if !(inertia > 0.0 && inertia.is_finite()) {
            return Err(BodyError::InvalidMass(inertia));
        }
        self.mass = mass;
        self.inertia = inertia;
        Ok(self)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// 本步尚未积分的力（不含加速度模式）
    pub fn pending_force(&self) -> Vec3 {
        self.force
    }

    /// 本步尚未积分的力矩（不含加速度模式）
    pub fn pending_torque(&self) -> Vec3 {
        self.torque
    }

    /// 积分一步
    ///
    /// `dt` 不是有限正数时不做任何事（累加器保留到下一步）。
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }

        let linear = self.force / self.mass + self.acceleration;
        let angular = self.torque / self.inertia + self.angular_acceleration;

        self.linear_velocity += linear * dt;
        self.angular_velocity += angular * dt;

        self.pose.position += self.linear_velocity * dt;
        let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
        self.pose.rotation = spin * self.pose.rotation;
        self.pose.rotation.renormalize();

        self.clear_accumulators();
    }

    fn clear_accumulators(&mut self) {
        self.force = Vec3::zeros();
        self.torque = Vec3::zeros();
        self.acceleration = Vec3::zeros();
        self.angular_acceleration = Vec3::zeros();
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        RigidBody::new(Pose::identity())
    }
}

impl PhysicsBody for RigidBody {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.angular_velocity = velocity;
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.force += force,
            ForceMode::Acceleration => self.acceleration += force,
        }
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.torque += torque,
            ForceMode::Acceleration => self.angular_acceleration += torque,
        }
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.linear_velocity += impulse / self.mass;
    }

    fn add_angular_impulse(&mut self, impulse: Vec3) {
        self.angular_velocity += impulse / self.inertia;
    }
}

impl PoseSource for RigidBody {
    fn current_pose(&self) -> Pose {
        self.pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invalid_mass() {
        assert_eq!(
            RigidBody::default().with_mass(0.0, 1.0).unwrap_err(),
            BodyError::InvalidMass(0.0)
        );
        assert!(RigidBody::default().with_mass(2.0, -1.0).is_err());
        assert!(RigidBody::default().with_mass(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_velocity_integration() {
        let mut body = RigidBody::default();
        body.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.step(0.5);
        assert_relative_eq!(body.pose().position.x, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_force_scales_with_mass() {
        let mut heavy = RigidBody::default().with_mass(4.0, 1.0).unwrap();
        heavy.add_force(Vec3::new(8.0, 0.0, 0.0), ForceMode::Force);
        heavy.step(1.0);
        assert_relative_eq!(heavy.linear_velocity().x, 2.0, epsilon = 1e-12);

        let mut accel = RigidBody::default().with_mass(4.0, 1.0).unwrap();
        accel.add_force(Vec3::new(8.0, 0.0, 0.0), ForceMode::Acceleration);
        accel.step(1.0);
        assert_relative_eq!(accel.linear_velocity().x, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_accumulators_cleared_after_step() {
        let mut body = RigidBody::default();
        body.add_force(Vec3::new(1.0, 2.0, 3.0), ForceMode::Force);
        body.add_torque(Vec3::new(0.0, 0.0, 1.0), ForceMode::Force);
        assert_eq!(body.pending_force(), Vec3::new(1.0, 2.0, 3.0));
        body.step(0.1);
        assert_eq!(body.pending_force(), Vec3::zeros());
        assert_eq!(body.pending_torque(), Vec3::zeros());
    }

    #[test]
    fn test_non_positive_dt_is_noop() {
        let mut body = RigidBody::default();
        body.add_force(Vec3::new(1.0, 0.0, 0.0), ForceMode::Force);
        body.step(0.0);
        assert_eq!(body.pose(), Pose::identity());
        assert_eq!(body.pending_force(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_finite_dt_is_noop() {
        let mut body = RigidBody::default();
        body.set_linear_velocity(Vec3::new(1.0, 0.0, 0.0));
        body.add_force(Vec3::new(1.0, 0.0, 0.0), ForceMode::Force);
        for dt in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            body.step(dt);
            assert_eq!(body.pose(), Pose::identity());
            assert_eq!(body.linear_velocity(), Vec3::new(1.0, 0.0, 0.0));
        }
        assert_eq!(body.pending_force(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_angular_integration() {
        let mut body = RigidBody::default();
        body.set_angular_velocity(Vec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        body.step(1.0);
        assert_relative_eq!(body.pose().rotation.angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-9);
    }

    #[test]
    fn test_impulse() {
        let mut body = RigidBody::default().with_mass(2.0, 4.0).unwrap();
        body.add_impulse(Vec3::new(2.0, 0.0, 0.0));
        body.add_angular_impulse(Vec3::new(0.0, 4.0, 0.0));
        assert_relative_eq!(body.linear_velocity().x, 1.0);
        assert_relative_eq!(body.angular_velocity().y, 1.0);
    }

    #[test]
    fn test_halt_and_teleport() {
        let mut body = RigidBody::default();
        body.set_linear_velocity(Vec3::new(5.0, 0.0, 0.0));
        let target = Pose::from_position(Vec3::new(1.0, 2.0, 3.0));
        body.halt_and_teleport(target);
        assert_eq!(body.pose(), target);
        assert_eq!(body.linear_velocity(), Vec3::zeros());
    }
}
