//! 位姿类型
//!
//! 提供刚体位姿（位置 + 姿态）的表示和变换组合，底层使用 `nalgebra`。
//!
//! # 约定
//!
//! - 位置单位与引擎一致（不做换算）
//! - 姿态始终为单位四元数
//! - 组合顺序采用数学（列向量）约定：`a * b` 表示先作用 `b` 再作用 `a`
//!
//! # 示例
//!
//! ```rust
//! use physmc_types::{Pose, Quat, Vec3};
//!
//! let target = Pose::new(Vec3::new(1.0, 0.0, 0.0), Quat::identity());
//! let offset = Pose::from_position(Vec3::new(0.0, 0.5, 0.0));
//!
//! // 局部偏移放入目标坐标系
//! let effective = offset.transformed_by(&target);
//! assert!((effective.position - Vec3::new(1.0, 0.5, 0.0)).norm() < 1e-12);
//! ```

use nalgebra::{Isometry3, Translation3};
use std::fmt;

/// 三维向量（位置、速度、力、PID 输出）
pub type Vec3 = nalgebra::Vector3<f64>;

/// 单位四元数（姿态）
pub type Quat = nalgebra::UnitQuaternion<f64>;

/// 刚体位姿
///
/// 每个 tick 从引擎读取的快照，控制核心从不持有引擎对象本身。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// 位置
    pub position: Vec3,
    /// 姿态
    pub rotation: Quat,
}

impl Pose {
    /// 创建新的位姿
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Pose { position, rotation }
    }

    /// 原点、无旋转
    pub fn identity() -> Self {
        Pose::new(Vec3::zeros(), Quat::identity())
    }

    /// 仅位置（姿态为单位四元数）
    pub fn from_position(position: Vec3) -> Self {
        Pose::new(position, Quat::identity())
    }

    /// 仅姿态（位置为原点）
    pub fn from_rotation(rotation: Quat) -> Self {
        Pose::new(Vec3::zeros(), rotation)
    }

    /// 从等距变换创建
    pub fn from_isometry(iso: &Isometry3<f64>) -> Self {
        Pose::new(iso.translation.vector, iso.rotation)
    }

    /// 转换为等距变换
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.rotation)
    }

    /// 逆变换
    pub fn inverse(&self) -> Self {
        Pose::from_isometry(&self.to_isometry().inverse())
    }

    /// 把局部位姿 `self` 放入 `parent` 坐标系：`parent * self`
    ///
    /// 用于 `effectiveTarget = localOffset ∘ targetPose`：偏移先作用，
    /// 然后整体跟随目标移动。
    pub fn transformed_by(&self, parent: &Pose) -> Self {
        Pose::from_isometry(&(parent.to_isometry() * self.to_isometry()))
    }

    /// `self` 在 `reference` 坐标系下的表示：`reference⁻¹ * self`
    ///
    /// 与 [`transformed_by`](Self::transformed_by) 互逆：
    /// `a.relative_to(&b).transformed_by(&b) == a`。
    pub fn relative_to(&self, reference: &Pose) -> Self {
        Pose::from_isometry(&(reference.to_isometry().inverse() * self.to_isometry()))
    }

    /// 替换位置，保留姿态
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// 替换姿态，保留位置
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::identity()
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.rotation.quaternion();
        write!(
            f,
            "P({:.3}, {:.3}, {:.3}) Q({:.3}, {:.3}, {:.3}, {:.3})",
            self.position.x, self.position.y, self.position.z, q.w, q.i, q.j, q.k
        )
    }
}
