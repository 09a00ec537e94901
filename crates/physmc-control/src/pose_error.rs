//! 位姿误差
//!
//! 位置误差是差向量；姿态误差取 `target * current⁻¹` 的虚部（小角度近似，
//! 大误差时不精确），并在实部为负时取反以走最短弧。

use physmc_types::{Pose, Quat, Vec3};

/// 当前位姿到目标位姿的误差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseError {
    /// `target.position - current.position`
    pub position: Vec3,
    /// 最短弧误差四元数的虚部 `(x, y, z)`
    pub rotation: Vec3,
}

impl PoseError {
    /// 计算误差
    ///
    /// 有局部偏移时先把偏移组合到目标上（见 [`effective_target`]）。
    pub fn compute(current: &Pose, target: &Pose, local_offset: Option<&Pose>) -> Self {
        let target = effective_target(target, local_offset);
        PoseError {
            position: target.position - current.position,
            rotation: rotation_error(&current.rotation, &target.rotation),
        }
    }

    /// 零误差
    pub fn zero() -> Self {
        PoseError {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
        }
    }
}

/// 组合局部偏移后的目标位姿：`target ∘ offset`
pub fn effective_target(target: &Pose, local_offset: Option<&Pose>) -> Pose {
    match local_offset {
        Some(offset) => offset.transformed_by(target),
        None => *target,
    }
}

/// 最短弧姿态差四元数 `target * current⁻¹`（保证 `w >= 0`）
pub fn rotation_delta(current: &Quat, target: &Quat) -> Quat {
    let delta = target * current.inverse();
    if delta.w < 0.0 {
        // -q 与 q 表示同一旋转
        Quat::new_unchecked(-delta.into_inner())
    } else {
        delta
    }
}

/// 姿态误差向量
pub fn rotation_error(current: &Quat, target: &Quat) -> Vec3 {
    rotation_delta(current, target).imag()
}
