//! 参考骨骼体
//!
//! 根刚体 + 若干子刚体 + 命名关节。关节不参与刚体积分：每步按
//! `spring / damping` 的时间常数向目标姿态指数逼近。

use crate::rigid::RigidBody;
use crate::{AngularDrive, BodyError, ForceMode, JointDrives, PhysicsBody, PoseSource};
use physmc_types::{Pose, Quat, Vec3};
use std::collections::BTreeMap;
use tracing::trace;

/// 单个关节的状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointState {
    /// 当前相对姿态
    pub orientation: Quat,
    /// 驱动目标
    pub target: Quat,
    /// 最近一次驱动参数（从未驱动时为 `None`）
    pub drive: Option<AngularDrive>,
}

impl JointState {
    fn relax(&mut self, dt: f64) {
        let Some(drive) = self.drive else {
            return;
        };
        let alpha = if drive.damping <= 0.0 {
            1.0
        } else {
            1.0 - (-(drive.spring / drive.damping) * dt).exp()
        };
        let alpha = alpha.clamp(0.0, 1.0);
        self.orientation = self
            .orientation
            .try_slerp(&self.target, alpha, 1e-9)
            .unwrap_or(self.target);
    }
}

impl Default for JointState {
    fn default() -> Self {
        JointState {
            orientation: Quat::identity(),
            target: Quat::identity(),
            drive: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Bone {
    name: String,
    body: RigidBody,
}

/// 多刚体骨骼
///
/// - 传送总是移动整个骨骼，子刚体保持相对根的位姿
/// - 速度、力、冲量默认只作用于根刚体；开启 `apply_to_all_bodies` 后作用于全部刚体
/// - 只驱动根刚体时，积分后子刚体随根一起移动，保持相对根的位姿
#[derive(Debug, Clone)]
pub struct SkeletalBody {
    bones: Vec<Bone>,
    joints: BTreeMap<String, JointState>,
    apply_to_all_bodies: bool,
}

impl SkeletalBody {
    /// 仅含根刚体的骨骼
    pub fn new(root_name: impl Into<String>, root: RigidBody) -> Self {
        SkeletalBody {
            bones: vec![Bone {
                name: root_name.into(),
                body: root,
            }],
            joints: BTreeMap::new(),
            apply_to_all_bodies: false,
        }
    }

    /// 添加子刚体
    pub fn with_body(mut self, name: impl Into<String>, body: RigidBody) -> Result<Self, BodyError> {
        let name = name.into();
        if self.bones.iter().any(|b| b.name == name) {
            return Err(BodyError::DuplicateName(name));
        }
        self.bones.push(Bone { name, body });
        Ok(self)
    }

    /// 添加关节（初始姿态为单位四元数）
    pub fn with_joint(mut self, name: impl Into<String>) -> Result<Self, BodyError> {
        let name = name.into();
        if self.joints.contains_key(&name) {
            return Err(BodyError::DuplicateName(name));
        }
        self.joints.insert(name, JointState::default());
        Ok(self)
    }

    /// 批量添加关节
    pub fn with_joints<I, S>(mut self, names: I) -> Result<Self, BodyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self = self.with_joint(name)?;
        }
        Ok(self)
    }

    /// 执行命令是否作用于全部刚体
    pub fn set_apply_to_all_bodies(&mut self, enabled: bool) {
        self.apply_to_all_bodies = enabled;
    }

    pub fn apply_to_all_bodies(&self) -> bool {
        self.apply_to_all_bodies
    }

    /// 根刚体
    pub fn root(&self) -> &RigidBody {
        &self.bones[0].body
    }

    /// 按名称查找刚体
    pub fn body(&self, name: &str) -> Option<&RigidBody> {
        self.bones.iter().find(|b| b.name == name).map(|b| &b.body)
    }

    /// 刚体数量（含根）
    pub fn body_count(&self) -> usize {
        self.bones.len()
    }

    /// 按名称查找关节
    pub fn joint(&self, name: &str) -> Option<&JointState> {
        self.joints.get(name)
    }

    /// 全部关节名（有序）
    pub fn joint_names(&self) -> impl Iterator<Item = &str> {
        self.joints.keys().map(String::as_str)
    }

    /// 积分一步：刚体积分 + 关节逼近
    ///
    /// `dt` 不是有限正数时不做任何事。
    pub fn step(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        if self.apply_to_all_bodies {
            for bone in &mut self.bones {
                bone.body.step(dt);
            }
        } else {
            let old_root = self.root().pose();
            let relatives: Vec<Pose> = self.bones[1..]
                .iter()
                .map(|b| b.body.pose().relative_to(&old_root))
                .collect();
            self.bones[0].body.step(dt);
            let new_root = self.root().pose();
            for (bone, relative) in self.bones[1..].iter_mut().zip(relatives) {
                bone.body.teleport(relative.transformed_by(&new_root));
            }
        }
        for joint in self.joints.values_mut() {
            joint.relax(dt);
        }
    }

    fn for_each_driven(&mut self, mut f: impl FnMut(&mut RigidBody)) {
        let count = if self.apply_to_all_bodies {
            self.bones.len()
        } else {
            1
        };
        for bone in self.bones.iter_mut().take(count) {
            f(&mut bone.body);
        }
    }
}

impl PhysicsBody for SkeletalBody {
    fn pose(&self) -> Pose {
        self.root().pose()
    }

    fn teleport(&mut self, pose: Pose) {
        let old_root = self.root().pose();
        for bone in &mut self.bones {
            let relative = bone.body.pose().relative_to(&old_root);
            bone.body.teleport(relative.transformed_by(&pose));
        }
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.for_each_driven(|b| b.set_linear_velocity(velocity));
    }

    fn set_angular_velocity(&mut self, velocity: Vec3) {
        self.for_each_driven(|b| b.set_angular_velocity(velocity));
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        self.for_each_driven(|b| b.add_force(force, mode));
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        self.for_each_driven(|b| b.add_torque(torque, mode));
    }

    fn add_impulse(&mut self, impulse: Vec3) {
        self.for_each_driven(|b| b.add_impulse(impulse));
    }

    fn add_angular_impulse(&mut self, impulse: Vec3) {
        self.for_each_driven(|b| b.add_angular_impulse(impulse));
    }
}

impl PoseSource for SkeletalBody {
    fn current_pose(&self) -> Pose {
        self.root().pose()
    }
}

impl JointDrives for SkeletalBody {
    fn has_joint(&self, joint: &str) -> bool {
        self.joints.contains_key(joint)
    }

    fn drive_joint(
        &mut self,
        joint: &str,
        target: Quat,
        drive: AngularDrive,
    ) -> Result<(), BodyError> {
        let state = self
            .joints
            .get_mut(joint)
            .ok_or_else(|| BodyError::UnknownJoint(joint.to_string()))?;
        trace!("Driving joint {} with spring {:.1}", joint, drive.spring);
        state.target = target;
        state.drive = Some(drive);
        Ok(())
    }
}
