//! # PhysMC Grasp
//!
//! 扳机输入驱动的抓取执行器：在离散关键帧之间插值，按输入深度调整关节弹簧强度，
//! 新序列排队到松开时才生效。
//!
//! [`ParallelGripper`] 把同一个扳机输入映射为两根线性手指的对称目标。
//!
//! # 示例
//!
//! ```rust
//! use physmc_body::{RigidBody, SkeletalBody};
//! use physmc_grasp::{GraspExecutor, GraspKeyframe, GraspSequence};
//! use physmc_types::{GraspDriveSettings, Quat};
//!
//! let hand = SkeletalBody::new("hand_r", RigidBody::default())
//!     .with_joints(["index_01", "thumb_01"])
//!     .unwrap();
//!
//! let open = GraspKeyframe::new()
//!     .with_joint("index_01", Quat::identity())
//!     .with_joint("thumb_01", Quat::identity());
//! let closed = GraspKeyframe::new()
//!     .with_joint("index_01", Quat::from_euler_angles(0.0, 1.2, 0.0))
//!     .with_joint("thumb_01", Quat::from_euler_angles(0.4, 0.0, 0.0));
//!
//! let mut exec = GraspExecutor::new(hand, GraspDriveSettings::default());
//! exec.load_sequence(GraspSequence::new("fist").with_frame(open).with_frame(closed));
//!
//! let position = exec.update_grasp(0.5).unwrap();
//! assert_eq!(position.index, 0);
//! assert!(exec.is_grasping());
//! ```

pub mod executor;
pub mod gripper;
pub mod sequence;

pub use executor::{GRASP_INPUT_THRESHOLD, GraspExecutor};
pub use gripper::ParallelGripper;
pub use sequence::{FramePosition, GraspKeyframe, GraspSequence};
