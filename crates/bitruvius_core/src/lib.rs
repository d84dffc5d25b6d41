//! Bitruvius Core
//!
//! Angle math, skeleton topology, pose value types and forward kinematics
//! for a 2D articulated figure.
//!
//! # Features
//!
//! - **Angle Math**: degree rotation, shortest-arc differences and interpolation
//! - **Topology**: a fixed part tree with two arm chains, two leg chains and a spine
//! - **Poses**: partial static poses, synthesized walk frames, pivot offsets
//! - **Rigs**: the static mannequin layout and a proportion-driven walking layout
//! - **Forward Kinematics**: iterative evaluation with optional pin compensation

pub mod kinematics;
pub mod math;
pub mod pose;
pub mod rig;
pub mod skeleton;

pub use kinematics::{joint_positions, part_global_angles, Anchor, JointFrame, JointPositions};
pub use math::{
    add_vec, deg_to_rad, lerp, lerp_angle_shortest_path, normalize_angle_360, rad_to_deg,
    rotate_vec, shortest_angle_diff, Vec2,
};
pub use pose::{PivotOffsets, Pose, WalkPose, COLLAR_OFFSET_Y};
pub use rig::{anatomy, mannequin, BoneSpec, Proportions, Rig, Scale, MANNEQUIN_UNIT};
pub use skeleton::{Limb, PartName, Side, WalkJoint};
