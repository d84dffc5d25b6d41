//! Pose value types
//!
//! - [`Pose`] is the static editing pose: a root position, a whole-body
//!   rotation, and one local rotation per part. Every field is optional so
//!   that a decoded string can describe only part of a figure.
//! - [`WalkPose`] is what the gait synthesizer emits once per frame.
//! - [`PivotOffsets`] are user-controlled additive corrections layered on top
//!   of a [`WalkPose`] at consumption time.

use crate::math::Vec2;
use crate::skeleton::{PartName, WalkJoint};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Vertical collar offset in head units
pub const COLLAR_OFFSET_Y: f64 = 0.4 * 0.15;

/// A static joint-angle pose
///
/// Rotations are local (relative to the parent part) and in degrees.
/// `offsets` are anchor translations in the parent's frame; they are never
/// part of the encoded string form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Vec2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub torso: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collar: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_shoulder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_forearm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_wrist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_shoulder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_forearm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_wrist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_thigh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_calf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r_ankle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_thigh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_calf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l_ankle: Option<f64>,
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    pub offsets: FxHashMap<PartName, Vec2>,
}

impl Pose {
    /// An empty (fully partial) pose
    pub fn new() -> Self {
        Self::default()
    }

    /// The neutral standing pose: every rotation zero, root at the origin,
    /// collar lifted by its rigging offset
    ///
    /// `unit` is the head unit the pose will be evaluated with.
    pub fn reset(unit: f64) -> Self {
        let mut pose = Self {
            root: Some(Vec2::ZERO),
            body_rotation: Some(0.0),
            ..Self::default()
        };
        for part in PartName::ALL {
            *pose.rotation_mut(part) = Some(0.0);
        }
        pose.offsets
            .insert(PartName::Collar, Vec2::new(0.0, COLLAR_OFFSET_Y * unit));
        pose
    }

    /// Local rotation of a part, if the pose specifies one
    pub fn rotation(&self, part: PartName) -> Option<f64> {
        match part {
            PartName::Waist => self.waist,
            PartName::Torso => self.torso,
            PartName::Collar => self.collar,
            PartName::Head => self.head,
            PartName::RShoulder => self.r_shoulder,
            PartName::RElbow => self.r_forearm,
            PartName::RWrist => self.r_wrist,
            PartName::LShoulder => self.l_shoulder,
            PartName::LElbow => self.l_forearm,
            PartName::LWrist => self.l_wrist,
            PartName::RThigh => self.r_thigh,
            PartName::RShin => self.r_calf,
            PartName::RAnkle => self.r_ankle,
            PartName::LThigh => self.l_thigh,
            PartName::LShin => self.l_calf,
            PartName::LAnkle => self.l_ankle,
        }
    }

    pub fn rotation_mut(&mut self, part: PartName) -> &mut Option<f64> {
        match part {
            PartName::Waist => &mut self.waist,
            PartName::Torso => &mut self.torso,
            PartName::Collar => &mut self.collar,
            PartName::Head => &mut self.head,
            PartName::RShoulder => &mut self.r_shoulder,
            PartName::RElbow => &mut self.r_forearm,
            PartName::RWrist => &mut self.r_wrist,
            PartName::LShoulder => &mut self.l_shoulder,
            PartName::LElbow => &mut self.l_forearm,
            PartName::LWrist => &mut self.l_wrist,
            PartName::RThigh => &mut self.r_thigh,
            PartName::RShin => &mut self.r_calf,
            PartName::RAnkle => &mut self.r_ankle,
            PartName::LThigh => &mut self.l_thigh,
            PartName::LShin => &mut self.l_calf,
            PartName::LAnkle => &mut self.l_ankle,
        }
    }

    /// Local rotation with missing values treated as zero
    pub fn total_rotation(&self, part: PartName) -> f64 {
        self.rotation(part).unwrap_or(0.0)
    }

    pub fn total_body_rotation(&self) -> f64 {
        self.body_rotation.unwrap_or(0.0)
    }

    pub fn root_or_origin(&self) -> Vec2 {
        self.root.unwrap_or(Vec2::ZERO)
    }

    /// Anchor offset of a part (zero when absent)
    pub fn offset(&self, part: PartName) -> Vec2 {
        self.offsets.get(&part).copied().unwrap_or(Vec2::ZERO)
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
            && self.body_rotation.is_none()
            && PartName::ALL.iter().all(|p| self.rotation(*p).is_none())
            && self.offsets.is_empty()
    }

    /// Overwrite every field that `partial` specifies, keeping the rest
    pub fn apply(&mut self, partial: &Pose) {
        if partial.root.is_some() {
            self.root = partial.root;
        }
        if partial.body_rotation.is_some() {
            self.body_rotation = partial.body_rotation;
        }
        for part in PartName::ALL {
            if let Some(value) = partial.rotation(part) {
                *self.rotation_mut(part) = Some(value);
            }
        }
        for (part, offset) in &partial.offsets {
            self.offsets.insert(*part, *offset);
        }
    }
}

/// One frame of the walking figure
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WalkPose {
    pub neck: f64,
    pub collar: f64,
    pub torso: f64,
    pub l_shoulder: f64,
    pub r_shoulder: f64,
    pub l_elbow: f64,
    pub r_elbow: f64,
    pub l_hand: f64,
    pub r_hand: f64,
    pub l_hip: f64,
    pub r_hip: f64,
    pub l_knee: f64,
    pub r_knee: f64,
    pub l_foot: f64,
    pub r_foot: f64,
    /// `sin` of the gait phase, in `[-1, 1]`
    pub stride_phase: f64,
    /// Downward body offset
    pub y_offset: f64,
}

impl WalkPose {
    /// Resting pose shown before the first simulated frame
    pub fn rest() -> Self {
        Self {
            l_shoulder: 15.0,
            r_shoulder: -15.0,
            ..Self::default()
        }
    }

    pub fn angle(&self, joint: WalkJoint) -> f64 {
        match joint {
            WalkJoint::Neck => self.neck,
            WalkJoint::Collar => self.collar,
            WalkJoint::Torso => self.torso,
            WalkJoint::LShoulder => self.l_shoulder,
            WalkJoint::RShoulder => self.r_shoulder,
            WalkJoint::LElbow => self.l_elbow,
            WalkJoint::RElbow => self.r_elbow,
            WalkJoint::LHand => self.l_hand,
            WalkJoint::RHand => self.r_hand,
            WalkJoint::LHip => self.l_hip,
            WalkJoint::RHip => self.r_hip,
            WalkJoint::LKnee => self.l_knee,
            WalkJoint::RKnee => self.r_knee,
            WalkJoint::LFoot => self.l_foot,
            WalkJoint::RFoot => self.r_foot,
        }
    }

    pub fn angle_mut(&mut self, joint: WalkJoint) -> &mut f64 {
        match joint {
            WalkJoint::Neck => &mut self.neck,
            WalkJoint::Collar => &mut self.collar,
            WalkJoint::Torso => &mut self.torso,
            WalkJoint::LShoulder => &mut self.l_shoulder,
            WalkJoint::RShoulder => &mut self.r_shoulder,
            WalkJoint::LElbow => &mut self.l_elbow,
            WalkJoint::RElbow => &mut self.r_elbow,
            WalkJoint::LHand => &mut self.l_hand,
            WalkJoint::RHand => &mut self.r_hand,
            WalkJoint::LHip => &mut self.l_hip,
            WalkJoint::RHip => &mut self.r_hip,
            WalkJoint::LKnee => &mut self.l_knee,
            WalkJoint::RKnee => &mut self.r_knee,
            WalkJoint::LFoot => &mut self.l_foot,
            WalkJoint::RFoot => &mut self.r_foot,
        }
    }

    /// Synthesized angle plus the user's pivot offset
    pub fn effective_angle(&self, joint: WalkJoint, offsets: &PivotOffsets) -> f64 {
        self.angle(joint) + offsets.get(joint) as f64
    }

    /// Rotation of a rig part; the waist is never rotated by the walk
    pub fn part_rotation(&self, part: PartName, offsets: &PivotOffsets) -> f64 {
        WalkJoint::for_part(part)
            .map(|joint| self.effective_angle(joint, offsets))
            .unwrap_or(0.0)
    }

    pub fn is_finite(&self) -> bool {
        WalkJoint::ALL.iter().all(|j| self.angle(*j).is_finite())
            && self.stride_phase.is_finite()
            && self.y_offset.is_finite()
    }
}

/// Whole-degree additive offsets per walk joint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PivotOffsets {
    pub neck: i32,
    pub collar: i32,
    pub torso: i32,
    pub l_shoulder: i32,
    pub r_shoulder: i32,
    pub l_elbow: i32,
    pub r_elbow: i32,
    pub l_hand: i32,
    pub r_hand: i32,
    pub l_hip: i32,
    pub r_hip: i32,
    pub l_knee: i32,
    pub r_knee: i32,
    pub l_foot: i32,
    pub r_foot: i32,
}

impl PivotOffsets {
    pub fn get(&self, joint: WalkJoint) -> i32 {
        match joint {
            WalkJoint::Neck => self.neck,
            WalkJoint::Collar => self.collar,
            WalkJoint::Torso => self.torso,
            WalkJoint::LShoulder => self.l_shoulder,
            WalkJoint::RShoulder => self.r_shoulder,
            WalkJoint::LElbow => self.l_elbow,
            WalkJoint::RElbow => self.r_elbow,
            WalkJoint::LHand => self.l_hand,
            WalkJoint::RHand => self.r_hand,
            WalkJoint::LHip => self.l_hip,
            WalkJoint::RHip => self.r_hip,
            WalkJoint::LKnee => self.l_knee,
            WalkJoint::RKnee => self.r_knee,
            WalkJoint::LFoot => self.l_foot,
            WalkJoint::RFoot => self.r_foot,
        }
    }

    pub fn set(&mut self, joint: WalkJoint, degrees: i32) {
        let slot = match joint {
            WalkJoint::Neck => &mut self.neck,
            WalkJoint::Collar => &mut self.collar,
            WalkJoint::Torso => &mut self.torso,
            WalkJoint::LShoulder => &mut self.l_shoulder,
            WalkJoint::RShoulder => &mut self.r_shoulder,
            WalkJoint::LElbow => &mut self.l_elbow,
            WalkJoint::RElbow => &mut self.r_elbow,
            WalkJoint::LHand => &mut self.l_hand,
            WalkJoint::RHand => &mut self.r_hand,
            WalkJoint::LHip => &mut self.l_hip,
            WalkJoint::RHip => &mut self.r_hip,
            WalkJoint::LKnee => &mut self.l_knee,
            WalkJoint::RKnee => &mut self.r_knee,
            WalkJoint::LFoot => &mut self.l_foot,
            WalkJoint::RFoot => &mut self.r_foot,
        };
        *slot = degrees;
    }

    /// Builder form of [`PivotOffsets::set`]
    pub fn with(mut self, joint: WalkJoint, degrees: i32) -> Self {
        self.set(joint, degrees);
        self
    }
}
