//! Skeleton topology
//!
//! The figure is a fixed tree: a spine (waist → torso → collar → head), two
//! arm chains hanging off the collar, and two leg chains attached straight
//! to the body root. Nothing here is mutable; the tables are consts.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Body side of a bilateral joint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A rigid part of the static-pose skeleton
///
/// Each part is both a joint (its pivot) and the bone that extends from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartName {
    Waist,
    Torso,
    Collar,
    Head,
    RShoulder,
    RElbow,
    RWrist,
    LShoulder,
    LElbow,
    LWrist,
    RThigh,
    RShin,
    RAnkle,
    LThigh,
    LShin,
    LAnkle,
}

impl PartName {
    /// Every part, parents always listed before their children
    pub const ALL: [PartName; 16] = [
        PartName::Waist,
        PartName::Torso,
        PartName::Collar,
        PartName::Head,
        PartName::RShoulder,
        PartName::RElbow,
        PartName::RWrist,
        PartName::LShoulder,
        PartName::LElbow,
        PartName::LWrist,
        PartName::RThigh,
        PartName::RShin,
        PartName::RAnkle,
        PartName::LThigh,
        PartName::LShin,
        PartName::LAnkle,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartName::Waist => "waist",
            PartName::Torso => "torso",
            PartName::Collar => "collar",
            PartName::Head => "head",
            PartName::RShoulder => "rShoulder",
            PartName::RElbow => "rElbow",
            PartName::RWrist => "rWrist",
            PartName::LShoulder => "lShoulder",
            PartName::LElbow => "lElbow",
            PartName::LWrist => "lWrist",
            PartName::RThigh => "rThigh",
            PartName::RShin => "rShin",
            PartName::RAnkle => "rAnkle",
            PartName::LThigh => "lThigh",
            PartName::LShin => "lShin",
            PartName::LAnkle => "lAnkle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Parent part, `None` for parts attached to the body root
    pub fn parent(self) -> Option<PartName> {
        match self {
            PartName::Waist | PartName::RThigh | PartName::LThigh => None,
            PartName::Torso => Some(PartName::Waist),
            PartName::Collar => Some(PartName::Torso),
            PartName::Head | PartName::RShoulder | PartName::LShoulder => Some(PartName::Collar),
            PartName::RElbow => Some(PartName::RShoulder),
            PartName::LElbow => Some(PartName::LShoulder),
            PartName::RWrist => Some(PartName::RElbow),
            PartName::LWrist => Some(PartName::LElbow),
            PartName::RShin => Some(PartName::RThigh),
            PartName::LShin => Some(PartName::LThigh),
            PartName::RAnkle => Some(PartName::RShin),
            PartName::LAnkle => Some(PartName::LShin),
        }
    }

    pub fn is_root(self) -> bool {
        self.parent().is_none()
    }

    /// Direct children in `ALL` order
    pub fn children(self) -> SmallVec<[PartName; 4]> {
        Self::ALL
            .into_iter()
            .filter(|p| p.parent() == Some(self))
            .collect()
    }

    /// Ancestors from the direct parent up to the root
    pub fn ancestors(self) -> SmallVec<[PartName; 4]> {
        let mut out = SmallVec::new();
        let mut cursor = self.parent();
        while let Some(part) = cursor {
            out.push(part);
            cursor = part.parent();
        }
        out
    }

    /// `None` for spine parts
    pub fn side(self) -> Option<Side> {
        match self {
            PartName::Waist | PartName::Torso | PartName::Collar | PartName::Head => None,
            PartName::RShoulder
            | PartName::RElbow
            | PartName::RWrist
            | PartName::RThigh
            | PartName::RShin
            | PartName::RAnkle => Some(Side::Right),
            _ => Some(Side::Left),
        }
    }

    /// The same part on the other side of the body; spine parts map to themselves
    pub fn mirrored(self) -> Self {
        match self {
            PartName::RShoulder => PartName::LShoulder,
            PartName::RElbow => PartName::LElbow,
            PartName::RWrist => PartName::LWrist,
            PartName::RThigh => PartName::LThigh,
            PartName::RShin => PartName::LShin,
            PartName::RAnkle => PartName::LAnkle,
            PartName::LShoulder => PartName::RShoulder,
            PartName::LElbow => PartName::RElbow,
            PartName::LWrist => PartName::RWrist,
            PartName::LThigh => PartName::RThigh,
            PartName::LShin => PartName::RShin,
            PartName::LAnkle => PartName::RAnkle,
            spine => spine,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named limb chains, ordered from the attachment point outward
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Limb {
    RArm,
    LArm,
    RLeg,
    LLeg,
}

impl Limb {
    pub const ALL: [Limb; 4] = [Limb::RArm, Limb::LArm, Limb::RLeg, Limb::LLeg];

    pub fn sequence(self) -> [PartName; 3] {
        match self {
            Limb::RArm => [PartName::RShoulder, PartName::RElbow, PartName::RWrist],
            Limb::LArm => [PartName::LShoulder, PartName::LElbow, PartName::LWrist],
            Limb::RLeg => [PartName::RThigh, PartName::RShin, PartName::RAnkle],
            Limb::LLeg => [PartName::LThigh, PartName::LShin, PartName::LAnkle],
        }
    }

    pub fn side(self) -> Side {
        match self {
            Limb::RArm | Limb::RLeg => Side::Right,
            Limb::LArm | Limb::LLeg => Side::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Limb::RArm => "rArm",
            Limb::LArm => "lArm",
            Limb::RLeg => "rLeg",
            Limb::LLeg => "lLeg",
        }
    }
}

/// Joints driven by the gait synthesizer
///
/// The walking figure reuses the part tree; each walk joint rotates one part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkJoint {
    Neck,
    Collar,
    Torso,
    LShoulder,
    RShoulder,
    LElbow,
    RElbow,
    LHand,
    RHand,
    LHip,
    RHip,
    LKnee,
    RKnee,
    LFoot,
    RFoot,
}

impl WalkJoint {
    pub const ALL: [WalkJoint; 15] = [
        WalkJoint::Neck,
        WalkJoint::Collar,
        WalkJoint::Torso,
        WalkJoint::LShoulder,
        WalkJoint::RShoulder,
        WalkJoint::LElbow,
        WalkJoint::RElbow,
        WalkJoint::LHand,
        WalkJoint::RHand,
        WalkJoint::LHip,
        WalkJoint::RHip,
        WalkJoint::LKnee,
        WalkJoint::RKnee,
        WalkJoint::LFoot,
        WalkJoint::RFoot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WalkJoint::Neck => "neck",
            WalkJoint::Collar => "collar",
            WalkJoint::Torso => "torso",
            WalkJoint::LShoulder => "l_shoulder",
            WalkJoint::RShoulder => "r_shoulder",
            WalkJoint::LElbow => "l_elbow",
            WalkJoint::RElbow => "r_elbow",
            WalkJoint::LHand => "l_hand",
            WalkJoint::RHand => "r_hand",
            WalkJoint::LHip => "l_hip",
            WalkJoint::RHip => "r_hip",
            WalkJoint::LKnee => "l_knee",
            WalkJoint::RKnee => "r_knee",
            WalkJoint::LFoot => "l_foot",
            WalkJoint::RFoot => "r_foot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.as_str() == name)
    }

    /// The part this joint rotates
    pub fn part(self) -> PartName {
        match self {
            WalkJoint::Neck => PartName::Head,
            WalkJoint::Collar => PartName::Collar,
            WalkJoint::Torso => PartName::Torso,
            WalkJoint::LShoulder => PartName::LShoulder,
            WalkJoint::RShoulder => PartName::RShoulder,
            WalkJoint::LElbow => PartName::LElbow,
            WalkJoint::RElbow => PartName::RElbow,
            WalkJoint::LHand => PartName::LWrist,
            WalkJoint::RHand => PartName::RWrist,
            WalkJoint::LHip => PartName::LThigh,
            WalkJoint::RHip => PartName::RThigh,
            WalkJoint::LKnee => PartName::LShin,
            WalkJoint::RKnee => PartName::RShin,
            WalkJoint::LFoot => PartName::LAnkle,
            WalkJoint::RFoot => PartName::RAnkle,
        }
    }

    /// Inverse of [`WalkJoint::part`]; the waist has no walk joint
    pub fn for_part(part: PartName) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.part() == part)
    }
}

impl fmt::Display for WalkJoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
