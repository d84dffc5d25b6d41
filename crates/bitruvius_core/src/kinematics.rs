//! Forward kinematics
//!
//! Resolves local part rotations into global bone frames by walking a
//! [`Rig`]'s bone table in order. Every bone follows the same rule:
//!
//! ```text
//! start = parent.end + rotate(anchor + offset, parent.angle)
//! angle = parent.angle + local
//! end   = start + rotate((0, ±length), angle)
//! ```
//!
//! Parts without a parent inherit the root anchor and the body rotation.

use crate::math::{rotate_vec, Vec2};
use crate::pose::{PivotOffsets, Pose, WalkPose};
use crate::rig::Rig;
use crate::skeleton::PartName;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Global frame of one bone
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JointFrame {
    /// Pivot position
    pub start: Vec2,
    /// Far end of the bone
    pub end: Vec2,
    /// Global orientation in degrees
    pub angle: f64,
}

/// A point on the figure that can be held still while the body rotates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    Root,
    Part(PartName),
    HeadTip,
    LHandTip,
    RHandTip,
    LFootTip,
    RFootTip,
}

impl Anchor {
    pub const TIPS: [Anchor; 5] = [
        Anchor::HeadTip,
        Anchor::LHandTip,
        Anchor::RHandTip,
        Anchor::LFootTip,
        Anchor::RFootTip,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "root" => Some(Anchor::Root),
            "headTip" => Some(Anchor::HeadTip),
            "lHandTip" => Some(Anchor::LHandTip),
            "rHandTip" => Some(Anchor::RHandTip),
            "lFootTip" => Some(Anchor::LFootTip),
            "rFootTip" => Some(Anchor::RFootTip),
            other => PartName::from_name(other).map(Anchor::Part),
        }
    }

    /// Root and waist already sit on the rotation centre
    pub fn needs_compensation(self) -> bool {
        !matches!(self, Anchor::Root | Anchor::Part(PartName::Waist))
    }

    /// Terminal part whose bone end is this tip
    fn tip_part(self) -> Option<PartName> {
        match self {
            Anchor::HeadTip => Some(PartName::Head),
            Anchor::LHandTip => Some(PartName::LWrist),
            Anchor::RHandTip => Some(PartName::RWrist),
            Anchor::LFootTip => Some(PartName::LAnkle),
            Anchor::RFootTip => Some(PartName::RAnkle),
            Anchor::Root | Anchor::Part(_) => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Root => f.write_str("root"),
            Anchor::Part(part) => f.write_str(part.as_str()),
            Anchor::HeadTip => f.write_str("headTip"),
            Anchor::LHandTip => f.write_str("lHandTip"),
            Anchor::RHandTip => f.write_str("rHandTip"),
            Anchor::LFootTip => f.write_str("lFootTip"),
            Anchor::RFootTip => f.write_str("rFootTip"),
        }
    }
}

/// Evaluated skeleton: one frame per part plus the root it hangs from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JointPositions {
    pub root: Vec2,
    pub body_rotation: f64,
    frames: FxHashMap<PartName, JointFrame>,
}

impl JointPositions {
    pub fn frame(&self, part: PartName) -> Option<&JointFrame> {
        self.frames.get(&part)
    }

    /// Pivot position of a part
    pub fn position(&self, part: PartName) -> Vec2 {
        self.frames.get(&part).map(|f| f.start).unwrap_or(self.root)
    }

    /// Global orientation of a part
    pub fn angle(&self, part: PartName) -> f64 {
        self.frames
            .get(&part)
            .map(|f| f.angle)
            .unwrap_or(self.body_rotation)
    }

    /// Position of any anchor, tips included
    pub fn anchor(&self, anchor: Anchor) -> Vec2 {
        match anchor {
            Anchor::Root => self.root,
            Anchor::Part(part) => self.position(part),
            tip => tip
                .tip_part()
                .and_then(|part| self.frames.get(&part))
                .map(|f| f.end)
                .unwrap_or(self.root),
        }
    }

    pub fn tips(&self) -> [(Anchor, Vec2); 5] {
        Anchor::TIPS.map(|tip| (tip, self.anchor(tip)))
    }

    /// Frames in rig order
    pub fn iter(&self) -> impl Iterator<Item = (PartName, &JointFrame)> {
        PartName::ALL
            .into_iter()
            .filter_map(move |part| self.frames.get(&part).map(|f| (part, f)))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Rig {
    /// Core evaluation over arbitrary rotation and offset sources
    pub fn evaluate<R, O>(
        &self,
        root: Vec2,
        body_rotation: f64,
        rotation: R,
        offset: O,
    ) -> JointPositions
    where
        R: Fn(PartName) -> f64,
        O: Fn(PartName) -> Vec2,
    {
        let mut frames: FxHashMap<PartName, JointFrame> = FxHashMap::default();
        frames.reserve(self.bones().len());

        for bone in self.bones() {
            let (origin, inherited) = match bone.part.parent().and_then(|p| frames.get(&p)) {
                Some(parent) => (parent.end, parent.angle),
                None => (root, body_rotation),
            };

            let local_anchor = bone.anchor + offset(bone.part);
            let start = origin + local_anchor.rotated(inherited);
            let angle = inherited + rotation(bone.part);
            let v = bone.local_vector();
            let end = start + rotate_vec(v.x, v.y, angle);

            frames.insert(bone.part, JointFrame { start, end, angle });
        }

        JointPositions {
            root,
            body_rotation,
            frames,
        }
    }

    /// Evaluate a static pose at its own root and body rotation
    pub fn evaluate_pose(&self, pose: &Pose) -> JointPositions {
        self.evaluate_pose_at(pose, pose.root_or_origin(), pose.total_body_rotation())
    }

    fn evaluate_pose_at(&self, pose: &Pose, root: Vec2, body_rotation: f64) -> JointPositions {
        self.evaluate(
            root,
            body_rotation,
            |part| pose.total_rotation(part),
            |part| pose.offset(part),
        )
    }

    /// Evaluate a static pose, holding `pin` where it would be at zero body
    /// rotation
    pub fn evaluate_pinned(&self, pose: &Pose, pin: Anchor) -> JointPositions {
        let root = pose.root_or_origin();
        let theta = pose.total_body_rotation();

        if !pin.needs_compensation() {
            return self.evaluate_pose_at(pose, root, theta);
        }

        let target = self.evaluate_pose_at(pose, root, 0.0).anchor(pin);
        let displaced = self.evaluate_pose_at(pose, root, theta).anchor(pin);
        let compensated = root + (target - displaced);

        tracing::trace!(
            "pin {} at ({:.2}, {:.2}), root shifted by ({:.2}, {:.2})",
            pin,
            target.x,
            target.y,
            compensated.x - root.x,
            compensated.y - root.y
        );

        self.evaluate_pose_at(pose, compensated, theta)
    }

    /// Evaluate one synthesized walk frame with the user's pivot offsets
    pub fn evaluate_walk(
        &self,
        root: Vec2,
        pose: &WalkPose,
        offsets: &PivotOffsets,
    ) -> JointPositions {
        self.evaluate(root, 0.0, |part| pose.part_rotation(part, offsets), |_| Vec2::ZERO)
    }
}

/// Global angles of every part, without computing positions
pub fn part_global_angles(pose: &Pose) -> FxHashMap<PartName, f64> {
    let mut angles: FxHashMap<PartName, f64> = FxHashMap::default();
    let body = pose.total_body_rotation();
    for part in PartName::ALL {
        let inherited = part
            .parent()
            .and_then(|p| angles.get(&p).copied())
            .unwrap_or(body);
        angles.insert(part, inherited + pose.total_rotation(part));
    }
    angles
}

/// [`Rig::evaluate_pinned`] on the static mannequin rig
pub fn joint_positions(pose: &Pose, pin: Anchor) -> JointPositions {
    Rig::mannequin().evaluate_pinned(pose, pin)
}
