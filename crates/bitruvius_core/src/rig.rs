//! Rig descriptions
//!
//! A [`Rig`] gives every part of the skeleton a segment length, an anchor
//! offset in its parent's frame, and a drawing direction. Two layouts ship
//! with the crate:
//!
//! - [`Rig::mannequin`] for static pose editing, in absolute units
//! - [`Rig::walking`] for the walking figure, scaled by a head unit and
//!   per-piece [`Proportions`]

use crate::math::Vec2;
use crate::pose::COLLAR_OFFSET_Y;
use crate::skeleton::PartName;
use serde::{Deserialize, Serialize};

/// Body proportions in head units
pub mod anatomy {
    pub const HEAD: f64 = 1.0;
    pub const HEAD_NECK_GAP_OFFSET: f64 = 0.1;
    pub const COLLAR: f64 = 0.4;
    pub const COLLAR_WIDTH: f64 = 2.0 / 3.0;
    pub const TORSO: f64 = 1.2;
    pub const WAIST: f64 = 1.0;
    pub const WAIST_WIDTH: f64 = 0.85;
    pub const UPPER_ARM: f64 = 1.8;
    pub const LOWER_ARM: f64 = 1.4;
    pub const HAND: f64 = 0.8;
    pub const LEG_UPPER: f64 = 2.2;
    pub const LEG_LOWER: f64 = 1.8;
    pub const FOOT: f64 = 1.0;

    /// Horizontal shoulder attachment from the collar centre
    pub const SHOULDER_X_OFFSET: f64 = COLLAR_WIDTH / 2.1;
    /// Vertical shoulder attachment from the collar end
    pub const SHOULDER_Y_OFFSET: f64 = COLLAR;

    /// Floor height below the hip, ignoring proportions
    pub const LOCAL_FLOOR_Y: f64 = LEG_UPPER + LEG_LOWER + FOOT;
}

/// Unit the static mannequin rig is laid out in
pub const MANNEQUIN_UNIT: f64 = 100.0;

/// Mannequin segment lengths in pixels
///
/// Written out rather than derived from [`anatomy`] so they stay exact.
pub mod mannequin {
    pub const WAIST: f64 = 100.0;
    pub const TORSO: f64 = 120.0;
    pub const COLLAR: f64 = 40.0;
    pub const HEAD: f64 = 50.0;
    pub const NECK_GAP: f64 = 10.0;
    pub const SHOULDER_Y: f64 = 40.0;
    pub const UPPER_ARM: f64 = 180.0;
    pub const LOWER_ARM: f64 = 140.0;
    pub const HAND: f64 = 80.0;
    pub const LEG_UPPER: f64 = 220.0;
    pub const LEG_LOWER: f64 = 180.0;
    pub const FOOT: f64 = 100.0;
}

/// Width/height scale of one body piece
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub w: f64,
    pub h: f64,
}

impl Scale {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Per-piece scale factors for the walking figure
///
/// Only heights change the kinematics; widths are carried for renderers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proportions {
    pub head: Scale,
    pub collar: Scale,
    pub torso: Scale,
    pub pelvis: Scale,
    pub arms: Scale,
    pub hand: Scale,
    pub legs: Scale,
    pub foot: Scale,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            head: Scale::default(),
            collar: Scale::default(),
            torso: Scale::default(),
            pelvis: Scale::default(),
            arms: Scale::default(),
            hand: Scale::new(0.5, 1.0),
            legs: Scale::default(),
            foot: Scale::new(0.5, 1.0),
        }
    }
}

/// Geometry of a single bone
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneSpec {
    pub part: PartName,
    pub length: f64,
    /// Start offset from the parent's end, in the parent's frame
    pub anchor: Vec2,
    /// Spine bones extend toward -Y
    pub upward: bool,
}

impl BoneSpec {
    pub fn new(part: PartName, length: f64) -> Self {
        Self {
            part,
            length,
            anchor: Vec2::ZERO,
            upward: false,
        }
    }

    pub fn upward(mut self) -> Self {
        self.upward = true;
        self
    }

    pub fn anchored(mut self, x: f64, y: f64) -> Self {
        self.anchor = Vec2::new(x, y);
        self
    }

    /// Bone vector in the bone's own frame
    pub fn local_vector(&self) -> Vec2 {
        let dir = if self.upward { -1.0 } else { 1.0 };
        Vec2::new(0.0, self.length * dir)
    }
}

/// An ordered bone table, parents before children
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    bones: Vec<BoneSpec>,
}

impl Rig {
    /// Build a rig from any bone list; bones are reordered so every parent
    /// precedes its children
    pub fn new(mut bones: Vec<BoneSpec>) -> Self {
        bones.sort_by_key(|b| b.part.index());
        bones.dedup_by_key(|b| b.part);
        Self { bones }
    }

    /// Static pose-editing layout
    pub fn mannequin() -> Self {
        use mannequin::*;
        let shoulder_x = anatomy::SHOULDER_X_OFFSET * MANNEQUIN_UNIT;

        Self::new(vec![
            BoneSpec::new(PartName::Waist, WAIST).upward(),
            BoneSpec::new(PartName::Torso, TORSO).upward(),
            BoneSpec::new(PartName::Collar, COLLAR).upward(),
            BoneSpec::new(PartName::Head, HEAD).upward().anchored(0.0, -NECK_GAP),
            BoneSpec::new(PartName::RShoulder, UPPER_ARM).anchored(shoulder_x, SHOULDER_Y),
            BoneSpec::new(PartName::RElbow, LOWER_ARM),
            BoneSpec::new(PartName::RWrist, HAND),
            BoneSpec::new(PartName::LShoulder, UPPER_ARM).anchored(-shoulder_x, SHOULDER_Y),
            BoneSpec::new(PartName::LElbow, LOWER_ARM),
            BoneSpec::new(PartName::LWrist, HAND),
            BoneSpec::new(PartName::RThigh, LEG_UPPER),
            BoneSpec::new(PartName::RShin, LEG_LOWER),
            BoneSpec::new(PartName::RAnkle, FOOT),
            BoneSpec::new(PartName::LThigh, LEG_UPPER),
            BoneSpec::new(PartName::LShin, LEG_LOWER),
            BoneSpec::new(PartName::LAnkle, FOOT),
        ])
    }

    /// Walking-figure layout for head unit `unit`
    pub fn walking(unit: f64, props: &Proportions) -> Self {
        use anatomy::*;
        let h = unit;
        let shoulder_x = SHOULDER_X_OFFSET * h;
        let shoulder_y = SHOULDER_Y_OFFSET * h;
        let hip_x = WAIST_WIDTH * 0.4 * h;
        let hip_y = WAIST * h * 0.2;

        Self::new(vec![
            BoneSpec::new(PartName::Waist, WAIST * h * props.pelvis.h).upward(),
            BoneSpec::new(PartName::Torso, TORSO * h * props.torso.h).upward(),
            BoneSpec::new(PartName::Collar, COLLAR * h * props.collar.h)
                .upward()
                .anchored(0.0, COLLAR_OFFSET_Y * h),
            BoneSpec::new(PartName::Head, HEAD * h * props.head.h)
                .upward()
                .anchored(0.0, -HEAD_NECK_GAP_OFFSET * h),
            BoneSpec::new(PartName::RShoulder, UPPER_ARM * h * props.arms.h)
                .anchored(shoulder_x, shoulder_y),
            BoneSpec::new(PartName::RElbow, LOWER_ARM * h * props.arms.h),
            BoneSpec::new(PartName::RWrist, HAND * h * props.hand.h),
            BoneSpec::new(PartName::LShoulder, UPPER_ARM * h * props.arms.h)
                .anchored(-shoulder_x, shoulder_y),
            BoneSpec::new(PartName::LElbow, LOWER_ARM * h * props.arms.h),
            BoneSpec::new(PartName::LWrist, HAND * h * props.hand.h),
            BoneSpec::new(PartName::RThigh, LEG_UPPER * h * props.legs.h).anchored(hip_x, hip_y),
            BoneSpec::new(PartName::RShin, LEG_LOWER * h * props.legs.h),
            BoneSpec::new(PartName::RAnkle, FOOT * h * props.foot.h),
            BoneSpec::new(PartName::LThigh, LEG_UPPER * h * props.legs.h).anchored(-hip_x, hip_y),
            BoneSpec::new(PartName::LShin, LEG_LOWER * h * props.legs.h),
            BoneSpec::new(PartName::LAnkle, FOOT * h * props.foot.h),
        ])
    }

    /// Root position that stands the walking figure on `floor_y`
    pub fn walking_root(unit: f64, floor_y: f64, y_offset: f64) -> Vec2 {
        Vec2::new(0.0, floor_y - anatomy::LOCAL_FLOOR_Y * unit + y_offset)
    }

    pub fn bones(&self) -> &[BoneSpec] {
        &self.bones
    }

    pub fn bone(&self, part: PartName) -> Option<&BoneSpec> {
        self.bones.iter().find(|b| b.part == part)
    }

    pub fn length(&self, part: PartName) -> f64 {
        self.bone(part).map(|b| b.length).unwrap_or(0.0)
    }

    /// Copy of this rig with every anchor cleared
    pub fn without_anchors(&self) -> Self {
        Self {
            bones: self
                .bones
                .iter()
                .map(|b| BoneSpec {
                    anchor: Vec2::ZERO,
                    ..*b
                })
                .collect(),
        }
    }
}

impl Default for Rig {
    fn default() -> Self {
        Self::mannequin()
    }
}
