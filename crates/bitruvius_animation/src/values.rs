//! Interpolatable pose values
//!
//! Used to tween between library poses and to blend walk frames.

use bitruvius_core::{
    lerp, lerp_angle_shortest_path, shortest_angle_diff, PartName, Pose, Vec2, WalkJoint, WalkPose,
};

/// Trait for values that can be interpolated
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f64) -> Self;

    /// Check if two values are approximately equal
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl Interpolate for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        lerp(*self, *other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self - other).abs() < epsilon
    }
}

impl Interpolate for Vec2 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        Vec2::new(lerp(self.x, other.x, t), lerp(self.y, other.y, t))
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

/// Walk frames blend joint by joint without wrapping
impl Interpolate for WalkPose {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut out = *self;
        for joint in WalkJoint::ALL {
            *out.angle_mut(joint) = lerp(self.angle(joint), other.angle(joint), t);
        }
        out.stride_phase = lerp(self.stride_phase, other.stride_phase, t);
        out.y_offset = lerp(self.y_offset, other.y_offset, t);
        out
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        WalkJoint::ALL
            .iter()
            .all(|j| self.angle(*j).approx_eq(&other.angle(*j), epsilon))
            && self.stride_phase.approx_eq(&other.stride_phase, epsilon)
            && self.y_offset.approx_eq(&other.y_offset, epsilon)
    }
}

fn lerp_optional<T: Copy>(a: Option<T>, b: Option<T>, f: impl Fn(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(f(a, b)),
        (a, b) => a.or(b),
    }
}

/// Static poses turn along the shorter arc; a field or anchor offset
/// present on only one side is held
impl Interpolate for Pose {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let mut out = Pose {
            root: lerp_optional(self.root, other.root, |a, b| a.lerp(&b, t)),
            body_rotation: lerp_optional(self.body_rotation, other.body_rotation, |a, b| {
                lerp_angle_shortest_path(a, b, t)
            }),
            offsets: self.offsets.clone(),
            ..Pose::default()
        };
        for part in PartName::ALL {
            let (a, b) = (self.rotation(part), other.rotation(part));
            *out.rotation_mut(part) = lerp_optional(a, b, |a, b| lerp_angle_shortest_path(a, b, t));
        }
        for (part, offset) in &other.offsets {
            let blended = match self.offsets.get(part) {
                Some(from) => from.lerp(offset, t),
                None => *offset,
            };
            out.offsets.insert(*part, blended);
        }
        out
    }

    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        let angle_eq = |a: Option<f64>, b: Option<f64>| match (a, b) {
            (Some(a), Some(b)) => shortest_angle_diff(a, b).abs() < epsilon,
            (None, None) => true,
            _ => false,
        };
        let root_eq = match (self.root, other.root) {
            (Some(a), Some(b)) => a.approx_eq(&b, epsilon),
            (None, None) => true,
            _ => false,
        };
        root_eq
            && angle_eq(self.body_rotation, other.body_rotation)
            && PartName::ALL
                .iter()
                .all(|p| angle_eq(self.rotation(*p), other.rotation(*p)))
    }
}

/// Evenly spaced in-betweens from `from` to `to`, both ends included
pub fn tween<T: Interpolate>(from: &T, to: &T, steps: usize) -> Vec<T> {
    if steps < 2 {
        return vec![to.clone()];
    }
    (0..steps)
        .map(|i| from.lerp(to, i as f64 / (steps - 1) as f64))
        .collect()
}
