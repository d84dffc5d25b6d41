//! Left/right reflection of poses
//!
//! Reflecting across the figure's vertical axis negates the root's x and the
//! body rotation, and swaps each left part with its right counterpart while
//! negating both. Spine rotations are copied as they are.

use crate::codec::{decode, encode};
use crate::library::PoseLibraryEntry;
use bitruvius_core::{PartName, Pose, Vec2};

/// Source tag carried by derived entries
pub const MIRROR_SOURCE: &str = "Bitruvius Generated";

/// Reflect a decoded pose
pub fn mirror_pose(pose: &Pose) -> Pose {
    let mut out = Pose {
        root: pose.root.map(|r| Vec2::new(-r.x, r.y)),
        body_rotation: pose.body_rotation.map(|v| -v),
        ..Pose::default()
    };

    for part in PartName::ALL {
        let source = part.mirrored();
        *out.rotation_mut(part) = match part.side() {
            Some(_) => pose.rotation(source).map(|v| -v),
            None => pose.rotation(part),
        };
    }

    for (part, offset) in &pose.offsets {
        out.offsets
            .insert(part.mirrored(), Vec2::new(-offset.x, offset.y));
    }

    out
}

/// Reflect an encoded pose
pub fn mirror(encoded: &str) -> String {
    encode(&mirror_pose(&decode(encoded)))
}

/// Derived right-hand entry for a library pose
pub fn mirror_entry(entry: &PoseLibraryEntry) -> PoseLibraryEntry {
    PoseLibraryEntry {
        id: format!("{}_R", entry.id),
        category: entry.category.clone(),
        name: format!("RIGHT {}", entry.name),
        source: MIRROR_SOURCE.to_string(),
        data: mirror(&entry.data),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_swaps_and_negates_limbs() {
        let source = "r:-67.04,95.43;br:12;t:180.51;h:-184.08;rs:-252.19;re:71.74;ls:-108.15;le:285.89";
        let mirrored = decode(&mirror(source));
        assert_eq!(mirrored.root, Some(Vec2::new(67.04, 95.43)));
        assert_eq!(mirrored.body_rotation, Some(-12.0));
        assert_eq!(mirrored.torso, Some(180.51));
        assert_eq!(mirrored.head, Some(-184.08));
        assert_eq!(mirrored.r_shoulder, Some(108.15));
        assert_eq!(mirrored.r_forearm, Some(-285.89));
        assert_eq!(mirrored.l_shoulder, Some(252.19));
        assert_eq!(mirrored.l_forearm, Some(-71.74));
    }

    #[test]
    fn test_one_sided_values_move_sides() {
        let mirrored = decode(&mirror("la:90"));
        assert_eq!(mirrored.r_ankle, Some(-90.0));
        assert_eq!(mirrored.l_ankle, None);
        assert_eq!(mirrored.root, None);
        assert_eq!(mirrored.body_rotation, None);
    }

    #[test]
    fn test_mirror_output_is_canonical() {
        assert_eq!(mirror("lw:0;rw:5;w:3"), "w:3;rw:0;lw:-5");
        assert_eq!(mirror(""), "");
    }

    #[test]
    fn test_mirror_offsets() {
        let mut pose = Pose::new();
        pose.offsets.insert(PartName::LShoulder, Vec2::new(-20.0, 4.0));
        let mirrored = mirror_pose(&pose);
        assert_eq!(mirrored.offset(PartName::RShoulder), Vec2::new(20.0, 4.0));
        assert_eq!(mirrored.offset(PartName::LShoulder), Vec2::ZERO);
    }

    #[test]
    fn test_entry_metadata() {
        let entry = PoseLibraryEntry {
            id: "A06".into(),
            category: "Action".into(),
            name: "Shield".into(),
            source: "Manual".into(),
            data: "rs:10".into(),
        };
        let derived = mirror_entry(&entry);
        assert_eq!(derived.id, "A06_R");
        assert_eq!(derived.name, "RIGHT Shield");
        assert_eq!(derived.category, "Action");
        assert_eq!(derived.source, MIRROR_SOURCE);
        assert_eq!(derived.data, "ls:-10");
    }
}
