//! Whole-figure checks across both rigs

use approx::assert_abs_diff_eq;
use bitruvius_core::{
    anatomy, Anchor, PartName, PivotOffsets, Pose, Proportions, Rig, Vec2, WalkPose,
};

fn limb_pose() -> Pose {
    let mut pose = Pose::reset(0.0);
    pose.root = Some(Vec2::new(25.0, 400.0));
    pose.r_shoulder = Some(40.0);
    pose.r_forearm = Some(-75.0);
    pose.r_wrist = Some(10.0);
    pose.l_shoulder = Some(-120.0);
    pose.r_thigh = Some(-35.0);
    pose.r_calf = Some(80.0);
    pose.l_thigh = Some(15.0);
    pose.l_ankle = Some(90.0);
    pose
}

/// Reflect a pose with a still spine across the vertical through x = 0
fn reflect(pose: &Pose) -> Pose {
    let mut out = pose.clone();
    out.root = pose.root.map(|r| Vec2::new(-r.x, r.y));
    out.body_rotation = pose.body_rotation.map(|v| -v);
    for part in PartName::ALL {
        if part.side().is_some() {
            *out.rotation_mut(part.mirrored()) = pose.rotation(part).map(|v| -v);
        }
    }
    out
}

#[test]
fn mannequin_is_left_right_symmetric() {
    let rig = Rig::mannequin();
    let pose = limb_pose();
    let joints = rig.evaluate_pose(&pose);
    let mirrored = rig.evaluate_pose(&reflect(&pose));

    for part in PartName::ALL {
        let a = joints.position(part);
        let b = mirrored.position(part.mirrored());
        assert_abs_diff_eq!(a.x, -b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }
}

#[test]
fn walking_rig_rest_pose_hangs_from_floor_root() {
    let unit = 150.0;
    let floor_y = 900.0;
    let rig = Rig::walking(unit, &Proportions::default());
    let root = Rig::walking_root(unit, floor_y, 0.0);
    let joints = rig.evaluate_walk(root, &WalkPose::default(), &PivotOffsets::default());

    // hips sit a fifth of a unit below the root, feet a full leg further down
    let foot = joints.anchor(Anchor::LFootTip);
    let leg = (anatomy::LEG_UPPER + anatomy::LEG_LOWER + anatomy::FOOT) * unit;
    assert_abs_diff_eq!(foot.y, root.y + 0.2 * unit + leg, epsilon = 1e-9);
    assert_abs_diff_eq!(
        joints.anchor(Anchor::LFootTip).y,
        joints.anchor(Anchor::RFootTip).y,
        epsilon = 1e-9
    );

    // collar pivot sits its rigging offset below the torso end
    let torso_end = joints.frame(PartName::Torso).unwrap().end;
    let collar = joints.position(PartName::Collar);
    assert_abs_diff_eq!(collar.y - torso_end.y, 0.06 * unit, epsilon = 1e-9);
}

#[test]
fn walking_rig_follows_bounce_offset() {
    let rig = Rig::walking(100.0, &Proportions::default());
    let pose = WalkPose {
        y_offset: 17.5,
        ..WalkPose::default()
    };
    let offsets = PivotOffsets::default();
    let low = rig.evaluate_walk(Rig::walking_root(100.0, 600.0, pose.y_offset), &pose, &offsets);
    let high = rig.evaluate_walk(Rig::walking_root(100.0, 600.0, 0.0), &pose, &offsets);
    for part in PartName::ALL {
        assert_abs_diff_eq!(
            low.position(part).y - high.position(part).y,
            17.5,
            epsilon = 1e-9
        );
    }
}

#[test]
fn pinned_hand_survives_library_scale_rotation() {
    let rig = Rig::mannequin();
    let mut pose = limb_pose();
    let rest = rig.evaluate_pose(&pose).anchor(Anchor::RHandTip);
    for theta in [-180.0, -90.0, -1.0, 45.0, 179.0, 180.0] {
        pose.body_rotation = Some(theta);
        let hand = rig.evaluate_pinned(&pose, Anchor::RHandTip).anchor(Anchor::RHandTip);
        assert_abs_diff_eq!(hand.x, rest.x, epsilon = 1e-6);
        assert_abs_diff_eq!(hand.y, rest.y, epsilon = 1e-6);
    }
}
