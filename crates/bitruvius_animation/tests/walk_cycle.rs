//! A full walk cycle driven through the scheduler and the walking rig

use approx::assert_abs_diff_eq;
use bitruvius_animation::{time_for_phase, GaitParameters, Walker, WalkerScheduler};
use bitruvius_core::{Anchor, PartName, PivotOffsets, Proportions, Rig, WalkJoint};
use std::f64::consts::TAU;

#[test]
fn one_cycle_repeats() {
    let gait = GaitParameters::default();
    let period = time_for_phase(TAU, gait.frequency);

    let mut a = Walker::new(gait);
    let mut b = Walker::new(gait);
    a.step(250.0);
    b.step(250.0 + period);

    for joint in WalkJoint::ALL {
        assert_abs_diff_eq!(a.pose().angle(joint), b.pose().angle(joint), epsilon = 1e-6);
    }
}

#[test]
fn feet_alternate_through_a_cycle() {
    let gait = GaitParameters::default();
    let rig = Rig::walking(150.0, &Proportions::default());
    let mut scheduler = WalkerScheduler::new();
    let id = scheduler.add(Walker::new(gait));

    let mut left_ahead = 0;
    let mut right_ahead = 0;
    for _ in 0..120 {
        scheduler.step();
        let pose = *scheduler.pose(id).unwrap();
        assert!(pose.is_finite());

        let root = Rig::walking_root(150.0, 500.0, pose.y_offset);
        let joints = rig.evaluate_walk(root, &pose, &PivotOffsets::default());
        let l = joints.anchor(Anchor::LFootTip);
        let r = joints.anchor(Anchor::RFootTip);
        if l.x < r.x {
            left_ahead += 1;
        } else {
            right_ahead += 1;
        }
        // the bounce only ever lowers the body
        assert!(pose.y_offset > 0.0);
        assert_eq!(joints.position(PartName::Waist), root);
    }
    assert!(left_ahead > 0 && right_ahead > 0);
}

#[test]
fn pivot_offsets_shift_the_rendered_figure_only() {
    let gait = GaitParameters::default();
    let offsets = PivotOffsets::default().with(WalkJoint::Neck, 30);
    let mut plain = Walker::new(gait);
    let mut offset = Walker::new(gait).with_pivot_offsets(offsets);
    plain.step(400.0);
    offset.step(400.0);

    // the synthesized pose ignores offsets; evaluation applies them
    assert_eq!(plain.pose(), offset.pose());

    let rig = Rig::walking(100.0, &Proportions::default());
    let root = Rig::walking_root(100.0, 500.0, 0.0);
    let a = rig.evaluate_walk(root, plain.pose(), &plain.pivot_offsets);
    let b = rig.evaluate_walk(root, offset.pose(), &offset.pivot_offsets);
    assert_abs_diff_eq!(
        b.angle(PartName::Head) - a.angle(PartName::Head),
        30.0,
        epsilon = 1e-9
    );
}
