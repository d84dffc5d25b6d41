use bitruvius_animation::{synthesize, GaitParameters, HeadSpring};
use bitruvius_core::{PivotOffsets, Proportions, Rig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_synthesize(c: &mut Criterion) {
    let gait = GaitParameters::default();
    c.bench_function("synthesize", |b| {
        let mut spring = HeadSpring::default();
        let mut t = 0.0;
        b.iter(|| {
            t += 16.0;
            let (pose, next) = synthesize(black_box(t), &gait, true, spring);
            spring = next;
            pose
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let gait = GaitParameters::default();
    let rig = Rig::walking(150.0, &Proportions::default());
    let offsets = PivotOffsets::default();
    c.bench_function("synthesize + evaluate_walk", |b| {
        let mut spring = HeadSpring::default();
        let mut t = 0.0;
        b.iter(|| {
            t += 16.0;
            let (pose, next) = synthesize(black_box(t), &gait, true, spring);
            spring = next;
            let root = Rig::walking_root(150.0, 500.0, pose.y_offset);
            rig.evaluate_walk(root, &pose, &offsets)
        })
    });
}

criterion_group!(benches, bench_synthesize, bench_frame);
criterion_main!(benches);
