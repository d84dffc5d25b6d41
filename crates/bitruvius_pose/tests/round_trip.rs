//! Codec and mirror properties over random and catalog poses

use bitruvius_core::{PartName, Pose, Vec2};
use bitruvius_pose::{decode, encode, load_library_json, mirror, PoseLibrary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_close(a: Option<f64>, b: Option<f64>, what: &str) {
    match (a, b) {
        (Some(a), Some(b)) => assert!((a - b).abs() <= 0.01, "{}: {} vs {}", what, a, b),
        (None, None) => {}
        _ => panic!("{}: presence differs ({:?} vs {:?})", what, a, b),
    }
}

fn assert_poses_close(a: &Pose, b: &Pose) {
    assert_close(a.root.map(|r| r.x), b.root.map(|r| r.x), "root.x");
    assert_close(a.root.map(|r| r.y), b.root.map(|r| r.y), "root.y");
    assert_close(a.body_rotation, b.body_rotation, "bodyRotation");
    for part in PartName::ALL {
        assert_close(a.rotation(part), b.rotation(part), part.as_str());
    }
}

fn random_pose(rng: &mut StdRng) -> Pose {
    let mut pose = Pose::new();
    if rng.gen_bool(0.8) {
        pose.root = Some(Vec2::new(rng.gen_range(-800.0..800.0), rng.gen_range(-800.0..800.0)));
    }
    if rng.gen_bool(0.8) {
        pose.body_rotation = Some(rng.gen_range(-720.0..720.0));
    }
    for part in PartName::ALL {
        if rng.gen_bool(0.7) {
            *pose.rotation_mut(part) = Some(rng.gen_range(-400.0..400.0));
        }
    }
    pose
}

#[test]
fn decode_encode_round_trips_random_poses() {
    let mut rng = StdRng::seed_from_u64(0xB17_2005);
    for _ in 0..500 {
        let pose = random_pose(&mut rng);
        let decoded = decode(&encode(&pose));
        assert_poses_close(&pose, &decoded);
    }
}

#[test]
fn encoding_is_stable_after_one_pass() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let once = encode(&random_pose(&mut rng));
        assert_eq!(encode(&decode(&once)), once);
    }
}

#[test]
fn mirror_is_an_involution_for_every_catalog_entry() {
    for entry in PoseLibrary::builtin().iter() {
        let twice = mirror(&mirror(&entry.data));
        assert_poses_close(&decode(&entry.data), &decode(&twice));
    }
}

#[test]
fn mirror_is_an_involution_for_random_poses() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let encoded = encode(&random_pose(&mut rng));
        assert_eq!(mirror(&mirror(&encoded)), encoded);
    }
}

#[test]
fn library_file_round_trip() {
    let path = std::env::temp_dir().join(format!("bitruvius-library-{}.json", std::process::id()));
    PoseLibrary::builtin().save(&path).unwrap();

    // derived entries are already in the file, so no mirror list is needed
    let loaded = load_library_json(&path, &[] as &[&str]).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(&loaded, PoseLibrary::builtin());
    assert!(loaded.get("S01_R").is_some());
}

#[test]
fn missing_library_file_reports_path() {
    let path = std::env::temp_dir().join("bitruvius-does-not-exist.json");
    let err = load_library_json(&path, &["A06"]).unwrap_err();
    assert!(err.to_string().contains("bitruvius-does-not-exist.json"));
}
