use scene_ngin::animation::AnimationNode;
use scene_ngin::{Deg, Matrix4, Quaternion, Rotation3, SquareMatrix, Vector3, Vector4};

fn translation(transform: &Matrix4<f32>) -> Vector3<f32> {
    Vector3::new(transform.w.x, transform.w.y, transform.w.z)
}

fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {} to be near {}",
        actual,
        expected
    );
}

#[test]
fn empty_tracks_evaluate_to_identity() {
    let mut node = AnimationNode::default();
    node.update(123.0);
    assert_eq!(node.transform, Matrix4::identity());
}

#[test]
fn single_keyframe_clamps_everywhere() {
    let mut node = AnimationNode {
        position_keys: vec![500.0],
        position_values: vec![Vector3::new(1.0, 2.0, 3.0)],
        ..Default::default()
    };

    for time in [0.0, 500.0, 10_000.0] {
        node.update(time);
        let position = translation(&node.transform);
        assert_near(position.x, 1.0);
        assert_near(position.y, 2.0);
        assert_near(position.z, 3.0);
    }
}

#[test]
fn position_interpolates_linearly() {
    let mut node = AnimationNode {
        position_keys: vec![0.0, 1000.0],
        position_values: vec![Vector3::new(0.0, 0.0, 0.0), Vector3::new(10.0, -4.0, 0.0)],
        ..Default::default()
    };

    node.update(250.0);
    let position = translation(&node.transform);
    assert_near(position.x, 2.5);
    assert_near(position.y, -1.0);
}

#[test]
fn time_before_first_and_after_last_key_clamps() {
    let mut node = AnimationNode {
        position_keys: vec![100.0, 200.0],
        position_values: vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)],
        ..Default::default()
    };

    node.update(0.0);
    assert_near(translation(&node.transform).x, 1.0);

    node.update(5000.0);
    assert_near(translation(&node.transform).x, 2.0);
}

#[test]
fn rotation_interpolates_along_shortest_arc() {
    let mut node = AnimationNode {
        rotation_keys: vec![0.0, 1000.0],
        rotation_values: vec![
            Quaternion::from_angle_z(Deg(0.0)),
            Quaternion::from_angle_z(Deg(90.0)),
        ],
        ..Default::default()
    };

    node.update(500.0);
    let rotated = node.transform * Vector4::unit_x();
    assert_near(rotated.x, 45.0_f32.to_radians().cos());
    assert_near(rotated.y, 45.0_f32.to_radians().sin());
    assert_near(rotated.z, 0.0);
}

#[test]
fn negated_quaternion_key_does_not_unwind() {
    // q and -q describe the same orientation; a sign flip between
    // neighbouring keys must not take the long way around.
    let halfway = Quaternion::from_angle_z(Deg(90.0));

    let mut plain = AnimationNode {
        rotation_keys: vec![0.0, 1000.0],
        rotation_values: vec![Quaternion::from_angle_z(Deg(0.0)), halfway],
        ..Default::default()
    };
    let mut flipped = AnimationNode {
        rotation_keys: vec![0.0, 1000.0],
        rotation_values: vec![Quaternion::from_angle_z(Deg(0.0)), -halfway],
        ..Default::default()
    };

    plain.update(500.0);
    flipped.update(500.0);

    let a = plain.transform * Vector4::unit_x();
    let b = flipped.transform * Vector4::unit_x();
    assert_near(a.x, b.x);
    assert_near(a.y, b.y);
    assert_near(a.z, b.z);
}

#[test]
fn scale_track_composes_after_rotation() {
    let mut node = AnimationNode {
        scale_keys: vec![0.0, 1000.0],
        scale_values: vec![Vector3::new(1.0, 1.0, 1.0), Vector3::new(3.0, 1.0, 1.0)],
        ..Default::default()
    };

    node.update(1000.0);
    let scaled = node.transform * Vector4::unit_x();
    assert_near(scaled.x, 3.0);
}

#[test]
fn partially_specified_tracks_leave_other_components_identity() {
    // Rotation-only animation: position and scale stay identity.
    let mut node = AnimationNode {
        rotation_keys: vec![0.0, 1000.0],
        rotation_values: vec![
            Quaternion::from_angle_z(Deg(0.0)),
            Quaternion::from_angle_z(Deg(180.0)),
        ],
        ..Default::default()
    };

    node.update(300.0);
    let position = translation(&node.transform);
    assert_near(position.x, 0.0);
    assert_near(position.y, 0.0);
    assert_near(position.z, 0.0);
}

#[test]
fn mismatched_key_value_lengths_fall_back_to_common_prefix() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut node = AnimationNode {
        position_keys: vec![0.0, 1000.0],
        position_values: vec![Vector3::new(7.0, 0.0, 0.0)],
        ..Default::default()
    };

    // Only one (key, value) pair usable: constant.
    node.update(800.0);
    assert_near(translation(&node.transform).x, 7.0);
}
