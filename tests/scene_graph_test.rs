use scene_ngin::animation::AnimationNode;
use scene_ngin::data_structures::{instance::Instance, scene_graph::NodeTree};
use scene_ngin::{Matrix4, SquareMatrix, Vector3};

fn translate(x: f32, y: f32, z: f32) -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(x, y, z))
}

fn assert_near(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {} to be near {}",
        actual,
        expected
    );
}

/// parent (instance 0) with two children (instances 1 and 2).
fn two_sibling_tree() -> (NodeTree, Vec<Instance>) {
    let tree = NodeTree {
        transform: translate(1.0, 0.0, 0.0),
        instances: vec![0],
        children: vec![
            NodeTree {
                transform: translate(0.0, 2.0, 0.0),
                instances: vec![1],
                ..Default::default()
            },
            NodeTree {
                transform: translate(0.0, 0.0, 3.0),
                instances: vec![2],
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let instances = vec![Instance::default(), Instance::default(), Instance::default()];
    (tree, instances)
}

#[test]
fn child_world_transform_is_parent_times_local() {
    let (tree, mut instances) = two_sibling_tree();

    tree.animate(&mut instances, &[], &Matrix4::identity(), None);

    assert_near(instances[0].position.x, 1.0);
    assert_near(instances[1].position.x, 1.0);
    assert_near(instances[1].position.y, 2.0);
    assert_near(instances[2].position.x, 1.0);
    assert_near(instances[2].position.z, 3.0);
}

#[test]
fn changing_one_child_leaves_siblings_untouched() {
    let (mut tree, mut instances) = two_sibling_tree();
    tree.animate(&mut instances, &[], &Matrix4::identity(), None);
    let sibling_before = instances[2].position;

    tree.children[0].transform = translate(0.0, 50.0, 0.0);
    tree.animate(&mut instances, &[], &Matrix4::identity(), None);

    assert_near(instances[1].position.y, 50.0);
    assert_eq!(instances[2].position, sibling_before);
}

#[test]
fn animated_node_composes_with_static_transform() {
    let mut nodes = vec![AnimationNode {
        position_keys: vec![0.0],
        position_values: vec![Vector3::new(5.0, 0.0, 0.0)],
        ..Default::default()
    }];
    nodes[0].update(0.0);

    let tree = NodeTree {
        transform: translate(0.0, 1.0, 0.0),
        instances: vec![0],
        animation_node_index: 0,
        ..Default::default()
    };
    let mut instances = vec![Instance::default()];

    tree.animate(&mut instances, &nodes, &Matrix4::identity(), None);

    // Animated translation and the node's own static offset both apply.
    assert_near(instances[0].position.x, 5.0);
    assert_near(instances[0].position.y, 1.0);
}

#[test]
fn unlinked_node_uses_its_static_transform_alone() {
    let nodes = vec![AnimationNode::default()];
    let tree = NodeTree {
        transform: translate(0.0, 7.0, 0.0),
        instances: vec![0],
        // Default animation_node_index is the invalid sentinel.
        ..Default::default()
    };
    let mut instances = vec![Instance::default()];

    tree.animate(&mut instances, &nodes, &Matrix4::identity(), None);
    assert_near(instances[0].position.y, 7.0);
}

#[test]
fn dual_buffer_swap_happens_per_animate_call() {
    let (tree, mut instances) = two_sibling_tree();

    tree.animate(&mut instances, &[], &Matrix4::identity(), None);
    tree.animate(&mut instances, &[], &translate(10.0, 0.0, 0.0), None);

    assert_near(instances[0].position.x, 11.0);
    assert_near(instances[0].position_prev.x, 1.0);
}

#[test]
fn out_transform_receives_the_deepest_world_transform() {
    let chain = NodeTree {
        transform: translate(1.0, 0.0, 0.0),
        children: vec![NodeTree {
            transform: translate(0.0, 2.0, 0.0),
            children: vec![NodeTree {
                transform: translate(0.0, 0.0, 4.0),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    let mut out = Matrix4::identity();

    chain.animate(&mut [], &[], &Matrix4::identity(), Some(&mut out));

    assert_near(out.w.x as f64, 1.0);
    assert_near(out.w.y as f64, 2.0);
    assert_near(out.w.z as f64, 4.0);
}

#[test]
fn set_allow_update_flags_the_subtree_only() {
    let (tree, mut instances) = two_sibling_tree();

    // Flag only the first child's subtree (instance 1).
    tree.children[0].set_allow_update(&mut instances, true);

    assert!(!instances[0].allow_update);
    assert!(instances[1].allow_update);
    assert!(!instances[2].allow_update);

    // And back off again.
    tree.children[0].set_allow_update(&mut instances, false);
    assert!(!instances[1].allow_update);
}

#[test]
fn dangling_instance_index_is_skipped_with_a_warning() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tree = NodeTree {
        instances: vec![9],
        ..Default::default()
    };
    let mut instances = vec![Instance::default()];

    // Must not panic, the index is simply skipped.
    tree.animate(&mut instances, &[], &Matrix4::identity(), None);
    tree.set_allow_update(&mut instances, true);
    assert!(!instances[0].allow_update);
}
