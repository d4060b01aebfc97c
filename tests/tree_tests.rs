use diagram_rs::core::tree::{MAX_TREE_DEPTH, node_at, subtree_weight, tree_depth};
use diagram_rs::core::{ScreenRect, TreeValue, layout_tree};

fn sample_tree() -> TreeValue {
    TreeValue::with_children(
        "root",
        "top level",
        vec![
            TreeValue::leaf("a", "left leaf"),
            TreeValue::with_children(
                "b",
                "inner",
                vec![TreeValue::leaf("c", "leaf c"), TreeValue::leaf("d", "leaf d")],
            ),
        ],
    )
}

fn rect() -> ScreenRect {
    ScreenRect::new(0.0, 0.0, 400.0, 200.0)
}

#[test]
fn depth_and_weight_count_levels_and_nodes() {
    let tree = sample_tree();
    assert_eq!(tree_depth(&tree), 3);
    assert_eq!(subtree_weight(&tree), 5);
    assert_eq!(tree_depth(&TreeValue::leaf("x", "")), 1);
}

#[test]
fn layout_splits_width_by_subtree_weight() {
    let tree = sample_tree();
    let points = layout_tree(&tree, rect()).expect("layout");

    let names: Vec<&str> = points.iter().map(|point| point.node.name.as_str()).collect();
    assert_eq!(names, vec!["root", "a", "b", "c", "d"]);

    let positions: Vec<(f64, f64)> = points.iter().map(|point| (point.x, point.y)).collect();
    let expected = [
        (200.0, 0.0),
        (50.0, 100.0),
        (250.0, 100.0),
        (175.0, 200.0),
        (325.0, 200.0),
    ];
    for (actual, expected) in positions.iter().zip(expected) {
        assert!((actual.0 - expected.0).abs() <= 1e-9);
        assert!((actual.1 - expected.1).abs() <= 1e-9);
    }
}

#[test]
fn layout_records_parent_positions() {
    let tree = sample_tree();
    let points = layout_tree(&tree, rect()).expect("layout");

    assert_eq!(points[0].parent, None);
    assert_eq!(points[1].parent, Some((200.0, 0.0)));
    assert_eq!(points[3].parent, Some((250.0, 100.0)));
}

#[test]
fn single_node_sits_at_top_center() {
    let leaf = TreeValue::leaf("alone", "");
    let points = layout_tree(&leaf, rect()).expect("layout");
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].x, points[0].y), (200.0, 0.0));
}

#[test]
fn node_colors_are_stable_across_layouts() {
    let tree = sample_tree();
    let first = layout_tree(&tree, rect()).expect("first layout");
    let wide = ScreenRect::new(0.0, 0.0, 800.0, 600.0);
    let second = layout_tree(&tree, wide).expect("second layout");

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.color, b.color);
    }
}

#[test]
fn node_hit_test_picks_nearest_marker_in_radius() {
    let tree = sample_tree();
    let points = layout_tree(&tree, rect()).expect("layout");

    assert_eq!(node_at(&points, Some((252.0, 101.0)), 5.0), Some(2));
    assert_eq!(node_at(&points, Some((120.0, 150.0)), 5.0), None);
    assert_eq!(node_at(&points, None, 5.0), None);
}

#[test]
fn layout_rejects_degenerate_rect() {
    let tree = sample_tree();
    assert!(layout_tree(&tree, ScreenRect::new(0.0, 0.0, 0.0, 10.0)).is_err());
}

fn chain(length: usize) -> TreeValue {
    let mut node = TreeValue::leaf(format!("n{}", length - 1), "");
    for index in (0..length - 1).rev() {
        node = TreeValue::with_children(format!("n{index}"), "", vec![node]);
    }
    node
}

#[test]
fn deep_chain_lays_out_one_node_per_level() {
    let root = chain(MAX_TREE_DEPTH);
    assert_eq!(tree_depth(&root), MAX_TREE_DEPTH);
    assert_eq!(subtree_weight(&root), MAX_TREE_DEPTH);

    let rect = ScreenRect::new(0.0, 0.0, 400.0, 1023.0);
    let points = layout_tree(&root, rect).expect("layout");

    assert_eq!(points.len(), MAX_TREE_DEPTH);
    for (level, point) in points.iter().enumerate() {
        assert_eq!(point.node.name, format!("n{level}"));
        assert!((point.x - 200.0).abs() <= 1e-9);
        assert!((point.y - level as f64).abs() <= 1e-9);
    }
    assert_eq!(points[1].parent, Some((200.0, 0.0)));
}
