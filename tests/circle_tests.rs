use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_abs_diff_eq;
use diagram_rs::DiagramError;
use diagram_rs::core::circle::{LABEL_MARGIN_PX, segment_at};
use diagram_rs::core::{ChartValue, circle_segments};
use proptest::prelude::*;

fn values() -> Vec<ChartValue> {
    vec![
        ChartValue::new(1.0, "a", "first slice"),
        ChartValue::new(2.0, "b", "second slice"),
        ChartValue::new(3.0, "c", "third slice"),
        ChartValue::new(4.0, "d", "fourth slice"),
    ]
}

#[test]
fn segments_tile_the_full_turn_in_input_order() {
    let segments = circle_segments(100.0, 100.0, 50.0, &values()).expect("segments");

    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0].begin_angle, 0.0);
    assert_eq!(segments[3].end_angle, TAU);
    for pair in segments.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].begin_angle);
    }
    assert_abs_diff_eq!(segments[0].sweep(), 0.1 * TAU, epsilon = 1e-12);
    assert_abs_diff_eq!(segments[3].sweep(), 0.4 * TAU, epsilon = 1e-12);
}

#[test]
fn segment_text_shows_value_and_truncated_percent() {
    let segments = circle_segments(0.0, 0.0, 10.0, &values()).expect("segments");
    assert_eq!(segments[0].text, "a - 1 (10%)");
    assert_eq!(segments[3].text, "d - 4 (40%)");
    assert_eq!(segments[1].detail, "second slice");

    let thirds = vec![
        ChartValue::new(1.0, "x", ""),
        ChartValue::new(2.0, "y", ""),
    ];
    let segments = circle_segments(0.0, 0.0, 10.0, &thirds).expect("segments");
    assert_eq!(segments[0].text, "x - 1 (33%)");
    assert_eq!(segments[1].text, "y - 2 (66%)");
}

#[test]
fn get_angle_runs_clockwise_from_twelve_o_clock() {
    let segments = circle_segments(0.0, 0.0, 10.0, &values()).expect("segments");
    let segment = &segments[0];

    assert_abs_diff_eq!(segment.get_angle(0.0, -10.0), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(segment.get_angle(10.0, 0.0), FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(segment.get_angle(0.0, 10.0), PI, epsilon = 1e-12);
    assert_abs_diff_eq!(segment.get_angle(-10.0, 0.0), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    assert_eq!(segment.get_angle(0.0, 0.0), 0.0);
}

#[test]
fn hit_test_respects_radius_and_angle() {
    let segments = circle_segments(100.0, 100.0, 50.0, &values()).expect("segments");

    assert_eq!(segment_at(&segments, Some((120.0, 100.0))), Some(1));
    assert_eq!(segment_at(&segments, Some((100.0, 140.0))), Some(2));
    assert_eq!(segment_at(&segments, Some((60.0, 100.0))), Some(3));
    assert_eq!(segment_at(&segments, Some((200.0, 100.0))), None);
    assert_eq!(segment_at(&segments, None), None);
    assert!(segments[1].check_in_segment(120.0, 100.0));
    assert!(!segments[0].check_in_segment(120.0, 100.0));
}

#[test]
fn zero_value_slice_has_no_sweep() {
    let mixed = vec![
        ChartValue::new(0.0, "none", ""),
        ChartValue::new(5.0, "all", ""),
    ];
    let segments = circle_segments(0.0, 0.0, 10.0, &mixed).expect("segments");
    assert_eq!(segments[0].sweep(), 0.0);
    assert_eq!(segments[1].sweep(), TAU);
    assert_eq!(segments[0].text, "none - 0 (0%)");
}

#[test]
fn invalid_inputs_are_rejected() {
    let zeros = vec![ChartValue::new(0.0, "a", ""), ChartValue::new(0.0, "b", "")];
    assert!(matches!(
        circle_segments(0.0, 0.0, 10.0, &zeros),
        Err(DiagramError::InvalidData(_))
    ));
    assert!(circle_segments(0.0, 0.0, 10.0, &[]).is_err());
    assert!(circle_segments(0.0, 0.0, 0.0, &values()).is_err());

    let negative = vec![ChartValue::new(-1.0, "a", ""), ChartValue::new(3.0, "b", "")];
    assert!(circle_segments(0.0, 0.0, 10.0, &negative).is_err());
}

#[test]
fn labels_sit_outside_the_edge_on_the_matching_side() {
    let segments = circle_segments(0.0, 0.0, 10.0, &values()).expect("segments");

    let first = segments[0].label_anchor(LABEL_MARGIN_PX);
    assert!(!first.right_aligned);
    assert_abs_diff_eq!(first.x.hypot(first.y), 10.0 + LABEL_MARGIN_PX, epsilon = 1e-9);

    let last = segments[3].label_anchor(LABEL_MARGIN_PX);
    assert!(last.right_aligned);
    assert!(last.x < 0.0);
}

#[test]
fn boundary_point_at_zero_is_the_top_of_the_circle() {
    let segments = circle_segments(5.0, 5.0, 10.0, &values()).expect("segments");
    let (x, y) = segments[0].boundary_point(0.0);
    assert_abs_diff_eq!(x, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(y, -5.0, epsilon = 1e-12);
}

#[test]
fn get_angle_inverts_points_around_an_offset_center() {
    let quarter = vec![ChartValue::new(1.0, "q", ""), ChartValue::new(3.0, "rest", "")];
    let segments = circle_segments(100.0, 100.0, 100.0, &quarter).expect("segments");
    let segment = &segments[0];
    assert_abs_diff_eq!(segment.end_angle, FRAC_PI_2, epsilon = 1e-12);

    assert_abs_diff_eq!(segment.get_angle(150.0, 50.0), PI / 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segment.get_angle(100.0, 50.0), 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segment.get_angle(200.0, 100.0), FRAC_PI_2, epsilon = 1e-9);
    assert_abs_diff_eq!(segment.get_angle(50.0, 150.0), 5.0 * PI / 4.0, epsilon = 1e-9);
    assert_abs_diff_eq!(segment.get_angle(100.0, 200.0), PI, epsilon = 1e-9);
}

proptest! {
    #[test]
    fn segments_tile_for_any_positive_values(
        raw in prop::collection::vec(0.001f64..1_000.0, 1..30)
    ) {
        let values: Vec<ChartValue> = raw
            .iter()
            .enumerate()
            .map(|(index, value)| ChartValue::new(*value, format!("v{index}"), ""))
            .collect();
        let sum: f64 = raw.iter().sum();
        let segments = circle_segments(0.0, 0.0, 50.0, &values).expect("segments");

        prop_assert_eq!(segments[0].begin_angle, 0.0);
        prop_assert!((segments[segments.len() - 1].end_angle - TAU).abs() <= 1e-9);
        for (segment, value) in segments.iter().zip(&raw) {
            prop_assert!(segment.end_angle >= segment.begin_angle);
            prop_assert!((segment.sweep() - value / sum * TAU).abs() <= 1e-9);
        }
    }
}
