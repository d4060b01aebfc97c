use diagram_rs::core::{NudgeDirection, PlotEngine, PlotMode, PointValue, ScreenRect};
use diagram_rs::interaction::InteractionState;

fn rect() -> ScreenRect {
    ScreenRect::new(0.0, 0.0, 100.0, 100.0)
}

fn points() -> Vec<PointValue> {
    vec![
        PointValue::new(0.0, 0.0, "origin", "start"),
        PointValue::new(2.0, 4.0, "peak", "top"),
    ]
}

fn fitted_engine(grid_spacing_px: f64) -> (PlotEngine, InteractionState) {
    let mut engine =
        PlotEngine::new(PlotMode::WithSegments, 0.5, grid_spacing_px, 5.0).expect("plot engine");
    let mut input = InteractionState::default();
    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("first frame");
    (engine, input)
}

#[test]
fn plot_engine_rejects_invalid_tuning() {
    assert!(PlotEngine::new(PlotMode::WithSegments, 1.0, 100.0, 5.0).is_err());
    assert!(PlotEngine::new(PlotMode::WithSegments, 0.9, 0.0, 5.0).is_err());
    assert!(PlotEngine::new(PlotMode::WithSegments, 0.9, 100.0, -1.0).is_err());
}

#[test]
fn first_frame_fits_data_and_returns_round_step() {
    let mut engine = PlotEngine::default();
    let mut input = InteractionState::default();
    let step = engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("frame");

    assert_eq!(step, 5.0);
    let (x0, y0, x1, y1) = engine.viewport().range();
    assert!((x0 + 2.0).abs() <= 1e-9 && (x1 - 4.0).abs() <= 1e-9);
    assert!((y0 + 1.0).abs() <= 1e-9 && (y1 - 5.0).abs() <= 1e-9);
}

#[test]
fn refit_is_idempotent_for_a_stable_size() {
    let (mut engine, mut input) = fitted_engine(100.0);
    let fitted = engine.viewport().range();

    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("second frame");
    assert_eq!(engine.viewport().range(), fitted);
}

#[test]
fn wheel_input_is_consumed_exactly_once() {
    let (mut engine, mut input) = fitted_engine(100.0);
    let fitted = engine.viewport().range();

    input.on_pointer_move(50.0, 50.0);
    input.on_wheel(1.0);
    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("zoom frame");
    let zoomed = engine.viewport().range();
    assert_ne!(zoomed, fitted);
    assert!(input.pending_wheel().is_none());
    assert!((engine.viewport().logical_width() - 3.0).abs() <= 1e-9);

    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("idle frame");
    assert_eq!(engine.viewport().range(), zoomed);
}

#[test]
fn zoom_without_cursor_anchors_rect_center() {
    let (mut engine, mut input) = fitted_engine(100.0);
    let center_before = (
        engine.viewport().to_logical_x(50.0, rect()),
        engine.viewport().to_logical_y(50.0, rect()),
    );

    input.on_wheel(-1.0);
    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("zoom out frame");

    assert!((engine.viewport().logical_width() - 12.0).abs() <= 1e-9);
    assert!((engine.viewport().to_logical_x(50.0, rect()) - center_before.0).abs() <= 1e-9);
    assert!((engine.viewport().to_logical_y(50.0, rect()) - center_before.1).abs() <= 1e-9);
}

#[test]
fn pan_survives_frames_until_resize() {
    let (mut engine, mut input) = fitted_engine(100.0);

    input.on_pan_start();
    input.on_drag(10.0, 10.0);
    input.on_drag(20.0, 10.0);
    input.on_pan_end();
    assert_eq!(input.pending_pan(), (10.0, 0.0));

    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("pan frame");
    let (x0, _, x1, _) = engine.viewport().range();
    assert!((x0 + 2.6).abs() <= 1e-9 && (x1 - 3.4).abs() <= 1e-9);
    assert_eq!(input.pending_pan(), (0.0, 0.0));

    let panned = engine.viewport().range();
    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("idle frame");
    assert_eq!(engine.viewport().range(), panned);

    let resized = ScreenRect::new(0.0, 0.0, 100.0, 200.0);
    engine
        .begin_frame(&points(), resized, &mut input)
        .expect("resized frame");
    let (x0, _, x1, _) = engine.viewport().range();
    assert!((x0 + 1.0).abs() <= 1e-9 && (x1 - 3.0).abs() <= 1e-9);
}

#[test]
fn drag_jumps_are_not_accumulated() {
    let mut input = InteractionState::default();
    input.on_pan_start();
    input.on_drag(0.0, 0.0);
    input.on_drag(50.0, 0.0);
    input.on_drag(55.0, 3.0);
    assert_eq!(input.pending_pan(), (5.0, 3.0));
}

#[test]
fn key_nudge_is_applied_after_zoom() {
    let (mut engine, mut input) = fitted_engine(100.0);
    input.on_key(NudgeDirection::Left);
    engine
        .begin_frame(&points(), rect(), &mut input)
        .expect("nudge frame");

    let (x0, _, x1, _) = engine.viewport().range();
    assert!((x0 + 2.2).abs() <= 1e-9 && (x1 - 3.8).abs() <= 1e-9);
    assert!(input.pending_key().is_none());
}

#[test]
fn grid_lines_skip_zero_and_carry_labels() {
    let (engine, _) = fitted_engine(50.0);
    let step = engine.grid_step(rect());
    assert_eq!(step, 2.0);

    let vertical = engine.vertical_grid_lines(step, rect(), 12.0);
    let labels: Vec<&str> = vertical.iter().map(|line| line.label.as_str()).collect();
    assert_eq!(labels, vec!["-2", "2", "4"]);
    assert!((vertical[1].position - 200.0 / 3.0).abs() <= 1e-9);

    let horizontal = engine.horizontal_grid_lines(step, rect());
    let labels: Vec<&str> = horizontal.iter().map(|line| line.label.as_str()).collect();
    assert_eq!(labels, vec!["2", "4"]);
    assert!(horizontal.iter().all(|line| !line.label_right_aligned));
}

#[test]
fn axes_and_origin_label_follow_visibility() {
    let (mut engine, mut input) = fitted_engine(100.0);
    let axes = engine.axes(rect());
    let x_axis = axes.x_axis.expect("x axis visible");
    assert_eq!(x_axis.tip.0, 100.0);
    assert!(axes.y_axis.is_some());
    assert!(axes.origin_label.is_some());

    for _ in 0..40 {
        input.on_key(NudgeDirection::Right);
        engine
            .begin_frame(&points(), rect(), &mut input)
            .expect("nudge frame");
    }
    let axes = engine.axes(rect());
    assert!(axes.y_axis.is_none());
    assert!(axes.origin_label.is_none());
    assert!(axes.x_axis.is_some());
}

#[test]
fn segments_follow_sorted_positions_and_disappear_in_points_mode() {
    let unsorted = vec![
        PointValue::new(3.0, 1.0, "c", ""),
        PointValue::new(0.0, 0.0, "a", ""),
        PointValue::new(1.0, 2.0, "b", ""),
    ];
    let mut engine = PlotEngine::default();
    let mut input = InteractionState::default();
    engine
        .begin_frame(&unsorted, rect(), &mut input)
        .expect("frame");

    let segments = engine.project_segments(&unsorted, rect());
    assert_eq!(segments.len(), 2);
    let first_x = engine.viewport().to_screen_x(0.0, rect());
    assert!((segments[0].0.0 - first_x).abs() <= 1e-9);
    assert_eq!(segments[0].1, segments[1].0);

    engine.set_mode(PlotMode::PointsOnly);
    assert!(engine.project_segments(&unsorted, rect()).is_empty());
}

#[test]
fn hit_test_uses_marker_radius() {
    let (engine, _) = fitted_engine(100.0);
    let data = points();
    let peak_x = engine.viewport().to_screen_x(2.0, rect());
    let peak_y = engine.viewport().to_screen_y(4.0, rect());

    let hits = engine.hit_test(&data, rect(), Some((peak_x + 2.0, peak_y + 2.0)));
    assert_eq!(hits.as_slice(), &[1]);
    assert!(engine.hit_test(&data, rect(), Some((peak_x + 6.0, peak_y))).is_empty());
    assert!(engine.hit_test(&data, rect(), None).is_empty());
}

#[test]
fn projected_points_flag_visibility() {
    let (mut engine, mut input) = fitted_engine(100.0);
    input.on_pointer_move(100.0, 0.0);
    for _ in 0..10 {
        input.on_wheel(1.0);
        engine
            .begin_frame(&points(), rect(), &mut input)
            .expect("zoom frame");
    }

    let data = points();
    let projected = engine.project_points(&data, rect());
    assert_eq!(projected.len(), 2);
    assert!(!projected[0].visible);
}

fn engine_fitted_to(points: &[PointValue]) -> PlotEngine {
    let mut engine =
        PlotEngine::new(PlotMode::PointsOnly, 0.95, 50.0, 5.0).expect("plot engine");
    let mut input = InteractionState::default();
    engine
        .begin_frame(points, rect(), &mut input)
        .expect("fit frame");
    engine
}

#[test]
fn grid_labels_clamp_to_edge_nearest_zero_when_axes_are_off_screen() {
    let font_size = 12.0;

    let positive = engine_fitted_to(&[
        PointValue::new(10.0, 10.0, "a", ""),
        PointValue::new(12.0, 14.0, "b", ""),
    ]);
    let (x0, y0, _, _) = positive.viewport().range();
    assert!(x0 > 0.0 && y0 > 0.0);
    let step = positive.grid_step(rect());

    let vertical = positive.vertical_grid_lines(step, rect(), font_size);
    assert!(!vertical.is_empty());
    assert!(vertical.iter().all(|line| line.label_y == rect().bottom));
    let horizontal = positive.horizontal_grid_lines(step, rect());
    assert!(!horizontal.is_empty());
    assert!(
        horizontal
            .iter()
            .all(|line| line.label_x == rect().left && !line.label_right_aligned)
    );

    let negative = engine_fitted_to(&[
        PointValue::new(-10.0, -10.0, "a", ""),
        PointValue::new(-12.0, -14.0, "b", ""),
    ]);
    let (_, _, x1, y1) = negative.viewport().range();
    assert!(x1 < 0.0 && y1 < 0.0);
    let step = negative.grid_step(rect());

    let vertical = negative.vertical_grid_lines(step, rect(), font_size);
    assert!(!vertical.is_empty());
    assert!(
        vertical
            .iter()
            .all(|line| line.label_y == rect().top + font_size && !line.label_right_aligned)
    );
    let horizontal = negative.horizontal_grid_lines(step, rect());
    assert!(!horizontal.is_empty());
    assert!(
        horizontal
            .iter()
            .all(|line| line.label_x == rect().right && line.label_right_aligned)
    );
}

#[test]
fn grid_labels_follow_visible_zero_axes() {
    let (engine, _) = fitted_engine(50.0);
    let step = engine.grid_step(rect());
    let zero_y = engine.viewport().to_screen_y(0.0, rect());
    let zero_x = engine.viewport().to_screen_x(0.0, rect());

    let vertical = engine.vertical_grid_lines(step, rect(), 12.0);
    assert!(vertical.iter().all(|line| (line.label_y - (zero_y - 1.0)).abs() <= 1e-9));
    let horizontal = engine.horizontal_grid_lines(step, rect());
    assert!(horizontal.iter().all(|line| (line.label_x - (zero_x + 1.0)).abs() <= 1e-9));
}
