use diagram_rs::api::{DiagramEngine, DiagramEngineConfig, chart_rect};
use diagram_rs::core::{
    ChartValue, Dataset, NudgeDirection, PlotMode, PointValue, TreeValue, Viewport,
};
use diagram_rs::render::{NullRenderer, RenderFrame};
use diagram_rs::DiagramError;

fn config() -> DiagramEngineConfig {
    DiagramEngineConfig::new(Viewport::new(800, 600))
}

fn new_engine(dataset: Dataset) -> DiagramEngine<NullRenderer> {
    DiagramEngine::new(NullRenderer::default(), config(), dataset).expect("engine init")
}

fn slices() -> Dataset {
    Dataset::Circle(vec![
        ChartValue::new(1.0, "a", "first slice"),
        ChartValue::new(2.0, "b", "second slice"),
        ChartValue::new(3.0, "c", "third slice"),
        ChartValue::new(4.0, "d", "fourth slice"),
    ])
}

fn samples() -> Vec<PointValue> {
    vec![
        PointValue::new(0.0, 0.0, "p0", "origin"),
        PointValue::new(2.0, 4.0, "p1", "peak"),
        PointValue::new(4.0, 1.0, "p2", ""),
    ]
}

fn tree() -> Dataset {
    Dataset::Tree(TreeValue::with_children(
        "root",
        "top level",
        vec![
            TreeValue::leaf("a", "left"),
            TreeValue::with_children(
                "b",
                "inner",
                vec![TreeValue::leaf("c", ""), TreeValue::leaf("d", "")],
            ),
        ],
    ))
}

fn caption_words(frame: &RenderFrame) -> Vec<&str> {
    frame.captions[0]
        .lines
        .iter()
        .map(|line| line.text.as_str())
        .collect()
}

#[test]
fn engine_rejects_invalid_config() {
    let bad = config().with_zoom_factor(1.5);
    assert!(DiagramEngine::new(NullRenderer::default(), bad, slices()).is_err());
}

#[test]
fn render_validates_and_counts_frames() {
    for dataset in [
        slices(),
        Dataset::Plot(samples()),
        tree(),
        Dataset::Bar(vec![ChartValue::new(1.0, "x", "")]),
        Dataset::Polar(vec![ChartValue::new(1.0, "x", ""), ChartValue::new(2.0, "y", "")]),
    ] {
        let mut engine = new_engine(dataset);
        engine.render().expect("render");
        engine.render().expect("render again");
        assert_eq!(engine.renderer().frames_rendered, 2);
        assert!(engine.renderer().last_line_count > 0);
        assert!(engine.renderer().last_text_count > 0);
        assert_eq!(engine.renderer().last_caption_count, 0);
    }
}

#[test]
fn circle_frame_has_one_wedge_and_label_per_slice() {
    let mut engine = new_engine(slices());
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.wedges.len(), 4);
    assert_eq!(frame.texts.len(), 4);
    assert_eq!(frame.lines.len(), 4);
    assert_eq!(frame.circles.len(), 1);
    assert!(frame.find_text("a - 1 (10%)").is_some());
    assert_eq!(frame.wedges[3].end_angle, std::f64::consts::TAU);
    assert!(frame.captions.is_empty());
}

#[test]
fn circle_hover_shows_slice_detail_below_cursor() {
    let mut engine = new_engine(slices());
    engine.pointer_move(500.0, 300.0);
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.captions.len(), 1);
    assert_eq!(caption_words(&frame), vec!["second", "slice"]);
    assert_eq!(frame.captions[0].background.x, 500.0);
    assert_eq!(frame.captions[0].background.y, 310.0);

    engine.pointer_leave();
    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.captions.is_empty());
}

#[test]
fn non_plot_kinds_drop_navigation_input() {
    let mut engine = new_engine(slices());
    engine.pan_start();
    engine.pan_drag(1.0, 1.0);
    engine.pan_drag(3.0, 2.0);
    engine.wheel(1.0);
    engine.key(NudgeDirection::Left);
    engine.build_render_frame().expect("frame");

    assert_eq!(engine.interaction().pending_pan(), (0.0, 0.0));
    assert!(engine.interaction().pending_wheel().is_none());
    assert!(engine.interaction().pending_key().is_none());
}

#[test]
fn bar_frame_draws_columns_grid_and_hover_caption() {
    let mut engine = new_engine(Dataset::Bar(vec![
        ChartValue::new(5.0, "spring", "mild weather"),
        ChartValue::new(10.0, "summer", "hot"),
    ]));
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.lines.len(), 11);
    assert_eq!(frame.texts.len(), 15);
    assert!(frame.find_text("10.00").is_some());
    assert!(frame.find_text("summer").is_some());
    assert!(frame.find_text("5").is_some());
    assert!((frame.rects[0].x - 88.0).abs() <= 1e-9);
    assert!((frame.rects[0].y - 298.0).abs() <= 1e-9);

    engine.pointer_move(200.0, 400.0);
    let frame = engine.build_render_frame().expect("hover frame");
    assert_eq!(caption_words(&frame), vec!["mild", "weather"]);
}

#[test]
fn plot_frame_marks_points_and_hovered_point() {
    let mut engine = new_engine(Dataset::Plot(samples()));
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.circles.len(), 3);
    assert!(frame.find_text("p0").is_some());
    assert!(frame.find_text("0").is_some());

    let rect = chart_rect(engine.viewport());
    let viewport = *engine.plot_engine().viewport();
    let x = viewport.to_screen_x(2.0, rect);
    let y = viewport.to_screen_y(4.0, rect);
    engine.pointer_move(x + 1.0, y);

    let frame = engine.build_render_frame().expect("hover frame");
    assert_eq!(frame.circles.len(), 4);
    assert_eq!(frame.captions.len(), 1);
    assert_eq!(
        caption_words(&frame),
        vec!["p1", "-", "(2;", "4)", "-", "peak"]
    );
}

#[test]
fn plot_segments_follow_mode() {
    let mut with_segments = new_engine(Dataset::Plot(samples()));
    let mut points_only = DiagramEngine::new(
        NullRenderer::default(),
        config().with_plot_mode(PlotMode::PointsOnly),
        Dataset::Plot(samples()),
    )
    .expect("engine init");

    let joined = with_segments.build_render_frame().expect("frame");
    let bare = points_only.build_render_frame().expect("frame");
    assert_eq!(joined.lines.len(), bare.lines.len() + 2);
}

#[test]
fn plot_wheel_zoom_is_applied_once() {
    let mut engine = new_engine(Dataset::Plot(samples()));
    engine.build_render_frame().expect("fit frame");
    let fitted_width = engine.plot_engine().viewport().logical_width();

    engine.wheel(1.0);
    engine.build_render_frame().expect("zoom frame");
    let zoomed_width = engine.plot_engine().viewport().logical_width();
    assert!((zoomed_width - fitted_width * 0.95).abs() <= 1e-9);
    assert!(engine.interaction().pending_wheel().is_none());

    engine.build_render_frame().expect("idle frame");
    assert_eq!(engine.plot_engine().viewport().logical_width(), zoomed_width);

    engine.reset_view();
    engine.build_render_frame().expect("refit frame");
    assert!((engine.plot_engine().viewport().logical_width() - fitted_width).abs() <= 1e-9);
}

#[test]
fn polar_frame_fills_radar_polygon() {
    let mut engine = new_engine(Dataset::Polar(vec![
        ChartValue::new(3.0, "north", "n"),
        ChartValue::new(7.0, "east", "e"),
        ChartValue::new(12.0, "south", "south side"),
        ChartValue::new(5.0, "west", "w"),
    ]));
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.triangles.len(), 4);
    assert_eq!(frame.circles.len(), 4);
    assert_eq!(frame.lines.len(), 4 + 10 * 4 + 4);
    assert!(frame.find_text("20").is_some());
    assert!(frame.find_text("south").is_some());

    engine.pointer_move(400.0, 451.0);
    let frame = engine.build_render_frame().expect("hover frame");
    assert_eq!(frame.circles.len(), 5);
    assert_eq!(caption_words(&frame), vec!["12", "-", "south", "side"]);
}

#[test]
fn tree_frame_connects_nodes_to_parents() {
    let mut engine = new_engine(tree());
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(frame.circles.len(), 5);
    assert_eq!(frame.lines.len(), 4);
    assert_eq!(frame.texts.len(), 5);

    engine.pointer_move(399.0, 41.0);
    let frame = engine.build_render_frame().expect("hover frame");
    assert_eq!(frame.circles.len(), 6);
    assert_eq!(caption_words(&frame), vec!["root", "-", "top", "level"]);
}

#[test]
fn viewport_changes_are_validated() {
    let mut engine = new_engine(tree());
    assert!(matches!(
        engine.set_viewport(Viewport::new(0, 100)),
        Err(DiagramError::InvalidViewport { .. })
    ));

    engine.set_viewport(Viewport::new(400, 300)).expect("resize");
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.viewport, Viewport::new(400, 300));
}

#[test]
fn set_dataset_switches_diagram_kind() {
    let mut engine = new_engine(tree());
    engine.wheel(1.0);
    engine.set_dataset(slices());
    assert!(engine.interaction().pending_wheel().is_none());

    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.wedges.len(), 4);
}
