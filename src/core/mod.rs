pub mod bar;
pub mod circle;
pub mod dataset;
pub mod geometry;
pub mod plot;
pub mod polar;
pub mod tree;
pub mod types;
pub mod viewport;

pub use bar::{BarLayout, Column};
pub use circle::{DiagramSegment, LabelAnchor, circle_segments};
pub use dataset::{Dataset, DiagramKind};
pub use plot::{PlotEngine, PlotMode};
pub use polar::{PolarLayout, ScreenCell};
pub use tree::{MAX_TREE_DEPTH, ScreenPoint, layout_tree};
pub use types::{
    ChartValue, PointValue, ScreenRect, TreeValue, Value, Viewport, sorted_by_position,
};
pub use viewport::{NudgeDirection, ViewportTransform, ZoomDirection};
