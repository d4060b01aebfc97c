mod bar_render_frame_builder;
mod caption;
mod circle_render_frame_builder;
mod engine;
mod engine_config;
#[cfg(feature = "cairo-backend")]
mod export;
mod layout_regions;
mod plot_render_frame_builder;
mod polar_render_frame_builder;
mod tree_render_frame_builder;

pub use caption::{CAPTION_BACKGROUND, build_caption};
pub use engine::DiagramEngine;
pub use engine_config::{DiagramEngineConfig, EXPORT_VIEWPORT};
#[cfg(feature = "cairo-backend")]
pub use export::export_png;
pub use layout_regions::{CircleRegion, chart_rect, circle_region, polar_region, tree_rect};
