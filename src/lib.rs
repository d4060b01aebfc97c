//! diagram-rs: bar, pie, scatter, polar and tree diagrams.
//!
//! Layout engines in [`core`] turn validated values into screen geometry,
//! [`api::DiagramEngine`] turns that geometry into a backend-agnostic
//! [`render::RenderFrame`], and renderers draw it either offscreen (PNG
//! export) or into a GTK window.

pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{DiagramEngine, DiagramEngineConfig};
pub use crate::core::{Dataset, DiagramKind};
pub use error::{DiagramError, DiagramResult};
