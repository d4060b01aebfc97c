use std::path::Path;

use tracing::debug;

use crate::core::Dataset;
use crate::error::{DiagramError, DiagramResult};
use crate::render::CairoRenderer;

use super::{DiagramEngine, DiagramEngineConfig};

/// Renders `dataset` once with a fresh engine and writes it as PNG.
///
/// The view is the fitted default: no cursor, no pending input. Output is
/// deterministic for a fixed dataset and config.
pub fn export_png(dataset: Dataset, config: DiagramEngineConfig, path: &Path) -> DiagramResult<()> {
    config.validate()?;
    let width = i32::try_from(config.viewport.width).map_err(|_| DiagramError::InvalidViewport {
        width: config.viewport.width,
        height: config.viewport.height,
    })?;
    let height =
        i32::try_from(config.viewport.height).map_err(|_| DiagramError::InvalidViewport {
            width: config.viewport.width,
            height: config.viewport.height,
        })?;

    let kind = dataset.kind();
    let mut engine = DiagramEngine::new(CairoRenderer::new(width, height)?, config, dataset)?;
    engine.render()?;
    engine.into_renderer().write_png(path)?;
    debug!(kind = %kind, path = %path.display(), "diagram exported");
    Ok(())
}
