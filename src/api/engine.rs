use tracing::{debug, trace, warn};

use crate::core::{Dataset, NudgeDirection, PlotEngine, Viewport};
use crate::error::{DiagramError, DiagramResult};
use crate::interaction::InteractionState;
use crate::render::{RenderFrame, Renderer};

use super::DiagramEngineConfig;

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `DiagramEngine` owns one validated dataset, the plot viewport, and the
/// stashed interaction state. Input methods only record events; every
/// [`DiagramEngine::build_render_frame`] call consumes them exactly once and
/// rebuilds the whole scene.
pub struct DiagramEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: DiagramEngineConfig,
    pub(super) dataset: Dataset,
    pub(super) plot: PlotEngine,
    pub(super) interaction: InteractionState,
}

impl<R: Renderer> DiagramEngine<R> {
    pub fn new(renderer: R, config: DiagramEngineConfig, dataset: Dataset) -> DiagramResult<Self> {
        config.validate()?;
        let plot = PlotEngine::new(
            config.plot_mode,
            config.zoom_factor,
            config.grid_spacing_px,
            config.marker_radius_px,
        )?;
        debug!(kind = %dataset.kind(), width = config.viewport.width, height = config.viewport.height, "diagram engine created");

        Ok(Self {
            renderer,
            config,
            dataset,
            plot,
            interaction: InteractionState::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &DiagramEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Replaces the dataset and drops any plot pan/zoom.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.plot.reset_view();
        self.interaction.clear_pending();
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    /// Resizes the canvas; the plot refits on the next frame.
    pub fn set_viewport(&mut self, viewport: Viewport) -> DiagramResult<()> {
        if !viewport.is_valid() {
            return Err(DiagramError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport != self.config.viewport {
            debug!(width = viewport.width, height = viewport.height, "viewport changed");
            self.config.viewport = viewport;
        }
        Ok(())
    }

    #[must_use]
    pub fn plot_engine(&self) -> &PlotEngine {
        &self.plot
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.interaction.on_pointer_move(x, y);
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    pub fn pan_start(&mut self) {
        self.interaction.on_pan_start();
    }

    pub fn pan_drag(&mut self, x: f64, y: f64) {
        self.interaction.on_drag(x, y);
    }

    pub fn pan_end(&mut self) {
        self.interaction.on_pan_end();
    }

    pub fn wheel(&mut self, delta: f64) {
        self.interaction.on_wheel(delta);
    }

    pub fn key(&mut self, direction: NudgeDirection) {
        self.interaction.on_key(direction);
    }

    /// Returns the plot to its fitted view and discards pending input.
    pub fn reset_view(&mut self) {
        self.plot.reset_view();
        self.interaction.clear_pending();
    }

    /// Consumes pending input and materializes the current scene.
    pub fn build_render_frame(&mut self) -> DiagramResult<RenderFrame> {
        let mut frame = RenderFrame::new(self.config.viewport);
        match &self.dataset {
            Dataset::Plot(_) => self.append_plot_primitives(&mut frame)?,
            Dataset::Bar(values) => self.append_bar_primitives(&mut frame, values)?,
            Dataset::Circle(values) => self.append_circle_primitives(&mut frame, values)?,
            Dataset::Polar(values) => self.append_polar_primitives(&mut frame, values)?,
            Dataset::Tree(root) => self.append_tree_primitives(&mut frame, root)?,
        }
        // Only the plot reacts to pan/zoom/keys; other kinds drop them here.
        self.interaction.clear_pending();
        trace!(
            lines = frame.lines.len(),
            texts = frame.texts.len(),
            captions = frame.captions.len(),
            "render frame built"
        );
        Ok(frame)
    }

    pub fn render(&mut self) -> DiagramResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame).inspect_err(|err| {
            warn!(error = %err, "render failed");
        })
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by GTK draw callbacks while keeping the renderer
    /// implementation decoupled from GTK-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> DiagramResult<()>
    where
        R: CairoContextRenderer,
    {
        let frame = self.build_render_frame()?;
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
