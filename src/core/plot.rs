use std::f64::consts::FRAC_PI_6;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::geometry::{
    arrow_head, distance, format_tick, nearest_round_number, pseudo_color,
};
use crate::core::viewport::{DEFAULT_ZOOM_FACTOR, ViewportTransform, ZoomDirection};
use crate::core::{PointValue, ScreenRect, sorted_by_position};
use crate::error::{DiagramError, DiagramResult};
use crate::interaction::InteractionState;
use crate::render::Color;

/// Target distance between neighbouring grid lines, in pixels.
pub const GRID_TARGET_SPACING_PX: f64 = 100.0;

/// Default marker radius for plotted points.
pub const POINT_RADIUS_PX: f64 = 5.0;

pub const AXIS_ARROW_LENGTH_PX: f64 = 15.0;
pub const AXIS_ARROW_ANGLE: f64 = FRAC_PI_6;

/// Grid lines beyond this count per axis are not emitted.
const MAX_GRID_LINES: i64 = 2_000;

/// Whether the plot joins points with a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotMode {
    /// Points plus segments joining them in `(x, y)` order.
    #[default]
    WithSegments,
    PointsOnly,
}

/// One grid line along either axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    /// Logical coordinate of the line.
    pub value: f64,
    /// Screen coordinate of the line (x for vertical lines, y for horizontal).
    pub position: f64,
    pub label: String,
    pub label_x: f64,
    pub label_y: f64,
    /// `true` when the label is right-aligned at `label_x`.
    pub label_right_aligned: bool,
}

/// Screen-space arrow: shaft plus two head strokes ending at `tip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisArrow {
    pub tail: (f64, f64),
    pub tip: (f64, f64),
    pub head: [(f64, f64); 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotAxes {
    /// Horizontal axis at logical `y = 0`, present when that line is visible.
    pub x_axis: Option<AxisArrow>,
    /// Vertical axis at logical `x = 0`, present when that line is visible.
    pub y_axis: Option<AxisArrow>,
    /// Anchor of the shared "0" label when the origin is visible.
    pub origin_label: Option<(f64, f64)>,
}

/// A data point projected to the screen for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPlotPoint<'a> {
    pub x: f64,
    pub y: f64,
    pub color: Color,
    /// Whether the logical position lies inside the visible range.
    pub visible: bool,
    pub source: &'a PointValue,
}

/// Interactive scatter-plot engine.
///
/// Owns the logical viewport for one interactive session. Each frame starts
/// with [`PlotEngine::begin_frame`], which applies stashed input in a fixed
/// order; every other method is a pure projection of the resulting state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotEngine {
    viewport: ViewportTransform,
    mode: PlotMode,
    zoom_factor: f64,
    grid_spacing_px: f64,
    marker_radius_px: f64,
}

impl Default for PlotEngine {
    fn default() -> Self {
        Self {
            viewport: ViewportTransform::default(),
            mode: PlotMode::default(),
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            grid_spacing_px: GRID_TARGET_SPACING_PX,
            marker_radius_px: POINT_RADIUS_PX,
        }
    }
}

impl PlotEngine {
    pub fn new(
        mode: PlotMode,
        zoom_factor: f64,
        grid_spacing_px: f64,
        marker_radius_px: f64,
    ) -> DiagramResult<Self> {
        if !zoom_factor.is_finite() || zoom_factor <= 0.0 || zoom_factor >= 1.0 {
            return Err(DiagramError::InvalidData(
                "zoom factor must be finite and in (0, 1)".to_owned(),
            ));
        }
        if !grid_spacing_px.is_finite() || grid_spacing_px <= 0.0 {
            return Err(DiagramError::InvalidData(
                "grid spacing must be finite and > 0".to_owned(),
            ));
        }
        if !marker_radius_px.is_finite() || marker_radius_px <= 0.0 {
            return Err(DiagramError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            viewport: ViewportTransform::default(),
            mode,
            zoom_factor,
            grid_spacing_px,
            marker_radius_px,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    #[must_use]
    pub fn mode(&self) -> PlotMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlotMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn marker_radius_px(&self) -> f64 {
        self.marker_radius_px
    }

    /// Drops pan/zoom state; the next frame refits to the data.
    pub fn reset_view(&mut self) {
        self.viewport = ViewportTransform::default();
        debug!("plot view reset");
    }

    /// Applies stashed input for one frame and returns the grid step.
    ///
    /// Order: pan, auto-fit on resize, wheel zoom, key nudge. Each consumed
    /// input is cleared from `input`, so a second call in the same frame is a
    /// no-op apart from the returned step.
    pub fn begin_frame(
        &mut self,
        points: &[PointValue],
        rect: ScreenRect,
        input: &mut InteractionState,
    ) -> DiagramResult<f64> {
        if !rect.is_valid() {
            return Err(DiagramError::InvalidData(
                "plot rect must be finite with positive size".to_owned(),
            ));
        }

        let (drag_x, drag_y) = input.take_pan();
        if drag_x != 0.0 || drag_y != 0.0 {
            self.viewport.pan(drag_x, drag_y, rect)?;
            trace!(drag_x, drag_y, "pan applied");
        }

        if self.viewport.auto_fit(points, rect)? {
            let (x0, y0, x1, y1) = self.viewport.range();
            debug!(x0, y0, x1, y1, "plot range refit");
        }

        if let Some(direction) = input.take_wheel().and_then(ZoomDirection::from_wheel_delta) {
            let (cursor_x, cursor_y) = input.cursor().unwrap_or_else(|| rect.center());
            self.viewport
                .zoom(direction, cursor_x, cursor_y, rect, self.zoom_factor)?;
            trace!(?direction, cursor_x, cursor_y, "zoom applied");
        }

        if let Some(direction) = input.take_key() {
            self.viewport.nudge(direction);
            trace!(?direction, "nudge applied");
        }

        Ok(self.grid_step(rect))
    }

    /// Logical grid spacing closest to the target pixel spacing.
    #[must_use]
    pub fn grid_step(&self, rect: ScreenRect) -> f64 {
        let logical = self.grid_spacing_px / rect.width() * self.viewport.logical_width();
        nearest_round_number(logical)
    }

    /// Vertical grid lines at each non-zero multiple of `step` in `x0..=x1`.
    ///
    /// Labels sit just above the x axis when it is visible, otherwise on the
    /// screen edge nearest to zero.
    #[must_use]
    pub fn vertical_grid_lines(&self, step: f64, rect: ScreenRect, font_size: f64) -> Vec<GridLine> {
        let (x0, y0, x1, y1) = self.viewport.range();
        let label_y = if 0.0 < y0 {
            rect.bottom
        } else if 0.0 > y1 {
            rect.top + font_size
        } else {
            self.viewport.to_screen_y(0.0, rect) - 1.0
        };

        grid_indices(x0, x1, step)
            .map(|index| {
                let value = index as f64 * step;
                let position = self.viewport.to_screen_x(value, rect);
                GridLine {
                    value,
                    position,
                    label: format_tick(value, step),
                    label_x: position + 1.0,
                    label_y,
                    label_right_aligned: false,
                }
            })
            .collect()
    }

    /// Horizontal grid lines at each non-zero multiple of `step` in `y0..=y1`.
    #[must_use]
    pub fn horizontal_grid_lines(&self, step: f64, rect: ScreenRect) -> Vec<GridLine> {
        let (x0, y0, x1, y1) = self.viewport.range();
        let (label_x, label_right_aligned) = if 0.0 < x0 {
            (rect.left, false)
        } else if 0.0 > x1 {
            (rect.right, true)
        } else {
            (self.viewport.to_screen_x(0.0, rect) + 1.0, false)
        };

        grid_indices(y0, y1, step)
            .map(|index| {
                let value = index as f64 * step;
                let position = self.viewport.to_screen_y(value, rect);
                GridLine {
                    value,
                    position,
                    label: format_tick(value, step),
                    label_x,
                    label_y: position - 1.0,
                    label_right_aligned,
                }
            })
            .collect()
    }

    /// Coordinate axes, each present only when its zero line is visible.
    #[must_use]
    pub fn axes(&self, rect: ScreenRect) -> PlotAxes {
        let x_axis = self.viewport.contains_y(0.0).then(|| {
            let y = self.viewport.to_screen_y(0.0, rect);
            axis_arrow((rect.left, y), (rect.right, y))
        });
        let y_axis = self.viewport.contains_x(0.0).then(|| {
            let x = self.viewport.to_screen_x(0.0, rect);
            axis_arrow((x, rect.bottom), (x, rect.top))
        });
        let origin_label = self.viewport.contains(0.0, 0.0).then(|| {
            (
                self.viewport.to_screen_x(0.0, rect) + 1.0,
                self.viewport.to_screen_y(0.0, rect) - 1.0,
            )
        });

        PlotAxes {
            x_axis,
            y_axis,
            origin_label,
        }
    }

    /// Projects every point, flagging those inside the visible range.
    #[must_use]
    pub fn project_points<'a>(
        &self,
        points: &'a [PointValue],
        rect: ScreenRect,
    ) -> Vec<ScreenPlotPoint<'a>> {
        points
            .iter()
            .map(|point| ScreenPlotPoint {
                x: self.viewport.to_screen_x(point.x, rect),
                y: self.viewport.to_screen_y(point.y, rect),
                color: pseudo_color(point.x * point.y),
                visible: self.viewport.contains(point.x, point.y),
                source: point,
            })
            .collect()
    }

    /// Screen segments joining consecutive points in `(x, y)` order.
    ///
    /// Empty in [`PlotMode::PointsOnly`].
    #[must_use]
    pub fn project_segments(
        &self,
        points: &[PointValue],
        rect: ScreenRect,
    ) -> Vec<((f64, f64), (f64, f64))> {
        if self.mode == PlotMode::PointsOnly {
            return Vec::new();
        }

        let screen: Vec<(f64, f64)> = sorted_by_position(points)
            .into_iter()
            .map(|point| {
                (
                    self.viewport.to_screen_x(point.x, rect),
                    self.viewport.to_screen_y(point.y, rect),
                )
            })
            .collect();
        screen
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    /// Indices of points whose screen distance to `cursor` is within the
    /// marker radius.
    ///
    /// Every point is tested, visible or not.
    #[must_use]
    pub fn hit_test(
        &self,
        points: &[PointValue],
        rect: ScreenRect,
        cursor: Option<(f64, f64)>,
    ) -> SmallVec<[usize; 4]> {
        let Some((cursor_x, cursor_y)) = cursor else {
            return SmallVec::new();
        };

        points
            .iter()
            .enumerate()
            .filter(|(_, point)| {
                let x = self.viewport.to_screen_x(point.x, rect);
                let y = self.viewport.to_screen_y(point.y, rect);
                distance(x, y, cursor_x, cursor_y) <= self.marker_radius_px
            })
            .map(|(index, _)| index)
            .collect()
    }
}

fn axis_arrow(tail: (f64, f64), tip: (f64, f64)) -> AxisArrow {
    AxisArrow {
        tail,
        tip,
        head: arrow_head(
            tail.0,
            tail.1,
            tip.0,
            tip.1,
            AXIS_ARROW_LENGTH_PX,
            AXIS_ARROW_ANGLE,
        ),
    }
}

/// Non-zero multiples `k` of `step` with `k * step` in `low..=high`.
fn grid_indices(low: f64, high: f64, step: f64) -> impl Iterator<Item = i64> {
    let valid = step.is_finite() && step > 0.0 && low.is_finite() && high.is_finite();
    let (first, last) = if valid {
        ((low / step).ceil() as i64, (high / step).floor() as i64)
    } else {
        (1, 0)
    };
    let (first, last) = if last.saturating_sub(first) > MAX_GRID_LINES {
        (1, 0)
    } else {
        (first, last)
    };
    (first..=last).filter(|index| *index != 0)
}

#[cfg(test)]
mod tests {
    use super::grid_indices;

    #[test]
    fn grid_indices_skip_zero_and_stay_in_range() {
        let indices: Vec<i64> = grid_indices(-2.5, 3.0, 1.0).collect();
        assert_eq!(indices, vec![-2, -1, 1, 2, 3]);
    }

    #[test]
    fn grid_indices_reject_degenerate_step() {
        assert_eq!(grid_indices(0.0, 10.0, 0.0).count(), 0);
        assert_eq!(grid_indices(0.0, 10.0, f64::NAN).count(), 0);
    }
}
