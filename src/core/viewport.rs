use serde::{Deserialize, Serialize};

use crate::core::{PointValue, ScreenRect};
use crate::error::{DiagramError, DiagramResult};

/// Default zoom factor applied per wheel step.
pub const DEFAULT_ZOOM_FACTOR: f64 = 0.95;

/// Fraction of the visible span moved by one arrow-key nudge.
pub const NUDGE_FRACTION: f64 = 1.0 / 30.0;

/// Margin added around the data bounding box by auto-fit.
pub const AUTO_FIT_MARGIN: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    /// Shrinks the visible range by the zoom factor.
    In,
    /// Grows the visible range by the inverse of the zoom factor.
    Out,
}

impl ZoomDirection {
    /// Maps a wheel delta to a direction; positive deltas zoom in.
    #[must_use]
    pub fn from_wheel_delta(delta: f64) -> Option<Self> {
        if !delta.is_finite() || delta == 0.0 {
            None
        } else if delta > 0.0 {
            Some(Self::In)
        } else {
            Some(Self::Out)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NudgeDirection {
    Left,
    Up,
    Right,
    Down,
}

/// Bidirectional mapping between a screen rect and the visible logical range.
///
/// `x0..x1` and `y0..y1` are the visible logical intervals; `y` grows upward
/// in logical space and downward on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTransform {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    last_size: Option<(f64, f64)>,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            x0: -10.0,
            y0: -10.0,
            x1: 10.0,
            y1: 10.0,
            last_size: None,
        }
    }
}

impl ViewportTransform {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> DiagramResult<Self> {
        validate_range(x0, y0, x1, y1)?;
        Ok(Self {
            x0,
            y0,
            x1,
            y1,
            last_size: None,
        })
    }

    /// Visible logical range as `(x0, y0, x1, y1)`.
    #[must_use]
    pub fn range(&self) -> (f64, f64, f64, f64) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    #[must_use]
    pub fn logical_width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[must_use]
    pub fn logical_height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Screen size seen by the last auto-fit, if any.
    #[must_use]
    pub fn last_size(&self) -> Option<(f64, f64)> {
        self.last_size
    }

    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        (self.x0..=self.x1).contains(&x)
    }

    #[must_use]
    pub fn contains_y(&self, y: f64) -> bool {
        (self.y0..=self.y1).contains(&y)
    }

    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    #[must_use]
    pub fn to_screen_x(&self, x: f64, rect: ScreenRect) -> f64 {
        rect.left + (x - self.x0) / (self.x1 - self.x0) * rect.width()
    }

    #[must_use]
    pub fn to_screen_y(&self, y: f64, rect: ScreenRect) -> f64 {
        rect.bottom - (y - self.y0) / (self.y1 - self.y0) * rect.height()
    }

    #[must_use]
    pub fn to_logical_x(&self, pixel: f64, rect: ScreenRect) -> f64 {
        self.x0 + (pixel - rect.left) / rect.width() * (self.x1 - self.x0)
    }

    #[must_use]
    pub fn to_logical_y(&self, pixel: f64, rect: ScreenRect) -> f64 {
        self.y1 - (pixel - rect.top) / rect.height() * (self.y1 - self.y0)
    }

    /// Refits the range to `points` when the rect size differs from the last fit.
    ///
    /// The range becomes the data bounding box inflated by one unit, then the
    /// relatively narrower axis is stretched symmetrically so grid cells are
    /// square on screen. Any previous pan or zoom is discarded on resize.
    /// Returns `true` when a refit happened.
    pub fn auto_fit(&mut self, points: &[PointValue], rect: ScreenRect) -> DiagramResult<bool> {
        let size = (rect.width(), rect.height());
        if self.last_size == Some(size) {
            return Ok(false);
        }
        if !rect.is_valid() {
            return Err(DiagramError::InvalidData(
                "auto-fit requires a non-empty finite screen rect".to_owned(),
            ));
        }
        if points.is_empty() {
            return Err(DiagramError::InvalidData(
                "auto-fit requires at least one point".to_owned(),
            ));
        }

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return Err(DiagramError::InvalidData(
                    "point coordinates must be finite".to_owned(),
                ));
            }
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }

        self.x0 = min_x - AUTO_FIT_MARGIN;
        self.x1 = max_x + AUTO_FIT_MARGIN;
        self.y0 = min_y - AUTO_FIT_MARGIN;
        self.y1 = max_y + AUTO_FIT_MARGIN;

        let logical_width = self.logical_width();
        let logical_height = self.logical_height();
        let (rect_width, rect_height) = size;
        if logical_height / rect_height < logical_width / rect_width {
            let expected_height = logical_width / rect_width * rect_height;
            let half_growth = (expected_height - logical_height) / 2.0;
            self.y0 -= half_growth;
            self.y1 += half_growth;
        } else {
            let expected_width = logical_height / rect_height * rect_width;
            let half_growth = (expected_width - logical_width) / 2.0;
            self.x0 -= half_growth;
            self.x1 += half_growth;
        }

        self.last_size = Some(size);
        Ok(true)
    }

    /// Shifts the range by a screen-space drag vector.
    ///
    /// Dragging right moves the view left in logical space; dragging down
    /// moves it up, since logical `y` grows upward.
    pub fn pan(&mut self, drag_x: f64, drag_y: f64, rect: ScreenRect) -> DiagramResult<()> {
        if !drag_x.is_finite() || !drag_y.is_finite() {
            return Err(DiagramError::InvalidData(
                "pan vector must be finite".to_owned(),
            ));
        }

        let delta_x = -drag_x / rect.width() * self.logical_width();
        let delta_y = drag_y / rect.height() * self.logical_height();
        self.x0 += delta_x;
        self.x1 += delta_x;
        self.y0 += delta_y;
        self.y1 += delta_y;
        Ok(())
    }

    /// Scales the range around the logical point under `(cursor_x, cursor_y)`.
    ///
    /// The anchor keeps its screen position. `factor` must lie in `(0, 1)`;
    /// zooming in multiplies the spans by it, zooming out divides by it.
    pub fn zoom(
        &mut self,
        direction: ZoomDirection,
        cursor_x: f64,
        cursor_y: f64,
        rect: ScreenRect,
        factor: f64,
    ) -> DiagramResult<()> {
        if !factor.is_finite() || factor <= 0.0 || factor >= 1.0 {
            return Err(DiagramError::InvalidData(
                "zoom factor must be finite and in (0, 1)".to_owned(),
            ));
        }
        if !cursor_x.is_finite() || !cursor_y.is_finite() {
            return Err(DiagramError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let anchor_x = self.to_logical_x(cursor_x, rect);
        let anchor_y = self.to_logical_y(cursor_y, rect);
        let scale = match direction {
            ZoomDirection::In => factor,
            ZoomDirection::Out => 1.0 / factor,
        };

        self.x0 = anchor_x - (anchor_x - self.x0) * scale;
        self.x1 = anchor_x + (self.x1 - anchor_x) * scale;
        self.y0 = anchor_y - (anchor_y - self.y0) * scale;
        self.y1 = anchor_y + (self.y1 - anchor_y) * scale;
        debug_assert!(self.x1 > self.x0 && self.y1 > self.y0);
        Ok(())
    }

    /// Shifts the whole range by 1/30 of its span in `direction`.
    pub fn nudge(&mut self, direction: NudgeDirection) {
        let step_x = self.logical_width() * NUDGE_FRACTION;
        let step_y = self.logical_height() * NUDGE_FRACTION;
        let (delta_x, delta_y) = match direction {
            NudgeDirection::Left => (-step_x, 0.0),
            NudgeDirection::Right => (step_x, 0.0),
            NudgeDirection::Up => (0.0, step_y),
            NudgeDirection::Down => (0.0, -step_y),
        };
        self.x0 += delta_x;
        self.x1 += delta_x;
        self.y0 += delta_y;
        self.y1 += delta_y;
    }
}

fn validate_range(x0: f64, y0: f64, x1: f64, y1: f64) -> DiagramResult<()> {
    if !x0.is_finite() || !y0.is_finite() || !x1.is_finite() || !y1.is_finite() {
        return Err(DiagramError::InvalidData(
            "logical range must be finite".to_owned(),
        ));
    }
    if x1 <= x0 || y1 <= y0 {
        return Err(DiagramError::InvalidData(
            "logical range must satisfy x1 > x0 and y1 > y0".to_owned(),
        ));
    }
    Ok(())
}
