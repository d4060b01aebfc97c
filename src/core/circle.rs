use std::f64::consts::TAU;

use crate::core::ChartValue;
use crate::core::geometry::distance;
use crate::error::{DiagramError, DiagramResult};

/// Distance between the circle edge and slice labels.
pub const LABEL_MARGIN_PX: f64 = 15.0;

/// Where to put a label and which side of the anchor it extends to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    /// `true` when the text ends at `x`, `false` when it starts there.
    pub right_aligned: bool,
}

/// One pie slice in screen space.
///
/// Angles are radians clockwise from twelve o'clock, `0 <= begin <= end <= 2π`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramSegment {
    pub begin_angle: f64,
    pub end_angle: f64,
    pub text: String,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub detail: String,
}

impl DiagramSegment {
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.begin_angle
    }

    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.begin_angle + self.end_angle) / 2.0
    }

    /// Angle of `(x, y)` around the center, clockwise from straight up, in `[0, 2π)`.
    ///
    /// The center itself maps to 0.
    #[must_use]
    pub fn get_angle(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let length = dx.hypot(dy);
        if length == 0.0 {
            return 0.0;
        }

        // Screen y grows downward, so "up" is -dy.
        let from_top = (-dy / length).clamp(-1.0, 1.0).acos();
        if dx < 0.0 { TAU - from_top } else { from_top }
    }

    /// Whether `(x, y)` lies inside the circle and within this slice's angles.
    #[must_use]
    pub fn check_in_segment(&self, x: f64, y: f64) -> bool {
        if distance(x, y, self.center_x, self.center_y) > self.radius {
            return false;
        }
        let angle = self.get_angle(x, y);
        (self.begin_angle..=self.end_angle).contains(&angle)
    }

    /// Point on the circle edge at `angle`.
    #[must_use]
    pub fn boundary_point(&self, angle: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        (
            self.center_x + sin * self.radius,
            self.center_y - cos * self.radius,
        )
    }

    /// Label position `margin` pixels outside the edge at the mid-angle.
    ///
    /// Labels on the right half start at the anchor, the others end there.
    #[must_use]
    pub fn label_anchor(&self, margin: f64) -> LabelAnchor {
        let (sin, cos) = self.mid_angle().sin_cos();
        let reach = self.radius + margin;
        LabelAnchor {
            x: self.center_x + sin * reach,
            y: self.center_y - cos * reach,
            right_aligned: sin <= 0.0,
        }
    }
}

/// Partitions the circle into slices proportional to `values`, in input order.
///
/// Slices tile `[0, 2π]` exactly; the last `end_angle` is `2π`.
pub fn circle_segments(
    center_x: f64,
    center_y: f64,
    radius: f64,
    values: &[ChartValue],
) -> DiagramResult<Vec<DiagramSegment>> {
    if !center_x.is_finite() || !center_y.is_finite() {
        return Err(DiagramError::InvalidData(
            "circle center must be finite".to_owned(),
        ));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(DiagramError::InvalidData(
            "circle radius must be finite and > 0".to_owned(),
        ));
    }
    if values
        .iter()
        .any(|value| !value.value.is_finite() || value.value < 0.0)
    {
        return Err(DiagramError::InvalidData(
            "circle values must be finite and >= 0".to_owned(),
        ));
    }

    let sum: f64 = values.iter().map(|value| value.value).sum();
    if sum <= 0.0 {
        return Err(DiagramError::InvalidData(
            "circle values must have a positive sum".to_owned(),
        ));
    }

    let mut cumulative = 0.0;
    let segments = values
        .iter()
        .map(|value| {
            let begin_angle = cumulative / sum * TAU;
            cumulative += value.value;
            let end_angle = cumulative / sum * TAU;
            let percent = (value.value / sum * 100.0).trunc();
            DiagramSegment {
                begin_angle,
                end_angle,
                text: format!("{} - {} ({percent}%)", value.name, value.value),
                center_x,
                center_y,
                radius,
                detail: value.detail.clone(),
            }
        })
        .collect();
    Ok(segments)
}

/// Index of the first slice containing `cursor`, if any.
#[must_use]
pub fn segment_at(segments: &[DiagramSegment], cursor: Option<(f64, f64)>) -> Option<usize> {
    let (x, y) = cursor?;
    segments
        .iter()
        .position(|segment| segment.check_in_segment(x, y))
}
