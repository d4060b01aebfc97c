use crate::core::circle::LabelAnchor;
use crate::core::geometry::{distance, format_tick, polygon_vertex, round_number_at_least};
use crate::core::ChartValue;
use crate::error::{DiagramError, DiagramResult};

pub const DEFAULT_RING_COUNT: usize = 10;

/// Distance between the outer ring and value names.
pub const NAME_MARGIN_PX: f64 = 10.0;

/// A data vertex of the radar polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCell<'a> {
    pub x: f64,
    pub y: f64,
    pub value: &'a ChartValue,
}

/// One concentric grid polygon and its value label.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarRing {
    pub radius: f64,
    pub value: f64,
    pub label: String,
    pub vertices: Vec<(f64, f64)>,
}

/// Vertices of a regular `count`-gon, vertex 0 straight up, clockwise on screen.
#[must_use]
pub fn regular_polygon(center_x: f64, center_y: f64, radius: f64, count: usize) -> Vec<(f64, f64)> {
    (0..count)
        .map(|index| polygon_vertex(center_x, center_y, radius, count, index))
        .collect()
}

/// Radar layout for `count` values around a center.
///
/// The value scale is `ring_count * step`, where `step` is the smallest round
/// number that lets the outer ring enclose the largest value.
///
/// Vertices sit at `value / scale_max * radius`, not `value / max * radius`,
/// so the largest value usually lands inside the outer ring and every value
/// reads against the ring labels. Rounding the step up, rather than to the
/// nearest round number, keeps the largest value from overshooting the
/// outer ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub count: usize,
    pub ring_count: usize,
    pub step: f64,
}

impl PolarLayout {
    pub fn new(
        center_x: f64,
        center_y: f64,
        radius: f64,
        values: &[ChartValue],
        ring_count: usize,
    ) -> DiagramResult<Self> {
        if values.is_empty() {
            return Err(DiagramError::InvalidData(
                "polar chart requires at least one value".to_owned(),
            ));
        }
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(DiagramError::InvalidData(
                "polar center must be finite".to_owned(),
            ));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(DiagramError::InvalidData(
                "polar radius must be finite and > 0".to_owned(),
            ));
        }
        if ring_count == 0 {
            return Err(DiagramError::InvalidData(
                "polar ring count must be >= 1".to_owned(),
            ));
        }
        if values
            .iter()
            .any(|value| !value.value.is_finite() || value.value < 0.0)
        {
            return Err(DiagramError::InvalidData(
                "polar values must be finite and >= 0".to_owned(),
            ));
        }

        let max = values.iter().map(|value| value.value).fold(0.0, f64::max);
        let step = if max > 0.0 {
            round_number_at_least(max / ring_count as f64)
        } else {
            1.0
        };

        Ok(Self {
            center_x,
            center_y,
            radius,
            count: values.len(),
            ring_count,
            step,
        })
    }

    /// Data value mapped to the outer ring.
    #[must_use]
    pub fn scale_max(&self) -> f64 {
        self.step * self.ring_count as f64
    }

    /// Outer vertices, the far ends of the grid spokes.
    #[must_use]
    pub fn spokes(&self) -> Vec<(f64, f64)> {
        regular_polygon(self.center_x, self.center_y, self.radius, self.count)
    }

    /// Grid rings from the innermost outward.
    #[must_use]
    pub fn rings(&self) -> Vec<PolarRing> {
        (1..=self.ring_count)
            .map(|ring| {
                let radius = self.radius * ring as f64 / self.ring_count as f64;
                let value = self.step * ring as f64;
                PolarRing {
                    radius,
                    value,
                    label: format_tick(value, self.step),
                    vertices: regular_polygon(self.center_x, self.center_y, radius, self.count),
                }
            })
            .collect()
    }

    /// Data vertices at `value / scale_max * radius` along each spoke.
    #[must_use]
    pub fn cells<'a>(&self, values: &'a [ChartValue]) -> Vec<ScreenCell<'a>> {
        let scale_max = self.scale_max();
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let (x, y) = polygon_vertex(
                    self.center_x,
                    self.center_y,
                    value.value / scale_max * self.radius,
                    self.count,
                    index,
                );
                ScreenCell { x, y, value }
            })
            .collect()
    }

    /// Name label positions just outside the outer ring.
    #[must_use]
    pub fn name_anchors(&self) -> Vec<LabelAnchor> {
        regular_polygon(
            self.center_x,
            self.center_y,
            self.radius + NAME_MARGIN_PX,
            self.count,
        )
        .into_iter()
        .map(|(x, y)| LabelAnchor {
            x,
            y,
            right_aligned: x <= self.center_x,
        })
        .collect()
    }

    /// Triangle fan from the center covering the radar polygon.
    #[must_use]
    pub fn fan_triangles(&self, cells: &[ScreenCell<'_>]) -> Vec<[(f64, f64); 3]> {
        if cells.len() < 2 {
            return Vec::new();
        }
        let center = (self.center_x, self.center_y);
        (0..cells.len())
            .map(|index| {
                let current = &cells[index];
                let next = &cells[(index + 1) % cells.len()];
                [center, (current.x, current.y), (next.x, next.y)]
            })
            .collect()
    }
}

/// Index of the first cell within `radius` pixels of `cursor`.
#[must_use]
pub fn cell_at(cells: &[ScreenCell<'_>], cursor: Option<(f64, f64)>, radius: f64) -> Option<usize> {
    let (x, y) = cursor?;
    cells
        .iter()
        .position(|cell| distance(cell.x, cell.y, x, y) <= radius)
}
