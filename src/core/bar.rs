use crate::core::geometry::{pseudo_color, round_number_at_least};
use crate::core::{ChartValue, ScreenRect};
use crate::error::{DiagramError, DiagramResult};
use crate::render::Color;

/// Space reserved left of the first column for grid labels.
pub const LEFT_INDENT_PX: f64 = 80.0;

/// Gap between a column edge and the text above/below the plotting band.
pub const TEXT_GAP_PX: f64 = 5.0;

pub const GRID_LINE_COUNT: usize = 11;

/// Font size for a bar chart of the given canvas width, capped at 15 px.
#[must_use]
pub fn bar_font_size(width: f64) -> f64 {
    (15.0 * width / 500.0).min(15.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'a> {
    pub rect: ScreenRect,
    pub color: Color,
    pub value: &'a ChartValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGridLine {
    pub y: f64,
    pub value: f64,
    pub label: String,
}

/// Proportional column layout.
///
/// Columns are `column_width` wide with half-column gaps, starting
/// [`LEFT_INDENT_PX`] right of the rect; heights scale against a round
/// maximum so the top grid line carries a readable value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub rect: ScreenRect,
    pub font_size: f64,
    pub scale_max: f64,
    pub column_width: f64,
    pub factor: f64,
}

impl BarLayout {
    pub fn new(rect: ScreenRect, values: &[ChartValue], font_size: f64) -> DiagramResult<Self> {
        if values.is_empty() {
            return Err(DiagramError::InvalidData(
                "bar chart requires at least one value".to_owned(),
            ));
        }
        if !rect.is_valid() || rect.width() <= LEFT_INDENT_PX {
            return Err(DiagramError::InvalidData(format!(
                "bar rect must be finite and wider than {LEFT_INDENT_PX} px"
            )));
        }
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(DiagramError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if values
            .iter()
            .any(|value| !value.value.is_finite() || value.value < 0.0)
        {
            return Err(DiagramError::InvalidData(
                "bar values must be finite and >= 0".to_owned(),
            ));
        }

        let max = values.iter().map(|value| value.value).fold(0.0, f64::max);
        let scale_max = if max > 0.0 {
            round_number_at_least(max)
        } else {
            1.0
        };
        let band = rect.height() - 2.0 * (font_size + TEXT_GAP_PX);
        if band <= 0.0 {
            return Err(DiagramError::InvalidData(
                "bar rect is too short for its labels".to_owned(),
            ));
        }
        let count = values.len() as f64;

        Ok(Self {
            rect,
            font_size,
            scale_max,
            column_width: (rect.width() - LEFT_INDENT_PX) / (1.5 * count - 0.5),
            factor: band / scale_max,
        })
    }

    /// Screen y of the zero line.
    #[must_use]
    pub fn baseline(&self) -> f64 {
        self.rect.bottom - self.font_size - TEXT_GAP_PX
    }

    #[must_use]
    pub fn grid_lines(&self) -> Vec<BarGridLine> {
        let step = self.scale_max / (GRID_LINE_COUNT - 1) as f64;
        (0..GRID_LINE_COUNT)
            .map(|index| {
                let value = index as f64 * step;
                BarGridLine {
                    y: self.baseline() - value * self.factor,
                    value,
                    label: format!("{value:.2}"),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn columns<'a>(&self, values: &'a [ChartValue]) -> Vec<Column<'a>> {
        let baseline = self.baseline();
        let mut left = self.rect.left + LEFT_INDENT_PX;
        values
            .iter()
            .map(|value| {
                let rect = ScreenRect::new(
                    left,
                    baseline - value.value * self.factor,
                    left + self.column_width,
                    baseline,
                );
                left += self.column_width * 1.5;
                Column {
                    rect,
                    color: pseudo_color(value.value),
                    value,
                }
            })
            .collect()
    }
}

/// Index of the first column whose rect contains `cursor`.
#[must_use]
pub fn column_at(columns: &[Column<'_>], cursor: Option<(f64, f64)>) -> Option<usize> {
    let (x, y) = cursor?;
    columns.iter().position(|column| column.rect.contains(x, y))
}
