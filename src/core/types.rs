use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned screen region in pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Inclusive point containment.
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

/// One named, non-negative magnitude used by bar, circle and polar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartValue {
    pub value: f64,
    pub name: String,
    pub detail: String,
}

impl ChartValue {
    #[must_use]
    pub fn new(value: f64, name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// One scatter-plot sample.
///
/// Points order by `x`, then `y`, ascending; see [`PointValue::cmp_position`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointValue {
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub detail: String,
}

impl PointValue {
    #[must_use]
    pub fn new(x: f64, y: f64, name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            x,
            y,
            name: name.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn position_key(&self) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
        (OrderedFloat(self.x), OrderedFloat(self.y))
    }

    /// Total order by `(x, y)`.
    #[must_use]
    pub fn cmp_position(&self, other: &Self) -> Ordering {
        self.position_key().cmp(&other.position_key())
    }
}

/// Returns references to `points` sorted by `(x, y)`; ties keep input order.
#[must_use]
pub fn sorted_by_position(points: &[PointValue]) -> Vec<&PointValue> {
    let mut sorted: Vec<&PointValue> = points.iter().collect();
    sorted.sort_by_key(|point| point.position_key());
    sorted
}

/// Tree node with owned, ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeValue {
    pub children: Vec<TreeValue>,
    pub name: String,
    pub detail: String,
}

impl TreeValue {
    #[must_use]
    pub fn leaf(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            children: Vec::new(),
            name: name.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn with_children(
        name: impl Into<String>,
        detail: impl Into<String>,
        children: Vec<TreeValue>,
    ) -> Self {
        Self {
            children,
            name: name.into(),
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Input record for any diagram kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Chart(ChartValue),
    Point(PointValue),
    Tree(TreeValue),
}

impl Value {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Chart(value) => &value.name,
            Self::Point(value) => &value.name,
            Self::Tree(value) => &value.name,
        }
    }

    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Chart(_) => "chart value",
            Self::Point(_) => "point value",
            Self::Tree(_) => "tree value",
        }
    }
}

impl From<ChartValue> for Value {
    fn from(value: ChartValue) -> Self {
        Self::Chart(value)
    }
}

impl From<PointValue> for Value {
    fn from(value: PointValue) -> Self {
        Self::Point(value)
    }
}

impl From<TreeValue> for Value {
    fn from(value: TreeValue) -> Self {
        Self::Tree(value)
    }
}
