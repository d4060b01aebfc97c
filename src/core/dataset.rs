use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::tree::MAX_TREE_DEPTH;
use crate::core::{ChartValue, PointValue, TreeValue, Value};
use crate::error::{DiagramError, DiagramResult};

/// The five supported diagram kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagramKind {
    Bar,
    Circle,
    Plot,
    Polar,
    Tree,
}

impl DiagramKind {
    pub const ALL: [Self; 5] = [Self::Bar, Self::Circle, Self::Plot, Self::Polar, Self::Tree];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "barchart",
            Self::Circle => "circle",
            Self::Plot => "plot",
            Self::Polar => "polar",
            Self::Tree => "tree",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = DiagramError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" | "circlediagram" | "pie" => Ok(Self::Circle),
            "barchart" | "bar_chart" | "bar" => Ok(Self::Bar),
            "plot" | "scatter" => Ok(Self::Plot),
            "polarchart" | "polar" | "radar" => Ok(Self::Polar),
            "tree" => Ok(Self::Tree),
            _ => Err(DiagramError::UnknownDiagram(name.to_owned())),
        }
    }
}

/// Validated input for one diagram.
///
/// Each variant carries only the record shape its engine can draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dataset {
    Bar(Vec<ChartValue>),
    Circle(Vec<ChartValue>),
    Plot(Vec<PointValue>),
    Polar(Vec<ChartValue>),
    Tree(TreeValue),
}

impl Dataset {
    /// Checks `values` against `kind` and builds the dataset.
    ///
    /// Rejects empty input, variants that do not belong to `kind`, chart
    /// values that are negative or non-finite, an all-zero circle, and tree
    /// input that is not a single root with unique names at most
    /// [`MAX_TREE_DEPTH`] levels deep.
    pub fn from_values(kind: DiagramKind, values: Vec<Value>) -> DiagramResult<Self> {
        if values.is_empty() {
            return Err(DiagramError::InvalidData(format!(
                "{kind} diagram requires at least one value"
            )));
        }
        let count = values.len();

        let dataset = match kind {
            DiagramKind::Bar => Self::Bar(chart_values(kind, values)?),
            DiagramKind::Polar => Self::Polar(chart_values(kind, values)?),
            DiagramKind::Circle => {
                let values = chart_values(kind, values)?;
                if values.iter().map(|value| value.value).sum::<f64>() <= 0.0 {
                    return Err(DiagramError::InvalidData(
                        "circle diagram requires a positive value sum".to_owned(),
                    ));
                }
                Self::Circle(values)
            }
            DiagramKind::Plot => {
                let points = values
                    .into_iter()
                    .map(|value| match value {
                        Value::Point(point) if point.x.is_finite() && point.y.is_finite() => {
                            Ok(point)
                        }
                        Value::Point(_) => Err(DiagramError::InvalidData(
                            "point coordinates must be finite".to_owned(),
                        )),
                        other => Err(mismatch(kind, &other)),
                    })
                    .collect::<DiagramResult<Vec<_>>>()?;
                Self::Plot(points)
            }
            DiagramKind::Tree => {
                let mut roots = values.into_iter();
                let root = match (roots.next(), roots.next()) {
                    (Some(Value::Tree(root)), None) => root,
                    (Some(other), None) => return Err(mismatch(kind, &other)),
                    _ => {
                        return Err(DiagramError::InvalidTree(format!(
                            "expected exactly one root, found {count}"
                        )));
                    }
                };
                ensure_unique_names(&root)?;
                Self::Tree(root)
            }
        };

        debug!(kind = %kind, count, "dataset validated");
        Ok(dataset)
    }

    #[must_use]
    pub fn kind(&self) -> DiagramKind {
        match self {
            Self::Bar(_) => DiagramKind::Bar,
            Self::Circle(_) => DiagramKind::Circle,
            Self::Plot(_) => DiagramKind::Plot,
            Self::Polar(_) => DiagramKind::Polar,
            Self::Tree(_) => DiagramKind::Tree,
        }
    }
}

fn mismatch(kind: DiagramKind, value: &Value) -> DiagramError {
    DiagramError::InvalidData(format!(
        "{kind} diagram cannot draw a {} (`{}`)",
        value.variant_name(),
        value.name()
    ))
}

fn chart_values(kind: DiagramKind, values: Vec<Value>) -> DiagramResult<Vec<ChartValue>> {
    values
        .into_iter()
        .map(|value| match value {
            Value::Chart(chart) if chart.value.is_finite() && chart.value >= 0.0 => Ok(chart),
            Value::Chart(chart) => Err(DiagramError::InvalidData(format!(
                "value of `{}` must be finite and >= 0",
                chart.name
            ))),
            other => Err(mismatch(kind, &other)),
        })
        .collect()
}

fn ensure_unique_names(root: &TreeValue) -> DiagramResult<()> {
    let mut seen = HashSet::new();
    let mut stack = vec![(root, 1)];
    while let Some((node, level)) = stack.pop() {
        if level > MAX_TREE_DEPTH {
            return Err(DiagramError::InvalidTree(format!(
                "tree is deeper than {MAX_TREE_DEPTH} levels"
            )));
        }
        if !seen.insert(node.name.as_str()) {
            return Err(DiagramError::InvalidTree(format!(
                "duplicate node name `{}`",
                node.name
            )));
        }
        stack.extend(node.children.iter().map(|child| (child, level + 1)));
    }
    Ok(())
}
