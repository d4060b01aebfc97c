//! Text input: command line, record splitting and per-kind row validation.

mod tree_assembly;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{ChartValue, Dataset, DiagramKind, PointValue, Value};
use crate::error::{DiagramError, DiagramResult};

pub use tree_assembly::{TreeRow, assemble_tree, flatten_tree};

/// Output path used when the command line omits one.
pub const DEFAULT_OUTPUT_PATH: &str = "Diagram.png";

/// Parsed `diagram <type> <input> [output]` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub kind: DiagramKind,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl CommandLine {
    /// Parses the arguments after the program name.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> DiagramResult<Self> {
        if !(2..=3).contains(&args.len()) {
            return Err(DiagramError::InvalidArguments(format!(
                "expected `<type> <input> [output]`, got {} argument(s)",
                args.len()
            )));
        }

        let kind = args[0].as_ref().parse::<DiagramKind>()?;
        let input = PathBuf::from(args[1].as_ref());
        let output = args
            .get(2)
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH), |path| {
                PathBuf::from(path.as_ref())
            });
        Ok(Self {
            kind,
            input,
            output,
        })
    }
}

/// Splits one line on commas outside double quotes.
///
/// Fields are trimmed, and a field wrapped in quotes loses the wrapping pair.
#[must_use]
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
        .into_iter()
        .map(|field| {
            let field = field.trim();
            field
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(field)
                .to_owned()
        })
        .collect()
}

fn parse_number(row: usize, field: &str, what: &str) -> DiagramResult<f64> {
    match field.parse::<f64>() {
        Ok(number) if number.is_finite() => Ok(number),
        _ => Err(DiagramError::InvalidRow {
            row,
            reason: format!("{what} must be a finite number, got `{field}`"),
        }),
    }
}

/// Validates a `name,value,detail` row for bar, circle and polar charts.
pub fn parse_chart_row(row: usize, fields: &[String]) -> DiagramResult<ChartValue> {
    let [name, value, detail] = fields else {
        return Err(DiagramError::InvalidRow {
            row,
            reason: format!("3 fields expected, got {}", fields.len()),
        });
    };
    let value = parse_number(row, value, "value")?;
    if value < 0.0 {
        return Err(DiagramError::InvalidRow {
            row,
            reason: format!("value must be >= 0, got {value}"),
        });
    }
    Ok(ChartValue::new(value, name.as_str(), detail.as_str()))
}

/// Validates an `x,y,name,detail` row for the plot.
pub fn parse_point_row(row: usize, fields: &[String]) -> DiagramResult<PointValue> {
    let [x, y, name, detail] = fields else {
        return Err(DiagramError::InvalidRow {
            row,
            reason: format!("4 fields expected, got {}", fields.len()),
        });
    };
    let x = parse_number(row, x, "x")?;
    let y = parse_number(row, y, "y")?;
    Ok(PointValue::new(x, y, name.as_str(), detail.as_str()))
}

/// Validates a `name,detail[,child...]` row; empty child names are skipped.
pub fn parse_tree_row(row: usize, fields: &[String]) -> DiagramResult<TreeRow> {
    let [name, detail, children @ ..] = fields else {
        return Err(DiagramError::InvalidRow {
            row,
            reason: format!("at least 2 fields expected, got {}", fields.len()),
        });
    };
    if name.is_empty() {
        return Err(DiagramError::InvalidRow {
            row,
            reason: "node name must not be empty".to_owned(),
        });
    }
    let children = children
        .iter()
        .filter(|child| !child.is_empty())
        .cloned()
        .collect();
    Ok(TreeRow::new(name.as_str(), detail.as_str(), children))
}

/// Parses every non-blank line of `text` into values for `kind`.
///
/// Row numbers in errors are 1-based line numbers. The first bad row aborts
/// the whole load. Tree rows are assembled, one `Value::Tree` per root.
pub fn parse_records(kind: DiagramKind, text: &str) -> DiagramResult<Vec<Value>> {
    let records = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, split_record(line)));

    let result = match kind {
        DiagramKind::Bar | DiagramKind::Circle | DiagramKind::Polar => records
            .map(|(row, fields)| parse_chart_row(row, &fields).map(Value::from))
            .collect(),
        DiagramKind::Plot => records
            .map(|(row, fields)| parse_point_row(row, &fields).map(Value::from))
            .collect(),
        DiagramKind::Tree => records
            .map(|(row, fields)| parse_tree_row(row, &fields))
            .collect::<DiagramResult<Vec<_>>>()
            .and_then(|rows| assemble_tree(&rows))
            .map(|roots| roots.into_iter().map(Value::from).collect()),
    };

    if let Err(err) = &result {
        warn!(kind = %kind, error = %err, "input rejected");
    }
    result
}

/// Reads `path`, parses it for `kind` and validates the dataset.
pub fn load_dataset(kind: DiagramKind, path: &Path) -> DiagramResult<Dataset> {
    let text = fs::read_to_string(path).map_err(|source| DiagramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_records(kind, &text)?;
    debug!(kind = %kind, path = %path.display(), records = values.len(), "input parsed");
    Dataset::from_values(kind, values)
}

#[cfg(test)]
mod tests {
    use super::split_record;

    #[test]
    fn split_record_keeps_commas_inside_quotes() {
        assert_eq!(split_record(r#"1,"a, b",2"#), vec!["1", "a, b", "2"]);
    }

    #[test]
    fn split_record_keeps_trailing_empty_field() {
        assert_eq!(split_record("a,b,"), vec!["a", "b", ""]);
    }
}
