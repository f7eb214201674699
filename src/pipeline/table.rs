//! Table model shared by every cleaning stage

use std::fmt;

use polars::prelude::*;
use serde::Serialize;

/// Classification of a column, derived from its current dtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Textual,
}

impl ColumnKind {
    pub fn of(dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            ColumnKind::Numeric
        } else {
            ColumnKind::Textual
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Textual => write!(f, "textual"),
        }
    }
}

/// A DataFrame together with the kind of each of its columns.
///
/// Construction puts the frame into canonical form: float `NaN` becomes
/// null, and every non-numeric dtype other than `String` (booleans, dates,
/// categoricals, ...) is cast to `String`. Kinds are derived once, when the
/// table is built, so each stage's output carries freshly computed kinds.
#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Table {
    pub fn new(frame: DataFrame) -> PolarsResult<Self> {
        let frame = canonicalize(frame)?;
        let kinds = frame
            .get_columns()
            .iter()
            .map(|c| ColumnKind::of(c.dtype()))
            .collect();
        Ok(Self { frame, kinds })
    }

    /// Build a table from columns; names must be unique and lengths equal
    pub fn from_columns(columns: Vec<Column>) -> PolarsResult<Self> {
        Self::new(DataFrame::new(columns)?)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.frame.shape()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.frame.column(name).ok()
    }

    pub fn kind(&self, name: &str) -> Option<ColumnKind> {
        let index = self.frame.get_column_index(name)?;
        self.kinds.get(index).copied()
    }

    /// Columns paired with their kinds, in column order
    pub fn columns(&self) -> impl Iterator<Item = (&Column, ColumnKind)> {
        self.frame
            .get_columns()
            .iter()
            .zip(self.kinds.iter().copied())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Names of the columns of the given kind, in column order
    fn names_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.columns()
            .filter(|(_, k)| *k == kind)
            .map(|(c, _)| c.name().to_string())
            .collect()
    }

    pub fn numeric_column_names(&self) -> Vec<String> {
        self.names_of_kind(ColumnKind::Numeric)
    }

    pub fn textual_column_names(&self) -> Vec<String> {
        self.names_of_kind(ColumnKind::Textual)
    }

    /// Total number of absent cells across all columns
    pub fn null_count(&self) -> usize {
        self.frame.get_columns().iter().map(|c| c.null_count()).sum()
    }
}

fn canonicalize(frame: DataFrame) -> PolarsResult<DataFrame> {
    let exprs: Vec<Expr> = frame
        .get_columns()
        .iter()
        .filter_map(|c| {
            let name = c.name().as_str();
            match c.dtype() {
                DataType::Float32 | DataType::Float64 => {
                    Some(col(name).fill_nan(lit(NULL)).alias(name))
                }
                DataType::String => None,
                dtype if dtype.is_primitive_numeric() => None,
                _ => Some(col(name).cast(DataType::String).alias(name)),
            }
        })
        .collect();

    if exprs.is_empty() {
        return Ok(frame);
    }
    frame.lazy().with_columns(exprs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_becomes_absent() {
        let frame = df! {
            "x" => [Some(1.0f64), Some(f64::NAN), None],
        }
        .unwrap();

        let table = Table::new(frame).unwrap();

        assert_eq!(table.column("x").unwrap().null_count(), 2);
        assert_eq!(table.kind("x"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_kinds_follow_dtypes() {
        let frame = df! {
            "id" => [1i64, 2, 3],
            "flag" => [true, false, true],
            "name" => ["a", "b", "c"],
        }
        .unwrap();

        let table = Table::new(frame).unwrap();

        assert_eq!(table.kind("id"), Some(ColumnKind::Numeric));
        assert_eq!(table.kind("flag"), Some(ColumnKind::Textual));
        assert_eq!(table.kind("name"), Some(ColumnKind::Textual));
        assert_eq!(table.column("flag").unwrap().dtype(), &DataType::String);
        assert_eq!(table.column("id").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let columns = vec![
            Column::new("a".into(), [1.0f64]),
            Column::new("a".into(), [2.0f64]),
        ];
        assert!(Table::from_columns(columns).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let columns = vec![
            Column::new("a".into(), [1.0f64, 2.0]),
            Column::new("b".into(), [2.0f64]),
        ];
        assert!(Table::from_columns(columns).is_err());
    }
}
