//! Missing value imputation

use std::fmt;

use clap::ValueEnum;
use polars::prelude::*;
use serde::Serialize;

use super::table::{ColumnKind, Table};

/// Fill value for absent cells in textual columns
pub const TEXT_SENTINEL: &str = "unknown";

/// How absent cells in numeric columns are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImputationStrategy {
    /// Fill with the column mean
    #[default]
    Mean,
    /// Fill with the column median
    Median,
    /// Remove rows where the column is absent
    #[value(name = "drop")]
    #[serde(rename = "drop")]
    DropRow,
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImputationStrategy::Mean => write!(f, "mean"),
            ImputationStrategy::Median => write!(f, "median"),
            ImputationStrategy::DropRow => write!(f, "drop"),
        }
    }
}

/// What happened to one column that had absent cells
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ImputationAction {
    /// Numeric cells filled with a column statistic
    FilledNumeric {
        column: String,
        value: f64,
        cells: usize,
    },
    /// Text cells filled with the sentinel
    FilledText { column: String, cells: usize },
    /// Rows removed because this column was absent
    DroppedRows { column: String, rows: usize },
    /// Numeric column with no present values; nothing to compute a fill from
    Skipped { column: String, cells: usize },
}

/// Result of imputing a table
#[derive(Debug, Clone)]
pub struct ImputeOutcome {
    pub table: Table,
    /// One entry per column that had absent cells when it was processed
    pub actions: Vec<ImputationAction>,
}

/// Fill or drop absent cells, column by column.
///
/// Each column is handled against the table as left by the columns before
/// it, so with [`ImputationStrategy::DropRow`] the statistics and null counts
/// of later columns reflect the rows already removed. A filled numeric column
/// becomes `Float64`; columns without absent cells keep their dtype.
pub fn impute_missing(table: Table, strategy: ImputationStrategy) -> PolarsResult<ImputeOutcome> {
    let columns: Vec<(String, ColumnKind)> = table
        .columns()
        .map(|(column, kind)| (column.name().to_string(), kind))
        .collect();
    let mut frame = table.into_frame();
    let mut actions = Vec::new();

    for (name, kind) in columns {
        let column = frame.column(&name)?;
        let missing = column.null_count();
        if missing == 0 {
            continue;
        }

        let action = match (kind, strategy) {
            (ColumnKind::Textual, _) => {
                frame = frame
                    .lazy()
                    .with_column(col(name.as_str()).fill_null(lit(TEXT_SENTINEL)))
                    .collect()?;
                ImputationAction::FilledText {
                    column: name,
                    cells: missing,
                }
            }
            (ColumnKind::Numeric, ImputationStrategy::DropRow) => {
                frame = frame
                    .lazy()
                    .filter(col(name.as_str()).is_not_null())
                    .collect()?;
                ImputationAction::DroppedRows {
                    column: name,
                    rows: missing,
                }
            }
            (ColumnKind::Numeric, _) => {
                let values = column.cast(&DataType::Float64)?;
                let values = values.f64()?;
                let fill = match strategy {
                    ImputationStrategy::Median => values.median(),
                    _ => values.mean(),
                };
                match fill {
                    Some(value) => {
                        frame = frame
                            .lazy()
                            .with_column(
                                col(name.as_str())
                                    .cast(DataType::Float64)
                                    .fill_null(lit(value)),
                            )
                            .collect()?;
                        ImputationAction::FilledNumeric {
                            column: name,
                            value,
                            cells: missing,
                        }
                    }
                    None => ImputationAction::Skipped {
                        column: name,
                        cells: missing,
                    },
                }
            }
        };
        actions.push(action);
    }

    Ok(ImputeOutcome {
        table: Table::new(frame)?,
        actions,
    })
}
