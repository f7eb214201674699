//! IQR-based outlier removal

use polars::prelude::*;
use serde::Serialize;

use super::table::Table;

/// Default IQR multiplier (Tukey fences)
pub const DEFAULT_OUTLIER_MULTIPLIER: f64 = 1.5;

/// Acceptable range for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierBounds {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
    /// Rows removed while filtering on this column
    pub rows_removed: usize,
}

impl OutlierBounds {
    /// Derive bounds from a column's linear-interpolated quartiles; `None`
    /// when the column has no present values
    pub fn from_column(column: &Column, multiplier: f64) -> PolarsResult<Option<Self>> {
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let q1 = values.quantile(0.25, QuantileMethod::Linear)?;
        let q3 = values.quantile(0.75, QuantileMethod::Linear)?;

        Ok(q1.zip(q3).map(|(q1, q3)| {
            let iqr = q3 - q1;
            Self {
                column: column.name().to_string(),
                q1,
                q3,
                lower: q1 - multiplier * iqr,
                upper: q3 + multiplier * iqr,
                rows_removed: 0,
            }
        }))
    }

    /// Rows whose value lies in `[lower, upper]`; absent values do not
    pub fn contains_expr(&self) -> Expr {
        let value = col(self.column.as_str()).cast(DataType::Float64);
        value
            .clone()
            .gt_eq(lit(self.lower))
            .and(value.lt_eq(lit(self.upper)))
            .fill_null(lit(false))
    }
}

/// Result of outlier filtering
#[derive(Debug, Clone)]
pub struct OutlierOutcome {
    pub table: Table,
    /// Rows at entry minus rows at exit
    pub rows_removed: usize,
    /// Bounds used for each numeric column that had present values
    pub bounds: Vec<OutlierBounds>,
}

/// Remove rows outside `[Q1 - m*IQR, Q3 + m*IQR]`, one numeric column at a time.
///
/// Each column's quartiles are computed on the table left by the previous
/// columns, so the surviving rows depend on column order. A row whose value
/// is absent fails the range test. A column with no present values has no
/// bounds and removes every remaining row.
pub fn remove_outliers(table: Table, multiplier: f64) -> PolarsResult<OutlierOutcome> {
    let original_len = table.height();
    let numeric = table.numeric_column_names();
    let mut frame = table.into_frame();
    let mut bounds = Vec::new();

    for name in numeric {
        let before = frame.height();
        let column_bounds = OutlierBounds::from_column(frame.column(&name)?, multiplier)?;
        match column_bounds {
            Some(mut column_bounds) => {
                frame = frame.lazy().filter(column_bounds.contains_expr()).collect()?;
                column_bounds.rows_removed = before - frame.height();
                bounds.push(column_bounds);
            }
            None => frame = frame.head(Some(0)),
        }
    }

    Ok(OutlierOutcome {
        rows_removed: original_len - frame.height(),
        table: Table::new(frame)?,
        bounds,
    })
}
