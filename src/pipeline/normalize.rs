//! Format normalization: canonical text and numeric coercion

use polars::prelude::*;

use super::table::Table;

/// Result of normalizing a table
#[derive(Debug, Clone)]
pub struct NormalizeOutcome {
    pub table: Table,
    /// Textual columns that were converted to numeric, in column order
    pub converted_columns: Vec<String>,
}

/// Normalize every textual column of the table.
///
/// Present text values are trimmed and lower-cased. If at least one value of
/// the column then parses as a number, the whole column becomes `Float64`
/// and the values that do not parse become absent. Numeric columns pass
/// through. Row count and column order are unchanged.
///
/// Parsing is polars' non-strict string cast. `nan` parses to `NaN`, which
/// the table stores as absent, so it does not count as a parsed value.
/// `inf` and `infinity` parse to infinities and are kept, the same as an
/// infinity loaded from a float column.
pub fn normalize_formats(table: Table) -> PolarsResult<NormalizeOutcome> {
    let textual = table.textual_column_names();
    if textual.is_empty() {
        return Ok(NormalizeOutcome {
            table,
            converted_columns: Vec::new(),
        });
    }

    let cleaned_text: Vec<Expr> = textual.iter().map(|name| clean_text(name)).collect();
    let mut frame = table.into_frame().lazy().with_columns(cleaned_text).collect()?;

    let mut converted_columns = Vec::new();
    for name in &textual {
        let text = frame.column(name)?;
        let parsed = coerce_numeric(text)?;
        if parsed.null_count() < parsed.len() {
            frame.with_column(parsed)?;
            converted_columns.push(name.clone());
        }
    }

    Ok(NormalizeOutcome {
        table: Table::new(frame)?,
        converted_columns,
    })
}

/// Trim surrounding whitespace and lower-case a string column
pub fn clean_text(name: &str) -> Expr {
    col(name)
        .str()
        .strip_chars(lit(NULL))
        .str()
        .to_lowercase()
        .alias(name)
}

/// Cast a string column to `Float64`; unparseable values and `NaN` become null
pub fn coerce_numeric(column: &Column) -> PolarsResult<Column> {
    let parsed = column.cast(&DataType::Float64)?;
    let values: Float64Chunked = parsed
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values.with_name(column.name().clone()).into_column())
}
