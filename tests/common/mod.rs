//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use cleanse::pipeline::{ColumnKind, Table};
use polars::prelude::*;
use tempfile::TempDir;

/// Numeric column from plain values
pub fn num(name: &str, values: &[f64]) -> Column {
    Column::new(name.into(), values)
}

/// Numeric column with absent cells
pub fn num_opt(name: &str, values: &[Option<f64>]) -> Column {
    Column::new(name.into(), values)
}

/// Integer column
pub fn int(name: &str, values: &[i64]) -> Column {
    Column::new(name.into(), values)
}

/// Integer column with absent cells
pub fn int_opt(name: &str, values: &[Option<i64>]) -> Column {
    Column::new(name.into(), values)
}

/// Text column with absent cells
pub fn text(name: &str, values: &[Option<&str>]) -> Column {
    Column::new(name.into(), values)
}

/// Build a table, panicking on invalid shapes
pub fn table(columns: Vec<Column>) -> Table {
    Table::from_columns(columns).unwrap()
}

/// A small table mixing numeric, numeric-looking text, plain text and gaps
///
/// - `id`: integer, complete
/// - `price`: text that is numeric after trimming, one unparseable entry
/// - `city`: free text with stray whitespace and casing, one absent cell
/// - `score`: numeric with one absent cell
pub fn create_mixed_table() -> Table {
    let df = df! {
        "id" => [1i64, 2, 3, 4, 5],
        "price" => [Some(" 10.5 "), Some("11"), Some("n/a"), Some("12"), Some("10")],
        "city" => [Some(" Paris"), Some("LONDON "), None, Some("Berlin"), Some("paris")],
        "score" => [Some(3.0f64), None, Some(5.0), Some(4.0), Some(4.0)],
    }
    .unwrap();
    Table::new(df).unwrap()
}

/// Write raw CSV content into a temp dir
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a table has expected shape
pub fn assert_shape(table: &Table, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = table.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a column exists with the given kind
pub fn assert_kind(table: &Table, column: &str, kind: ColumnKind) {
    let actual = table
        .kind(column)
        .unwrap_or_else(|| panic!("Missing expected column: '{}'", column));
    assert_eq!(actual, kind, "Column '{}' should be {}", column, kind);
}

/// Numeric cells of a column, as f64
pub fn numeric_values(table: &Table, column: &str) -> Vec<Option<f64>> {
    assert_kind(table, column, ColumnKind::Numeric);
    table
        .column(column)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Text cells of a column
pub fn text_values(table: &Table, column: &str) -> Vec<Option<String>> {
    assert_kind(table, column, ColumnKind::Textual);
    table
        .column(column)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

/// Whether two tables hold the same columns, dtypes and cells
pub fn same_table(left: &Table, right: &Table) -> bool {
    left.frame().equals_missing(right.frame())
}
