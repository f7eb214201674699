//! Unit tests for format normalization

use cleanse::pipeline::{coerce_numeric, normalize_formats, ColumnKind};
use polars::prelude::{Column, DataType};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_all_numeric_text_column_is_fully_converted() {
    let t = table(vec![text("amount", &[Some(" 1 "), Some("2.5"), Some("-3"), Some("1e2")])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "amount", ColumnKind::Numeric);
    assert_eq!(
        numeric_values(&outcome.table, "amount"),
        vec![Some(1.0), Some(2.5), Some(-3.0), Some(100.0)]
    );
    assert_eq!(outcome.table.null_count(), 0, "No absent cells expected");
    assert_eq!(outcome.converted_columns, vec!["amount".to_string()]);
}

#[test]
fn test_non_numeric_column_is_trimmed_and_lowercased() {
    let t = table(vec![text("city", &[Some("  Paris "), Some("LONDON"), None])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "city", ColumnKind::Textual);
    assert_eq!(
        text_values(&outcome.table, "city"),
        vec![Some("paris".to_string()), Some("london".to_string()), None]
    );
    assert_eq!(outcome.table.height(), 3);
    assert!(outcome.converted_columns.is_empty());
}

#[test]
fn test_single_numeric_value_converts_whole_column() {
    let t = table(vec![text("code", &[Some("alpha"), Some("42"), Some("beta"), None])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "code", ColumnKind::Numeric);
    assert_eq!(
        numeric_values(&outcome.table, "code"),
        vec![None, Some(42.0), None, None],
        "Unparseable entries become absent"
    );
}

#[test]
fn test_numeric_columns_pass_through() {
    let t = table(vec![num_opt("x", &[Some(1.5), None, Some(-2.0)])]);

    let outcome = normalize_formats(t.clone()).unwrap();

    assert!(same_table(&outcome.table, &t));
    assert!(outcome.converted_columns.is_empty());
}

#[test]
fn test_row_count_and_column_order_preserved() {
    let outcome = normalize_formats(create_mixed_table()).unwrap();

    assert_shape(&outcome.table, 5, 4);
    assert_eq!(
        outcome.table.column_names(),
        vec!["id", "price", "city", "score"]
    );
    assert_eq!(outcome.converted_columns, vec!["price".to_string()]);
    assert_eq!(
        numeric_values(&outcome.table, "price"),
        vec![Some(10.5), Some(11.0), None, Some(12.0), Some(10.0)]
    );
}

#[test]
fn test_empty_column_stays_textual() {
    let t = table(vec![text("notes", &[None, None])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "notes", ColumnKind::Textual);
    assert_eq!(outcome.table.null_count(), 2);
}

#[test]
fn test_nan_text_is_absent_and_infinity_is_kept() {
    let t = table(vec![text("reading", &[Some("NaN"), Some(" Inf "), Some("2"), Some("1,000")])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "reading", ColumnKind::Numeric);
    assert_eq!(
        numeric_values(&outcome.table, "reading"),
        vec![None, Some(f64::INFINITY), Some(2.0), None]
    );
}

#[test]
fn test_only_nan_text_is_not_converted() {
    let t = table(vec![text("reading", &[Some("nan"), Some("n/a")])]);

    let outcome = normalize_formats(t).unwrap();

    assert_kind(&outcome.table, "reading", ColumnKind::Textual);
    assert!(outcome.converted_columns.is_empty());
}

#[test]
fn test_coerce_numeric_nulls_unparseable_values() {
    let column = Column::new("c".into(), &[Some("a"), None, Some("nan"), Some(".5")]);

    let parsed = coerce_numeric(&column).unwrap();

    assert_eq!(parsed.dtype(), &DataType::Float64);
    assert_eq!(parsed.name().as_str(), "c");
    assert_eq!(
        parsed.f64().unwrap().into_iter().collect::<Vec<_>>(),
        vec![None, None, None, Some(0.5)]
    );
}

#[test]
fn test_integer_columns_keep_their_dtype() {
    let outcome = normalize_formats(create_mixed_table()).unwrap();

    assert_eq!(outcome.table.column("id").unwrap().dtype(), &DataType::Int64);
}
