//! JSON export of a cleaning run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ImputationAction, ImputationStrategy, OutlierBounds, RunReport};
use crate::report::TableSummary;

/// Metadata about the cleaning run
#[derive(Serialize)]
pub struct CleaningMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Cleanse version
    pub cleanse_version: String,
    pub input_file: String,
    pub output_file: String,
    pub imputation_strategy: ImputationStrategy,
    pub outlier_multiplier: f64,
}

/// Counts describing what the run changed
#[derive(Serialize)]
pub struct CleaningTotals {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns_converted: usize,
    pub rows_dropped_missing: usize,
    pub outlier_rows_removed: usize,
}

/// Complete cleaning report
#[derive(Serialize)]
pub struct CleaningReportExport<'a> {
    pub metadata: CleaningMetadata,
    pub totals: CleaningTotals,
    pub converted_columns: &'a [String],
    pub imputation: &'a [ImputationAction],
    pub outlier_bounds: &'a [OutlierBounds],
    pub original: &'a TableSummary,
    pub cleaned: &'a TableSummary,
}

/// Report path derived from the output file: `<stem>_cleaning_report.json`
/// in the same directory.
pub fn cleaning_report_path(output: &Path) -> PathBuf {
    let parent = output.parent().unwrap_or_else(|| Path::new("."));
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    parent.join(format!("{}_cleaning_report.json", stem))
}

/// Write the cleaning report of a finished run as pretty-printed JSON
pub fn export_cleaning_report(
    report: &RunReport,
    input_file: &Path,
    strategy: ImputationStrategy,
    outlier_multiplier: f64,
    output_path: &Path,
) -> Result<()> {
    let rows_dropped_missing = report
        .imputation
        .iter()
        .map(|action| match action {
            ImputationAction::DroppedRows { rows, .. } => *rows,
            _ => 0,
        })
        .sum();

    let export = CleaningReportExport {
        metadata: CleaningMetadata {
            timestamp: Utc::now().to_rfc3339(),
            cleanse_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            output_file: report.output_path.display().to_string(),
            imputation_strategy: strategy,
            outlier_multiplier,
        },
        totals: CleaningTotals {
            rows_before: report.original.rows,
            rows_after: report.cleaned.rows,
            columns_converted: report.converted_columns.len(),
            rows_dropped_missing,
            outlier_rows_removed: report.outlier_rows_removed,
        },
        converted_columns: &report.converted_columns,
        imputation: &report.imputation,
        outlier_bounds: &report.outlier_bounds,
        original: &report.original,
        cleaned: &report.cleaned,
    };

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize cleaning report")?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write cleaning report: {}", output_path.display()))?;

    Ok(())
}
