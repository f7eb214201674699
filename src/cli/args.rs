//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::{
    cleaned_output_path, ImputationStrategy, PipelineConfig, DEFAULT_OUTLIER_MULTIPLIER,
    DEFAULT_SOURCE,
};

/// Cleanse - Normalize formats, impute missing values and remove outliers from tabular data
#[derive(Parser, Debug)]
#[command(name = "cleanse")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    pub input: PathBuf,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_cleaned' suffix (e.g., data.csv → data_cleaned.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How to handle missing values in numeric columns.
    /// Textual columns are always filled with "unknown".
    #[arg(short, long, value_enum, default_value_t = ImputationStrategy::Mean)]
    pub strategy: ImputationStrategy,

    /// IQR multiplier for outlier bounds: rows outside
    /// [Q1 - m*IQR, Q3 + m*IQR] are removed, one numeric column at a time
    #[arg(long, default_value_t = DEFAULT_OUTLIER_MULTIPLIER, value_parser = validate_outlier_multiplier)]
    pub outlier_multiplier: f64,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Write a JSON cleaning report next to the output file
    #[arg(long, default_value = "false")]
    pub export_report: bool,
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| cleaned_output_path(&self.input))
    }

    /// Build the pipeline configuration from the parsed arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            source_path: self.input.clone(),
            output_path: Some(self.output_path()),
            imputation_strategy: self.strategy,
            outlier_multiplier: self.outlier_multiplier,
            infer_schema_length: self.infer_schema_length,
            export_report: self.export_report,
        }
    }
}

/// Validator for outlier_multiplier parameter
fn validate_outlier_multiplier(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !value.is_finite() || value < 0.0 {
        Err(format!(
            "outlier_multiplier must be a non-negative number, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
