//! Cleanse: Tabular Data Cleaning CLI Tool
//!
//! A command-line tool that normalizes value formats, imputes
//! missing values and removes IQR outliers from CSV or Parquet files.

use anyhow::Result;
use clap::Parser;

use cleanse::cli::Cli;
use cleanse::pipeline::{Pipeline, PipelineOutcome};
use cleanse::utils::{print_banner, print_completion, print_config};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.pipeline_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &config.source_path,
        &config.resolved_output_path(),
        &config.imputation_strategy.to_string(),
        config.outlier_multiplier,
    );

    match Pipeline::new(config).run()? {
        PipelineOutcome::Completed(_) => print_completion(),
        // Already reported by the pipeline; a missing source ends the run cleanly.
        PipelineOutcome::LoadFailed { .. } => {}
    }

    Ok(())
}
