//! Pipeline orchestration: load, summarize, clean, summarize, save

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::PolarsResult;

use super::loader::{cleaned_output_path, load_table, save_table};
use super::missing::{impute_missing, ImputationAction, ImputationStrategy};
use super::normalize::normalize_formats;
use super::outliers::{remove_outliers, OutlierBounds, DEFAULT_OUTLIER_MULTIPLIER};
use super::table::Table;
use crate::report::{cleaning_report_path, export_cleaning_report, summarize_table, TableSummary};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_count, print_failure,
    print_info, print_step_header, print_step_time, print_success,
};

/// Default source when no input is given
pub const DEFAULT_SOURCE: &str = "data.csv";

/// Everything a pipeline run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub source_path: PathBuf,
    /// Explicit destination; derived from the source when `None`
    pub output_path: Option<PathBuf>,
    pub imputation_strategy: ImputationStrategy,
    pub outlier_multiplier: f64,
    /// Rows used for CSV schema inference (0 = full scan)
    pub infer_schema_length: usize,
    /// Write a JSON cleaning report next to the output
    pub export_report: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
            output_path: None,
            imputation_strategy: ImputationStrategy::Mean,
            outlier_multiplier: DEFAULT_OUTLIER_MULTIPLIER,
            infer_schema_length: 10_000,
            export_report: false,
        }
    }
}

impl PipelineConfig {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Default::default()
        }
    }

    /// Destination file: the explicit output, or `<stem>_cleaned.<ext>`
    pub fn resolved_output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| cleaned_output_path(&self.source_path))
    }
}

/// Stages of a run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    SummarizingOriginal,
    Normalizing,
    Imputing,
    FilteringOutliers,
    SummarizingCleaned,
    Persisting,
    Done,
    Failed,
}

impl PipelineStage {
    pub fn title(&self) -> &'static str {
        match self {
            PipelineStage::Loading => "Load Data",
            PipelineStage::SummarizingOriginal => "Original Data Summary",
            PipelineStage::Normalizing => "Normalize Formats",
            PipelineStage::Imputing => "Handle Missing Values",
            PipelineStage::FilteringOutliers => "Remove Outliers",
            PipelineStage::SummarizingCleaned => "Cleaned Data Summary",
            PipelineStage::Persisting => "Save Results",
            PipelineStage::Done => "Done",
            PipelineStage::Failed => "Failed",
        }
    }

    /// 1-based step number for the working stages
    fn step(&self) -> u8 {
        match self {
            PipelineStage::Loading => 1,
            PipelineStage::SummarizingOriginal => 2,
            PipelineStage::Normalizing => 3,
            PipelineStage::Imputing => 4,
            PipelineStage::FilteringOutliers => 5,
            PipelineStage::SummarizingCleaned => 6,
            PipelineStage::Persisting => 7,
            PipelineStage::Done | PipelineStage::Failed => 0,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Result of the transformation stages, without any I/O
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub table: Table,
    pub converted_columns: Vec<String>,
    pub imputation: Vec<ImputationAction>,
    pub outlier_rows_removed: usize,
    pub outlier_bounds: Vec<OutlierBounds>,
}

/// Normalize, impute and filter outliers, in that order
pub fn clean_table(
    table: Table,
    strategy: ImputationStrategy,
    outlier_multiplier: f64,
) -> PolarsResult<CleanOutcome> {
    let normalized = normalize_formats(table)?;
    let imputed = impute_missing(normalized.table, strategy)?;
    let filtered = remove_outliers(imputed.table, outlier_multiplier)?;

    Ok(CleanOutcome {
        table: filtered.table,
        converted_columns: normalized.converted_columns,
        imputation: imputed.actions,
        outlier_rows_removed: filtered.rows_removed,
        outlier_bounds: filtered.bounds,
    })
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub converted_columns: Vec<String>,
    pub imputation: Vec<ImputationAction>,
    pub outlier_rows_removed: usize,
    pub outlier_bounds: Vec<OutlierBounds>,
    pub original: TableSummary,
    pub cleaned: TableSummary,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// Every stage ran and the cleaned table was saved
    Completed(Box<RunReport>),
    /// The source could not be loaded; nothing else ran
    LoadFailed { path: PathBuf, reason: String },
}

impl PipelineOutcome {
    /// The stage the run ended in
    pub fn final_stage(&self) -> PipelineStage {
        match self {
            PipelineOutcome::Completed(_) => PipelineStage::Done,
            PipelineOutcome::LoadFailed { .. } => PipelineStage::Failed,
        }
    }
}

/// A single cleaning run over one source file
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage in order.
    ///
    /// A load failure is reported and returned as
    /// [`PipelineOutcome::LoadFailed`]; no later stage runs. Failures while
    /// saving are returned as errors.
    pub fn run(&self) -> Result<PipelineOutcome> {
        let config = &self.config;
        let source = config.source_path.as_path();

        enter_stage(PipelineStage::Loading);
        let step_start = Instant::now();
        let spinner = create_spinner("Reading source table...");
        let table = match load_table(source, config.infer_schema_length) {
            Ok(table) => table,
            Err(err) => {
                spinner.finish_and_clear();
                print_failure(&err.to_string());
                return Ok(PipelineOutcome::LoadFailed {
                    path: source.to_path_buf(),
                    reason: err.to_string(),
                });
            }
        };
        if table.height() == 0 {
            finish_with_warning(&spinner, "Data loaded, but the table has no rows.");
        } else {
            finish_with_success(&spinner, "Data loaded successfully.");
        }
        let (rows, cols) = table.shape();
        println!("      Rows: {}", rows);
        println!("      Columns: {}", cols);
        print_step_time(step_start.elapsed());

        enter_stage(PipelineStage::SummarizingOriginal);
        let original =
            summarize_table(&table, "Original Data").context("Failed to summarize source table")?;
        original.display();

        enter_stage(PipelineStage::Normalizing);
        let normalized = normalize_formats(table).context("Format normalization failed")?;
        if normalized.converted_columns.is_empty() {
            print_info("No textual columns converted to numeric");
        }
        for column in &normalized.converted_columns {
            print_success(&format!("Converted column to numeric: {}", column));
        }

        enter_stage(PipelineStage::Imputing);
        print_info(&format!("Strategy: {}", config.imputation_strategy));
        let imputed = impute_missing(normalized.table, config.imputation_strategy)
            .context("Missing value imputation failed")?;
        print_imputation_actions(&imputed.actions);

        enter_stage(PipelineStage::FilteringOutliers);
        let filtered = remove_outliers(imputed.table, config.outlier_multiplier)
            .context("Outlier removal failed")?;
        for bounds in &filtered.bounds {
            println!(
                "      {}: [{:.4}, {:.4}] removed {}",
                bounds.column,
                bounds.lower,
                bounds.upper,
                style(bounds.rows_removed).yellow()
            );
        }
        print_count(
            "Outlier rows removed:",
            filtered.rows_removed,
            Some(&format!("(IQR × {})", config.outlier_multiplier)),
        );

        enter_stage(PipelineStage::SummarizingCleaned);
        let cleaned = summarize_table(&filtered.table, "Cleaned Data")
            .context("Failed to summarize cleaned table")?;
        cleaned.display();

        enter_stage(PipelineStage::Persisting);
        let output_path = config.resolved_output_path();
        let step_start = Instant::now();
        let spinner = create_spinner("Writing output file...");
        if let Err(err) = save_table(&filtered.table, &output_path) {
            spinner.finish_and_clear();
            return Err(anyhow::Error::new(err).context(format!(
                "Failed to save cleaned data to {}",
                output_path.display()
            )));
        }
        finish_with_success(
            &spinner,
            &format!("Cleaned data saved to: {}", output_path.display()),
        );
        print_step_time(step_start.elapsed());

        let mut report = RunReport {
            output_path,
            report_path: None,
            converted_columns: normalized.converted_columns,
            imputation: imputed.actions,
            outlier_rows_removed: filtered.rows_removed,
            outlier_bounds: filtered.bounds,
            original,
            cleaned,
        };

        if config.export_report {
            let report_path = cleaning_report_path(&report.output_path);
            export_cleaning_report(
                &report,
                source,
                config.imputation_strategy,
                config.outlier_multiplier,
                &report_path,
            )?;
            print_success(&format!("Cleaning report saved to: {}", report_path.display()));
            report.report_path = Some(report_path);
        }

        Ok(PipelineOutcome::Completed(Box::new(report)))
    }
}

fn enter_stage(stage: PipelineStage) {
    print_step_header(stage.step(), stage.title());
}

fn print_imputation_actions(actions: &[ImputationAction]) {
    if actions.is_empty() {
        print_info("No missing values found");
        return;
    }

    for action in actions {
        match action {
            ImputationAction::FilledNumeric {
                column,
                value,
                cells,
            } => print_success(&format!(
                "{}: filled {} cell(s) with {:.4}",
                column, cells, value
            )),
            ImputationAction::FilledText { column, cells } => print_success(&format!(
                "{}: filled {} cell(s) with '{}'",
                column,
                cells,
                super::missing::TEXT_SENTINEL
            )),
            ImputationAction::DroppedRows { column, rows } => println!(
                "      {}: dropped {} row(s)",
                column,
                style(rows).yellow().bold()
            ),
            ImputationAction::Skipped { column, cells } => print_info(&format!(
                "{}: {} cell(s) left missing, column has no values",
                column, cells
            )),
        }
    }
}
