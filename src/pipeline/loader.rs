//! Table source and sink for CSV and Parquet files

use std::path::{Path, PathBuf};

use polars::prelude::*;

use super::error::CleanError;
use super::table::Table;

/// Supported on-disk formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Parquet,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, CleanError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "parquet" => Ok(FileFormat::Parquet),
            _ => Err(CleanError::UnsupportedFormat(extension)),
        }
    }
}

/// Load a table from a CSV or Parquet file.
///
/// Column dtypes are kept as polars reads them, so integer columns stay
/// integer through to the saved output. A CSV read that fails with a partial
/// schema scan is retried once with a full scan, so a column whose first
/// rows look numeric but which holds text further down loads as text.
///
/// # Arguments
/// * `path` - Source file
/// * `infer_schema_length` - Rows used for CSV schema inference (0 = full scan)
pub fn load_table(path: &Path, infer_schema_length: usize) -> Result<Table, CleanError> {
    if !path.exists() {
        return Err(CleanError::SourceNotFound(path.to_path_buf()));
    }

    let read_err = |source: PolarsError| CleanError::Read {
        path: path.to_path_buf(),
        source,
    };

    let df = match FileFormat::from_path(path)? {
        FileFormat::Csv => {
            let schema_length = (infer_schema_length > 0).then_some(infer_schema_length);
            match read_csv(path, schema_length) {
                Ok(df) => df,
                Err(_) if schema_length.is_some() => read_csv(path, None).map_err(read_err)?,
                Err(err) => return Err(read_err(err)),
            }
        }
        FileFormat::Parquet => LazyFrame::scan_parquet(path, Default::default())
            .and_then(|lf| lf.collect())
            .map_err(read_err)?,
    };

    Table::new(df).map_err(read_err)
}

fn read_csv(path: &Path, infer_schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(infer_schema_length)
        .finish()?
        .collect()
}

/// Persist a table to CSV or Parquet, chosen by the destination extension
pub fn save_table(table: &Table, path: &Path) -> Result<(), CleanError> {
    let format = FileFormat::from_path(path)?;
    let write_err = |source: PolarsError| CleanError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut df = table.frame().clone();
    let mut file = std::fs::File::create(path).map_err(|source| CleanError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match format {
        FileFormat::Csv => {
            CsvWriter::new(&mut file).finish(&mut df).map_err(write_err)?;
        }
        FileFormat::Parquet => {
            ParquetWriter::new(file).finish(&mut df).map_err(write_err)?;
        }
    }

    Ok(())
}

/// Destination derived from a source path: same directory and extension,
/// with `_cleaned` appended to the stem (`data.csv` -> `data_cleaned.csv`).
pub fn cleaned_output_path(source: &Path) -> PathBuf {
    let parent = source.parent().unwrap_or_else(|| Path::new("."));
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv");
    parent.join(format!("{}_cleaned.{}", stem, extension))
}
