//! Descriptive table summaries shown before and after cleaning

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use polars::prelude::{ChunkAgg, ChunkQuantile, ChunkVar, Column, DataType, PolarsResult, QuantileMethod};
use serde::Serialize;

use crate::pipeline::{ColumnKind, Table as DataTable};

/// Shape and null information for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null: usize,
    pub null_count: usize,
}

/// Descriptive statistics over the present values of a numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl NumericStats {
    /// `None` when the column has no present values
    pub fn from_column(column: &Column) -> PolarsResult<Option<Self>> {
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;
        let count = values.len() - values.null_count();

        let quartile = |q: f64| values.quantile(q, QuantileMethod::Linear);
        let (Some(mean), Some(min), Some(max), Some(q1), Some(median), Some(q3)) = (
            values.mean(),
            values.min(),
            values.max(),
            quartile(0.25)?,
            quartile(0.5)?,
            quartile(0.75)?,
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            count,
            mean,
            std: if count > 1 { values.std(1) } else { None },
            min,
            q1,
            median,
            q3,
            max,
        }))
    }
}

/// Descriptive statistics for one numeric column, by name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericColumnStats {
    pub name: String,
    #[serde(flatten)]
    pub stats: NumericStats,
}

/// Read-only snapshot of a table's shape, nulls and numeric statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub label: String,
    pub rows: usize,
    pub columns: usize,
    pub column_summaries: Vec<ColumnSummary>,
    /// One entry per numeric column that has at least one present value
    pub numeric_stats: Vec<NumericColumnStats>,
    /// Whether the table had any numeric column at all
    pub has_numeric_columns: bool,
}

/// Summarize a table without modifying it
pub fn summarize_table(table: &DataTable, label: &str) -> PolarsResult<TableSummary> {
    let column_summaries = table
        .columns()
        .map(|(column, kind)| ColumnSummary {
            name: column.name().to_string(),
            kind,
            non_null: column.len() - column.null_count(),
            null_count: column.null_count(),
        })
        .collect();

    let mut numeric_stats = Vec::new();
    for (column, kind) in table.columns() {
        if kind != ColumnKind::Numeric {
            continue;
        }
        if let Some(stats) = NumericStats::from_column(column)? {
            numeric_stats.push(NumericColumnStats {
                name: column.name().to_string(),
                stats,
            });
        }
    }

    Ok(TableSummary {
        label: label.to_string(),
        rows: table.height(),
        columns: table.width(),
        column_summaries,
        numeric_stats,
        has_numeric_columns: table.columns().any(|(_, kind)| kind == ColumnKind::Numeric),
    })
}

impl TableSummary {
    /// Total absent cells across all columns
    pub fn total_nulls(&self) -> usize {
        self.column_summaries.iter().map(|c| c.null_count).sum()
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style(format!("{} Summary", self.label)).white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!(
            "      {} rows × {} columns",
            style(self.rows).yellow(),
            style(self.columns).yellow()
        );
        println!();

        print_indented(&self.columns_table());

        println!();
        println!("      {}", style("Descriptive stats (numeric only):").bold());
        if !self.has_numeric_columns {
            println!("      No numeric columns found.");
            return;
        }
        if self.numeric_stats.is_empty() {
            println!("      Numeric columns have no values.");
            return;
        }
        print_indented(&self.stats_table());
    }

    fn columns_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Kind").add_attribute(Attribute::Bold),
            Cell::new("Non-Null").add_attribute(Attribute::Bold),
            Cell::new("Missing").add_attribute(Attribute::Bold),
        ]);

        for column in &self.column_summaries {
            let kind_color = match column.kind {
                ColumnKind::Numeric => Color::Cyan,
                ColumnKind::Textual => Color::Magenta,
            };
            table.add_row(vec![
                Cell::new(&column.name),
                Cell::new(column.kind).fg(kind_color),
                Cell::new(column.non_null).set_alignment(CellAlignment::Right),
                Cell::new(column.null_count)
                    .set_alignment(CellAlignment::Right)
                    .fg(if column.null_count == 0 {
                        Color::White
                    } else {
                        Color::Red
                    }),
            ]);
        }

        table
    }

    fn stats_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);

        let mut header = vec![Cell::new("").add_attribute(Attribute::Bold)];
        header.extend(
            self.numeric_stats
                .iter()
                .map(|s| Cell::new(&s.name).add_attribute(Attribute::Bold)),
        );
        table.set_header(header);

        type Getter = fn(&NumericStats) -> Option<f64>;
        let rows: [(&str, Getter); 8] = [
            ("count", |s| Some(s.count as f64)),
            ("mean", |s| Some(s.mean)),
            ("std", |s| s.std),
            ("min", |s| Some(s.min)),
            ("25%", |s| Some(s.q1)),
            ("50%", |s| Some(s.median)),
            ("75%", |s| Some(s.q3)),
            ("max", |s| Some(s.max)),
        ];

        for (label, get) in rows {
            let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
            row.extend(self.numeric_stats.iter().map(|s| {
                let text = get(&s.stats)
                    .map(format_stat)
                    .unwrap_or_else(|| "NaN".to_string());
                Cell::new(text).set_alignment(CellAlignment::Right)
            }));
            table.add_row(row);
        }

        table
    }
}

fn format_stat(value: f64) -> String {
    format!("{:.6}", value)
}

// Indent the table
fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}
