//! Analysis report model and its text/JSON renderings.
//!
//! The pipeline produces an [`AnalysisReport`] whose entries are in processing order; rendering
//! is a separate step so the same run can be printed for people or serialized for tools.

use std::io::{self, Write};

use serde::Serialize;

use crate::processing::{CorrelationMatrix, StatRequest, StatValue, Statistic, ValueCount};

/// Line closing every column block in the text report.
pub const SEPARATOR: &str = "----------------------------------------";

/// Output rendering of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Everything a run found, in processing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Source file as given.
    pub source: String,
    /// Number of data rows loaded.
    pub rows: usize,
    /// `true` when no explicit column list was given.
    pub all_numeric: bool,
    /// Statistic keys that were not recognized.
    pub unrecognized_stats: Vec<String>,
    /// One entry per routed column.
    pub columns: Vec<ColumnReport>,
    /// Correlation outcome over the analyzed numeric columns.
    pub correlation: CorrelationSummary,
}

impl AnalysisReport {
    /// Names of the numeric columns that reached statistic computation.
    pub fn analyzed_numeric(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| match c {
                ColumnReport::Numeric { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A single computed statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatEntry {
    pub statistic: Statistic,
    pub value: StatValue,
}

/// What happened to a column's histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HistogramOutcome {
    /// Image written.
    Saved { path: String },
    /// Rendering or saving this column's image failed.
    Failed { error: String },
    /// The output directory could not be created; no further histograms are attempted.
    DirectoryUnavailable { error: String },
}

/// Per-column result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnReport {
    /// Numeric column with a non-empty cleaned series.
    Numeric {
        name: String,
        stats: Vec<StatEntry>,
        #[serde(skip_serializing_if = "Option::is_none")]
        histogram: Option<HistogramOutcome>,
    },
    /// Numeric column with nothing left after dropping missing values.
    EmptyNumeric { name: String },
    /// Non-numeric column summarized by value counts.
    Categorical { name: String, counts: Vec<ValueCount> },
    /// Non-numeric column without rows.
    EmptyCategorical { name: String },
    /// Non-numeric column whose every cell is missing.
    MissingCategorical { name: String },
    /// Requested column does not exist.
    NotFound { name: String },
    /// Requested column was already analyzed in this run.
    Duplicate { name: String },
}

/// Correlation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrelationSummary {
    /// Two or more analyzed numeric columns.
    Matrix { matrix: CorrelationMatrix },
    /// Exactly one analyzed numeric column.
    SingleColumn { column: String },
    /// No analyzed numeric column.
    NoColumns,
}

/// Render `report` in the requested format.
pub fn render<W: Write>(report: &AnalysisReport, format: ReportFormat, out: &mut W) -> io::Result<()> {
    match format {
        ReportFormat::Text => render_text(report, out),
        ReportFormat::Json => render_json(report, out),
    }
}

/// Pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(report: &AnalysisReport, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Human-readable report.
pub fn render_text<W: Write>(report: &AnalysisReport, out: &mut W) -> io::Result<()> {
    writeln!(out, "Analyzing {}...", report.source)?;
    for key in &report.unrecognized_stats {
        writeln!(
            out,
            "Warning: unrecognized statistic '{key}' ignored. Valid options: {}",
            StatRequest::valid_keys()
        )?;
    }
    if report.all_numeric {
        writeln!(out, "No specific columns provided. Analyzing all numeric columns.")?;
    }

    for column in &report.columns {
        write_column(column, out)?;
    }

    write_correlation(&report.correlation, out)?;
    writeln!(out, "Analysis complete.")
}

fn write_column<W: Write>(column: &ColumnReport, out: &mut W) -> io::Result<()> {
    match column {
        ColumnReport::Numeric {
            name,
            stats,
            histogram,
        } => {
            writeln!(out, "Descriptive statistics for column '{name}':")?;
            for entry in stats {
                writeln!(out, "{}: {}", entry.statistic.label(), format_stat(entry.value))?;
            }
            match histogram {
                Some(HistogramOutcome::Saved { path }) => {
                    writeln!(out, "Histogram saved to {path}")?
                }
                Some(HistogramOutcome::Failed { error }) => {
                    writeln!(out, "Could not save histogram for column '{name}': {error}")?
                }
                Some(HistogramOutcome::DirectoryUnavailable { error }) => writeln!(
                    out,
                    "Histograms disabled for the rest of this run: {error}"
                )?,
                None => {}
            }
            writeln!(out, "{SEPARATOR}")
        }
        ColumnReport::EmptyNumeric { name } => {
            writeln!(out, "Descriptive statistics for column '{name}':")?;
            writeln!(
                out,
                "Column '{name}' is empty after removing missing values. Skipping statistics."
            )?;
            writeln!(out, "{SEPARATOR}")
        }
        ColumnReport::Categorical { name, counts } => {
            writeln!(out, "Column '{name}' is not numeric. Value counts:")?;
            for vc in counts {
                writeln!(out, "{}: {}", vc.value, vc.count)?;
            }
            writeln!(out, "{SEPARATOR}")
        }
        ColumnReport::EmptyCategorical { name } => {
            writeln!(out, "Column '{name}' is not numeric and is empty.")?;
            writeln!(out, "{SEPARATOR}")
        }
        ColumnReport::MissingCategorical { name } => {
            writeln!(
                out,
                "Column '{name}' is not numeric and contains only missing values."
            )?;
            writeln!(out, "{SEPARATOR}")
        }
        ColumnReport::NotFound { name } => {
            writeln!(out, "Column '{name}' not found in the dataset.")
        }
        ColumnReport::Duplicate { name } => {
            writeln!(out, "Column '{name}' was already analyzed. Skipping.")
        }
    }
}

fn write_correlation<W: Write>(summary: &CorrelationSummary, out: &mut W) -> io::Result<()> {
    match summary {
        CorrelationSummary::Matrix { matrix } => {
            writeln!(out, "Correlation matrix:")?;
            out.write_all(format_matrix(matrix).as_bytes())
        }
        CorrelationSummary::SingleColumn { column } => writeln!(
            out,
            "Only one numeric column ('{column}') was analyzed. No correlation matrix to compute."
        ),
        CorrelationSummary::NoColumns => writeln!(
            out,
            "No numeric columns were analyzed. No correlation matrix to compute."
        ),
    }
}

/// Two decimals for floating values, plain integer for counts.
pub fn format_stat(value: StatValue) -> String {
    match value {
        StatValue::Float(v) => format!("{v:.2}"),
        StatValue::Count(n) => n.to_string(),
    }
}

/// Labeled square matrix, six decimals, right-aligned columns.
pub fn format_matrix(matrix: &CorrelationMatrix) -> String {
    let label_w = matrix.columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let cell_w = label_w.max(9);

    let mut s = format!("{:label_w$}", "");
    for c in &matrix.columns {
        s.push_str(&format!("  {c:>cell_w$}"));
    }
    s.push('\n');

    for (name, row) in matrix.columns.iter().zip(&matrix.values) {
        s.push_str(&format!("{name:<label_w$}"));
        for v in row {
            s.push_str(&format!("  {v:>cell_w$.6}"));
        }
        s.push('\n');
    }
    s
}
