//! The analysis pipeline: classify -> analyze -> (optional) visualize -> correlate.
//!
//! ```rust
//! use std::path::Path;
//!
//! use csv_analyzer::pipeline::{analyze, AnalysisConfig};
//! use csv_analyzer::processing::StatRequest;
//! use csv_analyzer::report::CorrelationSummary;
//! use csv_analyzer::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("age", DataType::Float64)]);
//! let ds = DataSet::new(schema, vec![vec![Value::Float64(20.0)], vec![Value::Null]]);
//!
//! let config = AnalysisConfig {
//!     stats: StatRequest::parse(&["mean", "count"]),
//!     ..Default::default()
//! };
//! let report = analyze(&ds, Path::new("data.csv"), &config);
//! assert_eq!(report.analyzed_numeric(), vec!["age"]);
//! assert!(matches!(report.correlation, CorrelationSummary::SingleColumn { .. }));
//! ```

use std::path::Path;

use polars::prelude::{Float64Chunked, NewChunkedArray};

use crate::classify::{classify, Route};
use crate::error::PlotError;
use crate::plot::{HistogramWriter, PlotOptions};
use crate::processing::{
    cleaned_numeric, correlation_matrix, non_missing, value_counts, StatRequest,
};
use crate::report::{
    AnalysisReport, ColumnReport, CorrelationSummary, HistogramOutcome, StatEntry,
};
use crate::types::DataSet;

/// Everything a run needs besides the data, passed explicitly through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Explicit column list; `None` analyzes every numeric column.
    pub columns: Option<Vec<String>>,
    /// Statistics to compute.
    pub stats: StatRequest,
    /// Histogram output; `None` disables visualization.
    pub plot: Option<PlotOptions>,
}

/// Run the analysis over a loaded dataset.
///
/// Every failure past loading is column-scoped and recorded in the report.
pub fn analyze(dataset: &DataSet, source: &Path, config: &AnalysisConfig) -> AnalysisReport {
    let mut plotter = config.plot.clone().map(HistogramWriter::new);
    let mut analyzed: Vec<usize> = Vec::new();
    let mut columns = Vec::new();

    for plan in classify(dataset, config.columns.as_deref()) {
        let _span = tracing::debug_span!("column", name = %plan.name).entered();
        let name = plan.name;
        let report = match plan.route {
            Route::Numeric(idx) => {
                let cleaned = cleaned_numeric(dataset, idx);
                if cleaned.is_empty() {
                    tracing::debug!("empty after removing missing values");
                    ColumnReport::EmptyNumeric { name }
                } else {
                    let series = Float64Chunked::from_slice(name.as_str().into(), &cleaned);
                    let stats = config
                        .stats
                        .stats
                        .iter()
                        .map(|&statistic| StatEntry {
                            statistic,
                            value: statistic.compute(&series),
                        })
                        .collect();
                    let histogram = plotter
                        .as_mut()
                        .and_then(|w| plot_column(w, &name, &cleaned));
                    analyzed.push(idx);
                    ColumnReport::Numeric {
                        name,
                        stats,
                        histogram,
                    }
                }
            }
            Route::Categorical(idx) => {
                if dataset.row_count() == 0 {
                    ColumnReport::EmptyCategorical { name }
                } else {
                    let present = non_missing(dataset, idx);
                    if present.is_empty() {
                        ColumnReport::MissingCategorical { name }
                    } else {
                        ColumnReport::Categorical {
                            name,
                            counts: value_counts(present),
                        }
                    }
                }
            }
            Route::NotFound => {
                tracing::debug!("column not found");
                ColumnReport::NotFound { name }
            }
            Route::Duplicate => ColumnReport::Duplicate { name },
        };
        columns.push(report);
    }

    let correlation = match analyzed.as_slice() {
        [] => CorrelationSummary::NoColumns,
        [only] => CorrelationSummary::SingleColumn {
            column: dataset.schema.fields[*only].name.clone(),
        },
        many => CorrelationSummary::Matrix {
            matrix: correlation_matrix(dataset, many),
        },
    };

    AnalysisReport {
        source: source.display().to_string(),
        rows: dataset.row_count(),
        all_numeric: config.columns.is_none(),
        unrecognized_stats: config.stats.unrecognized.clone(),
        columns,
        correlation,
    }
}

fn plot_column(
    writer: &mut HistogramWriter,
    column: &str,
    values: &[f64],
) -> Option<HistogramOutcome> {
    match writer.write(column, values) {
        Ok(Some(path)) => Some(HistogramOutcome::Saved {
            path: path.display().to_string(),
        }),
        Ok(None) => None,
        Err(err @ PlotError::CreateDir { .. }) => {
            tracing::debug!(err = %err, "histograms disabled");
            Some(HistogramOutcome::DirectoryUnavailable {
                error: err.to_string(),
            })
        }
        Err(err) => {
            tracing::debug!(err = %err, "histogram failed");
            Some(HistogramOutcome::Failed {
                error: err.to_string(),
            })
        }
    }
}
