//! `csv-analyzer` loads a delimited file into an in-memory [`types::DataSet`], computes
//! descriptive statistics for numeric columns, summarizes categorical columns by value counts,
//! optionally writes a histogram per analyzed column, and correlates the analyzed numeric columns.
//!
//! The primary entrypoints are [`ingestion::load_from_path`] (load + type inference) and
//! [`pipeline::analyze`] (the analysis itself), whose [`report::AnalysisReport`] is rendered by
//! [`report::render`]. The `csv-analyzer` binary wires these together in [`cli`].
//!
//! ## Loading
//!
//! Column types are inferred from the cells: integer, float, boolean, or text. Empty cells and
//! the usual missing markers (`NA`, `NaN`, `null`, ...) become [`types::Value::Null`].
//!
//! ```no_run
//! use csv_analyzer::ingestion::{load_from_path, LoadOptions};
//!
//! # fn main() -> Result<(), csv_analyzer::LoadError> {
//! let ds = load_from_path("data.csv", &LoadOptions::default())?;
//! for field in &ds.schema.fields {
//!     println!("{} {:?}", field.name, field.data_type);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Analyzing
//!
//! ```rust
//! use std::path::Path;
//!
//! use csv_analyzer::pipeline::{analyze, AnalysisConfig};
//! use csv_analyzer::report::{render, ReportFormat};
//! use csv_analyzer::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("age", DataType::Int64),
//!     Field::new("income", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(20), Value::Float64(1.0)],
//!         vec![Value::Int64(30), Value::Float64(3.0)],
//!         vec![Value::Int64(40), Value::Null],
//!     ],
//! );
//!
//! let report = analyze(&ds, Path::new("data.csv"), &AnalysisConfig::default());
//! let mut out = Vec::new();
//! render(&report, ReportFormat::Text, &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.contains("Mean: 30.00"));
//! assert!(text.contains("Correlation matrix:"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading entrypoints, type inference and load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`classify`]: which columns are analyzed, and how
//! - [`processing`]: statistics, value counts, correlation
//! - [`plot`]: histogram rendering
//! - [`pipeline`]: the end-to-end analysis
//! - [`report`]: report model and text/JSON rendering
//! - [`error`]: error types

pub mod classify;
pub mod cli;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod plot;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{LoadError, LoadResult, PlotError};
