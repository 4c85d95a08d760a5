//! Column-level computations over a loaded [`crate::types::DataSet`].
//!
//! - [`clean`]: missing-value removal
//! - [`stats`]: descriptive statistics over a cleaned numeric series
//! - [`value_counts()`]: frequency table for categorical columns
//! - [`correlation_matrix()`]: pairwise Pearson correlation across numeric columns
//!
//! ## Example
//!
//! ```rust
//! use csv_analyzer::processing::{cleaned_numeric, Statistic, StatValue};
//! use csv_analyzer::types::{DataSet, DataType, Field, Schema, Value};
//! use polars::prelude::{Float64Chunked, NewChunkedArray};
//!
//! let schema = Schema::new(vec![Field::new("age", DataType::Float64)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(20.0)],
//!         vec![Value::Float64(30.0)],
//!         vec![Value::Float64(40.0)],
//!         vec![Value::Null],
//!     ],
//! );
//!
//! let cleaned = Float64Chunked::from_slice("age".into(), &cleaned_numeric(&ds, 0));
//! assert_eq!(Statistic::Mean.compute(&cleaned), StatValue::Float(30.0));
//! assert_eq!(Statistic::Count.compute(&cleaned), StatValue::Count(3));
//! ```

pub mod clean;
pub mod correlation;
pub mod stats;
pub mod value_counts;

pub use clean::{cleaned_numeric, non_missing};
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use stats::{StatRequest, StatValue, Statistic};
pub use value_counts::{value_counts, ValueCount};
