//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`loader`]) which:
//!
//! - picks the delimiter from [`LoadOptions`] or the file extension
//! - parses the file into an in-memory [`crate::types::DataSet`] with an inferred schema
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The reader-level parser lives in [`csv`].

pub mod csv;
pub mod loader;
pub mod observability;

pub use loader::{load_from_path, DelimitedFormat, LoadOptions};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
