//! Path-based loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which loads a delimited file into an in-memory
//! [`crate::types::DataSet`].
//!
//! - If [`LoadOptions::delimiter`] is `None`, the delimiter is inferred from the file extension.
//! - If a [`LoadObserver`] is provided, success/failure/alerts are reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{LoadError, LoadResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Delimited text dialects recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimitedFormat {
    /// Comma-separated values.
    Csv,
    /// Tab-separated values.
    Tsv,
    /// Pipe-separated values.
    Psv,
}

impl DelimitedFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "txt" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "psv" => Some(Self::Psv),
            _ => None,
        }
    }

    /// Field delimiter byte for this format.
    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
            Self::Psv => b'|',
        }
    }
}

/// Options controlling loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer from the file extension (falling back to `,`).
    pub delimiter: Option<u8>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("delimiter", &self.delimiter)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a delimited file into a [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use csv_analyzer::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), csv_analyzer::LoadError> {
/// let ds = load_from_path("data.csv", &LoadOptions::default())?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let delimiter = options
        .delimiter
        .unwrap_or_else(|| infer_delimiter_from_path(path));

    let ctx = LoadContext {
        path: path.to_path_buf(),
        delimiter,
    };

    let result = check_exists(path).and_then(|()| csv::ingest_csv_from_path(path, delimiter));

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn check_exists(path: &Path) -> LoadResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("path is a directory"),
        }),
        Ok(_) => Ok(()),
        Err(e) => Err(LoadError::from_io(path, e)),
    }
}

fn infer_delimiter_from_path(path: &Path) -> u8 {
    path.extension()
        .and_then(|s| s.to_str())
        .and_then(DelimitedFormat::from_extension)
        .unwrap_or(DelimitedFormat::Csv)
        .delimiter()
}
