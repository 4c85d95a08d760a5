use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned when a source file cannot be turned into a [`crate::types::DataSet`].
///
/// Every variant is fatal for a run: the CLI prints the message and exits with status 1.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source path does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but has no parseable content.
    #[error("file is empty: {} (no columns to parse)", path.display())]
    Empty { path: PathBuf },

    /// The file content is structurally invalid.
    #[error("malformed content in {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    /// Any other read failure (permission denied, path is a directory, ...).
    #[error("error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Classify a `polars` error raised while parsing the content of `path`.
    pub(crate) fn from_polars(path: impl Into<PathBuf>, err: PolarsError) -> Self {
        let path = path.into();
        match err {
            PolarsError::NoData(_) => LoadError::Empty { path },
            other => LoadError::Malformed {
                path,
                message: other.to_string(),
            },
        }
    }

    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound { path },
            std::io::ErrorKind::InvalidData => LoadError::Malformed {
                path,
                message: source.to_string(),
            },
            _ => LoadError::Io { path, source },
        }
    }
}

/// Error raised while rendering or saving a single histogram.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The output directory could not be created.
    #[error("could not create plot directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend failed (font lookup, encoding, writing the file).
    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    /// There was nothing to draw.
    #[error("no values to plot for {}", path.display())]
    NoData { path: PathBuf },
}
