//! Command-line surface.
//!
//! [`run`] is what the binary calls; [`run_with_args`] does the work against any writer so the
//! whole command can be driven from tests.

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::error::LoadError;
use crate::ingestion::{load_from_path, LoadOptions, LoadSeverity, TracingObserver};
use crate::pipeline::{analyze, AnalysisConfig};
use crate::plot::{PlotOptions, DEFAULT_BINS, MAX_BINS};
use crate::processing::StatRequest;
use crate::report::{render, ReportFormat};

/// CLI-compatible report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(cli: OutputFormat) -> Self {
        match cli {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "csv-analyzer",
    version,
    about = "Analyze a CSV file and provide descriptive statistics.",
    long_about = "Analyze a delimited file and provide descriptive statistics.\n\n\
                  EXAMPLES:\n  \
                  # All numeric columns, all statistics\n  \
                  csv-analyzer --filepath data.csv\n\n  \
                  # Selected columns and statistics, with histograms\n  \
                  csv-analyzer --filepath data.csv -c age income -op plots/ --stats mean std"
)]
pub struct Args {
    /// Path to the CSV file to analyze
    #[arg(long, value_name = "PATH")]
    pub filepath: PathBuf,

    /// Columns to analyze
    ///
    /// If not provided, all numeric columns are analyzed.
    #[arg(short = 'c', long, num_args = 1.., value_name = "COLUMN")]
    pub columns: Option<Vec<String>>,

    /// Directory for one histogram PNG per analyzed numeric column (`-op` also accepted)
    #[arg(
        short = 'o',
        long = "output_plot_dir",
        visible_alias = "output-plot-dir",
        value_name = "DIR"
    )]
    pub output_plot_dir: Option<PathBuf>,

    /// Statistics to compute: mean, median, std, min, max, count (default: all)
    #[arg(long, num_args = 1.., value_name = "STAT")]
    pub stats: Option<Vec<String>>,

    /// Field delimiter (default: inferred from the extension, else ',')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Number of histogram buckets (1 to 10000)
    #[arg(long, default_value_t = DEFAULT_BINS, value_parser = parse_bins)]
    pub bins: usize,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log level for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Parse arguments, accepting the legacy two-letter `-op` flag.
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_flags(args))
    }

    /// The analysis configuration these arguments describe.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            columns: self.columns.clone(),
            stats: self
                .stats
                .as_deref()
                .map(StatRequest::parse)
                .unwrap_or_default(),
            plot: self.output_plot_dir.as_ref().map(|dir| PlotOptions {
                bins: self.bins,
                ..PlotOptions::new(dir)
            }),
        }
    }

    /// Load options these arguments describe.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            observer: Some(Arc::new(TracingObserver)),
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Failure of a whole command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The source file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The report could not be written.
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Process exit status for this failure: 1 for load failures, `EX_IOERR` (74) when the report
    /// could not be written.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Load(_) => 1,
            CliError::Output(_) => 74,
        }
    }
}

/// Entry point used by the binary.
pub fn run() -> anyhow::Result<ExitCode> {
    let args = match Args::try_parse_normalized(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => err.exit(),
    };
    init_tracing(&args.log_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_with_args(&args, &mut out) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Output(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let _ = out.flush();
            eprintln!("Error: {err}");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

/// Load, analyze and render a report into `out`.
pub fn run_with_args<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let dataset = load_from_path(&args.filepath, &args.load_options())?;
    let report = analyze(&dataset, &args.filepath, &args.analysis_config());
    render(&report, args.format.into(), out)?;
    out.flush()?;
    Ok(())
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

/// Rewrite `-op` / `-op=DIR` to the long flag; clap short flags are a single character.
pub fn normalize_legacy_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-op") => OsString::from("--output_plot_dir"),
            Some(s) if s.starts_with("-op=") => {
                OsString::from(format!("--output_plot_dir={}", &s["-op=".len()..]))
            }
            _ => arg,
        })
        .collect()
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(format!("delimiter must be a single ASCII character, got '{s}'")),
        },
    }
}

fn parse_bins(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(n) if (1..=MAX_BINS).contains(&n) => Ok(n),
        Ok(_) => Err(format!("bins must be between 1 and {MAX_BINS}")),
        Err(e) => Err(e.to_string()),
    }
}
