//! Histogram rendering for analyzed numeric columns.
//!
//! Each histogram is drawn on a bitmap backend that lives only for the duration of one render
//! call, so the backend and its file handle are released whether the save succeeds, fails, or
//! the backend panics.

use std::error::Error as StdError;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::error::PlotError;

/// Bucket count used when none is configured.
pub const DEFAULT_BINS: usize = 30;

/// Largest accepted bucket count; larger requests are clamped.
pub const MAX_BINS: usize = 10_000;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Where and how histograms are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotOptions {
    /// Output directory; created recursively on first use.
    pub dir: PathBuf,
    /// Number of equal-width buckets.
    pub bins: usize,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl PlotOptions {
    /// Options with default bucket count and image size.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bins: DEFAULT_BINS,
            size: (800, 600),
        }
    }
}

/// Equal-width frequency histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bucket edges.
    pub edges: Vec<f64>,
    /// Values per bucket. Every bucket is half-open except the last, which is closed.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width buckets spanning `[min, max]`.
    ///
    /// A constant series spans `[v - 0.5, v + 0.5]`. `None` for an empty series or zero bins.
    /// `bins` is clamped to [`MAX_BINS`].
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 || values.is_empty() {
            return None;
        }
        let bins = bins.min(MAX_BINS);
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| lo + width * i as f64).collect();
        edges.push(hi);

        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    /// `(lower, upper, count)` per bucket.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &n)| (w[0], w[1], n))
    }

    /// Horizontal extent.
    pub fn range(&self) -> (f64, f64) {
        (
            self.edges.first().copied().unwrap_or(0.0),
            self.edges.last().copied().unwrap_or(1.0),
        )
    }

    fn y_top(&self) -> f64 {
        let max = self.counts.iter().copied().max().unwrap_or(0) as f64;
        (max * 1.05).max(1.0)
    }
}

/// Path of the histogram image for `column` under `dir`.
pub fn histogram_path(dir: &Path, column: &str) -> PathBuf {
    dir.join(format!("{column}_histogram.png"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirState {
    Pending,
    Ready,
    Disabled,
}

/// Writes one histogram per column into a directory.
///
/// The first call creates the directory. If that fails the writer disables itself: the failure is
/// returned once as [`PlotError::CreateDir`] and every later call returns `Ok(None)`.
#[derive(Debug)]
pub struct HistogramWriter {
    options: PlotOptions,
    state: DirState,
}

impl HistogramWriter {
    /// Create a writer; nothing touches the filesystem until [`Self::write`].
    pub fn new(options: PlotOptions) -> Self {
        Self {
            options,
            state: DirState::Pending,
        }
    }

    /// Render `values` as a histogram for `column` and save it.
    ///
    /// Returns the written path, or `Ok(None)` when the writer is disabled.
    pub fn write(&mut self, column: &str, values: &[f64]) -> Result<Option<PathBuf>, PlotError> {
        match self.state {
            DirState::Disabled => return Ok(None),
            DirState::Ready => {}
            DirState::Pending => {
                if let Err(source) = std::fs::create_dir_all(&self.options.dir) {
                    self.state = DirState::Disabled;
                    return Err(PlotError::CreateDir {
                        path: self.options.dir.clone(),
                        source,
                    });
                }
                self.state = DirState::Ready;
            }
        }

        let path = histogram_path(&self.options.dir, column);
        let hist = Histogram::from_values(values, self.options.bins)
            .ok_or_else(|| PlotError::NoData { path: path.clone() })?;
        render(&path, column, &hist, self.options.size)?;
        tracing::debug!(column, path = %path.display(), "histogram saved");
        Ok(Some(path))
    }
}

/// Render with title and axis labels, falling back to a text-free chart when text cannot be drawn.
fn render(path: &Path, column: &str, hist: &Histogram, size: (u32, u32)) -> Result<(), PlotError> {
    let labeled = catch_unwind(AssertUnwindSafe(|| {
        draw_labeled(path, column, hist, size).map_err(|e| e.to_string())
    }));
    let reason = match labeled {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(message)) => message,
        Err(_) => "rendering backend panicked".to_string(),
    };
    tracing::warn!(
        column,
        reason = %reason,
        "labeled histogram failed, retrying without text"
    );

    catch_unwind(AssertUnwindSafe(|| {
        draw_plain(path, hist, size).map_err(|e| e.to_string())
    }))
    .unwrap_or_else(|_| Err("rendering backend panicked".to_string()))
    .map_err(|message| PlotError::Render {
        path: path.to_path_buf(),
        message,
    })
}

fn draw_labeled(
    path: &Path,
    column: &str,
    hist: &Histogram,
    size: (u32, u32),
) -> Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = hist.range();
    let mut chart = ChartBuilder::on(&root)
        .caption(column, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(56)
        .build_cartesian_2d(lo..hi, 0f64..hist.y_top())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("Frequency")
        .draw()?;
    chart.draw_series(bars(hist))?;

    root.present()?;
    Ok(())
}

fn draw_plain(path: &Path, hist: &Histogram, size: (u32, u32)) -> Result<(), Box<dyn StdError>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (lo, hi) = hist.range();
    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .build_cartesian_2d(lo..hi, 0f64..hist.y_top())?;
    chart.draw_series(bars(hist))?;

    root.present()?;
    Ok(())
}

fn bars(hist: &Histogram) -> impl Iterator<Item = Rectangle<(f64, f64)>> + '_ {
    hist.bins()
        .map(|(lo, hi, n)| Rectangle::new([(lo, 0.0), (hi, n as f64)], BAR_COLOR.filled()))
}
