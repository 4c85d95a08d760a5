//! Descriptive statistics over a cleaned numeric series.
//!
//! The set of statistics is closed: each [`Statistic`] maps to one of the `polars` reducers over a
//! cleaned `Float64Chunked` series.
//! User-supplied keys are checked against that set by [`StatRequest::parse`]; anything else is
//! kept aside as unrecognized rather than rejected.

use polars::prelude::{ChunkAgg, ChunkQuantile, ChunkVar, Float64Chunked};
use serde::{Serialize, Serializer};

/// Built-in statistics, declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean.
    Mean,
    /// Middle value (mean of the two middle values for even lengths).
    Median,
    /// Sample standard deviation (n - 1 denominator).
    Std,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
    /// Number of values.
    Count,
}

impl Statistic {
    /// Every statistic, in reporting order.
    pub const ALL: [Statistic; 6] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::Std,
        Statistic::Min,
        Statistic::Max,
        Statistic::Count,
    ];

    /// Command-line key.
    pub fn key(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::Std => "std",
            Statistic::Min => "min",
            Statistic::Max => "max",
            Statistic::Count => "count",
        }
    }

    /// Human-readable label used in the text report.
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Mean => "Mean",
            Statistic::Median => "Median",
            Statistic::Std => "Standard Deviation",
            Statistic::Min => "Minimum",
            Statistic::Max => "Maximum",
            Statistic::Count => "Count",
        }
    }

    /// Look up a statistic by key (case-insensitive, surrounding whitespace ignored).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.key().eq_ignore_ascii_case(key))
    }

    /// Compute this statistic over a cleaned series.
    ///
    /// Undefined results (any reducer over an empty series, the sample standard deviation of a
    /// single value) are `NaN`.
    pub fn compute(self, values: &Float64Chunked) -> StatValue {
        let float = |v: Option<f64>| StatValue::Float(v.unwrap_or(f64::NAN));
        match self {
            Statistic::Mean => float(values.mean()),
            Statistic::Median => float(values.median()),
            Statistic::Std if values.len() < 2 => StatValue::Float(f64::NAN),
            Statistic::Std => float(values.std(1)),
            Statistic::Min => float(values.min()),
            Statistic::Max => float(values.max()),
            Statistic::Count => StatValue::Count(values.len()),
        }
    }
}

/// Result of a single statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatValue {
    /// Floating value; `NaN` when undefined (e.g. std of one value).
    Float(f64),
    /// Exact count.
    Count(usize),
}

impl Serialize for StatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            StatValue::Float(v) if v.is_finite() => serializer.serialize_f64(v),
            StatValue::Float(_) => serializer.serialize_none(),
            StatValue::Count(n) => serializer.serialize_u64(n as u64),
        }
    }
}

/// The statistics requested for a run, in reporting order, plus any keys that were not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRequest {
    /// Recognized statistics, deduplicated, in [`Statistic::ALL`] order.
    pub stats: Vec<Statistic>,
    /// Keys that matched no statistic, as given.
    pub unrecognized: Vec<String>,
}

impl Default for StatRequest {
    fn default() -> Self {
        Self {
            stats: Statistic::ALL.to_vec(),
            unrecognized: Vec::new(),
        }
    }
}

impl StatRequest {
    /// Split user keys into recognized statistics and unrecognized keys.
    ///
    /// The output order is always the fixed reporting order, whatever order the keys came in.
    pub fn parse<S: AsRef<str>>(keys: &[S]) -> Self {
        let mut wanted = [false; 6];
        let mut unrecognized = Vec::new();
        for key in keys {
            match Statistic::from_key(key.as_ref()) {
                Some(stat) => wanted[stat as usize] = true,
                None => unrecognized.push(key.as_ref().to_owned()),
            }
        }
        let stats = Statistic::ALL
            .into_iter()
            .filter(|s| wanted[*s as usize])
            .collect();
        Self {
            stats,
            unrecognized,
        }
    }

    /// Comma-separated list of valid keys, for warnings.
    pub fn valid_keys() -> String {
        Statistic::ALL
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Float64Chunked, NewChunkedArray};

    use super::{StatRequest, StatValue, Statistic};

    fn series(values: &[f64]) -> Float64Chunked {
        Float64Chunked::from_slice("values".into(), values)
    }

    fn float(stat: Statistic, values: &[f64]) -> f64 {
        match stat.compute(&series(values)) {
            StatValue::Float(v) => v,
            StatValue::Count(n) => panic!("expected a float, got count {n}"),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn basic_reducers() {
        let v = [20.0, 30.0, 40.0];
        assert!(close(float(Statistic::Mean, &v), 30.0));
        assert!(close(float(Statistic::Median, &v), 30.0));
        assert!(close(float(Statistic::Std, &v), 10.0));
        assert_eq!(float(Statistic::Min, &v), 20.0);
        assert_eq!(float(Statistic::Max, &v), 40.0);
    }

    #[test]
    fn median_of_even_length_averages_middle_pair() {
        assert!(close(float(Statistic::Median, &[4.0, 1.0, 3.0, 2.0]), 2.5));
    }

    #[test]
    fn undefined_results_are_nan() {
        assert!(float(Statistic::Std, &[5.0]).is_nan());
        assert!(float(Statistic::Mean, &[]).is_nan());
        assert!(float(Statistic::Max, &[]).is_nan());
    }

    #[test]
    fn count_is_exact() {
        assert_eq!(Statistic::Count.compute(&series(&[1.0, 2.0])), StatValue::Count(2));
    }

    #[test]
    fn request_keeps_fixed_order_and_collects_unknown_keys() {
        let req = StatRequest::parse(&["count", "bogus", "MEAN", "mean"]);
        assert_eq!(req.stats, vec![Statistic::Mean, Statistic::Count]);
        assert_eq!(req.unrecognized, vec!["bogus".to_string()]);
    }

    #[test]
    fn default_request_has_all_six() {
        assert_eq!(StatRequest::default().stats, Statistic::ALL.to_vec());
        assert_eq!(StatRequest::valid_keys(), "mean, median, std, min, max, count");
    }

    #[test]
    fn nan_serializes_as_null() {
        let json = serde_json::to_string(&StatValue::Float(f64::NAN)).unwrap();
        assert_eq!(json, "null");
    }
}
