//! Pairwise Pearson correlation across numeric columns.
//!
//! Each pair uses only the rows where both columns have a value (pairwise-complete observations),
//! so the inputs are the raw row-aligned columns rather than the per-column cleaned series.

use polars::prelude::{col, df, pearson_corr, IntoLazy, PolarsResult};
use serde::{Serialize, Serializer};

use crate::types::DataSet;

/// Labeled square correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Row/column labels, in analysis order.
    pub columns: Vec<String>,
    /// `values[i][j]` is the correlation of `columns[i]` with `columns[j]`; `NaN` if undefined.
    #[serde(serialize_with = "serialize_matrix")]
    pub values: Vec<Vec<f64>>,
}

/// Correlation matrix over the dataset columns at `indexes`.
pub fn correlation_matrix(dataset: &DataSet, indexes: &[usize]) -> CorrelationMatrix {
    let columns: Vec<Vec<Option<f64>>> = indexes
        .iter()
        .map(|&idx| dataset.numeric_column(idx))
        .collect();

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson_pairwise(&columns[i], &columns[j]);
            let r = if i == j && r.is_finite() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: indexes
            .iter()
            .map(|&idx| dataset.schema.fields[idx].name.clone())
            .collect(),
        values,
    }
}

/// Pearson correlation of two row-aligned columns over rows where both are present.
///
/// `NaN` with fewer than two complete pairs or when either side has zero variance.
pub fn pearson_pairwise(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip();
    if xs.len() < 2 {
        return f64::NAN;
    }

    match pearson(xs, ys) {
        Ok(Some(r)) if r.is_finite() => r.clamp(-1.0, 1.0),
        Ok(_) => f64::NAN,
        Err(err) => {
            tracing::debug!(err = %err, "correlation failed");
            f64::NAN
        }
    }
}

fn pearson(xs: Vec<f64>, ys: Vec<f64>) -> PolarsResult<Option<f64>> {
    let pairs = df!("x" => xs, "y" => ys)?;
    let out = pairs
        .lazy()
        .select([pearson_corr(col("x"), col("y")).alias("r")])
        .collect()?;
    Ok(out.column("r")?.as_materialized_series().f64()?.get(0))
}

fn serialize_matrix<S: Serializer>(values: &[Vec<f64>], serializer: S) -> Result<S::Ok, S::Error> {
    let cells: Vec<Vec<Option<f64>>> = values
        .iter()
        .map(|row| row.iter().map(|v| v.is_finite().then_some(*v)).collect())
        .collect();
    cells.serialize(serializer)
}
