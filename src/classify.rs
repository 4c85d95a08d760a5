//! Decide which columns are analyzed, and how.

use std::collections::HashSet;

use crate::types::DataSet;

/// How one requested column is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Numeric-typed column: descriptive statistics.
    Numeric(usize),
    /// Present but not numeric-typed: value counts.
    Categorical(usize),
    /// No column with this name.
    NotFound,
    /// Already routed earlier in the same request.
    Duplicate,
}

/// A requested column name and its route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Column name as requested (or as in the schema for the default selection).
    pub name: String,
    /// Where the column goes.
    pub route: Route,
}

/// Route every column of a run.
///
/// With an explicit list, names are visited in the given order and every entry yields a plan.
/// Without one, all numeric-typed columns are selected in schema order and non-numeric columns
/// are left out.
pub fn classify(dataset: &DataSet, columns: Option<&[String]>) -> Vec<ColumnPlan> {
    let fields = &dataset.schema.fields;
    let Some(requested) = columns else {
        return fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.data_type.is_numeric())
            .map(|(idx, f)| ColumnPlan {
                name: f.name.clone(),
                route: Route::Numeric(idx),
            })
            .collect();
    };

    let mut seen: HashSet<&str> = HashSet::new();
    requested
        .iter()
        .map(|name| {
            let route = match dataset.schema.index_of(name) {
                None => Route::NotFound,
                Some(_) if !seen.insert(name.as_str()) => Route::Duplicate,
                Some(idx) if fields[idx].data_type.is_numeric() => Route::Numeric(idx),
                Some(idx) => Route::Categorical(idx),
            };
            ColumnPlan {
                name: name.clone(),
                route,
            }
        })
        .collect()
}
