//! Frequency counts for categorical columns.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::Value;

/// One distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    /// Rendered value.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Count distinct values, most frequent first.
///
/// Ties keep the order in which the values first appear. Callers drop missing values first.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<ValueCount> {
    let mut counts: Vec<ValueCount> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for value in values {
        let key = value.to_string();
        match slot.get(&key) {
            Some(&idx) => counts[idx].count += 1,
            None => {
                slot.insert(key.clone(), counts.len());
                counts.push(ValueCount {
                    value: key,
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-appearance order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
