//! Missing-value removal for a single column of a [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// The cleaned series of a numeric column: every present value, in row order.
pub fn cleaned_numeric(dataset: &DataSet, idx: usize) -> Vec<f64> {
    dataset.column(idx).filter_map(Value::as_f64).collect()
}

/// Non-missing cells of any column, in row order.
pub fn non_missing(dataset: &DataSet, idx: usize) -> Vec<&Value> {
    dataset.column(idx).filter(|v| !v.is_missing()).collect()
}

#[cfg(test)]
mod tests {
    use super::{cleaned_numeric, non_missing};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("age", DataType::Float64),
            Field::new("city", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Float64(20.0), Value::Utf8("Oslo".to_string())],
            vec![Value::Float64(f64::NAN), Value::Null],
            vec![Value::Null, Value::Utf8("Rome".to_string())],
            vec![Value::Float64(40.0), Value::Utf8("Oslo".to_string())],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn cleaned_numeric_drops_null_and_nan() {
        let ds = sample_dataset();
        assert_eq!(cleaned_numeric(&ds, 0), vec![20.0, 40.0]);
    }

    #[test]
    fn non_missing_keeps_row_order() {
        let ds = sample_dataset();
        let cities: Vec<String> = non_missing(&ds, 1).iter().map(|v| v.to_string()).collect();
        assert_eq!(cities, vec!["Oslo", "Rome", "Oslo"]);
    }
}
