//! Delimited-text ingestion backed by the `polars` CSV reader.
//!
//! Parsing, schema inference and null recognition are done by `polars`; the resulting frame is
//! then copied into the row-major [`DataSet`] the rest of the crate works on.

use std::io::{Cursor, Read};
use std::path::Path;

use polars::io::csv::read::{CsvParseOptions, CsvReadOptions, NullValues};
use polars::prelude::{DataFrame, DataType as PolarsDataType, PlSmallStr, PolarsResult, SerReader, Series};

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents read as missing values, in addition to empty cells.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest a delimited file into an in-memory [`DataSet`], inferring the schema.
///
/// Rules:
///
/// - The first line is the header. Repeated or blank header names are made unique by the reader.
/// - Rows shorter than the header are padded with [`Value::Null`]; longer rows are malformed.
/// - Every row takes part in type inference: `Int64`, then `Float64`, then `Bool`, else `Utf8`.
/// - A column whose cells are all missing is `Float64`; a header-only file has `Utf8` columns.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, delimiter: u8) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    ingest_csv_from_reader(file, delimiter, path)
}

/// Ingest delimited data from any reader; `source` names the input in errors.
pub fn ingest_csv_from_reader<R: Read>(
    mut reader: R,
    delimiter: u8,
    source: &Path,
) -> LoadResult<DataSet> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| LoadError::from_io(source, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty {
            path: source.to_path_buf(),
        });
    }

    let frame = read_frame(bytes, delimiter).map_err(|e| LoadError::from_polars(source, e))?;
    if frame.width() == 0 {
        return Err(LoadError::Empty {
            path: source.to_path_buf(),
        });
    }
    dataset_from_frame(&frame).map_err(|e| LoadError::from_polars(source, e))
}

fn read_frame(bytes: Vec<u8>, delimiter: u8) -> PolarsResult<DataFrame> {
    let null_values = MISSING_MARKERS
        .iter()
        .map(|m| PlSmallStr::from(*m))
        .collect();

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(delimiter)
                .with_null_values(Some(NullValues::AllColumns(null_values))),
        )
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
}

/// Copy a `polars` frame into a row-major [`DataSet`].
pub fn dataset_from_frame(frame: &DataFrame) -> PolarsResult<DataSet> {
    let height = frame.height();
    let mut fields = Vec::with_capacity(frame.width());
    let mut rows: Vec<Vec<Value>> = (0..height)
        .map(|_| Vec::with_capacity(frame.width()))
        .collect();

    for name in frame.get_column_names() {
        let series = frame.column(name.as_str())?.as_materialized_series();
        let (data_type, values) = column_values(series)?;
        fields.push(Field::new(name.as_str(), data_type));
        for (row, value) in rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

fn column_values(series: &Series) -> PolarsResult<(DataType, Vec<Value>)> {
    let all_missing = !series.is_empty() && series.null_count() == series.len();
    let typed = match series.dtype() {
        _ if all_missing => (DataType::Float64, vec![Value::Null; series.len()]),
        PolarsDataType::Int64 => (
            DataType::Int64,
            series
                .i64()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::Int64))
                .collect(),
        ),
        PolarsDataType::Float64 => (
            DataType::Float64,
            series
                .f64()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::Float64))
                .collect(),
        ),
        PolarsDataType::Boolean => (
            DataType::Bool,
            series
                .bool()?
                .into_iter()
                .map(|v| v.map_or(Value::Null, Value::Bool))
                .collect(),
        ),
        PolarsDataType::String => (DataType::Utf8, text_values(series)?),
        _ => (
            DataType::Utf8,
            text_values(&series.cast(&PolarsDataType::String)?)?,
        ),
    };
    Ok(typed)
}

fn text_values(series: &Series) -> PolarsResult<Vec<Value>> {
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map_or(Value::Null, |s| Value::Utf8(s.to_owned())))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::path::Path;

    use super::ingest_csv_from_reader;
    use crate::error::LoadError;
    use crate::types::{DataSet, DataType, Value};

    fn load(input: &str) -> Result<DataSet, LoadError> {
        ingest_csv_from_reader(input.as_bytes(), b',', Path::new("inline.csv"))
    }

    fn types(ds: &DataSet) -> Vec<DataType> {
        ds.schema.fields.iter().map(|f| f.data_type).collect()
    }

    #[test]
    fn infers_int_float_bool_and_text() {
        let ds = load("i,f,b,s\n1,1,true,1\n2,2.5,false,x\n").unwrap();
        assert_eq!(
            types(&ds),
            vec![DataType::Int64, DataType::Float64, DataType::Bool, DataType::Utf8]
        );
        assert_eq!(ds.rows[1][1], Value::Float64(2.5));
        assert_eq!(ds.rows[0][2], Value::Bool(true));
    }

    #[test]
    fn loads_missing_values_as_null() {
        let ds = load("age,name\n20,Ada\n30,\nNaN,Bob\n").unwrap();
        assert_eq!(types(&ds), vec![DataType::Int64, DataType::Utf8]);
        assert_eq!(ds.rows[1][1], Value::Null);
        assert_eq!(ds.rows[2][0], Value::Null);
    }

    #[test]
    fn all_missing_column_is_float() {
        let ds = load("a,b\n1,NA\n2,\n").unwrap();
        assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
        assert_eq!(ds.rows[0][1], Value::Null);
    }

    #[test]
    fn short_rows_are_padded() {
        let ds = load("a,b\n1\n2,3\n").unwrap();
        assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Null]);
        assert_eq!(ds.rows[1], vec![Value::Int64(2), Value::Int64(3)]);
    }

    #[test]
    fn long_rows_are_malformed() {
        let err = load("a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }), "{err}");
    }

    #[test]
    fn empty_input_is_reported_as_empty() {
        assert!(matches!(load("").unwrap_err(), LoadError::Empty { .. }));
        assert!(matches!(load("\n \n").unwrap_err(), LoadError::Empty { .. }));
    }

    #[test]
    fn header_only_input_has_text_columns() {
        let ds = load("a,b\n").unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(types(&ds), vec![DataType::Utf8, DataType::Utf8]);
    }

    #[test]
    fn repeated_header_names_stay_distinct() {
        let ds = load("a,a,b\n1,2,3\n").unwrap();
        let names: HashSet<&str> = ds.schema.field_names().collect();
        assert_eq!(names.len(), 3);
        assert_eq!(ds.schema.fields[0].name, "a");
    }
}
