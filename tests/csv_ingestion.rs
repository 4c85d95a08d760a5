use std::path::Path;

use csv_analyzer::ingestion::csv::ingest_csv_from_reader;
use csv_analyzer::ingestion::{load_from_path, LoadOptions};
use csv_analyzer::types::{DataType, Value};
use csv_analyzer::LoadError;

#[test]
fn load_from_path_infers_column_types() {
    let ds = load_from_path("tests/fixtures/people.csv", &LoadOptions::default()).unwrap();

    assert_eq!(ds.row_count(), 4);
    let types: Vec<DataType> = ds.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Utf8,
            DataType::Int64,
            DataType::Float64,
            DataType::Utf8
        ]
    );
    assert_eq!(ds.rows[0][1], Value::Int64(20));
    assert_eq!(ds.rows[3][1], Value::Null);
    assert_eq!(ds.rows[2][2], Value::Null);
}

#[test]
fn tsv_extension_selects_tab_delimiter() {
    let ds = load_from_path("tests/fixtures/scores.tsv", &LoadOptions::default()).unwrap();
    assert_eq!(
        ds.schema.field_names().collect::<Vec<_>>(),
        vec!["id", "score"]
    );
    assert_eq!(ds.rows[1][1], Value::Float64(3.5));
}

#[test]
fn missing_file_is_not_found_and_names_the_path() {
    let err = load_from_path("tests/fixtures/does_not_exist.csv", &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert!(err.to_string().contains("does_not_exist.csv"));
}

#[test]
fn zero_byte_file_is_empty() {
    let err = load_from_path("tests/fixtures/empty.csv", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
    assert!(err.to_string().contains("empty.csv"));
}

#[test]
fn overlong_row_is_malformed() {
    let err = load_from_path("tests/fixtures/ragged.csv", &LoadOptions::default()).unwrap_err();
    let LoadError::Malformed { path, .. } = &err else {
        panic!("expected malformed error, got {err:?}");
    };
    assert!(path.ends_with("ragged.csv"));
}

#[test]
fn directory_path_is_a_read_error() {
    let err = load_from_path("tests/fixtures", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn header_only_file_loads_with_zero_rows() {
    let ds = load_from_path("tests/fixtures/headers_only.csv", &LoadOptions::default()).unwrap();
    assert_eq!(ds.row_count(), 0);
    assert_eq!(ds.column_count(), 2);
}

#[test]
fn reader_pads_short_rows_and_recognizes_missing_markers() {
    let input = "a,b,c\n1,x\nNA,y,2.5\n";
    let ds = ingest_csv_from_reader(input.as_bytes(), b',', Path::new("inline.csv")).unwrap();

    assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Utf8("x".to_string()), Value::Null]);
    assert_eq!(ds.rows[1][0], Value::Null);
    assert_eq!(ds.schema.fields[2].data_type, DataType::Float64);
}

#[test]
fn duplicate_headers_are_disambiguated() {
    let input = "v,v,v\n1,2,3\n";
    let ds = ingest_csv_from_reader(input.as_bytes(), b',', Path::new("inline.csv")).unwrap();
    let names: Vec<&str> = ds.schema.field_names().collect();
    assert_eq!(names.len(), 3);
    assert_eq!(names[0], "v");
    assert!(names[1] != names[0] && names[2] != names[0] && names[1] != names[2]);
}
