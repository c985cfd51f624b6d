use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array, Float64Array, Int64Array, RecordBatch};
use parquet::arrow::ArrowWriter;

use mlprof_core::batch::BatchSize;
use mlprof_core::customize::Customization;
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesBuilder;
use mlprof_input::columns::MEASUREMENT_COLUMNS;
use mlprof_input::error::InputError;
use mlprof_input::runtimes::{read_measurements, InputFormat, MeasurementReader};
use mlprof_testutils::files::{write_measurements, TempFile};
use mlprof_testutils::tables::{assert_close, batch_sizes, scenario_rows, scenario_table};

fn write_parquet(path: &Path, columns: Vec<(&str, ArrayRef)>) {
    let record_batch = RecordBatch::try_from_iter(columns).unwrap();
    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, record_batch.schema(), None).unwrap();
    writer.write(&record_batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn test_read_csv_measurements() {
    let file = write_measurements(&scenario_rows());
    let table = read_measurements(file.path(), &MEASUREMENT_COLUMNS).unwrap();
    assert_eq!(table, scenario_table());
}

#[test]
fn test_read_csv_with_spaces_and_custom_column_order() {
    let file = TempFile::with_contents("csv", "1.5, 8\n2.5 ,8\n\n4.0,16\n");
    let table = read_measurements(file.path(), &["runtime", "batch_size"]).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.batch_sizes()[2], BatchSize::from(16u64));
    assert_close(table.runtimes()[1], 2.5);
}

#[test]
fn test_missing_file_fails() {
    let file = TempFile::new("csv");
    let result = read_measurements(file.path(), &MEASUREMENT_COLUMNS);
    assert!(matches!(result, Err(InputError::Io { .. })));
}

#[test]
fn test_field_count_mismatch_fails() {
    let file = TempFile::with_contents("csv", "16,10.0\n16,11.0,3\n");
    match read_measurements(file.path(), &MEASUREMENT_COLUMNS) {
        Err(InputError::FieldCount {
            line,
            expected,
            found,
        }) => {
            assert_eq!(line, 2);
            assert_eq!(expected, 2);
            assert_eq!(found, 3);
        }
        other => panic!("expected a field count error, got {:?}", other),
    }
}

#[test]
fn test_unparsable_field_fails() {
    let file = TempFile::with_contents("csv", "16,fast\n");
    match read_measurements(file.path(), &MEASUREMENT_COLUMNS) {
        Err(InputError::InvalidField { column, value, .. }) => {
            assert_eq!(column, "runtime");
            assert_eq!(value, "fast");
        }
        other => panic!("expected an invalid field error, got {:?}", other),
    }
}

#[test]
fn test_columns_must_name_batch_size_and_runtime() {
    let file = write_measurements(&scenario_rows());
    let result = read_measurements(file.path(), &["batch_size", "latency"]);
    assert!(matches!(result, Err(InputError::MissingColumn(name)) if name == "runtime"));
}

#[test]
fn test_format_follows_extension() {
    assert_eq!(
        InputFormat::from_path(Path::new("a/b.csv")).unwrap(),
        InputFormat::Csv
    );
    assert_eq!(
        InputFormat::from_path(Path::new("b.parquet")).unwrap(),
        InputFormat::Parquet
    );
    assert!(matches!(
        InputFormat::from_path(Path::new("b.json")),
        Err(InputError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_read_parquet_measurements() {
    let file = TempFile::new("parquet");
    write_parquet(
        file.path(),
        vec![
            (
                "batch_size",
                Arc::new(Int64Array::from(vec![16, 16, 16, 32])) as ArrayRef,
            ),
            (
                "runtime",
                Arc::new(Float64Array::from(vec![10.0, 12.0, 14.0, 20.0])) as ArrayRef,
            ),
        ],
    );
    let table = MeasurementReader::default().read(file.path()).unwrap();
    assert_eq!(table, scenario_table());
}

#[test]
fn test_parquet_columns_are_cast() {
    let file = TempFile::new("parquet");
    write_parquet(
        file.path(),
        vec![
            ("batch_size", Arc::new(Int64Array::from(vec![4, 8])) as ArrayRef),
            ("runtime", Arc::new(Float32Array::from(vec![0.5f32, 1.25])) as ArrayRef),
        ],
    );
    let table = MeasurementReader::default().read(file.path()).unwrap();
    assert_close(table.runtimes()[1], 1.25);
}

#[test]
fn test_parquet_negative_batch_size_fails() {
    let file = TempFile::new("parquet");
    write_parquet(
        file.path(),
        vec![
            ("batch_size", Arc::new(Int64Array::from(vec![-4])) as ArrayRef),
            ("runtime", Arc::new(Float64Array::from(vec![1.0])) as ArrayRef),
        ],
    );
    let result = MeasurementReader::default().read(file.path());
    assert!(matches!(result, Err(InputError::NullValues(name)) if name == "batch_size"));
}

#[test]
fn test_parquet_missing_column_fails() {
    let file = TempFile::new("parquet");
    write_parquet(
        file.path(),
        vec![("batch_size", Arc::new(Int64Array::from(vec![4])) as ArrayRef)],
    );
    let result = MeasurementReader::default().read(file.path());
    assert!(matches!(result, Err(InputError::MissingColumn(name)) if name == "runtime"));
}

#[test]
fn test_reader_feeds_series_builder() {
    let first = write_measurements(&scenario_rows());
    let second = write_measurements(&[(16, 1.0), (32, 2.0), (32, 4.0)]);
    let sizes = batch_sizes(&[16, 32]);
    let customization = Customization::default();
    let builder = SeriesBuilder::builder()
        .batch_sizes(&sizes)
        .customization(&customization)
        .reader(MeasurementReader::default())
        .build();
    let series = builder
        .build(
            &[first.to_path_buf(), second.to_path_buf()],
            &[SeriesLabel::from("first"), SeriesLabel::from("second")],
        )
        .unwrap();
    assert_eq!(series.len(), 2);
    assert_close(series["first"].medians[0], 12.0);
    assert_close(series["second"].medians[1], 3.0);
}
