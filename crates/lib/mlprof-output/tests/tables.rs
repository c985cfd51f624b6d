use std::fs::{self, File};

use arrow::array::{Array, Float64Array, StringArray, UInt64Array};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesMap;
use mlprof_core::stats::aggregate;
use mlprof_output::error::OutputError;
use mlprof_output::tables::StatsTable;
use mlprof_testutils::files::TempFile;
use mlprof_testutils::tables::{batch_sizes, scenario_table, table_from_rows};

fn stats_table() -> StatsTable {
    let sizes = batch_sizes(&[16, 32]);
    let mut series = SeriesMap::new();
    series.insert(
        "tf_cpu".to_string(),
        aggregate(&scenario_table(), &sizes).unwrap(),
    );
    series.insert(
        "onnx".to_string(),
        aggregate(&table_from_rows(&[(16, 2.0), (32, 4.0)]), &sizes).unwrap(),
    );
    let labels = vec![SeriesLabel::from(vec!["tf", "cpu"]), SeriesLabel::from("onnx")];
    StatsTable::from_series(&sizes, &series, &labels)
}

#[test]
fn test_rows_follow_labels_and_batch_sizes() {
    let table = stats_table();
    assert_eq!(table.len(), 4);
}

#[test]
fn test_write_csv_table() {
    let output = TempFile::new("csv");
    stats_table().write_to_file(output.path()).unwrap();
    let contents = fs::read_to_string(output.path()).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "label,batch_size,median,err_down,err_up");
    assert!(lines[1].starts_with("\"tf, cpu\",16,12"));
    assert!(lines[4].starts_with("onnx,32,4"));
}

#[test]
fn test_write_parquet_table() {
    let output = TempFile::new("parquet");
    stats_table().write_to_file(output.path()).unwrap();
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(output.path()).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let batches: Vec<_> = reader.map(|batch| batch.unwrap()).collect();
    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.num_rows(), 4);

    let labels = batch
        .column_by_name("label")
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .unwrap();
    assert_eq!(labels.value(0), "tf, cpu");
    let sizes = batch
        .column_by_name("batch_size")
        .and_then(|c| c.as_any().downcast_ref::<UInt64Array>())
        .unwrap();
    assert_eq!(sizes.value(3), 32);
    let medians = batch
        .column_by_name("median")
        .and_then(|c| c.as_any().downcast_ref::<Float64Array>())
        .unwrap();
    assert_eq!(medians.value(0), 12.0);
}

#[test]
fn test_unknown_table_extension_fails() {
    let output = TempFile::new("xlsx");
    let result = stats_table().write_to_file(output.path());
    assert!(matches!(result, Err(OutputError::UnsupportedFormat(_))));
}
