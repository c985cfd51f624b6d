use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use typed_builder::TypedBuilder;

use mlprof_core::batch::BatchSize;
use mlprof_core::series::TableReader;
use mlprof_core::table::MeasurementTable;

use crate::batch::{read_f64_column, read_u64_column};
use crate::columns::{BATCH_SIZE, MEASUREMENT_COLUMNS, RUNTIME};
use crate::error::InputError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") | Some("txt") => Ok(InputFormat::Csv),
            Some("parquet") => Ok(InputFormat::Parquet),
            _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Reads runtime measurement files into tables.
///
/// CSV files are headerless and their fields are labelled by `columns`, in
/// order. Parquet files carry their own column names.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MeasurementReader {
    #[builder(default = MEASUREMENT_COLUMNS.iter().map(|c| c.to_string()).collect())]
    columns: Vec<String>,
}

impl Default for MeasurementReader {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl MeasurementReader {
    pub fn read(&self, path: &Path) -> Result<MeasurementTable, InputError> {
        let table = match InputFormat::from_path(path)? {
            InputFormat::Csv => read_measurements(path, &self.columns)?,
            InputFormat::Parquet => read_parquet_measurements(path)?,
        };
        debug!("Read {} measurements from {}", table.len(), path.display());
        Ok(table)
    }
}

impl TableReader for MeasurementReader {
    type Error = InputError;

    fn read_table(&self, path: &Path) -> Result<MeasurementTable, Self::Error> {
        self.read(path)
    }
}

/// Parses a headerless, comma separated file whose fields are named by `columns`.
///
/// Every row must have exactly as many fields as there are columns, and the
/// columns must include `batch_size` and `runtime`.
pub fn read_measurements<S: AsRef<str>>(
    path: &Path,
    columns: &[S],
) -> Result<MeasurementTable, InputError> {
    let size_idx = column_index(columns, BATCH_SIZE)?;
    let runtime_idx = column_index(columns, RUNTIME)?;

    let file = File::open(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .trim(Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut table = MeasurementTable::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();
        if record.len() != columns.len() {
            return Err(InputError::FieldCount {
                line,
                expected: columns.len(),
                found: record.len(),
            });
        }
        let batch_size: u64 = parse_field(&record, size_idx, BATCH_SIZE, line)?;
        let runtime: f64 = parse_field(&record, runtime_idx, RUNTIME, line)?;
        table.add_row(BatchSize::from(batch_size), runtime);
    }
    Ok(table)
}

/// Reads the `batch_size` and `runtime` columns of a parquet file.
pub fn read_parquet_measurements(path: &Path) -> Result<MeasurementTable, InputError> {
    let file = File::open(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut table = MeasurementTable::new();
    for record_batch in reader {
        let record_batch = record_batch?;
        let batch_sizes = read_u64_column(BATCH_SIZE, &record_batch)?;
        let runtimes = read_f64_column(RUNTIME, &record_batch)?;
        for (batch_size, runtime) in batch_sizes.into_iter().zip(runtimes) {
            table.add_row(BatchSize::from(batch_size), runtime);
        }
    }
    Ok(table)
}

fn column_index<S: AsRef<str>>(columns: &[S], name: &str) -> Result<usize, InputError> {
    columns
        .iter()
        .position(|column| column.as_ref() == name)
        .ok_or_else(|| InputError::MissingColumn(name.to_string()))
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    idx: usize,
    column: &str,
    line: u64,
) -> Result<T, InputError> {
    let value = record.get(idx).unwrap_or_default();
    value.parse::<T>().map_err(|_| InputError::InvalidField {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}
