use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("invalid column data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("unsupported measurement file {0}, expected .csv or .parquet")]
    UnsupportedFormat(PathBuf),
    #[error("column '{0}' is missing")]
    MissingColumn(String),
    #[error("column '{0}' contains empty values")]
    NullValues(String),
    #[error("line {line} has {found} fields but {expected} columns were given")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: cannot parse '{value}' in column '{column}'")]
    InvalidField {
        line: u64,
        column: String,
        value: String,
    },
}
