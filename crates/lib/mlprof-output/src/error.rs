use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot infer an image format from {0}, expected .svg, .png, .bmp or .jpg")]
    UnsupportedFormat(PathBuf),
    #[error("invalid palette color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("the color palette is empty")]
    EmptyPalette,
    #[error("no statistics were computed for series '{0}'")]
    MissingSeries(String),
    #[error("series '{label}' has {found} values for {expected} batch sizes")]
    LengthMismatch {
        label: String,
        expected: usize,
        found: usize,
    },
    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to draw the plot: {0}")]
    Draw(String),
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported table file {0}, expected .csv or .parquet")]
    UnsupportedFormat(PathBuf),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build the statistics table: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("failed to write parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("failed to configure the logger: {0}")]
    Logger(String),
}
