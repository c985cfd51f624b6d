use std::error::Error;
use std::path::PathBuf;

use thiserror::Error;

use crate::batch::BatchSize;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("at least one batch size is required")]
    NoBatchSizes,
    #[error("batch sizes must be positive")]
    ZeroBatchSize,
    #[error("batch size {0} is listed more than once")]
    DuplicateBatchSize(BatchSize),
    #[error("no runtime measurements found for batch size {batch_size}")]
    EmptySelection { batch_size: BatchSize },
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("{inputs} input files were given for {labels} measurement labels")]
    LabelCountMismatch { inputs: usize, labels: usize },
    #[error("measurement label '{0}' is used more than once")]
    DuplicateLabel(String),
    #[error("failed to read measurements from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    #[error("failed to aggregate {path}: {source}")]
    Stats {
        path: PathBuf,
        #[source]
        source: StatsError,
    },
}
