use std::mem::take;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use log::info;

use mlprof_core::batch::{BatchSize, BatchSizes};
use mlprof_core::label::SeriesLabel;
use mlprof_core::series::SeriesMap;
use mlprof_core::stats::Spread;

use crate::error::OutputError;
use crate::writer::DataOutput;

/// Long format table of the aggregated statistics, one row per series and
/// batch size.
#[derive(Debug, Default)]
pub struct StatsTable {
    label: Vec<String>,
    batch_size: Vec<u64>,
    median: Vec<f64>,
    err_down: Vec<f64>,
    err_up: Vec<f64>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for every label found in `series`, in label order.
    pub fn from_series(
        batch_sizes: &BatchSizes,
        series: &SeriesMap,
        labels: &[SeriesLabel],
    ) -> Self {
        let mut table = Self::new();
        for label in labels {
            let Some(stats) = series.get(&label.file_stem()) else {
                continue;
            };
            for (batch_size, spread) in batch_sizes.iter().zip(stats.spreads()) {
                table.add_data(&label.display_name(), *batch_size, spread);
            }
        }
        table
    }

    pub fn add_data(&mut self, label: &str, batch_size: BatchSize, spread: Spread) {
        self.label.push(label.to_string());
        self.batch_size.push(batch_size.as_u64());
        self.median.push(spread.median);
        self.err_down.push(spread.err_down);
        self.err_up.push(spread.err_up);
    }

    pub fn len(&self) -> usize {
        self.label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_empty()
    }

    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("label", DataType::Utf8, false),
            Field::new("batch_size", DataType::UInt64, false),
            Field::new("median", DataType::Float64, false),
            Field::new("err_down", DataType::Float64, false),
            Field::new("err_up", DataType::Float64, false),
        ])
    }

    /// Writes the rows collected so far to `output_file`, replacing it if it exists.
    pub fn write_to_file(&mut self, output_file: &Path) -> Result<(), OutputError> {
        let rows = self.len();
        let schema = Arc::new(Self::schema());
        let record_batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(take(&mut self.label))) as ArrayRef,
                Arc::new(UInt64Array::from(take(&mut self.batch_size))) as ArrayRef,
                Arc::new(Float64Array::from(take(&mut self.median))) as ArrayRef,
                Arc::new(Float64Array::from(take(&mut self.err_down))) as ArrayRef,
                Arc::new(Float64Array::from(take(&mut self.err_up))) as ArrayRef,
            ],
        )?;

        let mut to_output = DataOutput::new(output_file, schema.as_ref().clone())?;
        to_output.record_batch_to_file(&record_batch)?;
        to_output.close()?;
        info!("Wrote {} statistics rows to {}", rows, output_file.display());
        Ok(())
    }
}
