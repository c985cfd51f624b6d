use std::error::Error;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::info;
use typed_builder::TypedBuilder;

use crate::batch::BatchSizes;
use crate::customize::Customization;
use crate::error::SeriesError;
use crate::label::SeriesLabel;
use crate::stats::{aggregate, SeriesStats};
use crate::table::MeasurementTable;

/// Statistics of every series keyed by the file stem of its label, in input order.
pub type SeriesMap = IndexMap<String, SeriesStats>;

/// Source of measurement tables, one per result file.
pub trait TableReader {
    type Error: Error + Send + Sync + 'static;

    fn read_table(&self, path: &Path) -> Result<MeasurementTable, Self::Error>;
}

impl<F, E> TableReader for F
where
    F: Fn(&Path) -> Result<MeasurementTable, E>,
    E: Error + Send + Sync + 'static,
{
    type Error = E;

    fn read_table(&self, path: &Path) -> Result<MeasurementTable, Self::Error> {
        self(path)
    }
}

#[derive(TypedBuilder)]
pub struct SeriesBuilder<'a, R: TableReader> {
    batch_sizes: &'a BatchSizes,
    customization: &'a Customization,
    reader: R,
}

impl<R: TableReader> SeriesBuilder<'_, R> {
    /// Reads and aggregates every input file. `inputs` and `labels` are matched
    /// by position.
    pub fn build(
        &self,
        inputs: &[PathBuf],
        labels: &[SeriesLabel],
    ) -> Result<SeriesMap, SeriesError> {
        if inputs.len() != labels.len() {
            return Err(SeriesError::LabelCountMismatch {
                inputs: inputs.len(),
                labels: labels.len(),
            });
        }

        let mut series = SeriesMap::with_capacity(inputs.len());
        for (input, label) in inputs.iter().zip(labels.iter()) {
            let key = label.file_stem();
            if series.contains_key(&key) {
                return Err(SeriesError::DuplicateLabel(key));
            }
            info!("Building series {} from {}", label, input.display());
            series.insert(key, self.series_for(input)?);
        }
        Ok(series)
    }

    fn series_for(&self, input: &Path) -> Result<SeriesStats, SeriesError> {
        let table = self
            .reader
            .read_table(input)
            .map_err(|e| SeriesError::Read {
                path: input.to_path_buf(),
                source: Box::new(e),
            })?;
        let stats = aggregate(&table, self.batch_sizes).map_err(|e| SeriesError::Stats {
            path: input.to_path_buf(),
            source: e,
        })?;
        if self.customization.bs_normalized {
            return Ok(stats.normalized(self.batch_sizes));
        }
        Ok(stats)
    }
}
