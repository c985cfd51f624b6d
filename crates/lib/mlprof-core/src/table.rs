use crate::batch::BatchSize;

/// Runtime measurements as loaded from a single result file.
///
/// Rows keep the order in which they were read. The two columns always have the
/// same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementTable {
    batch_sizes: Vec<BatchSize>,
    runtimes: Vec<f64>,
}

impl MeasurementTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, batch_size: BatchSize, runtime: f64) {
        self.batch_sizes.push(batch_size);
        self.runtimes.push(runtime);
    }

    pub fn len(&self) -> usize {
        self.runtimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runtimes.is_empty()
    }

    pub fn batch_sizes(&self) -> &[BatchSize] {
        &self.batch_sizes
    }

    pub fn runtimes(&self) -> &[f64] {
        &self.runtimes
    }

    /// Runtimes of every row measured with the given batch size.
    pub fn runtimes_for(&self, batch_size: BatchSize) -> Vec<f64> {
        self.batch_sizes
            .iter()
            .zip(self.runtimes.iter())
            .filter(|(size, _)| **size == batch_size)
            .map(|(_, runtime)| *runtime)
            .collect()
    }
}

impl FromIterator<(BatchSize, f64)> for MeasurementTable {
    fn from_iter<T: IntoIterator<Item = (BatchSize, f64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (batch_size, runtime) in iter {
            table.add_row(batch_size, runtime);
        }
        table
    }
}
