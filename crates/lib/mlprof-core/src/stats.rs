use itertools::izip;
use log::debug;

use crate::batch::{BatchSize, BatchSizes};
use crate::error::StatsError;
use crate::table::MeasurementTable;

pub const LOWER_PERCENTILE: f64 = 16.0;
pub const MEDIAN_PERCENTILE: f64 = 50.0;
pub const UPPER_PERCENTILE: f64 = 84.0;

/// Percentile of an ascending slice with linear interpolation between the
/// closest ranks. The rank of `p` is `p / 100 * (n - 1)`.
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let rank = p.clamp(0.0, 100.0) / 100.0 * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let weight = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * weight)
}

/// Median and the empirical one sigma band of a set of runtimes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spread {
    pub median: f64,
    pub err_down: f64,
    pub err_up: f64,
}

impl Spread {
    pub fn from_samples(mut samples: Vec<f64>) -> Option<Self> {
        samples.sort_by(f64::total_cmp);
        let median = percentile(&samples, MEDIAN_PERCENTILE)?;
        let lower = percentile(&samples, LOWER_PERCENTILE)?;
        let upper = percentile(&samples, UPPER_PERCENTILE)?;
        Some(Self {
            median,
            err_down: (lower - median).abs(),
            err_up: (upper - median).abs(),
        })
    }

    pub fn lower(&self) -> f64 {
        self.median - self.err_down
    }

    pub fn upper(&self) -> f64 {
        self.median + self.err_up
    }
}

/// Per batch size summary of one measurement series.
///
/// All three columns are indexed by the position of the batch size in the
/// [`BatchSizes`] they were computed for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesStats {
    pub medians: Vec<f64>,
    pub err_down: Vec<f64>,
    pub err_up: Vec<f64>,
}

impl SeriesStats {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            medians: Vec::with_capacity(capacity),
            err_down: Vec::with_capacity(capacity),
            err_up: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, spread: Spread) {
        self.medians.push(spread.median);
        self.err_down.push(spread.err_down);
        self.err_up.push(spread.err_up);
    }

    pub fn len(&self) -> usize {
        self.medians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.medians.is_empty()
    }

    pub fn spreads(&self) -> impl Iterator<Item = Spread> + '_ {
        izip!(&self.medians, &self.err_down, &self.err_up).map(|(median, down, up)| Spread {
            median: *median,
            err_down: *down,
            err_up: *up,
        })
    }

    /// Divides every column element-wise by the batch size, turning absolute
    /// runtimes into runtimes per item.
    pub fn normalized(&self, batch_sizes: &BatchSizes) -> Self {
        let divide = |column: &[f64]| -> Vec<f64> {
            column
                .iter()
                .zip(batch_sizes.iter())
                .map(|(value, size)| value / size.as_f64())
                .collect()
        };
        Self {
            medians: divide(&self.medians),
            err_down: divide(&self.err_down),
            err_up: divide(&self.err_up),
        }
    }
}

/// Computes the median and percentile errors of `table` for every batch size.
///
/// Fails with [`StatsError::EmptySelection`] as soon as a batch size has no
/// matching rows in the table.
pub fn aggregate(
    table: &MeasurementTable,
    batch_sizes: &BatchSizes,
) -> Result<SeriesStats, StatsError> {
    let mut stats = SeriesStats::with_capacity(batch_sizes.len());
    for batch_size in batch_sizes.iter() {
        stats.push(spread_for(table, *batch_size)?);
    }
    Ok(stats)
}

fn spread_for(table: &MeasurementTable, batch_size: BatchSize) -> Result<Spread, StatsError> {
    let runtimes = table.runtimes_for(batch_size);
    debug!("Aggregating {} runtimes for batch size {}", runtimes.len(), batch_size);
    Spread::from_samples(runtimes).ok_or(StatsError::EmptySelection { batch_size })
}
