use std::fmt::{Debug, Display};
use std::ops::Deref;
use std::str::FromStr;

use itertools::Itertools;
use serde::Deserialize;

use crate::error::StatsError;

/// Number of items handed to the model in a single inference call.
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchSize(pub u64);

impl Display for BatchSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BatchSize {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s.parse::<u64>()?;
        Ok(Self(size))
    }
}

impl From<u64> for BatchSize {
    fn from(f: u64) -> Self {
        Self(f)
    }
}

impl BatchSize {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

/// Ordered list of batch sizes that defines the x-axis and the groups to aggregate.
///
/// The order is kept exactly as given. Values must be positive and distinct, since
/// they are used as divisors when normalizing and as ticks on a logarithmic axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchSizes(Vec<BatchSize>);

impl BatchSizes {
    pub fn new(sizes: Vec<BatchSize>) -> Result<Self, StatsError> {
        if sizes.is_empty() {
            return Err(StatsError::NoBatchSizes);
        }
        if sizes.iter().any(|size| size.as_u64() == 0) {
            return Err(StatsError::ZeroBatchSize);
        }
        if let Some(duplicate) = sizes.iter().duplicates().next() {
            return Err(StatsError::DuplicateBatchSize(*duplicate));
        }
        Ok(Self(sizes))
    }

    pub fn as_f64(&self) -> Vec<f64> {
        self.0.iter().map(BatchSize::as_f64).collect()
    }

    pub fn min(&self) -> BatchSize {
        self.0.iter().copied().min().unwrap_or_default()
    }

    pub fn max(&self) -> BatchSize {
        self.0.iter().copied().max().unwrap_or_default()
    }
}

impl Deref for BatchSizes {
    type Target = [BatchSize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<u64>> for BatchSizes {
    type Error = StatsError;

    fn try_from(sizes: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(sizes.into_iter().map(BatchSize::from).collect())
    }
}
