//! Seeded subsampling without replacement
//!
//! Draws `k` distinct row positions uniformly over all `C(n, k)` subsets
//! and gathers the matching feature rows and labels. The same seed on the
//! same inputs always selects the same rows in the same order.

use crate::error::{FeatureError, Result};
use pairfeat_io::{DataColumn, Table};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

/// Draws reproducible row subsets from aligned features and labels
#[derive(Debug, Clone, Copy)]
pub struct Subsampler {
    seed: u64,
}

impl Subsampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `sample_size` distinct positions in `0..population`
    pub fn sample_indices(&self, population: usize, sample_size: usize) -> Result<Vec<usize>> {
        if sample_size > population {
            return Err(FeatureError::InvalidSampleSize {
                requested: i64::try_from(sample_size).unwrap_or(i64::MAX),
                available: population,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        Ok(index::sample(&mut rng, population, sample_size).into_vec())
    }

    /// Subsample `features` and `labels` together
    pub fn sample(
        &self,
        features: &Table,
        labels: &DataColumn,
        sample_size: usize,
    ) -> Result<(Table, DataColumn)> {
        let population = features.num_rows();
        if labels.len() != population {
            return Err(FeatureError::LengthMismatch {
                expected: population,
                actual: labels.len(),
            });
        }

        let indices = self.sample_indices(population, sample_size)?;
        tracing::debug!(
            "Sampled {} of {} rows (seed {})",
            indices.len(),
            population,
            self.seed
        );
        Ok((features.take(&indices)?, labels.take(&indices)))
    }
}

/// Draw `sample_size` aligned rows from `features` and `labels`
///
/// Fails with `InvalidSampleSize` when `sample_size` is negative or larger
/// than the number of rows.
pub fn sampling(
    features: &Table,
    labels: &DataColumn,
    sample_size: i64,
    seed: u64,
) -> Result<(Table, DataColumn)> {
    let size = usize::try_from(sample_size).map_err(|_| FeatureError::InvalidSampleSize {
        requested: sample_size,
        available: features.num_rows(),
    })?;
    Subsampler::new(seed).sample(features, labels, size)
}
