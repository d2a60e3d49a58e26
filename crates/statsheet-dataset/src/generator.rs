//! Random synthesis of practice datasets.
//!
//! Two shapes are produced, matching the two worksheet input kinds:
//!
//! - [`generate_class_data`]: `count` contiguous classes of equal width starting at `min`
//! - [`generate_single_data`]: `count` distinct integers drawn from `[min, max]`
//!
//! Frequencies are proportional to random weights, rounded to whole numbers, and corrected so
//! that they always sum to exactly `total_frequency`.
//!
//! # Examples
//!
//! ```
//! use statsheet_dataset::generator::{DatasetGenerator, GenerationSpec};
//!
//! let mut generator = DatasetGenerator::with_seed(42);
//! let dataset = generator.class_data(&GenerationSpec::default()).unwrap();
//! assert_eq!(dataset.len(), 5);
//! assert_eq!(dataset.total_frequency(), 100.0);
//! ```

use rand::{Rng, SeedableRng as _, seq::index};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use statsheet_stats::{
    dataset::{Dataset, DatasetError},
    interval::{Interval, IntervalKind, InvalidIntervalError},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InvalidGenerationSpecError {
    #[display("generation field '{field}' must be finite")]
    NonFinite { field: &'static str },
    #[display("class interval must be positive, got {interval}")]
    NonPositiveInterval { interval: f64 },
    #[display("min {min} is greater than max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[display("count must be at least 1")]
    ZeroCount,
    #[display("cannot draw {count} distinct values from {available} available integers")]
    NotEnoughValues { count: usize, available: usize },
    #[display("range [{min}, {max}] exceeds the exactly representable integers")]
    RangeTooLarge { min: f64, max: f64 },
    #[display("generated class is invalid: {_0}")]
    #[from]
    Interval(InvalidIntervalError),
    #[display("generated dataset is invalid: {_0}")]
    #[from]
    Dataset(DatasetError),
}

/// `2^53`; beyond it consecutive integers are no longer distinct `f64` values.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Parameters for dataset synthesis.
///
/// Missing JSON fields take the authoring defaults: `min = 10`, `max = 100`,
/// `interval = 10`, `count = 5`, `totalFrequency = 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSpec {
    pub min: f64,
    pub max: f64,
    /// Class width; ignored for discrete data.
    pub interval: f64,
    pub count: usize,
    pub total_frequency: u32,
}

impl Default for GenerationSpec {
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 100.0,
            interval: 10.0,
            count: 5,
            total_frequency: 100,
        }
    }
}

impl GenerationSpec {
    fn check_common(&self) -> Result<(), InvalidGenerationSpecError> {
        for (field, value) in [("min", self.min), ("max", self.max)] {
            if !value.is_finite() {
                return Err(InvalidGenerationSpecError::NonFinite { field });
            }
        }
        if self.min > self.max {
            return Err(InvalidGenerationSpecError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.count == 0 {
            return Err(InvalidGenerationSpecError::ZeroCount);
        }
        Ok(())
    }

    fn check_class(&self) -> Result<(), InvalidGenerationSpecError> {
        self.check_common()?;
        if !self.interval.is_finite() {
            return Err(InvalidGenerationSpecError::NonFinite { field: "interval" });
        }
        if self.interval <= 0.0 {
            return Err(InvalidGenerationSpecError::NonPositiveInterval {
                interval: self.interval,
            });
        }
        Ok(())
    }

    /// Integers in `[ceil(min), floor(max)]`, as the first one and the count.
    #[expect(clippy::cast_possible_truncation)]
    fn integer_range(&self) -> Result<(i64, usize), InvalidGenerationSpecError> {
        let too_large = || InvalidGenerationSpecError::RangeTooLarge {
            min: self.min,
            max: self.max,
        };
        if self.min.abs() > MAX_EXACT_INTEGER || self.max.abs() > MAX_EXACT_INTEGER {
            return Err(too_large());
        }
        let low = self.min.ceil() as i64;
        let high = self.max.floor() as i64;
        let available = usize::try_from((high - low + 1).max(0)).map_err(|_| too_large())?;
        Ok((low, available))
    }
}

/// Generates grouped class data.
pub fn generate_class_data<R>(
    spec: &GenerationSpec,
    rng: &mut R,
) -> Result<Dataset, InvalidGenerationSpecError>
where
    R: Rng + ?Sized,
{
    spec.check_class()?;
    let intervals = (0..spec.count)
        .map(|i| {
            #[expect(clippy::cast_precision_loss)]
            let lower = spec.min + i as f64 * spec.interval;
            Interval::grouped(lower, lower + spec.interval)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let weights = (0..spec.count)
        .map(|_| rng.random::<f64>())
        .collect::<Vec<_>>();
    let frequencies = distribute(&weights, spec.total_frequency, rng);
    tracing::debug!(?intervals, ?frequencies, "generated grouped class data");
    Ok(Dataset::new(intervals, frequencies)?)
}

/// Generates discrete data of distinct integers, sorted ascending.
///
/// `measure_key` only labels the diagnostics.
pub fn generate_single_data<R>(
    spec: &GenerationSpec,
    measure_key: &str,
    rng: &mut R,
) -> Result<Dataset, InvalidGenerationSpecError>
where
    R: Rng + ?Sized,
{
    spec.check_common()?;
    let (low, available) = spec.integer_range()?;
    if spec.count > available {
        return Err(InvalidGenerationSpecError::NotEnoughValues {
            count: spec.count,
            available,
        });
    }
    let mut values = index::sample(rng, available, spec.count)
        .into_iter()
        .map(|offset| low + i64::try_from(offset).unwrap_or(i64::MAX))
        .collect::<Vec<_>>();
    values.sort_unstable();
    let intervals = values
        .iter()
        .map(|&v| {
            #[expect(clippy::cast_precision_loss)]
            let value = v as f64;
            Interval::discrete(value)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let weights = (0..spec.count)
        .map(|_| rng.random_range(0.5..1.5))
        .collect::<Vec<f64>>();
    let frequencies = distribute(&weights, spec.total_frequency, rng);
    tracing::debug!(measure_key, ?values, ?frequencies, "generated single data");
    Ok(Dataset::new(intervals, frequencies)?)
}

/// Generates data of the given kind.
pub fn generate<R>(
    kind: IntervalKind,
    spec: &GenerationSpec,
    measure_key: &str,
    rng: &mut R,
) -> Result<Dataset, InvalidGenerationSpecError>
where
    R: Rng + ?Sized,
{
    match kind {
        IntervalKind::Grouped => generate_class_data(spec, rng),
        IntervalKind::Discrete => generate_single_data(spec, measure_key, rng),
    }
}

/// Splits `total` into whole-number shares proportional to `weights`.
///
/// The rounding remainder lands on one random share. When that share would go negative the
/// remainder is instead removed one unit at a time from random positive shares.
#[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn distribute<R>(weights: &[f64], total: u32, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let weight_sum = weights.iter().sum::<f64>();
    let mut shares = weights
        .iter()
        .map(|w| {
            let ratio = if weight_sum > 0.0 {
                w / weight_sum
            } else {
                1.0 / weights.len() as f64
            };
            (ratio * f64::from(total)).round() as i64
        })
        .collect::<Vec<_>>();

    let mut diff = i64::from(total) - shares.iter().sum::<i64>();
    if diff != 0 {
        let idx = rng.random_range(0..shares.len());
        if shares[idx] + diff >= 0 {
            tracing::trace!(idx, diff, "adjusted frequency to preserve total");
            shares[idx] += diff;
        } else {
            while diff < 0 {
                let positive = shares
                    .iter()
                    .enumerate()
                    .filter(|&(_, s)| *s > 0)
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>();
                let idx = positive[rng.random_range(0..positive.len())];
                shares[idx] -= 1;
                diff += 1;
            }
        }
    }
    shares.into_iter().map(|s| s as f64).collect()
}

/// Seeded generator producing reproducible datasets.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    rng: Pcg32,
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetGenerator {
    /// Creates a generator with a random seed from the thread-local RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a generator whose output is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn class_data(&mut self, spec: &GenerationSpec) -> Result<Dataset, InvalidGenerationSpecError> {
        generate_class_data(spec, &mut self.rng)
    }

    pub fn single_data(
        &mut self,
        spec: &GenerationSpec,
        measure_key: &str,
    ) -> Result<Dataset, InvalidGenerationSpecError> {
        generate_single_data(spec, measure_key, &mut self.rng)
    }

    pub fn generate(
        &mut self,
        kind: IntervalKind,
        spec: &GenerationSpec,
        measure_key: &str,
    ) -> Result<Dataset, InvalidGenerationSpecError> {
        generate(kind, spec, measure_key, &mut self.rng)
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}
