//! Closed-form descriptive statistics over frequency distributions.
//!
//! Every function takes a slice of [`Class`]es (an interval plus its frequency) so the same
//! formulas serve authored datasets, generated datasets and rows corrected by a student.
//! Results are unrounded; callers round for presentation with [`round2`].
//!
//! Grouped formulas (N = Σfᵢ, xᵢ = class midpoint):
//!
//! | Statistic | Formula |
//! |---|---|
//! | mean | `Σfᵢxᵢ / N` |
//! | mean deviation | `Σfᵢ\|xᵢ − x̄\| / N` |
//! | variance | `Σfᵢ(xᵢ − x̄)² / N` |
//! | median | `L + ((N/2 − F_prev) / f) × h` |
//! | mode | `L + ((f1 − f0) / (2f1 − f0 − f2)) × h` |
//!
//! # Examples
//!
//! ```
//! use statsheet_stats::{dataset::Dataset, descriptive};
//!
//! let dataset = Dataset::from_raw(
//!     [[10.0, 20.0], [20.0, 30.0], [30.0, 40.0], [40.0, 50.0]],
//!     vec![4.0, 6.0, 8.0, 2.0],
//! )
//! .unwrap();
//! let classes = dataset.classes();
//! assert_eq!(descriptive::mean(&classes), Ok(29.0));
//! assert_eq!(descriptive::grouped_median(&classes).unwrap().value, 30.0);
//! assert_eq!(descriptive::grouped_mode(&classes).unwrap().value, 32.5);
//! ```

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// Why a summary statistic cannot be computed for a dataset.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateDatasetError {
    #[display("dataset has zero total frequency")]
    EmptyDataset,
    #[display("mode denominator 2f1 - f0 - f2 is zero")]
    ZeroModeDenominator,
    #[display("mean is zero, so the coefficient of variation is undefined")]
    ZeroMean,
    #[display("max + min is zero, so the coefficient of range is undefined")]
    ZeroRangeSum,
}

/// One row of a frequency distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Class {
    pub interval: Interval,
    pub frequency: f64,
}

impl Class {
    #[must_use]
    pub fn new(interval: Interval, frequency: f64) -> Self {
        Self {
            interval,
            frequency,
        }
    }
}

/// Rounds half away from zero to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[must_use]
pub fn total_frequency(classes: &[Class]) -> f64 {
    classes.iter().map(|c| c.frequency).sum()
}

fn require_population(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    let n = total_frequency(classes);
    if n > 0.0 {
        Ok(n)
    } else {
        Err(DegenerateDatasetError::EmptyDataset)
    }
}

/// Running totals `Fᵢ` in the given order.
#[must_use]
pub fn cumulative_frequencies(classes: &[Class]) -> Vec<f64> {
    classes
        .iter()
        .scan(0.0, |acc, c| {
            *acc += c.frequency;
            Some(*acc)
        })
        .collect()
}

pub fn mean(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    let n = require_population(classes)?;
    let sum = classes
        .iter()
        .map(|c| c.frequency * c.interval.midpoint())
        .sum::<f64>();
    Ok(sum / n)
}

/// Mean absolute deviation about the mean.
pub fn mean_deviation(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    let n = require_population(classes)?;
    let mean = mean(classes)?;
    let sum = classes
        .iter()
        .map(|c| c.frequency * (c.interval.midpoint() - mean).abs())
        .sum::<f64>();
    Ok(sum / n)
}

/// Population variance.
pub fn variance(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    let n = require_population(classes)?;
    let mean = mean(classes)?;
    let sum = classes
        .iter()
        .map(|c| c.frequency * (c.interval.midpoint() - mean).powi(2))
        .sum::<f64>();
    Ok(sum / n)
}

pub fn standard_deviation(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    variance(classes).map(f64::sqrt)
}

/// `sd / mean × 100`.
pub fn coefficient_of_variation(classes: &[Class]) -> Result<f64, DegenerateDatasetError> {
    let mean = mean(classes)?;
    if mean == 0.0 {
        return Err(DegenerateDatasetError::ZeroMean);
    }
    Ok(standard_deviation(classes)? / mean * 100.0)
}

/// Spread between the smallest lower bound and the largest upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSummary {
    pub min: f64,
    pub max: f64,
    /// Every class whose lower bound equals `min`, in input order.
    pub min_indices: Vec<usize>,
    /// Every class whose upper bound equals `max`, in input order.
    pub max_indices: Vec<usize>,
}

impl RangeSummary {
    #[must_use]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// `range / (max + min) × 100`.
    pub fn coefficient(&self) -> Result<f64, DegenerateDatasetError> {
        let sum = self.max + self.min;
        if sum == 0.0 {
            return Err(DegenerateDatasetError::ZeroRangeSum);
        }
        Ok(self.range() / sum * 100.0)
    }
}

/// Range over every class, regardless of frequency.
pub fn range(classes: &[Class]) -> Result<RangeSummary, DegenerateDatasetError> {
    let min = classes
        .iter()
        .map(|c| c.interval.lower())
        .min_by(f64::total_cmp)
        .ok_or(DegenerateDatasetError::EmptyDataset)?;
    let max = classes
        .iter()
        .map(|c| c.interval.upper())
        .max_by(f64::total_cmp)
        .ok_or(DegenerateDatasetError::EmptyDataset)?;
    let indices_where = |bound: fn(&Class) -> f64, target: f64| {
        classes
            .iter()
            .enumerate()
            .filter(|(_, c)| bound(c) == target)
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    };
    Ok(RangeSummary {
        min,
        max,
        min_indices: indices_where(|c| c.interval.lower(), min),
        max_indices: indices_where(|c| c.interval.upper(), max),
    })
}

/// Class indices ordered by lower bound; ties keep their input order.
fn order_by_lower(classes: &[Class]) -> Vec<usize> {
    let mut order = (0..classes.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        classes[a]
            .interval
            .lower()
            .total_cmp(&classes[b].interval.lower())
    });
    order
}

/// The class containing the median and the interpolated median.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedianClass {
    /// Index into the input slice.
    pub index: usize,
    /// `L`
    pub lower: f64,
    /// `f`
    pub frequency: f64,
    /// `h`
    pub width: f64,
    /// `F_prev`, cumulative frequency strictly before the median class.
    pub cumulative_before: f64,
    pub value: f64,
}

/// Grouped median by linear interpolation inside the first class whose cumulative frequency
/// reaches `N/2`. Classes are visited in ascending order of their lower bound.
pub fn grouped_median(classes: &[Class]) -> Result<MedianClass, DegenerateDatasetError> {
    let n = require_population(classes)?;
    let half = n / 2.0;
    let mut cumulative_before = 0.0;
    for index in order_by_lower(classes) {
        let class = &classes[index];
        let cumulative = cumulative_before + class.frequency;
        if cumulative >= half && class.frequency > 0.0 {
            let lower = class.interval.lower();
            let width = class.interval.width();
            let value = lower + ((half - cumulative_before) / class.frequency) * width;
            return Ok(MedianClass {
                index,
                lower,
                frequency: class.frequency,
                width,
                cumulative_before,
                value,
            });
        }
        cumulative_before = cumulative;
    }
    Err(DegenerateDatasetError::EmptyDataset)
}

/// Index of the class with the highest frequency; the first one wins ties.
#[must_use]
pub fn modal_class_index(classes: &[Class]) -> Option<usize> {
    classes
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, class)| match best {
            Some((_, f)) if class.frequency <= f => best,
            _ => Some((index, class.frequency)),
        })
        .map(|(index, _)| index)
}

/// The modal class and the interpolated mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalClass {
    /// Index into the input slice.
    pub index: usize,
    /// `f1`
    pub frequency: f64,
    /// `f0`, zero when the modal class is the first class.
    pub preceding: f64,
    /// `f2`, zero when the modal class is the last class.
    pub following: f64,
    pub value: f64,
}

/// Grouped mode by interpolation around the modal class, with absent neighbours counted as
/// zero frequency.
pub fn grouped_mode(classes: &[Class]) -> Result<ModalClass, DegenerateDatasetError> {
    require_population(classes)?;
    let order = order_by_lower(classes);
    let sorted = order.iter().map(|&i| classes[i]).collect::<Vec<_>>();
    let position = modal_class_index(&sorted).ok_or(DegenerateDatasetError::EmptyDataset)?;
    let modal = sorted[position];
    let f1 = modal.frequency;
    let f0 = position
        .checked_sub(1)
        .map_or(0.0, |prev| sorted[prev].frequency);
    let f2 = sorted.get(position + 1).map_or(0.0, |next| next.frequency);

    let denominator = 2.0 * f1 - f0 - f2;
    if denominator == 0.0 {
        tracing::debug!(f0, f1, f2, "grouped mode is undefined");
        return Err(DegenerateDatasetError::ZeroModeDenominator);
    }
    let value =
        modal.interval.lower() + ((f1 - f0) / denominator) * modal.interval.width();
    Ok(ModalClass {
        index: order[position],
        frequency: f1,
        preceding: f0,
        following: f2,
        value,
    })
}

/// Median of ungrouped data, expanding each value by its frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteMedian {
    /// Indices of the classes holding the lower and upper middle observations; equal when
    /// `N` is odd or both middle observations share a class.
    pub indices: (usize, usize),
    pub value: f64,
}

pub fn discrete_median(classes: &[Class]) -> Result<DiscreteMedian, DegenerateDatasetError> {
    let n = require_population(classes)?;
    let mut order = (0..classes.len())
        .filter(|&i| classes[i].frequency > 0.0)
        .collect::<Vec<_>>();
    order.sort_by(|&a, &b| {
        classes[a]
            .interval
            .midpoint()
            .total_cmp(&classes[b].interval.midpoint())
    });

    // Zero-based ranks of the middle observations.
    let upper_rank = (n / 2.0).floor();
    let lower_rank = if n % 2.0 == 0.0 {
        upper_rank - 1.0
    } else {
        upper_rank
    };
    let index_at_rank = |rank: f64| {
        let mut cumulative = 0.0;
        order
            .iter()
            .copied()
            .find(|&i| {
                cumulative += classes[i].frequency;
                cumulative > rank
            })
            .or_else(|| order.last().copied())
    };
    let (Some(lower), Some(upper)) = (index_at_rank(lower_rank), index_at_rank(upper_rank)) else {
        return Err(DegenerateDatasetError::EmptyDataset);
    };
    let value = f64::midpoint(
        classes[lower].interval.midpoint(),
        classes[upper].interval.midpoint(),
    );
    Ok(DiscreteMedian {
        indices: (lower, upper),
        value,
    })
}

/// Value with the greatest total frequency in ungrouped data.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteMode {
    pub value: f64,
    pub count: f64,
    /// Every class whose value equals the mode.
    pub indices: Vec<usize>,
}

/// Repeated values are counted together; the value seen first wins ties.
pub fn discrete_mode(classes: &[Class]) -> Result<DiscreteMode, DegenerateDatasetError> {
    require_population(classes)?;
    let mut tallies: Vec<(f64, f64)> = Vec::new();
    for class in classes {
        let value = class.interval.midpoint();
        match tallies.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += class.frequency,
            None => tallies.push((value, class.frequency)),
        }
    }
    let (value, count) = tallies
        .into_iter()
        .fold(None, |best: Option<(f64, f64)>, (value, count)| match best {
            Some((_, c)) if count <= c => best,
            _ => Some((value, count)),
        })
        .ok_or(DegenerateDatasetError::EmptyDataset)?;
    let indices = classes
        .iter()
        .enumerate()
        .filter(|(_, c)| c.interval.midpoint() == value)
        .map(|(i, _)| i)
        .collect();
    Ok(DiscreteMode {
        value,
        count,
        indices,
    })
}

/// Direction of skew inferred from the gap between the mean and a central value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skewness {
    Symmetric,
    RightSkewed,
    LeftSkewed,
}

impl Skewness {
    /// Compares the mean with the mode or median; differences within `tolerance` count as
    /// symmetric.
    #[must_use]
    pub fn infer(mean: f64, center: f64, tolerance: f64) -> Self {
        let delta = mean - center;
        match delta.abs().partial_cmp(&tolerance) {
            Some(Ordering::Less | Ordering::Equal) => Skewness::Symmetric,
            _ if delta > 0.0 => Skewness::RightSkewed,
            _ => Skewness::LeftSkewed,
        }
    }
}

impl fmt::Display for Skewness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skewness::Symmetric => f.write_str("symmetric"),
            Skewness::RightSkewed => f.write_str("right-skewed"),
            Skewness::LeftSkewed => f.write_str("left-skewed"),
        }
    }
}
