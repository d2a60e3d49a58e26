//! Summary statistics reported beneath a worksheet table.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize, Serializer};
use statsheet_stats::descriptive::{self, Class, DegenerateDatasetError, RangeSummary};

use crate::row::Cell;

/// Names of the summary statistics, serialized in lowercase (`meandeviation`, `cv`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StatKey {
    Mean,
    Median,
    Mode,
    MeanDeviation,
    Variance,
    StandardDeviation,
    Cv,
    Range,
    CoefficientOfRange,
}

impl StatKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
            Self::MeanDeviation => "meandeviation",
            Self::Variance => "variance",
            Self::StandardDeviation => "standarddeviation",
            Self::Cv => "cv",
            Self::Range => "range",
            Self::CoefficientOfRange => "coefficientofrange",
        }
    }

    /// Computes this statistic from the classes, rounded to two decimals.
    ///
    /// Median and mode use the discrete formulas when the classes are discrete values and
    /// the interpolating grouped formulas otherwise.
    #[must_use]
    pub fn compute(self, classes: &[Class]) -> StatValue {
        let discrete = classes.first().is_some_and(|c| !c.interval.is_grouped());
        let value = match self {
            Self::Mean => descriptive::mean(classes),
            Self::Median if discrete => descriptive::discrete_median(classes).map(|m| m.value),
            Self::Median => descriptive::grouped_median(classes).map(|m| m.value),
            Self::Mode if discrete => descriptive::discrete_mode(classes).map(|m| m.value),
            Self::Mode => descriptive::grouped_mode(classes).map(|m| m.value),
            Self::MeanDeviation => descriptive::mean_deviation(classes),
            Self::Variance => descriptive::variance(classes),
            Self::StandardDeviation => descriptive::standard_deviation(classes),
            Self::Cv => descriptive::coefficient_of_variation(classes),
            Self::Range => descriptive::range(classes).map(|r| r.range()),
            Self::CoefficientOfRange => {
                descriptive::range(classes).and_then(|r: RangeSummary| r.coefficient())
            }
        };
        if let Err(reason) = value {
            tracing::debug!(stat = %self, %reason, "statistic is undefined");
        }
        value.into()
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed statistic, or the reason it cannot be computed.
///
/// Serializes as a number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum StatValue {
    Defined(f64),
    Undefined(DegenerateDatasetError),
}

impl StatValue {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            StatValue::Defined(value) => Some(value),
            StatValue::Undefined(_) => None,
        }
    }
}

impl From<Result<f64, DegenerateDatasetError>> for StatValue {
    fn from(result: Result<f64, DegenerateDatasetError>) -> Self {
        match result {
            Ok(value) => StatValue::Defined(descriptive::round2(value)),
            Err(reason) => StatValue::Undefined(reason),
        }
    }
}

impl Serialize for StatValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value().serialize(serializer)
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Defined(value) => write!(f, "{value:.2}"),
            StatValue::Undefined(_) => f.write_str("-"),
        }
    }
}

/// Expected summary statistics keyed by [`StatKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryStatistics(BTreeMap<StatKey, StatValue>);

impl SummaryStatistics {
    /// Computes each of `keys` from the classes.
    #[must_use]
    pub fn compute(keys: &[StatKey], classes: &[Class]) -> Self {
        Self(keys.iter().map(|&key| (key, key.compute(classes))).collect())
    }

    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<StatValue> {
        self.0.get(&key).copied()
    }

    pub fn insert(&mut self, key: StatKey, value: StatValue) {
        self.0.insert(key, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, StatValue)> + '_ {
        self.0.iter().map(|(&k, &v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Summary values as typed by a student, keyed by statistic.
pub type StudentSummary = BTreeMap<StatKey, Cell>;
