//! Frequency distributions over a homogeneous set of intervals.

use serde::{Deserialize, Serialize};

use crate::{
    descriptive::Class,
    interval::{Interval, IntervalKind, InvalidIntervalError, RawInterval},
};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("dataset has {intervals} intervals but {frequencies} frequencies")]
    LengthMismatch {
        intervals: usize,
        frequencies: usize,
    },
    #[display("frequency at index {index} must be finite and non-negative, got {value}")]
    InvalidFrequency { index: usize, value: f64 },
    #[display("dataset mixes grouped and discrete intervals")]
    MixedIntervalKinds,
    #[display("invalid interval at index {index}: {source}")]
    InvalidInterval {
        index: usize,
        source: InvalidIntervalError,
    },
}

/// Intervals paired with their frequencies.
///
/// Construction guarantees equal lengths, finite non-negative frequencies and a single
/// interval kind. An empty dataset or one whose frequencies are all zero is allowed; every
/// summary statistic over it is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    intervals: Vec<Interval>,
    frequencies: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDataset {
    intervals: Vec<RawInterval>,
    frequencies: Vec<f64>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Self::from_raw(raw.intervals, raw.frequencies)
    }
}

impl Dataset {
    pub fn new(intervals: Vec<Interval>, frequencies: Vec<f64>) -> Result<Self, DatasetError> {
        if intervals.len() != frequencies.len() {
            return Err(DatasetError::LengthMismatch {
                intervals: intervals.len(),
                frequencies: frequencies.len(),
            });
        }
        if let Some((index, &value)) = frequencies
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite() || **f < 0.0)
        {
            return Err(DatasetError::InvalidFrequency { index, value });
        }
        if let Some(first) = intervals.first()
            && intervals.iter().any(|i| i.kind() != first.kind())
        {
            return Err(DatasetError::MixedIntervalKinds);
        }
        Ok(Self {
            intervals,
            frequencies,
        })
    }

    /// Normalizes raw interval input and builds the dataset.
    pub fn from_raw<I, R>(intervals: I, frequencies: Vec<f64>) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawInterval>,
    {
        let intervals = intervals
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Interval::normalize(raw)
                    .map_err(|source| DatasetError::InvalidInterval { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(intervals, frequencies)
    }

    /// Raw observations with unit frequency each, e.g. `[3, 7, 2, 9, 5]`.
    pub fn from_values<I>(values: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = f64>,
    {
        let intervals = values.into_iter().collect::<Vec<_>>();
        let frequencies = vec![1.0; intervals.len()];
        Self::from_raw(intervals, frequencies)
    }

    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    #[must_use]
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Kind shared by every interval; `None` for an empty dataset.
    #[must_use]
    pub fn kind(&self) -> Option<IntervalKind> {
        self.intervals.first().map(Interval::kind)
    }

    /// `N = Σfᵢ`.
    #[must_use]
    pub fn total_frequency(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Interval, f64)> + '_ {
        self.intervals.iter().zip(self.frequencies.iter().copied())
    }

    #[must_use]
    pub fn classes(&self) -> Vec<Class> {
        self.iter()
            .map(|(&interval, frequency)| Class {
                interval,
                frequency,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_dataset() {
        let dataset = Dataset::from_raw(
            [[10.0, 20.0], [20.0, 30.0], [30.0, 40.0], [40.0, 50.0]],
            vec![4.0, 6.0, 8.0, 2.0],
        )
        .unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.kind(), Some(IntervalKind::Grouped));
        assert_eq!(dataset.total_frequency(), 20.0);
        assert_eq!(dataset.classes()[2].interval.midpoint(), 35.0);
    }

    #[test]
    fn test_from_values_uses_unit_frequencies() {
        let dataset = Dataset::from_values([3.0, 7.0, 2.0, 9.0, 5.0]).unwrap();
        assert_eq!(dataset.frequencies(), &[1.0; 5]);
        assert_eq!(dataset.kind(), Some(IntervalKind::Discrete));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Dataset::from_raw([[0.0, 1.0]], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::LengthMismatch {
                intervals: 1,
                frequencies: 2
            }
        );
    }

    #[test]
    fn test_negative_and_nan_frequency() {
        let err = Dataset::from_raw([1.0, 2.0], vec![1.0, -1.0]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFrequency { index: 1, .. }));
        let err = Dataset::from_raw([1.0], vec![f64::NAN]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidFrequency { index: 0, .. }));
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let intervals = vec![
            Interval::grouped(0.0, 10.0).unwrap(),
            Interval::discrete(15.0).unwrap(),
        ];
        assert_eq!(
            Dataset::new(intervals, vec![1.0, 1.0]),
            Err(DatasetError::MixedIntervalKinds)
        );
    }

    #[test]
    fn test_invalid_interval_reports_index() {
        let err = Dataset::from_raw(["0-10", "10-5"], vec![1.0, 1.0]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidInterval { index: 1, .. }));
    }

    #[test]
    fn test_empty_dataset_is_allowed() {
        let dataset = Dataset::new(vec![], vec![]).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.kind(), None);
        assert_eq!(dataset.total_frequency(), 0.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let dataset: Dataset =
            serde_json::from_str(r#"{"intervals": [[0, 5], "5–10"], "frequencies": [2, 3]}"#)
                .unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(
            serde_json::from_str::<Dataset>(r#"{"intervals": [[0, 5]], "frequencies": []}"#)
                .is_err()
        );
    }
}
