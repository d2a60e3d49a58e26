//! Grading of student rows, summary values and row picks.
//!
//! Every verdict is three-valued: `Some(true)` correct, `Some(false)` wrong, and `None` when
//! there is nothing to grade (the student left the cell blank, or the expected value is
//! missing). Inputs are never modified.
//!
//! Numbers are compared after rounding both sides to two decimals:
//! `|round2(student) − round2(expected)| ≤ tolerance`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap as _};
use statsheet_stats::descriptive::round2;

use crate::{
    row::{Cell, ColumnKey, Row, SelectionTarget},
    summary::{StatKey, StatValue, StudentSummary, SummaryStatistics},
};

pub const DEFAULT_CELL_TOLERANCE: f64 = 0.01;
pub const DEFAULT_SUMMARY_TOLERANCE: f64 = 0.1;

/// Absorbs binary representation error in the rounded difference.
const EPSILON: f64 = 1e-9;

/// Student inputs that mark a statistic as not computable.
const UNDEFINED_MARKERS: [&str; 2] = ["-", "undefined"];

/// Grading tolerances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub cell_tolerance: f64,
    pub summary_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            cell_tolerance: DEFAULT_CELL_TOLERANCE,
            summary_tolerance: DEFAULT_SUMMARY_TOLERANCE,
        }
    }
}

/// Verdicts serialized as `{"<key>Correct": true | false | null}`.
fn serialize_verdicts<S, K>(
    verdicts: &BTreeMap<K, Option<bool>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: std::fmt::Display,
{
    let mut map = serializer.serialize_map(Some(verdicts.len()))?;
    for (key, verdict) in verdicts {
        map.serialize_entry(&format!("{key}Correct"), verdict)?;
    }
    map.end()
}

/// Per-column verdicts for one student row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowValidation(pub BTreeMap<ColumnKey, Option<bool>>);

impl RowValidation {
    #[must_use]
    pub fn get(&self, key: ColumnKey) -> Option<bool> {
        self.0.get(&key).copied().flatten()
    }

    /// True when every graded column is correct.
    #[must_use]
    pub fn all_correct(&self) -> bool {
        self.0.values().all(|v| *v == Some(true))
    }
}

impl Serialize for RowValidation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_verdicts(&self.0, serializer)
    }
}

/// Per-target pick verdicts for one student row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionValidation(pub BTreeMap<SelectionTarget, Option<bool>>);

impl SelectionValidation {
    #[must_use]
    pub fn get(&self, target: SelectionTarget) -> Option<bool> {
        self.0.get(&target).copied().flatten()
    }
}

impl Serialize for SelectionValidation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_verdicts(&self.0, serializer)
    }
}

/// Per-statistic verdicts for the summary block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryValidation(pub BTreeMap<StatKey, Option<bool>>);

impl SummaryValidation {
    #[must_use]
    pub fn get(&self, key: StatKey) -> Option<bool> {
        self.0.get(&key).copied().flatten()
    }
}

impl Serialize for SummaryValidation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_verdicts(&self.0, serializer)
    }
}

/// Whether `student` matches `expected` within `tolerance` after two-decimal rounding.
#[must_use]
pub fn within_tolerance(student: f64, expected: f64, tolerance: f64) -> bool {
    (round2(student) - round2(expected)).abs() <= tolerance + EPSILON
}

fn compare_cells(student: &Cell, expected: &Cell, tolerance: f64) -> Option<bool> {
    let student = student.number()?;
    let expected = expected.number()?;
    Some(within_tolerance(student, expected, tolerance))
}

/// Grades the `columns` of each student row against the expected row at the same index.
///
/// The result is parallel to `student`. Rows without an expected counterpart get `None` for
/// every column.
#[must_use]
pub fn validate_rows(
    student: &[Row],
    expected: &[Row],
    columns: &[ColumnKey],
    tolerance: f64,
) -> Vec<RowValidation> {
    student
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let verdicts = columns
                .iter()
                .map(|&key| {
                    let verdict = expected
                        .get(index)
                        .and_then(|e| compare_cells(row.cell(key), e.cell(key), tolerance));
                    (key, verdict)
                })
                .collect();
            RowValidation(verdicts)
        })
        .collect()
}

/// Grades the student's summary values for every statistic in `expected`.
///
/// For an undefined expected statistic the student is right to enter `-` or `undefined`,
/// and wrong to enter anything else.
#[must_use]
pub fn validate_summary(
    student: &StudentSummary,
    expected: &SummaryStatistics,
    tolerance: f64,
) -> SummaryValidation {
    let verdicts = expected
        .iter()
        .map(|(key, expected)| {
            let input = student.get(&key).unwrap_or(&Cell::Blank);
            let verdict = if input.is_blank() {
                None
            } else {
                match expected {
                    StatValue::Defined(expected) => input
                        .number()
                        .map(|value| within_tolerance(value, expected, tolerance)),
                    StatValue::Undefined(_) => Some(is_undefined_marker(input)),
                }
            };
            (key, verdict)
        })
        .collect();
    SummaryValidation(verdicts)
}

fn is_undefined_marker(input: &Cell) -> bool {
    input.text().is_some_and(|text| {
        let text = text.trim();
        UNDEFINED_MARKERS
            .iter()
            .any(|marker| text.eq_ignore_ascii_case(marker))
    })
}

/// Grades the student's row picks against the expected flags, one target at a time.
///
/// The result is parallel to `student`. A target the student has not picked on any row is
/// `None` for every row.
#[must_use]
pub fn validate_selection(
    student: &[Row],
    expected: &[Row],
    targets: &[SelectionTarget],
) -> Vec<SelectionValidation> {
    let started = targets
        .iter()
        .map(|&target| student.iter().any(|row| row.picks.get(target)))
        .collect::<Vec<_>>();
    student
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let verdicts = targets
                .iter()
                .zip(&started)
                .map(|(&target, &started)| {
                    let verdict = expected
                        .get(index)
                        .filter(|_| started)
                        .map(|e| row.picks.get(target) == e.flags.get(target));
                    (target, verdict)
                })
                .collect();
            SelectionValidation(verdicts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use statsheet_stats::descriptive::DegenerateDatasetError;

    use super::*;

    fn row_with(key: ColumnKey, cell: impl Into<Cell>) -> Row {
        let mut row = Row::default();
        row.set(key, cell);
        row
    }

    mod rows {
        use super::*;

        #[test]
        fn test_cell_tolerance() {
            let expected = [row_with(ColumnKey::Fixi, 150.0)];
            let grade = |input: &str| {
                validate_rows(
                    &[row_with(ColumnKey::Fixi, input)],
                    &expected,
                    &[ColumnKey::Fixi],
                    DEFAULT_CELL_TOLERANCE,
                )[0]
                .get(ColumnKey::Fixi)
            };
            assert_eq!(grade("150.004"), Some(true));
            assert_eq!(grade("150.01"), Some(true));
            assert_eq!(grade("150.02"), Some(false));
            assert_eq!(grade("149"), Some(false));
        }

        #[test]
        fn test_blank_or_unparseable_is_null() {
            let expected = [row_with(ColumnKey::Fixi, 150.0)];
            for input in [Cell::Blank, Cell::Text("  ".to_owned()), Cell::Text("x".to_owned())] {
                let result = validate_rows(
                    &[row_with(ColumnKey::Fixi, input)],
                    &expected,
                    &[ColumnKey::Fixi],
                    DEFAULT_CELL_TOLERANCE,
                );
                assert_eq!(result[0].0[&ColumnKey::Fixi], None);
            }
        }

        #[test]
        fn test_missing_expected_row_is_null() {
            let result = validate_rows(
                &[row_with(ColumnKey::Fixi, 1.0), row_with(ColumnKey::Fixi, 2.0)],
                &[row_with(ColumnKey::Fixi, 1.0)],
                &[ColumnKey::Fixi],
                DEFAULT_CELL_TOLERANCE,
            );
            assert_eq!(result.len(), 2);
            assert!(result[0].all_correct());
            assert_eq!(result[1].get(ColumnKey::Fixi), None);
        }

        #[test]
        fn test_serialized_keys() {
            let result = validate_rows(
                &[row_with(ColumnKey::FiAbsDiff, 56.0)],
                &[row_with(ColumnKey::FiAbsDiff, 56.0)],
                &[ColumnKey::FiAbsDiff, ColumnKey::Fixi],
                DEFAULT_CELL_TOLERANCE,
            );
            assert_eq!(
                serde_json::to_string(&result).unwrap(),
                r#"[{"fixiCorrect":null,"fiAbsDiffCorrect":true}]"#
            );
        }
    }

    mod summary {
        use super::*;

        fn expected() -> SummaryStatistics {
            let mut summary = SummaryStatistics::default();
            summary.insert(StatKey::Mean, StatValue::Defined(29.0));
            summary.insert(
                StatKey::Mode,
                StatValue::Undefined(DegenerateDatasetError::ZeroModeDenominator),
            );
            summary
        }

        fn student(mean: &str, mode: &str) -> StudentSummary {
            [(StatKey::Mean, Cell::from(mean)), (StatKey::Mode, Cell::from(mode))]
                .into_iter()
                .collect()
        }

        #[test]
        fn test_summary_tolerance() {
            let result = validate_summary(
                &student("29.08", ""),
                &expected(),
                DEFAULT_SUMMARY_TOLERANCE,
            );
            assert_eq!(result.get(StatKey::Mean), Some(true));
            let result = validate_summary(
                &student("29.2", ""),
                &expected(),
                DEFAULT_SUMMARY_TOLERANCE,
            );
            assert_eq!(result.get(StatKey::Mean), Some(false));
        }

        #[test]
        fn test_undefined_expected() {
            let grade = |mode: &str| {
                validate_summary(&student("", mode), &expected(), DEFAULT_SUMMARY_TOLERANCE)
                    .0[&StatKey::Mode]
            };
            assert_eq!(grade(""), None);
            assert_eq!(grade("-"), Some(true));
            assert_eq!(grade(" Undefined "), Some(true));
            assert_eq!(grade("32.5"), Some(false));
        }

        #[test]
        fn test_missing_student_entry_is_null() {
            let result = validate_summary(
                &StudentSummary::new(),
                &expected(),
                DEFAULT_SUMMARY_TOLERANCE,
            );
            assert_eq!(result.0.len(), 2);
            assert!(result.0.values().all(Option::is_none));
            assert_eq!(
                serde_json::to_string(&result).unwrap(),
                r#"{"meanCorrect":null,"modeCorrect":null}"#
            );
        }
    }

    mod selection {
        use super::*;

        const MIN_MAX: [SelectionTarget; 2] = [SelectionTarget::Min, SelectionTarget::Max];

        /// Values `[3, 2, 9, 2, 9]`: minimum on rows 1 and 3, maximum on rows 2 and 4.
        fn expected() -> Vec<Row> {
            (0..5)
                .map(|i| {
                    let mut row = Row::default();
                    row.flags.is_min = i == 1 || i == 3;
                    row.flags.is_max = i == 2 || i == 4;
                    row
                })
                .collect()
        }

        fn picks(min: &[usize], max: &[usize]) -> Vec<Row> {
            (0..5)
                .map(|i| {
                    let mut row = Row::default();
                    row.picks.is_min = min.contains(&i);
                    row.picks.is_max = max.contains(&i);
                    row
                })
                .collect()
        }

        fn verdicts(result: &[SelectionValidation], target: SelectionTarget) -> Vec<Option<bool>> {
            result.iter().map(|r| r.0[&target]).collect()
        }

        #[test]
        fn test_nothing_selected_is_null() {
            let result = validate_selection(&picks(&[], &[]), &expected(), &MIN_MAX);
            assert_eq!(result.len(), 5);
            assert!(result.iter().all(|r| r.0.values().all(Option::is_none)));
        }

        #[test]
        fn test_repeated_extreme_pick_is_correct() {
            let result = validate_selection(&picks(&[1, 3], &[2, 4]), &expected(), &MIN_MAX);
            assert_eq!(verdicts(&result, SelectionTarget::Min), [Some(true); 5]);
            assert_eq!(verdicts(&result, SelectionTarget::Max), [Some(true); 5]);
        }

        #[test]
        fn test_targets_are_graded_separately() {
            // min picked on the maximum row; max not picked yet
            let result = validate_selection(&picks(&[2], &[]), &expected(), &MIN_MAX);
            assert_eq!(
                verdicts(&result, SelectionTarget::Min),
                [Some(true), Some(false), Some(false), Some(false), Some(true)]
            );
            assert_eq!(verdicts(&result, SelectionTarget::Max), [None; 5]);
        }

        #[test]
        fn test_serialized_keys() {
            let result = validate_selection(&picks(&[1], &[]), &expected(), &MIN_MAX);
            assert_eq!(
                serde_json::to_string(&result[1]).unwrap(),
                r#"{"isMinCorrect":true,"isMaxCorrect":null}"#
            );
        }
    }
}
