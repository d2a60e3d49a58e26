//! Measure engines.
//!
//! A measure engine turns a [`Dataset`] into the rows and summary statistics of one kind of
//! worksheet, and describes the table the student fills in. Engines are stateless; every
//! operation is a pure function of its arguments.
//!
//! # Engine Overview
//!
//! - [`range::Range`] - Range and coefficient of range, student picks the extreme rows
//! - [`mean::Mean`] - Weighted mean via the `fᵢ·xᵢ` column
//! - [`median::Median`] - Median via cumulative frequencies, student picks the median row
//! - [`mode::Mode`] - Mode, student picks the modal row
//! - [`dispersion::MeanDeviation`] - Mean absolute deviation
//! - [`dispersion::StandardDeviation`] - Variance, standard deviation and coefficient of
//!   variation
//! - [`versus::MeanVsMode`], [`versus::MeanVsMedian`], [`versus::MeanDeviationVsSd`] -
//!   Comparison worksheets over grouped data
//!
//! Each measure exists in a grouped and a discrete flavour, except the comparison worksheets
//! which are grouped only.
//!
//! # Row Pipeline
//!
//! [`MeasureEngine::generate_expected_rows()`] builds one row per class, computes every column
//! in the engine's [`TableConfig`], then lets the engine set its row flags through
//! [`MeasureEngine::flag_rows()`]. [`MeasureEngine::generate_initial_rows()`] derives the student
//! copy from the expected rows by blanking every editable column and clearing the flags.

use std::fmt;

use statsheet_stats::{
    dataset::Dataset,
    descriptive::{self, Class, Skewness},
    interval::IntervalKind,
};

use crate::{
    row::{Cell, ColumnKey, Row},
    summary::{StatKey, SummaryStatistics},
    table::{ColumnDescriptor, TableConfig},
};

pub mod dispersion;
pub mod mean;
pub mod median;
pub mod mode;
pub mod range;
pub mod versus;

pub trait MeasureEngine: fmt::Debug + Send + Sync {
    /// Stable registry key, e.g. `"GroupedMean"` or `"SD_Para"`.
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn input_kind(&self) -> IntervalKind;
    #[must_use]
    fn clone_boxed(&self) -> BoxedMeasureEngine;
    #[must_use]
    fn table_config(&self) -> TableConfig;
    #[must_use]
    fn summary_keys(&self) -> &[StatKey];

    /// Sets the ground-truth flags on freshly computed rows. `classes[i]` belongs to
    /// `rows[i]`.
    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        let _ = (classes, rows);
    }

    /// Skew direction implied by the summary, for comparison worksheets.
    #[must_use]
    fn skewness(&self, summary: &SummaryStatistics) -> Option<Skewness> {
        let _ = summary;
        None
    }

    #[must_use]
    fn generate_expected_rows(&self, dataset: &Dataset) -> Vec<Row> {
        let classes = dataset.classes();
        let mut rows = compute_rows(&classes, &self.table_config());
        self.flag_rows(&classes, &mut rows);
        rows
    }

    #[must_use]
    fn generate_initial_rows(&self, dataset: &Dataset) -> Vec<Row> {
        let config = self.table_config();
        let mut rows = self.generate_expected_rows(dataset);
        for row in &mut rows {
            for column in config.columns.iter().filter(|c| c.editable) {
                row.clear(column.key);
            }
            row.flags = Default::default();
        }
        rows
    }

    /// Computes the summary from rows, reading the interval and `fi` cell of each row.
    ///
    /// Rows without an interval or a usable `fi` are skipped.
    #[must_use]
    fn summary_stats(&self, rows: &[Row]) -> SummaryStatistics {
        let classes = crate::row::classes_from_rows(rows);
        SummaryStatistics::compute(self.summary_keys(), &classes)
    }

    /// Footer row: `Σ` in the label column, two-decimal sums of the summable columns, other
    /// columns blank.
    #[must_use]
    fn generate_total_row(&self, rows: &[Row], columns: &[ColumnDescriptor]) -> Row {
        let mut total = Row::default();
        for (position, column) in columns.iter().enumerate() {
            if column.key.is_summable() {
                let sum = rows
                    .iter()
                    .filter_map(|row| row.number(column.key))
                    .sum::<f64>();
                total.set(column.key, descriptive::round2(sum));
            } else if position == 0 {
                total.set(column.key, Cell::Text(crate::row::TOTAL_LABEL.to_owned()));
            } else {
                total.clear(column.key);
            }
        }
        total
    }
}

pub type BoxedMeasureEngine = Box<dyn MeasureEngine>;

impl Clone for BoxedMeasureEngine {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl MeasureEngine for BoxedMeasureEngine {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn input_kind(&self) -> IntervalKind {
        self.as_ref().input_kind()
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        self.as_ref().clone_boxed()
    }

    fn table_config(&self) -> TableConfig {
        self.as_ref().table_config()
    }

    fn summary_keys(&self) -> &[StatKey] {
        self.as_ref().summary_keys()
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        self.as_ref().flag_rows(classes, rows);
    }

    fn skewness(&self, summary: &SummaryStatistics) -> Option<Skewness> {
        self.as_ref().skewness(summary)
    }

    fn generate_expected_rows(&self, dataset: &Dataset) -> Vec<Row> {
        self.as_ref().generate_expected_rows(dataset)
    }

    fn generate_initial_rows(&self, dataset: &Dataset) -> Vec<Row> {
        self.as_ref().generate_initial_rows(dataset)
    }

    fn summary_stats(&self, rows: &[Row]) -> SummaryStatistics {
        self.as_ref().summary_stats(rows)
    }

    fn generate_total_row(&self, rows: &[Row], columns: &[ColumnDescriptor]) -> Row {
        self.as_ref().generate_total_row(rows, columns)
    }
}

/// Builds one fully computed row per class for the columns of `config`.
///
/// Deviation columns are left blank when the mean is undefined (zero total frequency).
fn compute_rows(classes: &[Class], config: &TableConfig) -> Vec<Row> {
    let keys = config.column_keys();
    let mean = descriptive::mean(classes).ok();
    let cumulative = descriptive::cumulative_frequencies(classes);

    classes
        .iter()
        .zip(cumulative)
        .map(|(class, cumulative)| {
            let mut row = Row::for_class(class);
            let f = class.frequency;
            let x = class.interval.midpoint();
            for &key in &keys {
                let value = match key {
                    ColumnKey::CiLabel | ColumnKey::Fi | ColumnKey::Xi | ColumnKey::H => continue,
                    ColumnKey::Fixi => Some(f * x),
                    ColumnKey::CumulativeFi => Some(cumulative),
                    ColumnKey::AbsDiff => mean.map(|m| (x - m).abs()),
                    ColumnKey::FiAbsDiff => mean.map(|m| f * (x - m).abs()),
                    ColumnKey::SquaredDiff => mean.map(|m| (x - m).powi(2)),
                    ColumnKey::FiSquaredDiff => mean.map(|m| f * (x - m).powi(2)),
                };
                match value {
                    Some(value) => row.set(key, descriptive::round2(value)),
                    None => row.clear(key),
                }
            }
            row
        })
        .collect()
}

/// Marks the rows holding the median: the interpolation class for grouped data, the middle
/// observation(s) for discrete data.
pub(crate) fn flag_median(classes: &[Class], rows: &mut [Row]) {
    let indices = if classes.first().is_some_and(|c| c.interval.is_grouped()) {
        descriptive::grouped_median(classes).map(|m| vec![m.index])
    } else {
        descriptive::discrete_median(classes).map(|m| vec![m.indices.0, m.indices.1])
    };
    for index in indices.unwrap_or_default() {
        rows[index].flags.is_median = true;
    }
}

/// Marks the modal row(s).
pub(crate) fn flag_modal(classes: &[Class], rows: &mut [Row]) {
    let indices = if classes.first().is_some_and(|c| c.interval.is_grouped()) {
        descriptive::grouped_mode(classes).map(|m| vec![m.index])
    } else {
        descriptive::discrete_mode(classes).map(|m| m.indices)
    };
    for index in indices.unwrap_or_default() {
        rows[index].flags.is_modal = true;
    }
}
