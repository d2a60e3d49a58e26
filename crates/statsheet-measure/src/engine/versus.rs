//! Comparison worksheets over grouped data.
//!
//! The mean-versus-mode and mean-versus-median worksheets also report the skew the two
//! measures imply.

use statsheet_stats::{
    descriptive::{Class, Skewness},
    interval::IntervalKind,
};

use crate::{
    engine::{self, BoxedMeasureEngine, MeasureEngine},
    row::{ColumnKey, Row},
    summary::{StatKey, SummaryStatistics},
    table::TableConfig,
};

/// Gap between mean and mode (or median) still treated as symmetric.
pub const SKEWNESS_TOLERANCE: f64 = 0.1;

const KIND: IntervalKind = IntervalKind::Grouped;

fn infer_skewness(summary: &SummaryStatistics, center: StatKey) -> Option<Skewness> {
    let mean = summary.get(StatKey::Mean)?.value()?;
    let center = summary.get(center)?.value()?;
    Some(Skewness::infer(mean, center, SKEWNESS_TOLERANCE))
}

#[derive(Debug, Clone)]
pub struct MeanVsMode;

impl MeasureEngine for MeanVsMode {
    fn id(&self) -> &'static str {
        "GroupedMeanVsMode"
    }

    fn name(&self) -> &'static str {
        "Mean vs Mode"
    }

    fn input_kind(&self) -> IntervalKind {
        KIND
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(KIND)
            .editable(KIND, ColumnKey::Fixi)
            .read_only(KIND, ColumnKey::CumulativeFi)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Mean, StatKey::Mode]
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        engine::flag_modal(classes, rows);
    }

    fn skewness(&self, summary: &SummaryStatistics) -> Option<Skewness> {
        infer_skewness(summary, StatKey::Mode)
    }
}

#[derive(Debug, Clone)]
pub struct MeanVsMedian;

impl MeasureEngine for MeanVsMedian {
    fn id(&self) -> &'static str {
        "GroupedMeanVsMedian"
    }

    fn name(&self) -> &'static str {
        "Mean vs Median"
    }

    fn input_kind(&self) -> IntervalKind {
        KIND
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(KIND)
            .editable(KIND, ColumnKey::Fixi)
            .read_only(KIND, ColumnKey::CumulativeFi)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Mean, StatKey::Median]
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        engine::flag_median(classes, rows);
    }

    fn skewness(&self, summary: &SummaryStatistics) -> Option<Skewness> {
        infer_skewness(summary, StatKey::Median)
    }
}

/// Mean deviation next to standard deviation on the same data.
#[derive(Debug, Clone)]
pub struct MeanDeviationVsSd;

impl MeasureEngine for MeanDeviationVsSd {
    fn id(&self) -> &'static str {
        "GroupedMeanVsSD"
    }

    fn name(&self) -> &'static str {
        "Mean Deviation vs Standard Deviation"
    }

    fn input_kind(&self) -> IntervalKind {
        KIND
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(KIND)
            .editable(KIND, ColumnKey::Fixi)
            .editable(KIND, ColumnKey::AbsDiff)
            .editable(KIND, ColumnKey::FiAbsDiff)
            .editable(KIND, ColumnKey::SquaredDiff)
            .editable(KIND, ColumnKey::FiSquaredDiff)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::MeanDeviation, StatKey::StandardDeviation]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::tests::scenario, summary::StatValue};

    #[test]
    fn test_mean_vs_mode_is_left_skewed() {
        let engine = MeanVsMode;
        let rows = engine.generate_expected_rows(&scenario());
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Mean), Some(StatValue::Defined(29.0)));
        assert_eq!(summary.get(StatKey::Mode), Some(StatValue::Defined(32.5)));
        assert_eq!(engine.skewness(&summary), Some(Skewness::LeftSkewed));
        assert!(rows[2].flags.is_modal);
    }

    #[test]
    fn test_mean_vs_median_cumulative_is_read_only() {
        let engine = MeanVsMedian;
        let config = engine.table_config();
        assert_eq!(config.expected_columns, [ColumnKey::Fixi]);
        let initial = engine.generate_initial_rows(&scenario());
        assert_eq!(initial[1].number(ColumnKey::CumulativeFi), Some(10.0));
        assert!(initial[1].cell(ColumnKey::Fixi).is_blank());

        let summary = engine.summary_stats(&engine.generate_expected_rows(&scenario()));
        assert_eq!(engine.skewness(&summary), Some(Skewness::LeftSkewed));
    }

    #[test]
    fn test_mean_deviation_vs_sd() {
        let engine = MeanDeviationVsSd;
        let summary = engine.summary_stats(&engine.generate_expected_rows(&scenario()));
        assert_eq!(
            summary.get(StatKey::MeanDeviation),
            Some(StatValue::Defined(8.0))
        );
        assert_eq!(
            summary.get(StatKey::StandardDeviation),
            Some(StatValue::Defined(9.17))
        );
        assert_eq!(engine.skewness(&summary), None);
    }
}
