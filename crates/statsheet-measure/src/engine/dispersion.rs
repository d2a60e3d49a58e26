//! Dispersion worksheets: mean deviation and standard deviation.

use statsheet_stats::interval::IntervalKind;

use crate::{
    engine::{BoxedMeasureEngine, MeasureEngine},
    row::ColumnKey,
    summary::StatKey,
    table::TableConfig,
};

/// Mean absolute deviation `Σfᵢ|xᵢ − x̄| / N`.
#[derive(Debug, Clone)]
pub struct MeanDeviation {
    kind: IntervalKind,
}

impl MeanDeviation {
    #[must_use]
    pub fn grouped() -> Self {
        Self {
            kind: IntervalKind::Grouped,
        }
    }

    #[must_use]
    pub fn discrete() -> Self {
        Self {
            kind: IntervalKind::Discrete,
        }
    }
}

impl MeasureEngine for MeanDeviation {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "MeanDeviation",
            IntervalKind::Discrete => "MD_Para",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Mean Deviation (Grouped Data)",
            IntervalKind::Discrete => "Mean Deviation (Ungrouped Data)",
        }
    }

    fn input_kind(&self) -> IntervalKind {
        self.kind
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(self.kind)
            .editable(self.kind, ColumnKey::Fixi)
            .editable(self.kind, ColumnKey::AbsDiff)
            .editable(self.kind, ColumnKey::FiAbsDiff)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Mean, StatKey::MeanDeviation]
    }
}

/// Population variance, standard deviation and coefficient of variation.
#[derive(Debug, Clone)]
pub struct StandardDeviation {
    kind: IntervalKind,
}

impl StandardDeviation {
    #[must_use]
    pub fn grouped() -> Self {
        Self {
            kind: IntervalKind::Grouped,
        }
    }

    #[must_use]
    pub fn discrete() -> Self {
        Self {
            kind: IntervalKind::Discrete,
        }
    }
}

impl MeasureEngine for StandardDeviation {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "StandardDeviation",
            IntervalKind::Discrete => "SD_Para",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Standard Deviation (Grouped Data)",
            IntervalKind::Discrete => "Standard Deviation (Ungrouped Data)",
        }
    }

    fn input_kind(&self) -> IntervalKind {
        self.kind
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(self.kind)
            .editable(self.kind, ColumnKey::Fixi)
            .editable(self.kind, ColumnKey::SquaredDiff)
            .editable(self.kind, ColumnKey::FiSquaredDiff)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[
            StatKey::Mean,
            StatKey::Variance,
            StatKey::StandardDeviation,
            StatKey::Cv,
        ]
    }
}

#[cfg(test)]
mod tests {
    use statsheet_stats::dataset::Dataset;

    use super::*;
    use crate::{
        engine::tests::{scenario, values},
        summary::StatValue,
    };

    fn column(rows: &[crate::row::Row], key: ColumnKey) -> Vec<f64> {
        rows.iter().map(|r| r.number(key).unwrap()).collect()
    }

    #[test]
    fn test_mean_deviation_rows() {
        let engine = MeanDeviation::grouped();
        let rows = engine.generate_expected_rows(&scenario());
        assert_eq!(column(&rows, ColumnKey::AbsDiff), [14.0, 4.0, 6.0, 16.0]);
        assert_eq!(column(&rows, ColumnKey::FiAbsDiff), [56.0, 24.0, 48.0, 32.0]);
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Mean), Some(StatValue::Defined(29.0)));
        assert_eq!(
            summary.get(StatKey::MeanDeviation),
            Some(StatValue::Defined(8.0))
        );
    }

    #[test]
    fn test_mean_deviation_discrete() {
        let engine = MeanDeviation::discrete();
        assert_eq!(engine.id(), "MD_Para");
        let rows = engine.generate_expected_rows(&values());
        // mean 5.2; |x - 5.2| = 2.2, 1.8, 3.2, 3.8, 0.2
        assert_eq!(column(&rows, ColumnKey::AbsDiff), [2.2, 1.8, 3.2, 3.8, 0.2]);
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::MeanDeviation),
            Some(StatValue::Defined(2.24))
        );
    }

    #[test]
    fn test_standard_deviation_rows() {
        let engine = StandardDeviation::grouped();
        let rows = engine.generate_expected_rows(&scenario());
        assert_eq!(
            column(&rows, ColumnKey::SquaredDiff),
            [196.0, 16.0, 36.0, 256.0]
        );
        assert_eq!(
            column(&rows, ColumnKey::FiSquaredDiff),
            [784.0, 96.0, 288.0, 512.0]
        );
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Variance), Some(StatValue::Defined(84.0)));
        assert_eq!(
            summary.get(StatKey::StandardDeviation),
            Some(StatValue::Defined(9.17))
        );
        assert_eq!(summary.get(StatKey::Cv), Some(StatValue::Defined(31.6)));
    }

    #[test]
    fn test_cv_undefined_for_zero_mean() {
        let engine = StandardDeviation::discrete();
        let dataset = Dataset::from_values([-2.0, 2.0]).unwrap();
        let rows = engine.generate_expected_rows(&dataset);
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Variance), Some(StatValue::Defined(4.0)));
        assert!(summary.get(StatKey::Cv).unwrap().is_undefined());
    }
}
