use statsheet_stats::{
    descriptive::{self, Class},
    interval::IntervalKind,
};

use crate::{
    engine::{BoxedMeasureEngine, MeasureEngine},
    row::{Row, SelectionTarget},
    summary::StatKey,
    table::TableConfig,
};

/// Range and coefficient of range.
///
/// Nothing is computed per row; the student picks the rows holding the smallest and the
/// largest observation. Every row holding a repeated extreme counts.
///
/// - `range = max(upper) − min(lower)`
/// - `coefficient of range = range / (max + min) × 100`
#[derive(Debug, Clone)]
pub struct Range {
    kind: IntervalKind,
}

impl Range {
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

impl MeasureEngine for Range {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "GroupedRange",
            IntervalKind::Discrete => "DiscreteRange",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Range (Grouped Data)",
            IntervalKind::Discrete => "Range (Ungrouped Data)",
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
            .selecting(SelectionTarget::Min)
            .selecting(SelectionTarget::Max)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Range, StatKey::CoefficientOfRange]
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        if let Ok(summary) = descriptive::range(classes) {
            for index in summary.min_indices {
                rows[index].flags.is_min = true;
            }
            for index in summary.max_indices {
                rows[index].flags.is_max = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::tests::{scenario, values},
        summary::StatValue,
    };

    #[test]
    fn test_discrete_range() {
        let engine = Range::discrete();
        let rows = engine.generate_expected_rows(&values());
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Range), Some(StatValue::Defined(7.0)));
        // 7 / 11 * 100
        assert_eq!(
            summary.get(StatKey::CoefficientOfRange),
            Some(StatValue::Defined(63.64))
        );
        let picks = rows
            .iter()
            .map(|r| (r.flags.is_min, r.flags.is_max))
            .collect::<Vec<_>>();
        assert_eq!(
            picks,
            [
                (false, false),
                (false, false),
                (true, false),
                (false, true),
                (false, false)
            ]
        );
    }

    #[test]
    fn test_grouped_range() {
        let engine = Range::grouped();
        let rows = engine.generate_expected_rows(&scenario());
        let summary = engine.summary_stats(&rows);
        assert_eq!(summary.get(StatKey::Range), Some(StatValue::Defined(40.0)));
        assert!(rows[0].flags.is_min);
        assert!(rows[3].flags.is_max);
        assert_eq!(
            engine.table_config().selection,
            [SelectionTarget::Min, SelectionTarget::Max]
        );
    }

    #[test]
    fn test_repeated_extremes_are_all_flagged() {
        let engine = Range::discrete();
        let rows = engine.generate_expected_rows(
            &statsheet_stats::dataset::Dataset::from_values([3.0, 2.0, 9.0, 2.0, 9.0]).unwrap(),
        );
        let picks = rows
            .iter()
            .map(|r| (r.flags.is_min, r.flags.is_max))
            .collect::<Vec<_>>();
        assert_eq!(
            picks,
            [
                (false, false),
                (true, false),
                (false, true),
                (true, false),
                (false, true)
            ]
        );
    }
}
