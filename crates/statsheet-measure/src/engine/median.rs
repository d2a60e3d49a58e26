use statsheet_stats::{descriptive::Class, interval::IntervalKind};

use crate::{
    engine::{self, BoxedMeasureEngine, MeasureEngine},
    row::{ColumnKey, Row, SelectionTarget},
    summary::StatKey,
    table::TableConfig,
};

/// Median via cumulative frequencies.
///
/// Grouped data interpolates inside the first class whose cumulative frequency reaches
/// `N/2`: `median = L + ((N/2 − F_prev) / f) × h`. Discrete data takes the middle
/// observation(s) of the frequency-expanded sorted values.
#[derive(Debug, Clone)]
pub struct Median {
    kind: IntervalKind,
}

impl Median {
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

impl MeasureEngine for Median {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "GroupedMedian",
            IntervalKind::Discrete => "DiscreteMedian",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Median (Grouped Data)",
            IntervalKind::Discrete => "Median (Ungrouped Data)",
        }
    }

    fn input_kind(&self) -> IntervalKind {
        self.kind
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        let config = TableConfig::base(self.kind);
        let config = match self.kind {
            IntervalKind::Grouped => config.read_only(self.kind, ColumnKey::H),
            IntervalKind::Discrete => config,
        };
        config
            .editable(self.kind, ColumnKey::CumulativeFi)
            .selecting(SelectionTarget::Median)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Median]
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        engine::flag_median(classes, rows);
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

    #[test]
    fn test_grouped_median() {
        let engine = Median::grouped();
        let rows = engine.generate_expected_rows(&scenario());
        let cumulative = rows
            .iter()
            .map(|r| r.number(ColumnKey::CumulativeFi).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(cumulative, [4.0, 10.0, 18.0, 20.0]);
        let flagged = rows
            .iter()
            .position(|r| r.flags.is_median)
            .unwrap();
        assert_eq!(flagged, 1);
        assert_eq!(rows.iter().filter(|r| r.flags.is_median).count(), 1);
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::Median),
            Some(StatValue::Defined(30.0))
        );
    }

    #[test]
    fn test_discrete_median_odd() {
        let engine = Median::discrete();
        let rows = engine.generate_expected_rows(&values());
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::Median),
            Some(StatValue::Defined(5.0))
        );
        assert!(rows[4].flags.is_median);
    }

    #[test]
    fn test_discrete_median_even_flags_both_middle_rows() {
        let engine = Median::discrete();
        let dataset = Dataset::from_values([4.0, 1.0, 3.0, 2.0]).unwrap();
        let rows = engine.generate_expected_rows(&dataset);
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::Median),
            Some(StatValue::Defined(2.5))
        );
        let flagged = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.flags.is_median)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();
        assert_eq!(flagged, [2, 3]);
    }

    #[test]
    fn test_empty_population_is_undefined() {
        let engine = Median::grouped();
        let dataset = Dataset::from_raw([[0.0, 10.0]], vec![0.0]).unwrap();
        let rows = engine.generate_expected_rows(&dataset);
        assert!(rows.iter().all(|r| !r.flags.is_median));
        assert!(
            engine
                .summary_stats(&rows)
                .get(StatKey::Median)
                .unwrap()
                .is_undefined()
        );
    }
}
