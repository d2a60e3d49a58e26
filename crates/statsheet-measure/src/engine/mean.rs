use statsheet_stats::interval::IntervalKind;

use crate::{
    engine::{BoxedMeasureEngine, MeasureEngine},
    row::ColumnKey,
    summary::StatKey,
    table::TableConfig,
};

/// Weighted arithmetic mean `Σfᵢxᵢ / N`; the student fills in `fᵢ·xᵢ`.
#[derive(Debug, Clone)]
pub struct Mean {
    kind: IntervalKind,
}

impl Mean {
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

impl MeasureEngine for Mean {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "GroupedMean",
            IntervalKind::Discrete => "DiscreteMean",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Mean (Grouped Data)",
            IntervalKind::Discrete => "Mean (Ungrouped Data)",
        }
    }

    fn input_kind(&self) -> IntervalKind {
        self.kind
    }

    fn clone_boxed(&self) -> BoxedMeasureEngine {
        Box::new(self.clone())
    }

    fn table_config(&self) -> TableConfig {
        TableConfig::base(self.kind).editable(self.kind, ColumnKey::Fixi)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Mean]
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
    fn test_grouped_mean() {
        let engine = Mean::grouped();
        let rows = engine.generate_expected_rows(&scenario());
        let fixi = rows
            .iter()
            .map(|r| r.number(ColumnKey::Fixi).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(fixi, [60.0, 150.0, 280.0, 90.0]);
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::Mean),
            Some(StatValue::Defined(29.0))
        );
    }

    #[test]
    fn test_discrete_mean() {
        let engine = Mean::discrete();
        let rows = engine.generate_expected_rows(&values());
        assert_eq!(
            engine.summary_stats(&rows).get(StatKey::Mean),
            Some(StatValue::Defined(5.2))
        );
    }
}
