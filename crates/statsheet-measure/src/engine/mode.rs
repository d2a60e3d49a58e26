use statsheet_stats::{descriptive::Class, interval::IntervalKind};

use crate::{
    engine::{self, BoxedMeasureEngine, MeasureEngine},
    row::{ColumnKey, Row, SelectionTarget},
    summary::StatKey,
    table::TableConfig,
};

/// Mode; the student picks the modal row.
///
/// Grouped data interpolates around the modal class with
/// `mode = L + ((f1 − f0) / (2f1 − f0 − f2)) × h`, counting missing neighbours as zero.
#[derive(Debug, Clone)]
pub struct Mode {
    kind: IntervalKind,
}

impl Mode {
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

impl MeasureEngine for Mode {
    fn id(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "GroupedMode",
            IntervalKind::Discrete => "DiscreteMode",
        }
    }

    fn name(&self) -> &'static str {
        match self.kind {
            IntervalKind::Grouped => "Mode (Grouped Data)",
            IntervalKind::Discrete => "Mode (Ungrouped Data)",
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
        config.selecting(SelectionTarget::Modal)
    }

    fn summary_keys(&self) -> &[StatKey] {
        &[StatKey::Mode]
    }

    fn flag_rows(&self, classes: &[Class], rows: &mut [Row]) {
        engine::flag_modal(classes, rows);
    }
}
