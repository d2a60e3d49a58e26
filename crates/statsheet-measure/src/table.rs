//! Table layout descriptors handed to the rendering host.

use serde::{Deserialize, Serialize};
use statsheet_stats::interval::IntervalKind;

use crate::row::{ColumnKey, SelectionTarget};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub label: String,
    pub editable: bool,
}

/// Columns shown for a measure, which of them are graded, and which rows the student picks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<ColumnDescriptor>,
    pub expected_columns: Vec<ColumnKey>,
    pub enable_validation: bool,
    /// Targets the student marks rows for, each graded on its own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectionTarget>,
}

fn header(key: ColumnKey, kind: IntervalKind) -> &'static str {
    match (key, kind) {
        (ColumnKey::CiLabel, _) => "Class Interval",
        (ColumnKey::Fi, _) => "Frequency (fᵢ)",
        (ColumnKey::Xi, IntervalKind::Grouped) => "Midpoint (xᵢ)",
        (ColumnKey::Xi, IntervalKind::Discrete) => "xᵢ",
        (ColumnKey::H, _) => "Class Width (h)",
        (ColumnKey::Fixi, _) => "fᵢ·xᵢ",
        (ColumnKey::CumulativeFi, _) => "Cumulative Frequency",
        (ColumnKey::AbsDiff, _) => "|xᵢ − x̄|",
        (ColumnKey::FiAbsDiff, _) => "fᵢ·|xᵢ − x̄|",
        (ColumnKey::SquaredDiff, _) => "(xᵢ − x̄)²",
        (ColumnKey::FiSquaredDiff, _) => "fᵢ·(xᵢ − x̄)²",
    }
}

impl TableConfig {
    /// Label, frequency and value columns for the given input kind.
    ///
    /// Grouped tables show the class label then its midpoint; discrete tables show the value
    /// itself as the first column.
    #[must_use]
    pub fn base(kind: IntervalKind) -> Self {
        let config = Self {
            columns: vec![],
            expected_columns: vec![],
            enable_validation: true,
            selection: Vec::new(),
        };
        match kind {
            IntervalKind::Grouped => config
                .read_only(kind, ColumnKey::CiLabel)
                .read_only(kind, ColumnKey::Fi)
                .read_only(kind, ColumnKey::Xi),
            IntervalKind::Discrete => config
                .read_only(kind, ColumnKey::Xi)
                .read_only(kind, ColumnKey::Fi),
        }
    }

    #[must_use]
    pub fn read_only(mut self, kind: IntervalKind, key: ColumnKey) -> Self {
        self.columns.push(ColumnDescriptor {
            key,
            label: header(key, kind).to_owned(),
            editable: false,
        });
        self
    }

    /// Adds a student-filled column that is also graded.
    #[must_use]
    pub fn editable(mut self, kind: IntervalKind, key: ColumnKey) -> Self {
        self.columns.push(ColumnDescriptor {
            key,
            label: header(key, kind).to_owned(),
            editable: true,
        });
        self.expected_columns.push(key);
        self
    }

    #[must_use]
    pub fn selecting(mut self, target: SelectionTarget) -> Self {
        self.selection.push(target);
        self
    }

    #[must_use]
    pub fn column_keys(&self) -> Vec<ColumnKey> {
        self.columns.iter().map(|c| c.key).collect()
    }

    #[must_use]
    pub fn has_column(&self, key: ColumnKey) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }
}
