//! Worksheet rows, cells and column keys.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use statsheet_stats::{descriptive::Class, interval::Interval};

/// Label written into the first column of the total row.
pub const TOTAL_LABEL: &str = "Σ";

/// Worksheet column identifiers.
///
/// Serialized with the camelCase names the front-end tables use (`ciLabel`, `fiAbsDiff`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    CiLabel,
    Fi,
    Xi,
    H,
    Fixi,
    CumulativeFi,
    AbsDiff,
    FiAbsDiff,
    SquaredDiff,
    FiSquaredDiff,
}

impl ColumnKey {
    pub const ALL: [Self; 10] = [
        Self::CiLabel,
        Self::Fi,
        Self::Xi,
        Self::H,
        Self::Fixi,
        Self::CumulativeFi,
        Self::AbsDiff,
        Self::FiAbsDiff,
        Self::SquaredDiff,
        Self::FiSquaredDiff,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CiLabel => "ciLabel",
            Self::Fi => "fi",
            Self::Xi => "xi",
            Self::H => "h",
            Self::Fixi => "fixi",
            Self::CumulativeFi => "cumulativeFi",
            Self::AbsDiff => "absDiff",
            Self::FiAbsDiff => "fiAbsDiff",
            Self::SquaredDiff => "squaredDiff",
            Self::FiSquaredDiff => "fiSquaredDiff",
        }
    }

    /// Whether the total row carries a sum for this column.
    ///
    /// Only the frequency and the `fᵢ·…` product columns add up to something meaningful.
    #[must_use]
    pub fn is_summable(self) -> bool {
        matches!(
            self,
            Self::Fi | Self::Fixi | Self::FiAbsDiff | Self::FiSquaredDiff
        )
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single table cell.
///
/// Student input is kept as raw [`Cell::Text`] until it is graded so that "not a number" can
/// be told apart from "left empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Blank,
    Number(f64),
    Text(String),
}

static BLANK: Cell = Cell::Blank;

impl Cell {
    /// Cell for a raw input string; whitespace-only input is blank.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        if input.trim().is_empty() {
            Cell::Blank
        } else {
            Cell::Text(input.to_owned())
        }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Blank => true,
            Cell::Number(_) => false,
            Cell::Text(text) => text.trim().is_empty(),
        }
    }

    /// Numeric value of the cell, parsing text input. Non-finite numbers count as absent.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        let value = match self {
            Cell::Blank => return None,
            Cell::Number(value) => *value,
            Cell::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(input: &str) -> Self {
        Cell::from_input(input)
    }
}

/// Which flag a row pick is graded against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SelectionTarget {
    Median,
    Modal,
    Min,
    Max,
}

impl SelectionTarget {
    /// Name of the matching [`RowFlags`] field in JSON.
    #[must_use]
    pub fn flag_name(self) -> &'static str {
        match self {
            Self::Median => "isMedian",
            Self::Modal => "isModal",
            Self::Min => "isMin",
            Self::Max => "isMax",
        }
    }
}

impl fmt::Display for SelectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// One boolean per [`SelectionTarget`].
///
/// Used both for the flags an engine computes and for the picks a student makes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowFlags {
    pub is_median: bool,
    pub is_modal: bool,
    pub is_min: bool,
    pub is_max: bool,
}

impl RowFlags {
    #[must_use]
    pub fn get(self, target: SelectionTarget) -> bool {
        match target {
            SelectionTarget::Median => self.is_median,
            SelectionTarget::Modal => self.is_modal,
            SelectionTarget::Min => self.is_min,
            SelectionTarget::Max => self.is_max,
        }
    }

    pub fn set(&mut self, target: SelectionTarget, value: bool) {
        let flag = match target {
            SelectionTarget::Median => &mut self.is_median,
            SelectionTarget::Modal => &mut self.is_modal,
            SelectionTarget::Min => &mut self.is_min,
            SelectionTarget::Max => &mut self.is_max,
        };
        *flag = value;
    }
}

/// One worksheet row.
///
/// Expected rows and student rows share this shape. The total row has no interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(default)]
    pub cells: BTreeMap<ColumnKey, Cell>,
    /// Computed by the engine. Never set by students.
    #[serde(flatten)]
    pub flags: RowFlags,
    /// Student picks, independent of the computed flags.
    #[serde(default)]
    pub picks: RowFlags,
}

impl Row {
    /// Row for a class with the label, frequency, midpoint and width filled in.
    #[must_use]
    pub fn for_class(class: &Class) -> Self {
        let mut row = Self {
            interval: Some(class.interval),
            ..Self::default()
        };
        row.set(ColumnKey::CiLabel, Cell::Text(class.interval.label()));
        row.set(ColumnKey::Fi, class.frequency);
        row.set(ColumnKey::Xi, class.interval.midpoint());
        row.set(ColumnKey::H, class.interval.width());
        row
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.cell(ColumnKey::CiLabel).text()
    }

    /// The cell for `key`; missing cells read as blank.
    #[must_use]
    pub fn cell(&self, key: ColumnKey) -> &Cell {
        self.cells.get(&key).unwrap_or(&BLANK)
    }

    #[must_use]
    pub fn number(&self, key: ColumnKey) -> Option<f64> {
        self.cell(key).number()
    }

    pub fn set(&mut self, key: ColumnKey, cell: impl Into<Cell>) {
        self.cells.insert(key, cell.into());
    }

    pub fn clear(&mut self, key: ColumnKey) {
        self.cells.insert(key, Cell::Blank);
    }

    /// The interval and frequency of this row, if both are present.
    #[must_use]
    pub fn class(&self) -> Option<Class> {
        let interval = self.interval?;
        let frequency = self.number(ColumnKey::Fi).filter(|f| *f >= 0.0)?;
        Some(Class::new(interval, frequency))
    }
}

/// Classes of every row that has an interval and a usable frequency.
#[must_use]
pub fn classes_from_rows(rows: &[Row]) -> Vec<Class> {
    rows.iter().filter_map(Row::class).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_number_parsing() {
        assert_eq!(Cell::Number(3.5).number(), Some(3.5));
        assert_eq!(Cell::Text(" 150.004 ".to_owned()).number(), Some(150.004));
        assert_eq!(Cell::Text("abc".to_owned()).number(), None);
        assert_eq!(Cell::Text("NaN".to_owned()).number(), None);
        assert_eq!(Cell::Blank.number(), None);
    }

    #[test]
    fn test_cell_from_input() {
        assert_eq!(Cell::from_input("   "), Cell::Blank);
        assert!(Cell::Text("  ".to_owned()).is_blank());
        assert_eq!(Cell::from("42"), Cell::Text("42".to_owned()));
    }

    #[test]
    fn test_summable_columns() {
        let summable = ColumnKey::ALL
            .into_iter()
            .filter(|k| k.is_summable())
            .collect::<Vec<_>>();
        assert_eq!(
            summable,
            [
                ColumnKey::Fi,
                ColumnKey::Fixi,
                ColumnKey::FiAbsDiff,
                ColumnKey::FiSquaredDiff
            ]
        );
    }

    #[test]
    fn test_column_key_names_match_serde() {
        for key in ColumnKey::ALL {
            assert_eq!(
                serde_json::to_string(&key).unwrap(),
                format!("\"{}\"", key.as_str())
            );
        }
    }

    #[test]
    fn test_row_for_class() {
        let class = Class::new(Interval::grouped(10.0, 20.0).unwrap(), 4.0);
        let row = Row::for_class(&class);
        assert_eq!(row.label(), Some("10–20"));
        assert_eq!(row.number(ColumnKey::Xi), Some(15.0));
        assert_eq!(row.number(ColumnKey::H), Some(10.0));
        assert_eq!(row.class(), Some(class));
        assert!(row.cell(ColumnKey::Fixi).is_blank());
    }

    #[test]
    fn test_flags_by_target() {
        let mut flags = RowFlags::default();
        flags.set(SelectionTarget::Max, true);
        assert!(flags.get(SelectionTarget::Max));
        assert!(!flags.get(SelectionTarget::Min));
        assert!(!flags.get(SelectionTarget::Modal));
        assert_eq!(SelectionTarget::Min.to_string(), "isMin");
    }

    #[test]
    fn test_student_row_deserializes() {
        let row: Row = serde_json::from_str(
            r#"{"cells": {"fixi": "60", "absDiff": null, "fi": 4}, "picks": {"isMin": true}}"#,
        )
        .unwrap();
        assert_eq!(row.cell(ColumnKey::Fixi), &Cell::Text("60".to_owned()));
        assert_eq!(row.cell(ColumnKey::AbsDiff), &Cell::Blank);
        assert_eq!(row.number(ColumnKey::Fi), Some(4.0));
        assert!(row.picks.is_min);
        assert!(!row.picks.is_max);
        assert!(!row.flags.is_min);
    }

    #[test]
    fn test_row_serializes_flags_inline() {
        let mut row = Row::default();
        row.set(ColumnKey::CiLabel, TOTAL_LABEL);
        row.flags.is_modal = true;
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["cells"]["ciLabel"], "Σ");
        assert_eq!(json["isModal"], true);
        assert_eq!(json["picks"]["isModal"], false);
        assert!(json.get("interval").is_none());
    }
}
