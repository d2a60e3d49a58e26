//! One measure applied to one dataset.
//!
//! [`Worksheet`] ties a resolved engine to a dataset, caches the expected rows and summary,
//! and grades student submissions against them.
//!
//! # Examples
//!
//! ```
//! use statsheet_measure::{
//!     row::ColumnKey,
//!     summary::StatKey,
//!     worksheet::{Submission, Worksheet},
//! };
//! use statsheet_stats::dataset::Dataset;
//!
//! let dataset = Dataset::from_raw(
//!     [[10.0, 20.0], [20.0, 30.0], [30.0, 40.0], [40.0, 50.0]],
//!     vec![4.0, 6.0, 8.0, 2.0],
//! )
//! .unwrap();
//! let worksheet = Worksheet::new("GroupedMean", dataset).unwrap();
//!
//! let mut rows = worksheet.initial_rows();
//! rows[0].set(ColumnKey::Fixi, "60");
//! let mut submission = Submission { rows, ..Submission::default() };
//! submission.summary.insert(StatKey::Mean, "29".into());
//!
//! let grade = worksheet.grade(&submission);
//! assert_eq!(grade.rows[0].get(ColumnKey::Fixi), Some(true));
//! assert_eq!(grade.rows[1].get(ColumnKey::Fixi), None);
//! assert_eq!(grade.summary.get(StatKey::Mean), Some(true));
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use statsheet_dataset::exercise::{ExerciseDefinition, ExerciseError};
use statsheet_stats::{dataset::Dataset, descriptive::Skewness, interval::IntervalKind};

use crate::{
    color::ColorMap,
    engine::{BoxedMeasureEngine, MeasureEngine},
    registry::{MeasureRegistry, UnknownMeasureError},
    row::Row,
    summary::{StudentSummary, SummaryStatistics},
    table::TableConfig,
    validate::{self, RowValidation, SelectionValidation, SummaryValidation, ValidationConfig},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("measure '{measure}' expects {expected} data but the dataset is {actual}")]
pub struct InputKindMismatchError {
    pub measure: String,
    pub expected: IntervalKind,
    pub actual: IntervalKind,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum WorksheetError {
    #[display("{_0}")]
    UnknownMeasure(UnknownMeasureError),
    #[display("{_0}")]
    InputKindMismatch(InputKindMismatchError),
    #[display("{_0}")]
    Exercise(ExerciseError),
}

/// Exercise file contents: the definition plus optional grading tolerances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(flatten)]
    pub definition: ExerciseDefinition,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// What a student hands in: their copy of the rows and their summary entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub summary: StudentSummary,
}

/// Verdicts for a submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub rows: Vec<RowValidation>,
    pub summary: SummaryValidation,
    /// Row-pick verdicts, for measures where the student picks rows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectionValidation>,
}

#[derive(Debug, Clone)]
pub struct Worksheet {
    engine: BoxedMeasureEngine,
    dataset: Dataset,
    config: TableConfig,
    expected_rows: Vec<Row>,
    summary: SummaryStatistics,
    validation: ValidationConfig,
}

impl Worksheet {
    /// Resolves `measure_key` in the default registry and checks that the dataset kind
    /// matches the engine.
    ///
    /// An empty dataset has no kind and is accepted by every engine.
    pub fn new(measure_key: &str, dataset: Dataset) -> Result<Self, WorksheetError> {
        Self::with_registry(&MeasureRegistry::new(), measure_key, dataset)
    }

    pub fn with_registry(
        registry: &MeasureRegistry,
        measure_key: &str,
        dataset: Dataset,
    ) -> Result<Self, WorksheetError> {
        let engine = registry.resolve(measure_key)?.clone_boxed();
        if let Some(actual) = dataset.kind()
            && actual != engine.input_kind()
        {
            return Err(InputKindMismatchError {
                measure: engine.id().to_owned(),
                expected: engine.input_kind(),
                actual,
            }
            .into());
        }
        tracing::debug!(
            measure = engine.id(),
            rows = dataset.len(),
            "building worksheet"
        );
        let config = engine.table_config();
        let expected_rows = engine.generate_expected_rows(&dataset);
        let summary = engine.summary_stats(&expected_rows);
        Ok(Self {
            engine,
            dataset,
            config,
            expected_rows,
            summary,
            validation: ValidationConfig::default(),
        })
    }

    /// Resolves the exercise dataset (authored or generated) and builds its worksheet.
    pub fn from_exercise<R>(exercise: &Exercise, rng: &mut R) -> Result<Self, WorksheetError>
    where
        R: Rng + ?Sized,
    {
        let definition = &exercise.definition;
        let dataset = definition.resolve_dataset(rng)?;
        Ok(Self::new(&definition.stat_measure, dataset)?.with_validation(exercise.validation))
    }

    #[must_use]
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &dyn MeasureEngine {
        &*self.engine
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn table_config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn validation(&self) -> ValidationConfig {
        self.validation
    }

    /// Fresh student rows.
    #[must_use]
    pub fn initial_rows(&self) -> Vec<Row> {
        self.engine.generate_initial_rows(&self.dataset)
    }

    #[must_use]
    pub fn expected_rows(&self) -> &[Row] {
        &self.expected_rows
    }

    /// Footer row for `rows`, over the columns of this worksheet's table.
    #[must_use]
    pub fn total_row(&self, rows: &[Row]) -> Row {
        self.engine.generate_total_row(rows, &self.config.columns)
    }

    #[must_use]
    pub fn summary(&self) -> &SummaryStatistics {
        &self.summary
    }

    #[must_use]
    pub fn skewness(&self) -> Option<Skewness> {
        self.engine.skewness(&self.summary)
    }

    #[must_use]
    pub fn color_map(&self) -> ColorMap {
        ColorMap::new(self.dataset.intervals())
    }

    /// Grades a submission. With validation disabled every verdict is `None`.
    #[must_use]
    pub fn grade(&self, submission: &Submission) -> Grade {
        let mut grade = Grade {
            rows: validate::validate_rows(
                &submission.rows,
                &self.expected_rows,
                &self.config.expected_columns,
                self.validation.cell_tolerance,
            ),
            summary: validate::validate_summary(
                &submission.summary,
                &self.summary,
                self.validation.summary_tolerance,
            ),
            selection: if self.config.selection.is_empty() {
                Vec::new()
            } else {
                validate::validate_selection(
                    &submission.rows,
                    &self.expected_rows,
                    &self.config.selection,
                )
            },
        };
        if !self.config.enable_validation {
            for row in &mut grade.rows {
                row.0.values_mut().for_each(|v| *v = None);
            }
            grade.summary.0.values_mut().for_each(|v| *v = None);
            for row in &mut grade.selection {
                row.0.values_mut().for_each(|v| *v = None);
            }
        }
        tracing::debug!(
            measure = self.engine.id(),
            rows = submission.rows.len(),
            "graded submission"
        );
        grade
    }
}
