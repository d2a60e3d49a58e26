//! Exercise definitions and dataset resolution.
//!
//! An exercise either carries authored data (`dataPoints` + `frequencies`) or asks for a
//! fresh random dataset on every load (`generateRandomData` + `dataGeneration`).

use rand::Rng;
use serde::{Deserialize, Serialize};
use statsheet_stats::{
    dataset::{Dataset, DatasetError},
    interval::{IntervalKind, RawInterval},
};

use crate::generator::{self, GenerationSpec, InvalidGenerationSpecError};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ExerciseError {
    #[display("authored exercise data is invalid: {_0}")]
    Dataset(DatasetError),
    #[display("cannot generate exercise data: {_0}")]
    Generation(InvalidGenerationSpecError),
}

/// Exercise as stored by the authoring tool.
///
/// The `code` is opaque to the engine and only passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefinition {
    #[serde(default)]
    pub code: String,
    pub stat_measure: String,
    #[serde(default = "default_input_type")]
    pub input_type: IntervalKind,
    #[serde(default)]
    pub data_points: Vec<RawInterval>,
    #[serde(default)]
    pub frequencies: Vec<f64>,
    #[serde(default)]
    pub generate_random_data: bool,
    #[serde(default)]
    pub data_generation: GenerationSpec,
}

fn default_input_type() -> IntervalKind {
    IntervalKind::Grouped
}

impl ExerciseDefinition {
    /// Dataset built from the authored data points and frequencies.
    pub fn authored_dataset(&self) -> Result<Dataset, DatasetError> {
        Dataset::from_raw(self.data_points.iter().cloned(), self.frequencies.clone())
    }

    /// Resolves the dataset this exercise should be worked on.
    ///
    /// Authored data is used unless random generation is requested. A failed generation falls
    /// back to authored data when the exercise has any.
    pub fn resolve_dataset<R>(&self, rng: &mut R) -> Result<Dataset, ExerciseError>
    where
        R: Rng + ?Sized,
    {
        if !self.generate_random_data {
            tracing::debug!(code = %self.code, "using authored data");
            return Ok(self.authored_dataset()?);
        }

        tracing::debug!(
            code = %self.code,
            spec = ?self.data_generation,
            "generating exercise data"
        );
        match generator::generate(
            self.input_type,
            &self.data_generation,
            &self.stat_measure,
            rng,
        ) {
            Ok(dataset) => Ok(dataset),
            Err(error) if !self.data_points.is_empty() => {
                tracing::warn!(
                    code = %self.code,
                    %error,
                    "data generation failed, falling back to authored data"
                );
                Ok(self.authored_dataset()?)
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::generator::tests::ConstantRng;

    fn authored() -> ExerciseDefinition {
        serde_json::from_str(
            r#"{
                "code": "EX-101",
                "statMeasure": "GroupedMean",
                "inputType": "grouped",
                "dataPoints": [[10, 20], [20, 30], [30, 40], [40, 50]],
                "frequencies": [4, 6, 8, 2]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_authored_data_is_used_by_default() {
        let exercise = authored();
        let dataset = exercise.resolve_dataset(&mut ConstantRng(0)).unwrap();
        assert_eq!(dataset.total_frequency(), 20.0);
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn test_generation_when_requested() {
        let mut exercise = authored();
        exercise.generate_random_data = true;
        exercise.data_generation = GenerationSpec {
            count: 7,
            total_frequency: 50,
            ..GenerationSpec::default()
        };
        let dataset = exercise
            .resolve_dataset(&mut Pcg32::seed_from_u64(3))
            .unwrap();
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.total_frequency(), 50.0);
    }

    #[test]
    fn test_discrete_generation() {
        let exercise: ExerciseDefinition = serde_json::from_str(
            r#"{
                "statMeasure": "SD_Para",
                "inputType": "single",
                "generateRandomData": true,
                "dataGeneration": {"min": 1, "max": 20, "count": 6}
            }"#,
        )
        .unwrap();
        let dataset = exercise
            .resolve_dataset(&mut Pcg32::seed_from_u64(11))
            .unwrap();
        assert_eq!(dataset.kind(), Some(IntervalKind::Discrete));
        assert_eq!(dataset.len(), 6);
    }

    #[test]
    fn test_failed_generation_falls_back_to_authored() {
        let mut exercise = authored();
        exercise.generate_random_data = true;
        exercise.data_generation.count = 0;
        let dataset = exercise.resolve_dataset(&mut ConstantRng(0)).unwrap();
        assert_eq!(dataset.frequencies(), &[4.0, 6.0, 8.0, 2.0]);
    }

    #[test]
    fn test_failed_generation_without_authored_data() {
        let exercise = ExerciseDefinition {
            code: "EX-0".to_owned(),
            stat_measure: "mean".to_owned(),
            input_type: IntervalKind::Grouped,
            data_points: vec![],
            frequencies: vec![],
            generate_random_data: true,
            data_generation: GenerationSpec {
                interval: -1.0,
                ..GenerationSpec::default()
            },
        };
        assert!(matches!(
            exercise.resolve_dataset(&mut ConstantRng(0)),
            Err(ExerciseError::Generation(
                InvalidGenerationSpecError::NonPositiveInterval { .. }
            ))
        ));
    }

    #[test]
    fn test_invalid_authored_data() {
        let mut exercise = authored();
        exercise.frequencies.pop();
        assert!(matches!(
            exercise.resolve_dataset(&mut ConstantRng(0)),
            Err(ExerciseError::Dataset(DatasetError::LengthMismatch { .. }))
        ));
    }
}
