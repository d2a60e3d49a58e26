//! Resolution of measure keys to engines.
//!
//! The set of measures is closed: [`MeasureKind`] enumerates every registered key, and
//! unknown keys are an error rather than a fallback to some default engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::engine::{
    BoxedMeasureEngine, MeasureEngine,
    dispersion::{MeanDeviation, StandardDeviation},
    mean::Mean,
    median::Median,
    mode::Mode,
    range::Range,
    versus::{MeanDeviationVsSd, MeanVsMedian, MeanVsMode},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown statistic measure '{key}'")]
pub struct UnknownMeasureError {
    pub key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeasureKind {
    #[serde(alias = "range")]
    GroupedRange,
    DiscreteRange,
    #[serde(alias = "mean")]
    GroupedMean,
    DiscreteMean,
    #[serde(alias = "median")]
    GroupedMedian,
    DiscreteMedian,
    #[serde(alias = "mode")]
    GroupedMode,
    DiscreteMode,
    MeanDeviation,
    #[serde(rename = "MD_Para")]
    MdPara,
    StandardDeviation,
    #[serde(rename = "SD_Para")]
    SdPara,
    GroupedMeanVsMode,
    GroupedMeanVsMedian,
    #[serde(rename = "GroupedMeanVsSD")]
    GroupedMeanVsSd,
}

impl MeasureKind {
    pub const ALL: [Self; 15] = [
        Self::GroupedRange,
        Self::DiscreteRange,
        Self::GroupedMean,
        Self::DiscreteMean,
        Self::GroupedMedian,
        Self::DiscreteMedian,
        Self::GroupedMode,
        Self::DiscreteMode,
        Self::MeanDeviation,
        Self::MdPara,
        Self::StandardDeviation,
        Self::SdPara,
        Self::GroupedMeanVsMode,
        Self::GroupedMeanVsMedian,
        Self::GroupedMeanVsSd,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::GroupedRange => "GroupedRange",
            Self::DiscreteRange => "DiscreteRange",
            Self::GroupedMean => "GroupedMean",
            Self::DiscreteMean => "DiscreteMean",
            Self::GroupedMedian => "GroupedMedian",
            Self::DiscreteMedian => "DiscreteMedian",
            Self::GroupedMode => "GroupedMode",
            Self::DiscreteMode => "DiscreteMode",
            Self::MeanDeviation => "MeanDeviation",
            Self::MdPara => "MD_Para",
            Self::StandardDeviation => "StandardDeviation",
            Self::SdPara => "SD_Para",
            Self::GroupedMeanVsMode => "GroupedMeanVsMode",
            Self::GroupedMeanVsMedian => "GroupedMeanVsMedian",
            Self::GroupedMeanVsSd => "GroupedMeanVsSD",
        }
    }

    /// Short names accepted in addition to the key.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::GroupedRange => &["range"],
            Self::GroupedMean => &["mean"],
            Self::GroupedMedian => &["median"],
            Self::GroupedMode => &["mode"],
            _ => &[],
        }
    }

    #[must_use]
    pub fn engine(self) -> BoxedMeasureEngine {
        match self {
            Self::GroupedRange => Box::new(Range::grouped()),
            Self::DiscreteRange => Box::new(Range::discrete()),
            Self::GroupedMean => Box::new(Mean::grouped()),
            Self::DiscreteMean => Box::new(Mean::discrete()),
            Self::GroupedMedian => Box::new(Median::grouped()),
            Self::DiscreteMedian => Box::new(Median::discrete()),
            Self::GroupedMode => Box::new(Mode::grouped()),
            Self::DiscreteMode => Box::new(Mode::discrete()),
            Self::MeanDeviation => Box::new(MeanDeviation::grouped()),
            Self::MdPara => Box::new(MeanDeviation::discrete()),
            Self::StandardDeviation => Box::new(StandardDeviation::grouped()),
            Self::SdPara => Box::new(StandardDeviation::discrete()),
            Self::GroupedMeanVsMode => Box::new(MeanVsMode),
            Self::GroupedMeanVsMedian => Box::new(MeanVsMedian),
            Self::GroupedMeanVsSd => Box::new(MeanDeviationVsSd),
        }
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MeasureKind {
    type Err = UnknownMeasureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key || kind.aliases().iter().any(|alias| *alias == key))
            .ok_or_else(|| UnknownMeasureError { key: s.to_owned() })
    }
}

#[must_use]
pub fn all_measure_engines() -> Vec<BoxedMeasureEngine> {
    MeasureKind::ALL.into_iter().map(MeasureKind::engine).collect()
}

/// Registered engines, resolvable by key or alias.
#[derive(Debug, Clone)]
pub struct MeasureRegistry {
    engines: Vec<BoxedMeasureEngine>,
}

impl Default for MeasureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasureRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            engines: all_measure_engines(),
        }
    }

    #[must_use]
    pub fn engines(&self) -> &[BoxedMeasureEngine] {
        &self.engines
    }

    pub fn resolve(&self, key: &str) -> Result<&dyn MeasureEngine, UnknownMeasureError> {
        let kind = key.parse::<MeasureKind>()?;
        let engine = self
            .engines
            .iter()
            .find(|engine| engine.id() == kind.key())
            .ok_or_else(|| UnknownMeasureError {
                key: key.to_owned(),
            })?;
        tracing::debug!(key, engine = engine.id(), "resolved measure engine");
        Ok(&**engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_maps_to_engine_with_same_id() {
        for kind in MeasureKind::ALL {
            assert_eq!(kind.engine().id(), kind.key());
        }
    }

    #[test]
    fn test_engine_ids_are_unique() {
        let mut ids = all_measure_engines()
            .iter()
            .map(|e| e.id().to_owned())
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), MeasureKind::ALL.len());
    }

    #[test]
    fn test_resolve_by_key_and_alias() {
        let registry = MeasureRegistry::new();
        assert_eq!(registry.resolve("SD_Para").unwrap().id(), "SD_Para");
        assert_eq!(registry.resolve("mode").unwrap().id(), "GroupedMode");
        assert_eq!(registry.resolve(" median ").unwrap().id(), "GroupedMedian");
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let registry = MeasureRegistry::new();
        let err = registry.resolve("Quartiles").unwrap_err();
        assert_eq!(err.key, "Quartiles");
        assert_eq!(err.to_string(), "unknown statistic measure 'Quartiles'");
        // keys are case sensitive
        assert!(registry.resolve("groupedmean").is_err());
    }

    #[test]
    fn test_serde_names_match_keys() {
        for kind in MeasureKind::ALL {
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.key())
            );
        }
        let kind: MeasureKind = serde_json::from_str(r#""mean""#).unwrap();
        assert_eq!(kind, MeasureKind::GroupedMean);
    }

    #[test]
    fn test_input_kinds() {
        use statsheet_stats::interval::IntervalKind;

        assert_eq!(
            MeasureKind::MdPara.engine().input_kind(),
            IntervalKind::Discrete
        );
        assert_eq!(
            MeasureKind::GroupedMeanVsSd.engine().input_kind(),
            IntervalKind::Grouped
        );
    }
}
