//! Class intervals and discrete values.
//!
//! An [`Interval`] is the canonical representation of one row of a frequency distribution:
//! either a grouped class `[lower, upper)` or a single discrete value. Every measure in the
//! workspace consumes this one representation, so input in any of the accepted raw shapes
//! ([`RawInterval`]) is normalized once at the boundary.
//!
//! # Examples
//!
//! ```
//! use statsheet_stats::interval::Interval;
//!
//! let class = Interval::normalize([10.0, 20.0]).unwrap();
//! assert_eq!(class.midpoint(), 15.0);
//! assert_eq!(class.width(), 10.0);
//! assert_eq!(class.label(), "10–20");
//!
//! let legacy = Interval::normalize("20-30").unwrap();
//! assert_eq!(legacy.lower(), 20.0);
//!
//! let value = Interval::normalize(7.0).unwrap();
//! assert_eq!(value.width(), 0.0);
//! assert_eq!(value.label(), "7");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used in canonical class labels (`"10–20"`).
pub const LABEL_SEPARATOR: char = '–';

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidIntervalError {
    #[display("interval bound is not a finite number")]
    NonFiniteBound,
    #[display("upper bound {upper} must be greater than lower bound {lower}")]
    EmptyRange { lower: f64, upper: f64 },
    #[display("cannot parse interval label '{label}'")]
    UnparseableLabel { label: String },
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    Grouped,
    #[serde(alias = "single", alias = "ungrouped")]
    Discrete,
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalKind::Grouped => f.write_str("grouped"),
            IntervalKind::Discrete => f.write_str("discrete"),
        }
    }
}

/// Interval input in any of the shapes exercise definitions use.
///
/// JSON forms: `[10, 20]`, `{"lower": 10, "upper": 20}`, `7`, `[7]`, `{"value": 7}`,
/// `"10–20"` or `"7"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInterval {
    Value(f64),
    Pair([f64; 2]),
    Single([f64; 1]),
    Bounds { lower: f64, upper: f64 },
    Discrete { value: f64 },
    Label(String),
}

impl From<f64> for RawInterval {
    fn from(value: f64) -> Self {
        RawInterval::Value(value)
    }
}

impl From<[f64; 2]> for RawInterval {
    fn from(pair: [f64; 2]) -> Self {
        RawInterval::Pair(pair)
    }
}

impl From<(f64, f64)> for RawInterval {
    fn from((lower, upper): (f64, f64)) -> Self {
        RawInterval::Bounds { lower, upper }
    }
}

impl From<&str> for RawInterval {
    fn from(label: &str) -> Self {
        RawInterval::Label(label.to_owned())
    }
}

impl From<Interval> for RawInterval {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::Grouped { lower, upper } => RawInterval::Bounds { lower, upper },
            Interval::Discrete { value } => RawInterval::Discrete { value },
        }
    }
}

/// A grouped class interval or a discrete value.
///
/// Grouped intervals are lower-inclusive and upper-exclusive (except the final class of a
/// distribution). The invariant `upper > lower` and finiteness of every bound are enforced
/// by the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawInterval")]
pub enum Interval {
    Grouped { lower: f64, upper: f64 },
    Discrete { value: f64 },
}

impl TryFrom<RawInterval> for Interval {
    type Error = InvalidIntervalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        match raw {
            RawInterval::Value(value)
            | RawInterval::Single([value])
            | RawInterval::Discrete { value } => Self::discrete(value),
            RawInterval::Pair([lower, upper]) | RawInterval::Bounds { lower, upper } => {
                Self::grouped(lower, upper)
            }
            RawInterval::Label(label) => Self::parse_label(&label),
        }
    }
}

impl Interval {
    pub fn grouped(lower: f64, upper: f64) -> Result<Self, InvalidIntervalError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(InvalidIntervalError::NonFiniteBound);
        }
        if upper <= lower {
            return Err(InvalidIntervalError::EmptyRange { lower, upper });
        }
        Ok(Interval::Grouped { lower, upper })
    }

    pub fn discrete(value: f64) -> Result<Self, InvalidIntervalError> {
        if !value.is_finite() {
            return Err(InvalidIntervalError::NonFiniteBound);
        }
        Ok(Interval::Discrete { value })
    }

    /// Normalizes any accepted raw shape into the canonical form.
    pub fn normalize<R>(raw: R) -> Result<Self, InvalidIntervalError>
    where
        R: Into<RawInterval>,
    {
        Self::try_from(raw.into())
    }

    /// Parses a display label such as `"20–30"`, `"20 - 30"`, `"20—30"` or `"45"`.
    fn parse_label(label: &str) -> Result<Self, InvalidIntervalError> {
        let unparseable = || InvalidIntervalError::UnparseableLabel {
            label: label.to_owned(),
        };
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(unparseable());
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::discrete(value);
        }

        // A '-' directly after a digit separates the bounds; a leading one is a sign.
        let mut prev_is_digit = false;
        let split_at = trimmed.char_indices().find_map(|(idx, c)| {
            let is_separator = matches!(c, '–' | '—') || (c == '-' && prev_is_digit);
            if !c.is_whitespace() {
                prev_is_digit = c.is_ascii_digit() || c == '.';
            }
            is_separator.then_some((idx, c.len_utf8()))
        });
        let (idx, sep_len) = split_at.ok_or_else(unparseable)?;
        let lower = trimmed[..idx].trim().parse::<f64>().map_err(|_| unparseable())?;
        let upper = trimmed[idx + sep_len..]
            .trim()
            .parse::<f64>()
            .map_err(|_| unparseable())?;
        Self::grouped(lower, upper)
    }

    #[must_use]
    pub fn kind(&self) -> IntervalKind {
        match self {
            Interval::Grouped { .. } => IntervalKind::Grouped,
            Interval::Discrete { .. } => IntervalKind::Discrete,
        }
    }

    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.kind().is_grouped()
    }

    /// Lower bound; the value itself for discrete intervals.
    #[must_use]
    pub fn lower(&self) -> f64 {
        match *self {
            Interval::Grouped { lower, .. } => lower,
            Interval::Discrete { value } => value,
        }
    }

    /// Upper bound; the value itself for discrete intervals.
    #[must_use]
    pub fn upper(&self) -> f64 {
        match *self {
            Interval::Grouped { upper, .. } => upper,
            Interval::Discrete { value } => value,
        }
    }

    /// Representative value `xᵢ`.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        match *self {
            Interval::Grouped { lower, upper } => f64::midpoint(lower, upper),
            Interval::Discrete { value } => value,
        }
    }

    /// Class width `h`; zero for discrete values.
    #[must_use]
    pub fn width(&self) -> f64 {
        match *self {
            Interval::Grouped { lower, upper } => upper - lower,
            Interval::Discrete { .. } => 0.0,
        }
    }

    /// Canonical display form, also used as a stable key for color mapping.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Grouped { lower, upper } => write!(f, "{lower}{LABEL_SEPARATOR}{upper}"),
            Interval::Discrete { value } => write!(f, "{value}"),
        }
    }
}
