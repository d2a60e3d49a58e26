//! Frequency-distribution statistics for the statsheet worksheets.
//!
//! This crate provides the numeric core shared by every measure engine:
//!
//! - **Intervals**: Grouped class intervals `[lower, upper)` and discrete values, normalized
//!   from the many shapes exercise data arrives in
//! - **Datasets**: Intervals paired with non-negative frequencies
//! - **Descriptive statistics**: Mean, dispersion, grouped and discrete median/mode, range
//!
//! # Modules
//!
//! - [`interval`]: Interval model and normalization
//! - [`dataset`]: Validated frequency distributions
//! - [`descriptive`]: Closed-form statistics over classes
//!
//! # Examples
//!
//! ## Normalizing intervals
//!
//! ```
//! use statsheet_stats::interval::Interval;
//!
//! let interval = Interval::normalize("20–30").unwrap();
//! assert_eq!(interval.midpoint(), 25.0);
//! assert_eq!(Interval::normalize(7.0).unwrap().width(), 0.0);
//! ```
//!
//! ## Computing a grouped mean
//!
//! ```
//! use statsheet_stats::{dataset::Dataset, descriptive};
//!
//! let dataset = Dataset::from_raw([[0.0, 10.0], [10.0, 20.0]], vec![1.0, 3.0]).unwrap();
//! assert_eq!(descriptive::mean(&dataset.classes()), Ok(12.5));
//! ```

pub mod dataset;
pub mod descriptive;
pub mod interval;
