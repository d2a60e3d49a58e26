//! Statistics measure engines for statsheet worksheets.
//!
//! Each worksheet measure (range, mean, median, mode, mean deviation, standard deviation and
//! the comparison sheets) is a [`engine::MeasureEngine`] that derives the expected table and
//! summary from a dataset and describes the table a student fills in. The [`validate`]
//! module grades student input against those expectations.
//!
//! # Modules
//!
//! - [`row`]: Rows, cells and column keys
//! - [`table`]: Column descriptors and table configuration
//! - [`summary`]: Summary statistics with explicit undefined values
//! - [`engine`]: The engine trait and every measure
//! - [`registry`]: Key-to-engine resolution
//! - [`validate`]: Tolerance-based grading
//! - [`worksheet`]: Engine, dataset and grading in one place
//! - [`color`]: Display colors per interval label
//!
//! # Examples
//!
//! ```
//! use statsheet_measure::{engine::MeasureEngine as _, registry::MeasureRegistry, summary::StatKey};
//! use statsheet_stats::dataset::Dataset;
//!
//! let registry = MeasureRegistry::new();
//! let engine = registry.resolve("GroupedMode").unwrap();
//! let dataset = Dataset::from_raw(
//!     [[10.0, 20.0], [20.0, 30.0], [30.0, 40.0], [40.0, 50.0]],
//!     vec![4.0, 6.0, 8.0, 2.0],
//! )
//! .unwrap();
//! let rows = engine.generate_expected_rows(&dataset);
//! assert!(rows[2].flags.is_modal);
//! let summary = engine.summary_stats(&rows);
//! assert_eq!(summary.get(StatKey::Mode).unwrap().value(), Some(32.5));
//! ```

pub mod color;
pub mod engine;
pub mod registry;
pub mod row;
pub mod summary;
pub mod table;
pub mod validate;
pub mod worksheet;
