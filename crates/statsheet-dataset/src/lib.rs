//! Practice dataset sources for statsheet exercises.
//!
//! - [`generator`]: Random grouped and discrete datasets with an exact total frequency
//! - [`exercise`]: Exercise definitions and the authored-versus-generated resolution rule
//!
//! All randomness comes from a caller-supplied [`rand::Rng`], so a seeded
//! [`generator::DatasetGenerator`] reproduces the same exercise every time.

pub mod exercise;
pub mod generator;
