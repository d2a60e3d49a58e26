use std::path::PathBuf;

use anyhow::Context;
use statsheet_dataset::generator::GenerationSpec;
use statsheet_stats::interval::IntervalKind;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum DataKind {
    #[default]
    Grouped,
    Discrete,
}

impl From<DataKind> for IntervalKind {
    fn from(kind: DataKind) -> Self {
        match kind {
            DataKind::Grouped => IntervalKind::Grouped,
            DataKind::Discrete => IntervalKind::Discrete,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Kind of data to generate (grouped or discrete)
    #[arg(long, default_value = "grouped")]
    kind: DataKind,
    /// Smallest value (lower bound of the first class)
    #[arg(long, default_value_t = 10.0)]
    min: f64,
    /// Largest value
    #[arg(long, default_value_t = 100.0)]
    max: f64,
    /// Class width for grouped data
    #[arg(long, default_value_t = 10.0)]
    interval: f64,
    /// Number of classes or distinct values
    #[arg(long, default_value_t = 5)]
    count: usize,
    /// Sum of all frequencies
    #[arg(long, default_value_t = 100)]
    total_frequency: u32,
    /// Measure the data is generated for
    #[arg(long, default_value = "")]
    measure: String,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        kind,
        min,
        max,
        interval,
        count,
        total_frequency,
        measure,
        seed,
        output,
    } = arg;

    let spec = GenerationSpec {
        min: *min,
        max: *max,
        interval: *interval,
        count: *count,
        total_frequency: *total_frequency,
    };
    let mut generator = util::generator(*seed);
    let dataset = generator
        .generate((*kind).into(), &spec, measure)
        .context("Failed to generate dataset")?;
    tracing::info!(
        kind = %IntervalKind::from(*kind),
        classes = dataset.len(),
        total = dataset.total_frequency(),
        "generated dataset"
    );

    Output::save_json(&dataset, output.clone())
}
