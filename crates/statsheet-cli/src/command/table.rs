use std::path::PathBuf;

use serde::Serialize;
use statsheet_measure::{
    color::ColorMap, engine::MeasureEngine as _, row::Row, summary::SummaryStatistics,
    table::TableConfig, validate::ValidationConfig,
};
use statsheet_stats::{dataset::Dataset, descriptive::Skewness};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TableArg {
    /// Exercise definition file path
    #[arg(long)]
    exercise: PathBuf,
    /// Seed for reproducible generated data
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableReport<'a> {
    measure: &'a str,
    dataset: &'a Dataset,
    config: &'a TableConfig,
    validation: ValidationConfig,
    initial_rows: Vec<Row>,
    expected_rows: &'a [Row],
    total_row: Row,
    summary: &'a SummaryStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    skewness: Option<Skewness>,
    colors: ColorMap,
}

pub(crate) fn run(arg: &TableArg) -> anyhow::Result<()> {
    let TableArg {
        exercise,
        seed,
        output,
    } = arg;

    let worksheet = util::load_worksheet(exercise, *seed)?;
    let expected_rows = worksheet.expected_rows();
    let report = TableReport {
        measure: worksheet.engine().id(),
        dataset: worksheet.dataset(),
        config: worksheet.table_config(),
        validation: worksheet.validation(),
        initial_rows: worksheet.initial_rows(),
        expected_rows,
        total_row: worksheet.total_row(expected_rows),
        summary: worksheet.summary(),
        skewness: worksheet.skewness(),
        colors: worksheet.color_map(),
    };

    Output::save_json(&report, output.clone())
}
