use std::path::PathBuf;

use serde::Serialize;
use statsheet_measure::{
    engine::MeasureEngine as _, registry::MeasureKind, summary::StatKey,
    table::ColumnDescriptor,
};
use statsheet_stats::interval::IntervalKind;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ListArg {
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeasureEntry {
    key: &'static str,
    name: String,
    aliases: &'static [&'static str],
    input_kind: IntervalKind,
    columns: Vec<ColumnDescriptor>,
    summary_keys: Vec<StatKey>,
}

pub(crate) fn run(arg: &ListArg) -> anyhow::Result<()> {
    let ListArg { output } = arg;

    let entries = MeasureKind::ALL
        .into_iter()
        .map(|kind| {
            let engine = kind.engine();
            MeasureEntry {
                key: kind.key(),
                name: engine.name().to_owned(),
                aliases: kind.aliases(),
                input_kind: engine.input_kind(),
                columns: engine.table_config().columns,
                summary_keys: engine.summary_keys().to_vec(),
            }
        })
        .collect::<Vec<_>>();

    Output::save_json(&entries, output.clone())
}
