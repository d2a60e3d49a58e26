use std::path::PathBuf;

use statsheet_measure::worksheet::Submission;

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct GradeArg {
    /// Exercise definition file path
    #[arg(long)]
    exercise: PathBuf,
    /// Student submission file path
    #[arg(long)]
    submission: PathBuf,
    /// Seed used when the exercise table was built
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GradeArg) -> anyhow::Result<()> {
    let GradeArg {
        exercise,
        submission,
        seed,
        output,
    } = arg;

    let worksheet = util::load_worksheet(exercise, *seed)?;
    let submission: Submission = util::read_json_file("submission", submission)?;
    let grade = worksheet.grade(&submission);

    let correct = grade.rows.iter().filter(|row| row.all_correct()).count();
    tracing::info!(rows = grade.rows.len(), correct, "graded submission");

    Output::save_json(&grade, output.clone())
}
