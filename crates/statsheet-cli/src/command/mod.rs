use clap::{Parser, Subcommand};

use self::{generate::GenerateArg, grade::GradeArg, list::ListArg, table::TableArg};

mod generate;
mod grade;
mod list;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List every registered statistic measure
    List(#[clap(flatten)] ListArg),
    /// Build the worksheet table for an exercise
    Table(#[clap(flatten)] TableArg),
    /// Generate a random dataset
    Generate(#[clap(flatten)] GenerateArg),
    /// Grade a student submission against an exercise
    Grade(#[clap(flatten)] GradeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::List(arg) => list::run(&arg)?,
        Mode::Table(arg) => table::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Grade(arg) => grade::run(&arg)?,
    }
    Ok(())
}
