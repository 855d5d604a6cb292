use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "housemarks",
    version,
    about = "House competition score collection and results CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default housemarks.toml and collection directories
    Init(InitCommand),
    /// Register a judge on the panel
    Judge(JudgeCommand),
    /// Store one judge's marks for a category
    Submit(SubmitCommand),
    /// Aggregate submissions into averages, ranks and a winner
    Results(ResultsCommand),
    /// Show how each stored document was read
    Inspect(InspectCommand),
    /// Delete stored judges and scores
    Reset(ResetCommand),
}

#[derive(Args)]
pub struct InitCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct JudgeCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
}

#[derive(Args)]
pub struct SubmitCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub judge_id: String,
    #[arg(long)]
    pub judge_name: String,
    #[arg(long)]
    pub category: String,
    /// JSON file mapping house -> criterion -> mark
    #[arg(long)]
    pub marks: PathBuf,
}

#[derive(Args)]
pub struct ResultsCommand {
    pub path: PathBuf,
    /// Category to rank; "overall" includes every category
    #[arg(short, long, default_value = "overall")]
    pub category: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Write the rendered report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct InspectCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ResetCommand {
    pub path: PathBuf,
    /// Only delete score documents of this category
    #[arg(long)]
    pub category: Option<String>,
    /// Confirm the permanent deletion
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Csv,
}
