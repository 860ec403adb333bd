use crate::i18n::Lang;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pbi-docs",
    version,
    about = "Power BI data model extraction and documentation CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to a pbidocs.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract and document a single .pbit file
    Extract(ExtractCommand),
    /// Process every .pbit file under a directory
    Batch(BatchCommand),
    /// Compare two .pbit files and write a diff
    Diff(DiffCommand),
}

#[derive(Args)]
pub struct ExtractCommand {
    /// Path to the .pbit file
    pub input: PathBuf,

    /// Base output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Documentation language
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

#[derive(Args)]
pub struct BatchCommand {
    /// Directory walked recursively for .pbit files
    pub dir: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

#[derive(Args)]
pub struct DiffCommand {
    /// Baseline .pbit file
    pub a: PathBuf,

    /// Comparison .pbit file
    pub b: PathBuf,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}
