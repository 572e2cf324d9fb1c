use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lmerge",
    about = "Line-based diff and three-way merge of text files",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with comparison, marker, and header settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the line differences between two files
    Diff(DiffArgs),
    /// Merge two edited versions of a file against their common original
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub original: PathBuf,
    pub target: PathBuf,
    /// Treat whitespace around lines as significant
    #[arg(long)]
    pub exact: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    pub original: PathBuf,
    pub first: PathBuf,
    pub second: PathBuf,
    /// Write the merged text here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Start the output with a header naming the merged files
    #[arg(long)]
    pub header: bool,
    /// Treat whitespace around lines as significant
    #[arg(long)]
    pub exact: bool,
}
