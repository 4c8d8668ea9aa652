use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "mdconform", author, version, about = "Markdown structural conformance checker and fence repairer", long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report blank-line, bullet and fence-language violations
    Check(CheckArgs),
    /// Add inferred language identifiers to untagged code fences
    Fix(FixArgs),
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Files or directories to process
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Configuration file path (defaults to .mdconform.toml in the current directory)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', value_parser = parse_output_format, default_value = "text")]
    pub output_format: OutputFormat,

    /// Quiet mode: only the exit code reports the result
    #[arg(short, long)]
    pub quiet: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads (defaults to one per core)
    #[arg(short, long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report what would be fixed without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Check(args) => &args.common,
            Commands::Fix(args) => &args.common,
        }
    }
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}
