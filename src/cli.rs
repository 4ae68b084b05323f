use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::rules::{Framework, RuleCategory};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "naval-compliance")]
#[command(author, version, about = "Evaluate a vessel design against classification and regulatory rules")]
#[command(long_about = "Evaluates a design state (stability, hull and structure data) against \
    classification society and flag-state rule sets.\n\n\
    Exit codes:\n  \
    0 - Compliant, conditionally compliant, or review required (without --strict)\n  \
    1 - Non-compliant (or review required with --strict)\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a design state against one or more frameworks
    Check(CheckArgs),

    /// Evaluate every rule of one category, without vessel applicability
    Category(CategoryArgs),

    /// List rules in the library
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Design state file (.json or .toml)
    pub state: PathBuf,

    /// Framework to evaluate (repeatable, evaluated in the order given)
    #[arg(long = "framework", short = 'F')]
    pub frameworks: Vec<Framework>,

    /// Vessel type used for rule applicability (overrides config)
    #[arg(long)]
    pub vessel_type: Option<String>,

    /// Vessel length in metres (overrides config)
    #[arg(long)]
    pub length: Option<f64>,

    /// Vessel name shown in the report (overrides config)
    #[arg(long)]
    pub name: Option<String>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decimal places kept in JSON output (overrides config)
    #[arg(long)]
    pub precision: Option<u32>,

    /// Treat review required as a failure (exit code 1)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct CategoryArgs {
    /// Rule category, e.g. stability or freeboard
    pub category: RuleCategory,

    /// Design state file (.json or .toml)
    pub state: PathBuf,

    /// Restrict to these frameworks (repeatable)
    #[arg(long = "framework", short = 'F')]
    pub frameworks: Vec<Framework>,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Only rules of this framework
    #[arg(long, short = 'F')]
    pub framework: Option<Framework>,

    /// Only rules of this category
    #[arg(long)]
    pub category: Option<RuleCategory>,

    /// Only rules applicable to this vessel type (requires --length)
    #[arg(long, requires = "length")]
    pub vessel_type: Option<String>,

    /// Vessel length in metres used with --vessel-type
    #[arg(long, requires = "vessel_type")]
    pub length: Option<f64>,

    /// Output format [possible values: text, json]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
