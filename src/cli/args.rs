//! Command-line arguments for the `tally` binary.
//!
//! Declared with `clap`'s derive API.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ColorMode;

#[derive(Debug, Parser)]
#[command(
    name = "tally",
    version,
    about = "Runs tally's self-check suite and reports the results."
)]
pub struct TallyArgs {
    /// Run a second, shuffled pass after a fully passing sequential pass.
    #[arg(long)]
    pub random: bool,

    /// Seed for the shuffled pass.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write the plain-text results to the artifact file.
    #[arg(long)]
    pub save_artifact: bool,

    /// Path of the plain-text artifact.
    #[arg(long, value_name = "PATH", default_value = crate::sink::DEFAULT_ARTIFACT)]
    pub artifact: PathBuf,

    /// Also write the results as an HTML page.
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// When to color terminal output.
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Name prefix identifying test operations (repeatable).
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefixes: Vec<String>,

    /// YAML file with run options; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
