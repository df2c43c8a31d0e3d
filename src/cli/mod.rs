//! The tally command-line interface.
//!
//! Runs the self-check suite with options from a YAML file and flags, and
//! maps the result to the process exit status: 0 when every test passed,
//! 1 when some test failed, 2 on a fatal error.

use std::process;

use clap::Parser;
use tracing::{debug, error};

use crate::cli::args::TallyArgs;
use crate::config::SuiteConfig;
use crate::errors::SuiteError;
use crate::selfcheck::SelfCheck;
use crate::sink::Sink;
use crate::suite::Suite;

pub mod args;

pub const EXIT_FAILED: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

/// The main entry point for the CLI.
pub fn run() {
    let args = TallyArgs::parse();

    match execute(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_FAILED),
        Err(e) => {
            error!(kind = e.kind(), "run aborted");
            eprintln!("{:?}", miette::Report::new(e));
            process::exit(EXIT_FATAL);
        }
    }
}

/// Merges the configuration file (if any) with command-line flags.
pub fn resolve_config(args: &TallyArgs) -> Result<SuiteConfig, SuiteError> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::load(path)?,
        None => SuiteConfig::default(),
    };
    if args.random {
        config.randomize = true;
    }
    if args.save_artifact {
        config.persist_artifact = true;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(color) = args.color {
        config.color = color;
    }
    if !args.prefixes.is_empty() {
        config.prefixes = args.prefixes.clone();
    }
    Ok(config)
}

fn execute(args: &TallyArgs) -> Result<bool, SuiteError> {
    let config = resolve_config(args)?;
    debug!(?config, "resolved configuration");

    let sink = Sink::with_artifact_path(&args.artifact);
    let mut suite = Suite::with_sink(SelfCheck, config, sink);
    let passed = suite.run()?;

    if let Some(path) = &args.html {
        suite.sink().save_html(path).map_err(|source| SuiteError::Io {
            path: path.clone(),
            source,
        })?;
    }
    Ok(passed)
}
