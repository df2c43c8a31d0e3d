//! Fatal errors raised by a suite run.
//!
//! Ordinary test failures are not errors; they are recorded as outcomes.
//! Everything here aborts the run and propagates to the caller of
//! [`Suite::run`](crate::Suite::run).

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SuiteError {
    #[error("Configuration error: initialization was bypassed, no test operations were discovered")]
    #[diagnostic(
        code(tally::configuration),
        help("construct suites with `Suite::new`/`Suite::with_config`, or call `discover` before `run`")
    )]
    Configuration,

    #[error("Empty suite: no test operations discovered in `{suite}` (prefixes: {prefixes})")]
    #[diagnostic(
        code(tally::empty_suite),
        help("name at least one test operation with a configured prefix")
    )]
    EmptySuite { suite: String, prefixes: String },

    #[error("Invalid result: test operation `{operation}` returned {value}")]
    #[diagnostic(
        code(tally::invalid_result),
        help("test operations must return true/false, Pass/Fail, or 1/0")
    )]
    InvalidResult { operation: String, value: String },

    #[error("Failed to write `{}`", .path.display())]
    #[diagnostic(code(tally::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read configuration `{}`: {}", .path.display(), .message)]
    #[diagnostic(code(tally::config))]
    Config { path: PathBuf, message: String },
}

impl SuiteError {
    /// Short, stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SuiteError::Configuration => "ConfigurationError",
            SuiteError::EmptySuite { .. } => "EmptySuiteError",
            SuiteError::InvalidResult { .. } => "InvalidResultError",
            SuiteError::Io { .. } => "IoError",
            SuiteError::Config { .. } => "ConfigError",
        }
    }
}
