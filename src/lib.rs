//! tally: a small self-hosted test runner.
//!
//! Suite authors declare a fixture and its test operations with
//! [`test_suite!`]; [`Suite`] discovers the operations by name prefix when it
//! is constructed, runs them, and reports colored results through a
//! [`Sink`] that renders to the terminal, plain text, or HTML.

pub use crate::config::{ColorMode, SuiteConfig};
pub use crate::errors::SuiteError;
pub use crate::sink::{Sink, Style, StyledLine};
pub use crate::suite::{IntoVerdict, Member, Members, Outcome, PassKind, RunReport, RunResult, Suite, Verdict};

pub mod cli;
pub mod config;
pub mod errors;
pub mod selfcheck;
pub mod sink;
pub mod suite;
