//! Run options for a suite.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::SuiteError;

/// Prefix that marks a member as a test operation unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "test_";

/// When to emit ANSI colors on the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn use_color(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

/// Options recognized by [`Suite`](crate::Suite) construction and `run`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuiteConfig {
    /// Run a second, shuffled pass after a fully passing sequential pass.
    pub randomize: bool,
    /// Write the plain-text rendering to the sink's artifact path after the run.
    pub persist_artifact: bool,
    /// Member names starting with any of these are test operations.
    pub prefixes: Vec<String>,
    /// Seed for the shuffled pass; drawn from entropy when absent.
    pub seed: Option<u64>,
    pub color: ColorMode,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            randomize: false,
            persist_artifact: false,
            prefixes: vec![DEFAULT_PREFIX.to_string()],
            seed: None,
            color: ColorMode::Auto,
        }
    }
}

impl SuiteConfig {
    pub fn randomized(mut self, randomize: bool) -> Self {
        self.randomize = randomize;
        self
    }

    pub fn persisted(mut self, persist_artifact: bool) -> Self {
        self.persist_artifact = persist_artifact;
        self
    }

    pub fn with_prefixes<I, P>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// True if `name` starts with any configured prefix.
    pub fn matches(&self, name: &str) -> bool {
        self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, SuiteError> {
        let source = fs::read_to_string(path).map_err(|e| SuiteError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&source).map_err(|e| SuiteError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
