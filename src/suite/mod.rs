//! The suite runner.
//!
//! A [`Suite`] pairs a fixture with the test operations discovered on it.
//! Discovery happens once, when the suite is constructed: the fixture's
//! members are filtered by the configured name prefixes and the survivors
//! become the operation list, in declaration order. [`Suite::run`] executes
//! that list sequentially and, when configured, a second time in shuffled
//! order once the sequential pass is fully green.

mod member;
mod outcome;

pub use member::{IntoVerdict, Member, Members, Verdict};
pub use outcome::{Outcome, RunResult};

use std::io;
use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info};

use crate::config::SuiteConfig;
use crate::errors::SuiteError;
use crate::sink::{Sink, Style};

// Seedable PRNG so a shuffled pass can be replayed.
type ShuffleRng = Xoshiro256StarStar;

/// Path reported when writing the terminal report fails.
const STDOUT_PATH: &str = "<stdout>";

const SEQUENTIAL_ORDER_FIRST: &str = "[~] TESTS MUST PASS IN SEQUENTIAL ORDER FIRST";

/// Which pass of a run is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Sequential,
    Random,
}

impl PassKind {
    fn header(self) -> &'static str {
        match self {
            PassKind::Sequential => "[~] SEQUENTIAL ORDER TEST RUN",
            PassKind::Random => "[~] RANDOM ORDER TEST RUN",
        }
    }
}

/// Results of both passes of the most recent run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub sequential: RunResult,
    pub random: Option<RunResult>,
}

impl RunReport {
    /// Outcome of the last pass that executed.
    pub fn success(&self) -> bool {
        match &self.random {
            Some(random) => random.all_passed(),
            None => self.sequential.all_passed(),
        }
    }
}

pub struct Suite<S> {
    fixture: S,
    config: SuiteConfig,
    sink: Sink,
    operations: Option<Vec<Member<S>>>,
    last_report: Option<RunReport>,
}

impl<S: Members> Suite<S> {
    /// Builds a suite with default options and discovers its operations.
    pub fn new(fixture: S) -> Self {
        Self::with_config(fixture, SuiteConfig::default())
    }

    pub fn with_config(fixture: S, config: SuiteConfig) -> Self {
        Self::with_sink(fixture, config, Sink::new())
    }

    /// Builds a suite that writes into an injected sink.
    pub fn with_sink(fixture: S, config: SuiteConfig, sink: Sink) -> Self {
        let mut suite = Self::deferred(fixture, config, sink);
        suite.discover();
        suite
    }

    /// Runs discovery on a suite created with [`Suite::deferred`].
    ///
    /// Discovery happens at most once; later calls leave the operation list
    /// untouched.
    pub fn discover(&mut self) {
        if self.operations.is_some() {
            debug!(suite = suite_name::<S>(), "discovery already ran");
            return;
        }
        self.install(S::members());
    }
}

impl<S> Suite<S> {
    /// Builds a suite from an explicit member list instead of [`Members`].
    /// The list is still filtered by the configured prefixes.
    pub fn from_members(fixture: S, config: SuiteConfig, sink: Sink, members: Vec<Member<S>>) -> Self {
        let mut suite = Self::deferred(fixture, config, sink);
        suite.install(members);
        suite
    }

    /// Creates a suite without running discovery.
    ///
    /// [`run`](Suite::run) rejects such a suite with
    /// [`SuiteError::Configuration`] until discovery has been performed.
    pub fn deferred(fixture: S, config: SuiteConfig, sink: Sink) -> Self {
        Self {
            fixture,
            config,
            sink,
            operations: None,
            last_report: None,
        }
    }

    fn install(&mut self, members: Vec<Member<S>>) {
        let candidates = members.len();
        let operations: Vec<Member<S>> = members
            .into_iter()
            .filter(|m| self.config.matches(m.name()))
            .collect();
        debug!(
            suite = suite_name::<S>(),
            candidates,
            discovered = operations.len(),
            "discovered test operations"
        );
        self.operations = Some(operations);
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn into_sink(self) -> Sink {
        self.sink
    }

    pub fn fixture(&self) -> &S {
        &self.fixture
    }

    pub fn fixture_mut(&mut self) -> &mut S {
        &mut self.fixture
    }

    /// Names of the discovered operations in discovery order. Empty when
    /// discovery has not run.
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations
            .iter()
            .flatten()
            .map(Member::name)
            .collect()
    }

    pub fn is_discovered(&self) -> bool {
        self.operations.is_some()
    }

    /// Results of the most recent completed run.
    pub fn last_report(&self) -> Option<&RunReport> {
        self.last_report.as_ref()
    }

    /// Runs the suite and returns whether the last executed pass was fully
    /// passing.
    ///
    /// The sink is printed to stdout at the end of every completed run, and
    /// saved as text when `persist_artifact` is set.
    pub fn run(&mut self) -> Result<bool, SuiteError> {
        self.run_to(io::stdout())
    }

    /// Like [`run`](Suite::run), but writes the terminal report to `terminal`.
    pub fn run_to<W: io::Write>(&mut self, terminal: W) -> Result<bool, SuiteError> {
        let Some(operations) = self.operations.as_ref() else {
            return Err(SuiteError::Configuration);
        };
        if operations.is_empty() {
            return Err(SuiteError::EmptySuite {
                suite: suite_name::<S>().to_string(),
                prefixes: self.config.prefixes.join(", "),
            });
        }

        let mut order: Vec<usize> = (0..operations.len()).collect();

        info!(suite = suite_name::<S>(), operations = order.len(), "sequential pass");
        let sequential = execute(&mut self.fixture, operations, &order)?;
        log_results(&mut self.sink, PassKind::Sequential, &sequential);

        let mut report = RunReport {
            sequential,
            random: None,
        };

        if self.config.randomize {
            if report.sequential.all_passed() {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                info!(suite = suite_name::<S>(), seed, "random pass");
                let mut rng = ShuffleRng::seed_from_u64(seed);
                order.shuffle(&mut rng);
                let random = execute(&mut self.fixture, operations, &order)?;
                log_results(&mut self.sink, PassKind::Random, &random);
                report.random = Some(random);
            } else {
                info!(
                    suite = suite_name::<S>(),
                    "sequential pass failed, skipping random pass"
                );
                self.sink.write(SEQUENTIAL_ORDER_FIRST, Style::Warning);
            }
        }

        let success = report.success();
        self.last_report = Some(report);

        self.sink
            .write_terminal(terminal, self.config.color.use_color())
            .map_err(|source| SuiteError::Io {
                path: PathBuf::from(STDOUT_PATH),
                source,
            })?;
        if self.config.persist_artifact {
            let path = self.sink.artifact_path().to_path_buf();
            self.sink
                .save_text(&path)
                .map_err(|source| SuiteError::Io { path, source })?;
        }

        Ok(success)
    }
}

impl<S> std::fmt::Debug for Suite<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Suite")
            .field("suite", &suite_name::<S>())
            .field("config", &self.config)
            .field("operations", &self.operations)
            .finish_non_exhaustive()
    }
}

/// Invokes `operations` in `order`, stopping at the first out-of-domain result.
fn execute<S>(
    fixture: &mut S,
    operations: &[Member<S>],
    order: &[usize],
) -> Result<RunResult, SuiteError> {
    let mut outcomes = Vec::with_capacity(order.len());
    for &index in order {
        let operation = &operations[index];
        let verdict = operation
            .invoke(fixture)
            .map_err(|value| SuiteError::InvalidResult {
                operation: operation.name().to_string(),
                value,
            })?;
        debug!(operation = operation.name(), passed = verdict.passed());
        outcomes.push(Outcome {
            description: operation.description().to_string(),
            passed: verdict.passed(),
        });
    }
    Ok(RunResult::new(outcomes))
}

fn log_results(sink: &mut Sink, pass: PassKind, results: &RunResult) {
    sink.plain("");
    sink.plain(pass.header());
    sink.plain("");
    for outcome in results.outcomes() {
        if outcome.passed {
            sink.success(format!("PASS\t{}", outcome.description));
        } else {
            sink.error(format!("FAIL\t{}", outcome.description));
        }
    }
    sink.plain("");
    sink.plain(results.summary());
    sink.plain("");
}

/// Unqualified type name of the fixture, for messages.
fn suite_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
