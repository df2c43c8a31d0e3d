//! The framework's own suite: tally checking tally.
//!
//! Each operation builds a small inner suite and asserts how its run ends.
//! Inner reports go to a discarding writer; only the outer run reaches the
//! terminal.

use std::io;

use crate::config::{ColorMode, SuiteConfig};
use crate::errors::SuiteError;
use crate::sink::{Sink, Style};
use crate::suite::{Member, Members, Suite, Verdict};
use crate::test_suite;

/// Fixture for the self-check suite.
#[derive(Debug, Default)]
pub struct SelfCheck;

fn inner_config() -> SuiteConfig {
    SuiteConfig::default().with_color(ColorMode::Never)
}

/// A fixture that declares no test operations at all.
struct Bare;

impl Members for Bare {
    fn members() -> Vec<Member<Self>> {
        vec![Member::new("helper", |_: &mut Bare| true)]
    }
}

struct Mixed;

test_suite! {
    impl Mixed {
        /// Always passes.
        fn test_passes(&mut self) -> bool {
            true
        }

        /// Always fails.
        fn test_fails(&mut self) -> Verdict {
            Verdict::Fail
        }
    }
}

test_suite! {
    impl SelfCheck {
        /// Tests must be implemented in order to run.
        fn test_no_functions(&mut self) -> bool {
            let mut uut = Suite::with_config(Bare, inner_config());
            matches!(uut.run_to(io::sink()), Err(SuiteError::EmptySuite { .. }))
        }

        /// Skipping discovery at construction is rejected.
        fn test_override_ctor(&mut self) -> bool {
            let mut uut = Suite::<Mixed>::deferred(Mixed, inner_config(), Sink::new());
            matches!(uut.run_to(io::sink()), Err(SuiteError::Configuration))
        }

        /// Test functions must return true or false.
        fn test_invalid_return_value(&mut self) -> bool {
            let members = vec![Member::new("test_invalid_return", |_: &mut Bare| 3u8)];
            let mut uut = Suite::from_members(Bare, inner_config(), Sink::new(), members);
            matches!(
                uut.run_to(io::sink()),
                Err(SuiteError::InvalidResult { ref operation, .. }) if operation == "test_invalid_return"
            )
        }

        /// A failing test is recorded, not raised.
        fn test_failure_is_an_outcome(&mut self) -> bool {
            let mut uut = Suite::with_config(Mixed, inner_config());
            let returned_false = matches!(uut.run_to(io::sink()), Ok(false));
            let text = uut.sink().render_text();
            returned_false && text.contains("1 OF 2 (50.00%) TESTS PASSED")
        }

        /// The random pass waits for a green sequential pass.
        fn test_random_pass_requires_sequential_success(&mut self) -> bool {
            let mut uut = Suite::with_config(Mixed, inner_config().randomized(true));
            let returned_false = matches!(uut.run_to(io::sink()), Ok(false));
            let warned = uut
                .sink()
                .lines()
                .iter()
                .any(|l| l.style() == Style::Warning && l.text().contains("SEQUENTIAL ORDER FIRST"));
            let skipped = uut.last_report().is_some_and(|r| r.random.is_none());
            returned_false && warned && skipped
        }

        /// Only members with a configured prefix are discovered.
        fn test_custom_prefix(&mut self) -> bool {
            let uut = Suite::with_config(Mixed, inner_config().with_prefixes(["test_pa"]));
            uut.operation_names() == ["test_passes"]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_check_passes() {
        let mut suite = Suite::with_config(SelfCheck, inner_config().randomized(true).with_seed(3));
        assert_eq!(suite.operation_names().len(), 6);
        assert!(suite.run().unwrap());
        let text = suite.sink().render_text();
        assert!(text.contains("6 OF 6 (100.00%) TESTS PASSED"));
        assert!(text.contains("RANDOM ORDER TEST RUN"));
    }
}
