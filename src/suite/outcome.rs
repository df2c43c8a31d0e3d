use std::fmt;

/// Recorded result of one executed test operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub description: String,
    pub passed: bool,
}

/// Aggregate over the outcomes of one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    outcomes: Vec<Outcome>,
}

impl RunResult {
    pub fn new(outcomes: Vec<Outcome>) -> Self {
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Percentage of passing outcomes, `None` for an empty result.
    pub fn percent(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.passed() as f64 / total as f64 * 100.0),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// `<passed> OF <total> (<percent>%) TESTS PASSED`
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OF {} (", self.passed(), self.total())?;
        match self.percent() {
            Some(percent) => write!(f, "{:.2}%", percent)?,
            None => f.write_str("n/a")?,
        }
        f.write_str(") TESTS PASSED")
    }
}
