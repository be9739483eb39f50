//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[known]]
//! fixture = "slot-values.toml"
//! check = "C2"
//! reason = "loose slot matching lets one system value serve two gold values"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};
use crate::matcher::MatchResult;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known limitations of the comparators.
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Failures awaiting a fix.
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Check reference, see [`format_ref`](crate::matcher::format_ref).
    pub check: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    #[serde(default)]
    pub issue: Option<String>,
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    Known,
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no failures are expected.
    pub fn load(path: &Path) -> EvalResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| EvalError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn classify(&self, fixture: &str, check_ref: &str) -> FailureState {
        let listed = |entries: &[FailureEntry]| {
            entries
                .iter()
                .any(|e| e.fixture == fixture && e.check == check_ref)
        };
        if listed(self.known.as_slice()) {
            FailureState::Known
        } else if listed(self.pending.as_slice()) {
            FailureState::Pending
        } else {
            FailureState::Regression
        }
    }

    pub fn get_entry(&self, fixture: &str, check_ref: &str) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.fixture == fixture && e.check == check_ref)
    }

    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }
}

/// Totals over every fixture a harness run checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    pub total: usize,
    pub passed: usize,
    /// Known and pending failures.
    pub expected_failures: usize,
    pub regressions: usize,
    /// Listed failures whose check now passes.
    pub unexpected_passes: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 when any regression was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => self.expected_failures += 1,
            FailureState::Regression => self.regressions += 1,
        }
    }

    /// Record every check of one fixture run.
    pub fn record_fixture(
        &mut self,
        fixture: &str,
        matches: &MatchResult,
        expected: &ExpectedFailures,
    ) {
        for passed in &matches.passed {
            if expected.get_entry(fixture, &passed.check_ref()).is_some() {
                self.unexpected_passes += 1;
            }
            self.record_pass();
        }
        for failed in &matches.failed {
            self.record_failure(expected.classify(fixture, &failed.check_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{Check, CheckComparator, Expectation};
    use crate::matcher::{CheckOutcome, CheckResult};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(fixture: &str, check: &str) -> FailureEntry {
        FailureEntry {
            fixture: fixture.to_string(),
            check: check.to_string(),
            reason: None,
            added: None,
            issue: None,
        }
    }

    fn result(index: usize, outcome: CheckOutcome) -> CheckResult {
        CheckResult {
            index,
            check: Check {
                gold: "g".to_string(),
                system: "s".to_string(),
                max_depth: None,
                comparator: CheckComparator::Typed,
                expect: Expectation::Match,
            },
            outcome,
        }
    }

    #[test]
    fn test_classify() {
        let failures = ExpectedFailures {
            known: vec![entry("a.toml", "C0")],
            pending: vec![entry("a.toml", "C1")],
        };
        assert_eq!(failures.classify("a.toml", "C0"), FailureState::Known);
        assert_eq!(failures.classify("a.toml", "C1"), FailureState::Pending);
        assert_eq!(failures.classify("b.toml", "C0"), FailureState::Regression);
        assert_eq!(failures.count(), 2);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[pending]]\nfixture = \"depth.toml\"\ncheck = \"C3\"\nissue = \"#12\""
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.classify("depth.toml", "C3"), FailureState::Pending);
        let entry = failures.get_entry("depth.toml", "C3").unwrap();
        assert_eq!(entry.issue.as_deref(), Some("#12"));
    }

    #[test]
    fn test_load_missing_file() {
        let failures = ExpectedFailures::load(Path::new("/nonexistent/failures.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_record_fixture() {
        let expected = ExpectedFailures {
            known: vec![entry("a.toml", "C1"), entry("a.toml", "C0")],
            pending: Vec::new(),
        };
        let mut matches = MatchResult::new();
        matches.push(result(0, CheckOutcome::Passed));
        matches.push(result(1, CheckOutcome::Failed { result: 0 }));
        matches.push(result(2, CheckOutcome::Failed { result: -3 }));

        let mut harness = HarnessResult::new();
        harness.record_fixture("a.toml", &matches, &expected);
        assert_eq!(
            harness,
            HarnessResult {
                total: 3,
                passed: 1,
                expected_failures: 1,
                regressions: 1,
                unexpected_passes: 1,
            }
        );
        assert_eq!(harness.exit_code(), 1);
    }
}
