//! Fixture-driven evaluation of mention comparators.
//!
//! Fixtures are TOML files holding a gold and a system annotation set over
//! the same text, and checks stating whether two of their mentions should
//! compare as identical. The harness runs the checks, classifies failures
//! against an expected failures list, and scores system root mentions
//! against gold with precision, recall and F1.
//!
//! ## Modules
//!
//! - [`fixture`] - Fixture data structures and graph construction
//! - [`loader`] - Fixture file loading
//! - [`matcher`] - Check execution and outcomes
//! - [`runner`] - Fixture runs and scoring
//! - [`failures`] - Expected failures tracking via TOML
//! - [`formatter`] - Failure reports and summaries
//! - [`errors`] - Error types for the harness

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod matcher;
pub mod runner;

pub use errors::{EvalError, EvalResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{
    build_graph, Check, CheckComparator, ComplexSlotEntry, EvalFixture, Expectation,
    MentionEntry, Side, SideGraph, SlotEntry,
};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, parse_fixture, EXPECTED_FAILURES_FILE};
pub use matcher::{compare_pair, format_ref, CheckOutcome, CheckResult, MatchResult};
pub use runner::{evaluate, evaluate_fixture, run_checks, run_fixture, Evaluation, FixtureRun};

#[cfg(test)]
mod tests;
