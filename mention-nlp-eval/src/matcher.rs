//! Check execution and outcomes.

use mention_nlp::{
    CompareConfig, CompareError, CompareResult, IdenticalClassMentionComparator,
    IdenticalComplexSlotMentionComparator, IdenticalMentionComparator,
    IdenticalSlotMentionComparator, MaxDepth, MentionKind, MentionRef, MATCH,
};

use crate::fixture::{Check, CheckComparator, Expectation, Side};

/// Result of running every check of a fixture.
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub passed: Vec<CheckResult>,
    pub failed: Vec<CheckResult>,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: CheckResult) {
        if result.outcome.is_passed() {
            self.passed.push(result);
        } else {
            self.failed.push(result);
        }
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Position of the check in its fixture.
    pub index: usize,
    pub check: Check,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// Reference used by the expected failures file (e.g. "C2").
    pub fn check_ref(&self) -> String {
        format_ref(self.index)
    }
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    /// The comparator disagreed with the expectation; `result` is what it
    /// returned.
    Failed { result: i32 },
    NotFound { side: Side, reference: String },
    TypeMismatch {
        expected: MentionKind,
        found: MentionKind,
    },
}

impl CheckOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed)
    }

    /// Judge a comparator result against an expectation.
    pub fn judge(result: i32, expect: Expectation) -> Self {
        match (expect, result == MATCH) {
            (Expectation::Match, true) | (Expectation::Mismatch, false) => CheckOutcome::Passed,
            _ => CheckOutcome::Failed { result },
        }
    }
}

impl From<CompareError> for CheckOutcome {
    fn from(err: CompareError) -> Self {
        match err {
            CompareError::TypeMismatch { expected, found } => {
                CheckOutcome::TypeMismatch { expected, found }
            }
        }
    }
}

/// Format a check reference from its position in the fixture.
pub fn format_ref(index: usize) -> String {
    format!("C{}", index)
}

/// Compare a gold mention with a system mention.
///
/// [`CheckComparator::Typed`] picks the typed comparator for the kind of the
/// gold mention, starting at depth 0; a system mention of another kind is a
/// type mismatch.
pub fn compare_pair(
    gold: MentionRef<'_>,
    system: MentionRef<'_>,
    comparator: CheckComparator,
    config: &CompareConfig,
    max_depth: MaxDepth,
) -> CompareResult<i32> {
    let options = config.options();
    let spans = config.span_comparator();
    match comparator {
        CheckComparator::Walk => Ok(IdenticalMentionComparator::with_options(options)
            .compare_with(gold, system, spans, max_depth)),
        CheckComparator::Typed => match gold.kind() {
            MentionKind::Class => IdenticalClassMentionComparator::with_options(options)
                .compare_mentions(gold, system, spans, max_depth, 0),
            MentionKind::Slot => IdenticalSlotMentionComparator::with_options(options)
                .compare_mentions(gold, system, spans, max_depth, 0),
            MentionKind::ComplexSlot => IdenticalComplexSlotMentionComparator::with_options(options)
                .compare_mentions(gold, system, spans, max_depth, 0),
        },
    }
}
