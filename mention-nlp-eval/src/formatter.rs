//! Human-readable reports for failed checks.

use std::fmt;

use mention_nlp::{AnnotatedText, MentionRef, SlotMatching, MATCH};

use crate::fixture::{CheckComparator, EvalFixture, Expectation};
use crate::matcher::{CheckOutcome, CheckResult};
use crate::runner::FixtureRun;

/// Format a failed check with the mentions involved.
///
/// When the fixture carries its document text, both mentions are drawn
/// under it together with the fillers of their complex slots.
pub fn format_failure(
    fixture_name: &str,
    fixture: &EvalFixture,
    run: &FixtureRun,
    result: &CheckResult,
) -> String {
    FailureReport {
        fixture_name,
        fixture,
        run,
        result,
    }
    .to_string()
}

/// Format a summary of one fixture's results.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };
    format!(
        "\n{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status, fixture_name, passed, failed, expected_failures, regressions
    )
}

struct FailureReport<'a> {
    fixture_name: &'a str,
    fixture: &'a EvalFixture,
    run: &'a FixtureRun,
    result: &'a CheckResult,
}

impl fmt::Display for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = &self.result.check;
        writeln!(
            f,
            "\nFAIL: {}: {} (gold `{}` vs system `{}`)",
            self.fixture_name,
            self.result.check_ref(),
            check.gold,
            check.system
        )?;
        writeln!(f)?;

        let gold = self.run.gold.resolve(&check.gold);
        let system = self.run.system.resolve(&check.system);

        if let Some(text) = &self.fixture.text {
            for (label, mention) in [("gold", gold), ("system", system)] {
                if let Some(drawing) = mention.and_then(|m| annotate(text, m)) {
                    writeln!(f, "  {}:", label)?;
                    for line in drawing.lines() {
                        writeln!(f, "    {}", line)?;
                    }
                    writeln!(f)?;
                }
            }
        }

        match &self.result.outcome {
            CheckOutcome::Failed { result } => {
                let comparator = match check.comparator {
                    CheckComparator::Typed => "typed",
                    CheckComparator::Walk => "walk",
                };
                writeln!(
                    f,
                    "  expected {}, {} comparator returned {} (max_depth = {})",
                    check.expect,
                    comparator,
                    result,
                    i64::from(self.fixture.max_depth_for(check))
                )?;
                if let (Some(gold), Some(system)) = (gold, system) {
                    writeln!(f, "    gold:   {}", gold.single_line())?;
                    writeln!(f, "    system: {}", system.single_line())?;
                }
            }
            CheckOutcome::NotFound { side, reference } => {
                writeln!(f, "  {} mention `{}` not found", side, reference)?;
            }
            CheckOutcome::TypeMismatch { expected, found } => {
                writeln!(
                    f,
                    "  type mismatch: expected {} mention, found {}",
                    expected, found
                )?;
            }
            CheckOutcome::Passed => {
                writeln!(f, "  (passed)")?;
            }
        }

        if let Some(hint) = self.hint() {
            writeln!(f)?;
            writeln!(f, "  hint: {}", hint)?;
        }
        Ok(())
    }
}

impl FailureReport<'_> {
    fn hint(&self) -> Option<&'static str> {
        let check = &self.result.check;
        match &self.result.outcome {
            CheckOutcome::Failed { result: MATCH }
                if self.fixture.config.slot_matching == SlotMatching::Loose =>
            {
                Some("loose slot matching lets one value stand in for several - consider slot_matching = \"bijective\"")
            }
            CheckOutcome::Failed { .. }
                if check.expect == Expectation::Match
                    && check.comparator == CheckComparator::Walk =>
            {
                Some("the walk also fails on differing child order, the typed comparator does not")
            }
            CheckOutcome::NotFound { .. } => {
                Some("references are an entry id, or `id/slot` for a slot of that entry")
            }
            _ => None,
        }
    }
}

/// Draw a class mention and the fillers of its complex slots under `text`.
fn annotate(text: &str, mention: MentionRef<'_>) -> Option<String> {
    let class = mention.as_class()?;
    let mut annotated = AnnotatedText::new(text);
    annotated.include(class);
    for slot in class.complex_slots() {
        for filler in slot.fillers() {
            annotated.include(filler);
        }
    }
    Some(annotated.to_string())
}
