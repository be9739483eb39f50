//! Runs fixture checks and scores system output against gold.

use std::fmt;

use mention_nlp::{
    IdenticalClassMentionComparator, MaxDepth, MentionGraph, MentionId, SpanComparator, MATCH,
};
use tracing::debug;

use crate::errors::EvalResult;
use crate::fixture::{build_graph, EvalFixture, Side, SideGraph};
use crate::matcher::{compare_pair, CheckOutcome, CheckResult, MatchResult};

/// Both annotation graphs of a fixture and the outcome of its checks.
#[derive(Debug, Clone)]
pub struct FixtureRun {
    pub gold: SideGraph,
    pub system: SideGraph,
    pub matches: MatchResult,
}

/// Build both graphs of a fixture and run its checks.
pub fn run_fixture(fixture: &EvalFixture) -> EvalResult<FixtureRun> {
    let gold = build_graph(Side::Gold, &fixture.gold)?;
    let system = build_graph(Side::System, &fixture.system)?;
    let matches = run_checks(fixture, &gold, &system);
    Ok(FixtureRun {
        gold,
        system,
        matches,
    })
}

/// Run every check of `fixture` against already built graphs.
pub fn run_checks(fixture: &EvalFixture, gold: &SideGraph, system: &SideGraph) -> MatchResult {
    let mut results = MatchResult::new();
    for (index, check) in fixture.checks.iter().enumerate() {
        let outcome = match (gold.resolve(&check.gold), system.resolve(&check.system)) {
            (None, _) => CheckOutcome::NotFound {
                side: Side::Gold,
                reference: check.gold.clone(),
            },
            (_, None) => CheckOutcome::NotFound {
                side: Side::System,
                reference: check.system.clone(),
            },
            (Some(gold_mention), Some(system_mention)) => {
                let max_depth = fixture.max_depth_for(check);
                match compare_pair(
                    gold_mention,
                    system_mention,
                    check.comparator,
                    &fixture.config,
                    max_depth,
                ) {
                    Ok(result) => CheckOutcome::judge(result, check.expect),
                    Err(err) => err.into(),
                }
            }
        };
        debug!(
            index,
            gold = %check.gold,
            system = %check.system,
            passed = outcome.is_passed(),
            "check finished"
        );
        results.push(CheckResult {
            index,
            check: check.clone(),
            outcome,
        });
    }
    results
}

/// Counts from scoring system root mentions against gold root mentions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// (gold, system) pairs counted as true positives.
    pub matched: Vec<(MentionId, MentionId)>,
}

impl Evaluation {
    /// 0.0 when the system produced nothing.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// 0.0 when the gold standard is empty.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TP={} FP={} FN={} P={:.3} R={:.3} F1={:.3}",
            self.true_positives,
            self.false_positives,
            self.false_negatives,
            self.precision(),
            self.recall(),
            self.f1()
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Score the root class mentions of `system` against those of `gold`.
///
/// Gold roots are taken in insertion order; each claims the first unclaimed
/// system root the comparator judges identical, so a system mention counts
/// towards at most one gold mention.
pub fn evaluate(
    gold: &MentionGraph,
    system: &MentionGraph,
    comparator: &IdenticalClassMentionComparator,
    spans: &dyn SpanComparator,
    max_depth: MaxDepth,
) -> Evaluation {
    let gold_roots = gold.roots();
    let system_roots = system.roots();
    let mut claimed = vec![false; system_roots.len()];
    let mut evaluation = Evaluation::default();

    for gold_root in &gold_roots {
        let found = system_roots.iter().enumerate().position(|(idx, system_root)| {
            !claimed[idx] && comparator.compare(*gold_root, *system_root, spans, max_depth) == MATCH
        });
        match found {
            Some(idx) => {
                claimed[idx] = true;
                evaluation
                    .matched
                    .push((gold_root.id(), system_roots[idx].id()));
            }
            None => debug!(mention = gold_root.name(), "gold mention not found in system output"),
        }
    }

    evaluation.true_positives = evaluation.matched.len();
    evaluation.false_negatives = gold_roots.len() - evaluation.true_positives;
    evaluation.false_positives = system_roots.len() - evaluation.true_positives;
    evaluation
}

/// Score a fixture's system side using its own comparison settings.
pub fn evaluate_fixture(fixture: &EvalFixture) -> EvalResult<Evaluation> {
    let gold = build_graph(Side::Gold, &fixture.gold)?;
    let system = build_graph(Side::System, &fixture.system)?;
    let config = &fixture.config;
    Ok(evaluate(
        &gold.graph,
        &system.graph,
        &IdenticalClassMentionComparator::with_options(config.options()),
        config.span_comparator(),
        config.max_depth,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_fixture;
    use mention_nlp::{CompareConfig, Span, StrictSpanComparator};

    fn proteins(names: &[(&str, usize)]) -> MentionGraph {
        let mut graph = MentionGraph::new();
        for (name, start) in names {
            graph
                .add_class(*name, vec![Span::new(*start, start + 4)])
                .unwrap();
        }
        graph
    }

    #[test]
    fn test_evaluate_counts() {
        let gold = proteins(&[("protein", 0), ("protein", 10), ("gene", 20)]);
        let system = proteins(&[("Protein", 0), ("gene", 21), ("gene", 30)]);

        let evaluation = evaluate(
            &gold,
            &system,
            &IdenticalClassMentionComparator::new(),
            &StrictSpanComparator,
            MaxDepth::Unbounded,
        );
        assert_eq!(evaluation.true_positives, 1);
        assert_eq!(evaluation.false_positives, 2);
        assert_eq!(evaluation.false_negatives, 2);
        assert!((evaluation.precision() - 1.0 / 3.0).abs() < 1e-9);
        assert!((evaluation.f1() - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_system_mention_counts_once() {
        let gold = proteins(&[("protein", 0), ("protein", 0)]);
        let system = proteins(&[("protein", 0)]);

        let evaluation = evaluate(
            &gold,
            &system,
            &IdenticalClassMentionComparator::new(),
            &StrictSpanComparator,
            MaxDepth::Unbounded,
        );
        assert_eq!(evaluation.true_positives, 1);
        assert_eq!(evaluation.false_negatives, 1);
        assert_eq!(evaluation.false_positives, 0);
        assert_eq!(evaluation.to_string(), "TP=1 FP=0 FN=1 P=1.000 R=0.500 F1=0.667");
    }

    #[test]
    fn test_empty_sides_score_zero() {
        let evaluation = evaluate(
            &MentionGraph::new(),
            &MentionGraph::new(),
            &IdenticalClassMentionComparator::new(),
            &StrictSpanComparator,
            MaxDepth::Unbounded,
        );
        assert_eq!(evaluation, Evaluation::default());
        assert_eq!(evaluation.f1(), 0.0);
    }

    #[test]
    fn test_run_fixture_reports_missing_references() {
        let fixture = parse_fixture(
            r#"
[[gold]]
id = "p"
class = "protein"
spans = [[0, 5]]

[[system]]
id = "p"
class = "protein"
spans = [[0, 5]]

[[check]]
gold = "p"
system = "p"
expect = "match"

[[check]]
gold = "p"
system = "q"
expect = "match"

[[check]]
gold = "p/location"
system = "p"
expect = "mismatch"
"#,
        )
        .unwrap();

        let run = run_fixture(&fixture).unwrap();
        assert_eq!(run.matches.passed.len(), 1);
        let outcomes: Vec<_> = run.matches.failed.iter().map(|r| &r.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                &CheckOutcome::NotFound {
                    side: Side::System,
                    reference: "q".to_string(),
                },
                &CheckOutcome::NotFound {
                    side: Side::Gold,
                    reference: "p/location".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_check_depth_overrides_config() {
        let mut fixture = parse_fixture(
            r#"
[config]
max_depth = 0

[[gold]]
id = "t"
class = "transport"
spans = [[6, 11]]
complex_slots = [{ name = "origin", fillers = ["n"] }]

[[gold]]
id = "n"
class = "nucleus"
spans = [[21, 28]]

[[system]]
id = "t"
class = "transport"
spans = [[6, 11]]
complex_slots = [{ name = "origin", fillers = ["n"] }]

[[system]]
id = "n"
class = "nucleus"
spans = [[17, 28]]

[[check]]
gold = "t"
system = "t"
expect = "match"

[[check]]
gold = "t"
system = "t"
max_depth = -1
expect = "mismatch"
"#,
        )
        .unwrap();

        assert!(run_fixture(&fixture).unwrap().matches.is_success());

        fixture.config = CompareConfig::default();
        let evaluation = evaluate_fixture(&fixture).unwrap();
        assert_eq!(evaluation.true_positives, 0);
        assert_eq!(evaluation.false_negatives, 1);
    }
}
