//! Runs the fixtures shipped with the crate.

use std::path::{Path, PathBuf};

use crate::{
    evaluate_fixture, format_failure, format_summary, load_all_fixtures, load_fixture,
    run_fixture, CheckOutcome, ExpectedFailures, FailureState, HarnessResult,
    EXPECTED_FAILURES_FILE,
};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

#[test]
fn fixtures_have_no_regressions() {
    let dir = fixtures_dir();
    let expected = ExpectedFailures::load(&dir.join(EXPECTED_FAILURES_FILE)).unwrap();
    let mut harness = HarnessResult::new();
    let mut report = String::new();

    for (name, fixture) in load_all_fixtures(&dir).unwrap() {
        let run = run_fixture(&fixture).unwrap();
        harness.record_fixture(&name, &run.matches, &expected);

        let mut expected_failures = 0;
        let mut regressions = 0;
        for failed in &run.matches.failed {
            match expected.classify(&name, &failed.check_ref()) {
                FailureState::Regression => {
                    regressions += 1;
                    report.push_str(&format_failure(&name, &fixture, &run, failed));
                }
                FailureState::Known | FailureState::Pending => expected_failures += 1,
            }
        }
        report.push_str(&format_summary(
            &name,
            run.matches.passed.len(),
            run.matches.failed.len(),
            expected_failures,
            regressions,
        ));
    }

    assert!(harness.success(), "{}", report);
    assert_eq!(harness.expected_failures, 1);
    assert_eq!(harness.unexpected_passes, 0);
    assert_eq!(harness.exit_code(), 0);
    assert!(harness.passed >= 18);
}

#[test]
fn known_failure_report() {
    let fixture = load_fixture(&fixtures_dir().join("slot-values.toml")).unwrap();
    let run = run_fixture(&fixture).unwrap();
    assert_eq!(run.matches.failed.len(), 1);

    let failed = &run.matches.failed[0];
    assert_eq!(failed.outcome, CheckOutcome::Failed { result: 0 });

    let output = format_failure("slot-values.toml", &fixture, &run, failed);
    insta::assert_snapshot!(output.trim(), @r###"
    FAIL: slot-values.toml: C2 (gold `lta` vs system `lta`)

      gold:
        TNF and LTA
                ╰─╯gene

      system:
        TNF and LTA
                ╰─╯gene

      expected mismatch, typed comparator returned 0 (max_depth = -1)
        gold:   gene [8..11] (synonyms = LTA, LTA)
        system: gene [8..11] (synonyms = LTA, TNFB)

      hint: loose slot matching lets one value stand in for several - consider slot_matching = "bijective"
    "###);
}

#[test]
fn bijective_matching_fixes_known_failure() {
    let mut fixture = load_fixture(&fixtures_dir().join("slot-values.toml")).unwrap();
    fixture.config.slot_matching = mention_nlp::SlotMatching::Bijective;
    let run = run_fixture(&fixture).unwrap();
    assert!(run.matches.is_success());
}

#[test]
fn fixture_scores() {
    let dir = fixtures_dir();
    let score = |name: &str| {
        evaluate_fixture(&load_fixture(&dir.join(name)).unwrap())
            .unwrap()
            .to_string()
    };

    assert_eq!(
        score("transport.toml"),
        "TP=1 FP=0 FN=0 P=1.000 R=1.000 F1=1.000"
    );
    assert_eq!(score("depth.toml"), "TP=0 FP=1 FN=1 P=0.000 R=0.000 F1=0.000");
    assert_eq!(
        score("overlap.toml"),
        "TP=1 FP=1 FN=0 P=0.500 R=1.000 F1=0.667"
    );
}
