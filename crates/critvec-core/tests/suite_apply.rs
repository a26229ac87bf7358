//! Integration tests for suite files, carried-over state and vector application.

use critvec_core::fakes::RecordingTransport;
use critvec_core::{
    CriterionError, CriterionRegistry, EffectiveState, TestSuite, TestVectorFactory,
    VectorApplier, APPLY_COMMAND, SET_CRITERION_COMMAND,
};
use std::path::PathBuf;

fn write_fixtures(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let criteria = dir.path().join("criteria.txt");
    std::fs::write(
        &criteria,
        "ExclusiveCriterion Mood : mad sad glad\n\
         InclusiveCriterion Colors : red green blue\n\
         ExclusiveCriterion Power : low high\n",
    )
    .expect("write criteria");

    let suite = dir.path().join("suite.json");
    std::fs::write(
        &suite,
        r#"{
  "cases": [
    { "name": "reset" },
    { "name": "sad_red", "criteria": { "Mood": "sad", "Colors": "red" } },
    { "name": "high_power", "test_type": "boundary", "criteria": { "Power": "high" } }
  ]
}"#,
    )
    .expect("write suite");

    (criteria, suite)
}

/// Test: loading both files and generating every case
#[test]
fn test_suite_from_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (criteria, suite) = write_fixtures(&dir);

    let registry = CriterionRegistry::load(&criteria).expect("criteria load failed");
    let suite = TestSuite::load(&suite).expect("suite load failed");
    let vectors = suite
        .generate_all(&TestVectorFactory::new(&registry))
        .expect("generate failed");

    assert_eq!(vectors.len(), 3);
    assert_eq!(vectors[0].len(), 3);
    assert_eq!(vectors[1].len(), 2);
    assert_eq!(vectors[2].len(), 1);
    assert_eq!(vectors[2].test_type(), "boundary");
}

/// Test: incremental cases keep earlier values in the effective daemon state
#[test]
fn test_effective_state_across_suite() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (criteria, suite) = write_fixtures(&dir);

    let registry = CriterionRegistry::load(&criteria).expect("criteria load failed");
    let vectors = TestSuite::load(&suite)
        .expect("suite load failed")
        .generate_all(&TestVectorFactory::new(&registry))
        .expect("generate failed");

    let mut state = EffectiveState::new();
    for vector in &vectors {
        state.apply(vector);
    }

    assert_eq!(state.get("Mood"), Some(&["sad".to_string()][..]));
    assert_eq!(state.get("Colors"), Some(&["red".to_string()][..]));
    assert_eq!(state.get("Power"), Some(&["high".to_string()][..]));
}

/// Test: applying a suite sends one set command per criterion plus one apply per vector
#[tokio::test]
async fn test_apply_suite_command_stream() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (criteria, suite) = write_fixtures(&dir);

    let registry = CriterionRegistry::load(&criteria).expect("criteria load failed");
    let vectors = TestSuite::load(&suite)
        .expect("suite load failed")
        .generate_all(&TestVectorFactory::new(&registry))
        .expect("generate failed");

    let transport = RecordingTransport::new();
    let reports = VectorApplier::new(&transport)
        .apply_all(&vectors)
        .await
        .expect("apply failed");

    assert_eq!(reports.len(), 3);
    assert_eq!(
        reports.iter().map(|r| r.commands_sent).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );

    let sent = transport.sent();
    assert_eq!(sent.len(), 3 + 2 + 1 + 3);
    let applies = sent.iter().filter(|(c, _)| c == APPLY_COMMAND).count();
    assert_eq!(applies, 3);
    assert_eq!(sent[0].0, SET_CRITERION_COMMAND);
    assert_eq!(sent[0].1, vec!["Mood", "0"]);
}

/// Test: an invalid case aborts generation before any vector reaches the daemon
#[tokio::test]
async fn test_invalid_case_sends_nothing() {
    let registry = CriterionRegistry::from_text("ExclusiveCriterion Mood : mad sad glad")
        .expect("load failed");
    let suite = TestSuite::from_json(
        r#"{"cases":[{"name":"ok","criteria":{"Mood":"mad"}},{"name":"bad","criteria":{"Mood":"purple"}}]}"#,
    )
    .expect("suite parse failed");

    let transport = RecordingTransport::new();
    let outcome = generate_and_apply(&suite, &registry, &transport).await;

    let err = outcome.unwrap_err();
    assert!(matches!(&err, CriterionError::TestCase { case, .. } if case == "bad"));
    assert!(
        transport.sent().is_empty(),
        "No command should be sent when generation fails"
    );

    // The valid prefix of the same suite does reach the transport.
    let valid = TestSuite::new(suite.cases[..1].to_vec());
    let reports = generate_and_apply(&valid, &registry, &transport)
        .await
        .expect("valid suite should apply");
    assert_eq!(reports.len(), 1);
    assert_eq!(transport.sent().len(), 2);

    transport.clear();
    assert!(transport.sent().is_empty());
}

async fn generate_and_apply(
    suite: &TestSuite,
    registry: &CriterionRegistry,
    transport: &RecordingTransport,
) -> critvec_core::Result<Vec<critvec_core::ApplyReport>> {
    let vectors = suite.generate_all(&TestVectorFactory::new(registry))?;
    VectorApplier::new(transport).apply_all(&vectors).await
}
