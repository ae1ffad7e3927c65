// Report flush integration tests

use webtestkit::report::{ReportPaths, RunReport, ScenarioReport, StepReport};

#[test]
fn flush_writes_a_self_contained_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::new(dir.path());

    let mut report = RunReport::new("TA Report", "main_7", Some("ci".into()));
    let mut scenario = ScenarioReport::new("Health endpoint responds", vec!["API".into()]);
    scenario
        .steps
        .push(StepReport::passed("When ", "I send GET request to endpoint \"/health\"", 15));
    scenario
        .steps
        .push(StepReport::passed("Then ", "I receive response with status code 200", 2));
    report.feature_mut("Service health").scenarios.push(scenario);
    report.finish();

    let index = paths.flush(&report).unwrap();
    assert!(index.exists());
    assert!(paths.root().join("screenshots").is_dir());
    assert!(paths.root().join("logs").is_dir());

    let html = std::fs::read_to_string(index).unwrap();
    assert!(html.contains("TA Report"));
    assert!(html.contains("Health endpoint responds"));
    assert!(html.contains("1 passed"));
    assert!(html.contains("0 failed"));
}

#[test]
fn flush_records_failures_with_their_message() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::new(dir.path());

    let mut report = RunReport::new("TA Report", "local", None);
    let mut scenario = ScenarioReport::new("Health endpoint responds", vec!["API".into()]);
    scenario.steps.push(StepReport::failed(
        "Then ",
        "I receive response with status code 200",
        4,
        "assertion `left == right` failed\n  left: 404\n right: 200",
    ));
    report.feature_mut("Service health").scenarios.push(scenario);
    report.finish();

    let html = std::fs::read_to_string(paths.flush(&report).unwrap()).unwrap();
    assert!(html.contains("1 failed"));
    assert!(html.contains("assertion `left == right` failed"));
}

#[test]
fn flushing_twice_overwrites_the_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ReportPaths::new(dir.path());

    let mut report = RunReport::new("first pass", "local", None);
    report.finish();
    paths.flush(&report).unwrap();

    let mut report = RunReport::new("second pass", "local", None);
    report.finish();
    let html = std::fs::read_to_string(paths.flush(&report).unwrap()).unwrap();
    assert!(html.contains("second pass"));
    assert!(!html.contains("first pass"));
}
