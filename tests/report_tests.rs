use widget_replay::report::console::format_console_report;
use widget_replay::report::junit::{escape_xml, generate_junit_xml};
use widget_replay::report::report_model::SuiteReport;
use widget_replay::script::script_model::{LineOutcome, LineStatus, ScriptResult};

// =========================================================================
// Helpers
// =========================================================================

fn passing_result(name: &str) -> ScriptResult {
    ScriptResult {
        script_name: name.to_string(),
        passed: true,
        lines_run: 3,
        outcomes: vec![
            outcome(0, "buttonClick", LineStatus::Dispatched),
            outcome(1, "verify", LineStatus::Passed),
            outcome(2, "verify", LineStatus::Passed),
        ],
        error: None,
    }
}

fn failing_result(name: &str) -> ScriptResult {
    ScriptResult {
        script_name: name.to_string(),
        passed: false,
        lines_run: 2,
        outcomes: vec![
            outcome(0, "verify", LineStatus::Failed {
                expected: "Ready".into(),
                actual: "Busy".into(),
            }),
            outcome(1, "buttonClick", LineStatus::NotFound {
                error: "Failed to find the element at path 'n=MainWindow_0/n=ghost_0'".into(),
            }),
            outcome(2, "verify", LineStatus::Skipped),
        ],
        error: Some("element not found".into()),
    }
}

fn outcome(line_index: usize, call: &str, status: LineStatus) -> LineOutcome {
    LineOutcome {
        line_index,
        path: "n=MainWindow_0/n=widget_0".into(),
        call: call.to_string(),
        status,
    }
}

// =========================================================================
// Suite aggregation
// =========================================================================

#[test]
fn from_results_computes_counts() {
    let report = SuiteReport::from_results(
        "Nightly",
        vec![passing_result("a"), failing_result("b"), passing_result("c")],
    );

    assert_eq!(report.total, 3);
    assert_eq!(report.passed, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.all_passed());
}

#[test]
fn empty_suite_passes() {
    let report = SuiteReport::from_results("Empty", vec![]);
    assert!(report.all_passed());
    assert_eq!(report.total, 0);
}

// =========================================================================
// Console rendering
// =========================================================================

#[test]
fn console_report_shows_markers_and_failures() {
    let report = SuiteReport::from_results(
        "Smoke",
        vec![passing_result("combo flow"), failing_result("ghost flow")],
    )
    .with_duration(2345);

    let text = format_console_report(&report);
    println!("{}", text);

    assert!(text.contains("=== Script Suite: Smoke ==="));
    assert!(text.contains("\u{2713} PASS  combo flow"));
    assert!(text.contains("\u{2717} FAIL  ghost flow"));
    assert!(text.contains("[ERROR] element not found"));
    assert!(text.contains("expected 'Ready', actual 'Busy'"));
    assert!(text.contains("=== Results: 1 passed, 1 failed (2 total) in 2.3s ==="));
}

#[test]
fn console_report_counts_verifications() {
    let report = SuiteReport::from_results("Counts", vec![passing_result("a")]);
    let text = format_console_report(&report);

    assert!(text.contains("(3 lines, 2 verifications)"), "text was: {}", text);
}

// =========================================================================
// JUnit rendering
// =========================================================================

#[test]
fn junit_report_has_suite_attributes_and_cases() {
    let report = SuiteReport::from_results(
        "CI",
        vec![passing_result("pass case"), failing_result("fail case")],
    )
    .with_duration(1234);

    let xml = generate_junit_xml(&report);
    println!("{}", xml);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<testsuite name=\"CI\" tests=\"2\" failures=\"1\" time=\"1.234\">"));
    assert!(xml.contains("<testcase name=\"pass case\" classname=\"widget-replay\" />"));
    assert!(xml.contains("<failure message=\"2 line(s) failed\" type=\"ReplayFailure\">"));
    assert!(xml.contains("Line 1: buttonClick"));
    assert!(xml.ends_with("</testsuite>\n"));
}

#[test]
fn junit_escapes_xml_special_characters() {
    assert_eq!(escape_xml("a < b & c > 'd'"), "a &lt; b &amp; c &gt; &apos;d&apos;");

    let mut result = failing_result("needs <escaping> & \"quotes\"");
    result.outcomes.clear();
    let report = SuiteReport::from_results("Esc", vec![result]);
    let xml = generate_junit_xml(&report);

    assert!(xml.contains("needs &lt;escaping&gt; &amp; &quot;quotes&quot;"));
    assert!(!xml.contains("<escaping>"));
}
