use crate::report::report_model::SuiteReport;

// ============================================================================
// JUnit XML reporter: standard CI integration format
// ============================================================================

/// Generate a JUnit XML report for CI systems (Jenkins, GitHub Actions,
/// GitLab CI).
///
/// Produces standard JUnit XML:
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="..." tests="3" failures="1" time="1.234">
///   <testcase name="Script 1" classname="widget-replay" />
///   <testcase name="Script 2" classname="widget-replay">
///     <failure message="2 line(s) failed" type="ReplayFailure">
///       Line 1: verify n=MainWindow_0/n=label_0
///     </failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &SuiteReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    for result in &report.script_results {
        if result.passed {
            cases.push_str(&format!(
                "  <testcase name=\"{}\" classname=\"widget-replay\" />\n",
                escape_xml(&result.script_name)
            ));
        } else {
            // Collect failure details
            let failed_lines: Vec<String> = result
                .outcomes
                .iter()
                .filter(|o| o.status.is_failure())
                .map(|o| format!("Line {}: {} {}", o.line_index, o.call, o.path))
                .collect();

            let failure_count = failed_lines.len();
            let error_detail = result
                .error
                .as_ref()
                .map(|e| format!("Error: {}", e))
                .unwrap_or_default();

            let mut body_parts = failed_lines;
            if !error_detail.is_empty() {
                body_parts.push(error_detail);
            }
            let failure_body = body_parts.join("\n");

            let failure_message = if failure_count > 0 {
                format!("{} line(s) failed", failure_count)
            } else {
                "execution error".to_string()
            };

            cases.push_str(&format!(
                "  <testcase name=\"{name}\" classname=\"widget-replay\">\n    <failure message=\"{message}\" type=\"ReplayFailure\">{body}</failure>\n  </testcase>\n",
                name = escape_xml(&result.script_name),
                message = escape_xml(&failure_message),
                body = escape_xml(&failure_body),
            ));
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"{name}\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        name = escape_xml(&report.suite_name),
        tests = report.total,
        failures = report.failed,
        time = time_attr,
        cases = cases,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
