use crate::report::report_model::SuiteReport;
use crate::script::script_model::LineStatus;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a suite report for terminal output.
///
/// Produces output like:
/// ```text
/// === Script Suite: smoke ===
///
/// ✓ PASS  checkout_flow (12 lines, 4 verifications)
/// ✗ FAIL  settings_panel (8 lines, 3 verifications)
///     [FAIL] Line 5: verify n=MainWindow_0/n=label_0 expected 'Ready', actual 'Busy'
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Script Suite: {} ===\n\n", report.suite_name));

    for result in &report.script_results {
        let verify_count = result
            .outcomes
            .iter()
            .filter(|o| o.call == "verify")
            .count();
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} lines, {} verifications)\n",
            marker, result.script_name, result.lines_run, verify_count
        ));

        // Show the fatal error if the script aborted
        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        // Show every failing line
        if !result.passed {
            for outcome in &result.outcomes {
                if !outcome.status.is_failure() {
                    continue;
                }
                let detail = match &outcome.status {
                    LineStatus::Failed { expected, actual } => {
                        format!("expected '{}', actual '{}'", expected, actual)
                    }
                    LineStatus::MalformedAddress { error }
                    | LineStatus::NotFound { error }
                    | LineStatus::Unsupported { error }
                    | LineStatus::InvalidArgument { error }
                    | LineStatus::EngineError { error } => error.clone(),
                    _ => continue,
                };
                out.push_str(&format!(
                    "    [FAIL] Line {}: {} {} {}\n",
                    outcome.line_index, outcome.call, outcome.path, detail
                ));
            }
        }
    }

    // Summary line
    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}
