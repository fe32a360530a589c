use crate::address::parser::parse;
use crate::adapter::registry::distinct_adapters;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::SuiteReport;
use crate::script::runner::{RunSettings, ScriptRunner};
use crate::script::script_model::{Script, ScriptLine};
use crate::sim::fixtures::demo_application;
use crate::trace::logger::TraceLogger;

// ============================================================================
// run subcommand
// ============================================================================

/// Run replay scripts against the demo application and return whether
/// all passed.
pub fn cmd_run(
    script_path: &str,
    format: &str,
    output: Option<&str>,
    trace_path: Option<&str>,
    settings: &RunSettings,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        eprintln!("No scripts found at: {}", script_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Running {} scripts...", scripts.len());
    }

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let runner = ScriptRunner::new(settings);
    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for script in &scripts {
        if verbose > 0 {
            eprintln!("  Running: {}", script.name);
        }
        // Each script replays against a fresh application instance
        let (mut tree, _) = demo_application();
        let result = runner.run(script, &mut tree, &tracer);
        results.push(result);
    }

    let duration = start.elapsed().as_millis();

    let report = SuiteReport::from_results("CLI Run", results).with_duration(duration);
    let all_passed = report.all_passed();

    // Format report
    let output_content = match format {
        "junit" => generate_junit_xml(&report),
        _ => format_console_report(&report),
    };

    // Write or print
    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Load scripts from a single YAML file or a directory of YAML files.
pub fn load_scripts(path: &str) -> Result<Vec<Script>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scripts = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let script: Script = serde_yaml::from_str(&content)?;
                scripts.push(script);
            }
        }
        // Sort by name for deterministic order
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    } else {
        let content = std::fs::read_to_string(path)?;
        let script: Script = serde_yaml::from_str(&content)?;
        Ok(vec![script])
    }
}

// ============================================================================
// check subcommand
// ============================================================================

/// Statically validate scripts without executing them: every address
/// parses, every action's arguments fit at least one widget family's
/// declared shape, every verify names a property.
pub fn cmd_check(script_path: &str, verbose: u8) -> Result<bool, Box<dyn std::error::Error>> {
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        eprintln!("No scripts found at: {}", script_path);
        return Ok(true);
    }

    let mut issue_count = 0;
    for script in &scripts {
        if verbose > 0 {
            eprintln!("  Checking: {} ({} lines)", script.name, script.lines.len());
        }
        for (i, line) in script.lines.iter().enumerate() {
            for issue in check_line(line) {
                println!("{}: line {}: {}", script.name, i, issue);
                issue_count += 1;
            }
        }
    }

    if issue_count == 0 {
        println!(
            "OK: {} script(s) checked, no issues",
            scripts.len()
        );
        Ok(true)
    } else {
        println!("{} issue(s) found", issue_count);
        Ok(false)
    }
}

/// Collect static issues for one line.
fn check_line(line: &ScriptLine) -> Vec<String> {
    let mut issues = Vec::new();

    if let Err(e) = parse(line.path()) {
        issues.push(e.to_string());
    }

    match line {
        ScriptLine::Action { verb, args, .. } => {
            // Valid if the arguments fit the declared shape of at least
            // one widget family that supports the verb
            let mut first_reason = None;
            let mut fits = false;
            for adapter in distinct_adapters() {
                if let Some(shape) = adapter.shape_for(*verb) {
                    match shape.validate(args) {
                        Ok(()) => {
                            fits = true;
                            break;
                        }
                        Err(reason) => {
                            if first_reason.is_none() {
                                first_reason = Some(reason);
                            }
                        }
                    }
                }
            }
            if !fits {
                let reason = first_reason
                    .unwrap_or_else(|| "no widget family supports this verb".to_string());
                issues.push(format!("'{}': {}", verb.as_str(), reason));
            }
        }
        ScriptLine::Verify { property, .. } => {
            if property.is_empty() {
                issues.push("verify names an empty property".to_string());
            }
        }
    }

    issues
}
