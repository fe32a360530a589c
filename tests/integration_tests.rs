use widget_replay::run_demo_script;
use widget_replay::script::runner::{RunSettings, ScriptRunner};
use widget_replay::script::script_model::Script;
use widget_replay::sim::fixtures::demo_application;
use widget_replay::trace::logger::TraceLogger;
use widget_replay::tree::tree_model::{ObjectTree, PropertyValue};

// =========================================================================
// The shipped demo script replays cleanly against the demo application
// =========================================================================

fn load_demo_script() -> Script {
    let content = std::fs::read_to_string("demos/smoke.yaml").expect("demo script exists");
    serde_yaml::from_str(&content).expect("demo script parses")
}

#[test]
fn demo_script_parses_and_passes() {
    let script = load_demo_script();
    assert_eq!(script.name, "demo_smoke");
    assert!(script.lines.len() > 20);

    let result = run_demo_script(&script);

    assert!(
        result.passed,
        "demo script failed: {:?}",
        result
            .outcomes
            .iter()
            .filter(|o| o.status.is_failure())
            .collect::<Vec<_>>()
    );
    assert_eq!(result.lines_run, script.lines.len());
    assert!(result.error.is_none());
}

#[test]
fn demo_script_leaves_the_expected_application_state() {
    let script = load_demo_script();
    let settings = RunSettings::default();
    let runner = ScriptRunner::new(&settings);
    let tracer = TraceLogger::disabled();
    let (mut tree, handles) = demo_application();

    let result = runner.run(&script, &mut tree, &tracer);
    assert!(result.passed, "unexpected failure: {:?}", result.error);

    // The label reacted to the push button
    assert_eq!(
        tree.property(handles.label, "text"),
        Some(PropertyValue::Text("Simple Button Clicked".into()))
    );

    // Column 2 is selected in every row of the table, nothing else
    assert_eq!(
        tree.selected_cells(handles.table_view),
        vec![(0, 2), (1, 2), (2, 2)]
    );

    // The dialog opened and was closed again by its OK button
    assert!(!tree.is_attached(handles.dialog));

    // The tab bar ended up on the views page
    assert_eq!(
        tree.property(handles.tab_bar, "currentIndex"),
        Some(PropertyValue::Int(2))
    );
}

// =========================================================================
// Fixture sanity
// =========================================================================

#[test]
fn demo_application_exposes_the_expected_top_level_shape() {
    let (tree, handles) = demo_application();

    let top_level = tree.children(tree.root());
    assert_eq!(top_level, vec![handles.main_window]);
    assert_eq!(tree.class_name(handles.main_window), "MainWindow");
    assert_eq!(tree.object_name(handles.main_window), "MainWindow");

    // The unopened dialog is not visible in the tree yet
    assert!(!tree.children(handles.main_window).contains(&handles.dialog));
}

#[test]
fn trace_logger_writes_one_json_object_per_line() {
    let path = std::env::temp_dir().join(format!(
        "widget-replay-trace-{}.jsonl",
        std::process::id()
    ));
    let path_str = path.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&path);

    let script = load_demo_script();
    let settings = RunSettings::default();
    let runner = ScriptRunner::new(&settings);
    let tracer = TraceLogger::new(&path_str);
    let (mut tree, _) = demo_application();

    let result = runner.run(&script, &mut tree, &tracer);
    assert!(result.passed);

    let content = std::fs::read_to_string(&path).expect("trace file written");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), script.lines.len());
    for line in &lines {
        let event: serde_json::Value = serde_json::from_str(line).expect("valid JSON line");
        assert!(event["status"].is_string());
        assert!(event["tree_fingerprint"].is_string());
    }

    let _ = std::fs::remove_file(&path);
}
