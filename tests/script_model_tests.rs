use widget_replay::adapter::capability::{ArgValue, Verb};
use widget_replay::script::script_model::{LineOutcome, LineStatus, Script, ScriptLine};
use widget_replay::tree::tree_model::{RowOrCol, SelectionEntry};

// =========================================================================
// Helpers
// =========================================================================

fn sample_script() -> Script {
    Script {
        name: "Settings panel smoke".into(),
        lines: vec![
            ScriptLine::Action {
                path: "n=MainWindow_0/n=comboBox_0".into(),
                verb: Verb::SelectItem,
                args: vec![ArgValue::Number(2.0)],
            },
            ScriptLine::Verify {
                path: "n=MainWindow_0/n=comboBox_0".into(),
                property: "currentText".into(),
                expected: "Combo1-2".into(),
            },
            ScriptLine::Action {
                path: "n=MainWindow_0/n=firstCheckBox_0".into(),
                verb: Verb::CheckButton,
                args: vec![ArgValue::Bool(true)],
            },
            ScriptLine::Action {
                path: "n=MainWindow_0/n=tableView_0".into(),
                verb: Verb::SetSelection,
                args: vec![ArgValue::Selection(vec![SelectionEntry {
                    row: RowOrCol::All,
                    column: RowOrCol::Index(2),
                }])],
            },
            ScriptLine::Action {
                path: "n=MainWindow_0/n=treeView_0".into(),
                verb: Verb::ExpandDelegate,
                args: vec![ArgValue::IndexPath(vec![0, 1])],
            },
            ScriptLine::Action {
                path: "n=MainWindow_0/n=simplePushButton_0".into(),
                verb: Verb::ButtonClick,
                args: vec![],
            },
        ],
    }
}

// =========================================================================
// Script serde roundtrip tests
// =========================================================================

#[test]
fn script_yaml_roundtrip() {
    let script = sample_script();

    let yaml = serde_yaml::to_string(&script).expect("Failed to serialize Script to YAML");
    println!("Serialized YAML:\n{}", yaml);

    let deserialized: Script =
        serde_yaml::from_str(&yaml).expect("Failed to deserialize Script from YAML");

    assert_eq!(script, deserialized, "Roundtrip must produce identical script");
}

#[test]
fn script_json_roundtrip() {
    let script = sample_script();

    let json = serde_json::to_string_pretty(&script).expect("Failed to serialize to JSON");
    println!("Serialized JSON:\n{}", json);

    let deserialized: Script = serde_json::from_str(&json).expect("Failed to deserialize from JSON");

    assert_eq!(script, deserialized, "JSON roundtrip must produce identical script");
}

#[test]
fn script_deserializes_from_yaml_text() {
    let yaml = r#"
name: "Combo check"
lines:
  - path: n=MainWindow_0/n=comboBox_0
    verb: selectItem
    args: [2]
  - path: n=MainWindow_0/n=comboBox_0
    property: currentText
    expected: "Combo1-2"
  - path: n=MainWindow_0/n=label_0
    verb: mouseClick
    args: ["LeftButton", 355, 8]
  - path: n=MainWindow_0/n=tableView_0
    verb: setSelection
    args:
      - - row: "ALL"
          column: 2
"#;

    let script: Script = serde_yaml::from_str(yaml).expect("Failed to parse YAML");

    assert_eq!(script.name, "Combo check");
    assert_eq!(script.lines.len(), 4);

    match &script.lines[0] {
        ScriptLine::Action { verb, args, .. } => {
            assert_eq!(*verb, Verb::SelectItem);
            assert_eq!(args, &vec![ArgValue::Number(2.0)]);
        }
        other => panic!("expected an action line, got {:?}", other),
    }

    match &script.lines[1] {
        ScriptLine::Verify {
            property, expected, ..
        } => {
            assert_eq!(property, "currentText");
            assert_eq!(expected, "Combo1-2");
        }
        other => panic!("expected a verify line, got {:?}", other),
    }

    match &script.lines[2] {
        ScriptLine::Action { args, .. } => {
            assert_eq!(
                args,
                &vec![
                    ArgValue::Text("LeftButton".into()),
                    ArgValue::Number(355.0),
                    ArgValue::Number(8.0),
                ]
            );
        }
        other => panic!("expected an action line, got {:?}", other),
    }

    match &script.lines[3] {
        ScriptLine::Action { args, .. } => match &args[0] {
            ArgValue::Selection(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].row, RowOrCol::All);
                assert_eq!(entries[0].column, RowOrCol::Index(2));
            }
            other => panic!("expected a selection argument, got {:?}", other),
        },
        other => panic!("expected an action line, got {:?}", other),
    }
}

#[test]
fn verbs_serialize_in_camel_case() {
    let json = serde_json::to_string(&Verb::SelectTabItem).expect("serialize verb");
    assert_eq!(json, "\"selectTabItem\"");

    let verb: Verb = serde_json::from_str("\"delegateDblClick\"").expect("deserialize verb");
    assert_eq!(verb, Verb::DelegateDblClick);
}

#[test]
fn missing_args_default_to_empty() {
    let yaml = r#"
name: "No args"
lines:
  - path: n=MainWindow_0/n=submit_0
    verb: buttonClick
"#;

    let script: Script = serde_yaml::from_str(yaml).expect("parse");
    match &script.lines[0] {
        ScriptLine::Action { args, .. } => assert!(args.is_empty()),
        other => panic!("expected an action line, got {:?}", other),
    }
}

#[test]
fn unknown_verb_fails_to_parse() {
    let yaml = r#"
name: "Bad verb"
lines:
  - path: n=MainWindow_0/n=submit_0
    verb: explode
"#;

    let result: Result<Script, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

// =========================================================================
// Outcome model
// =========================================================================

#[test]
fn line_status_serializes_with_a_status_tag() {
    let outcome = LineOutcome {
        line_index: 3,
        path: "n=MainWindow_0/n=label_0".into(),
        call: "verify".into(),
        status: LineStatus::Failed {
            expected: "Ready".into(),
            actual: "Busy".into(),
        },
    };

    let json = serde_json::to_string(&outcome).expect("serialize outcome");
    assert!(json.contains("\"status\":\"failed\""), "json was: {}", json);
    assert!(json.contains("\"expected\":\"Ready\""), "json was: {}", json);

    let back: LineOutcome = serde_json::from_str(&json).expect("deserialize outcome");
    assert_eq!(back, outcome);
}

#[test]
fn fatality_classification() {
    assert!(!LineStatus::Dispatched.is_fatal());
    assert!(!LineStatus::Passed.is_fatal());
    assert!(
        !LineStatus::Failed {
            expected: "a".into(),
            actual: "b".into()
        }
        .is_fatal()
    );
    assert!(LineStatus::NotFound { error: "e".into() }.is_fatal());
    assert!(LineStatus::Unsupported { error: "e".into() }.is_fatal());
    assert!(LineStatus::InvalidArgument { error: "e".into() }.is_fatal());
    assert!(!LineStatus::Skipped.is_fatal());

    // Mismatches count against the verdict even though they are not fatal
    assert!(
        LineStatus::Failed {
            expected: "a".into(),
            actual: "b".into()
        }
        .is_failure()
    );
    assert!(!LineStatus::Skipped.is_failure());
}
