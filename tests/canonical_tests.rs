use widget_replay::script::error::ReplayError;
use widget_replay::tree::tree_model::{
    CalendarDate, ClockTime, ElementHandle, FontDescriptor, PropertyValue, WidgetKind,
};
use widget_replay::verify::canonical::canonical_text;
use widget_replay::verify::verifier::{VerifyOutcome, verify};

mod common;
use common::{add_slider, window_only};

// =========================================================================
// Canonical text forms
// =========================================================================

#[test]
fn booleans_canonicalize_to_lowercase_words() {
    assert_eq!(canonical_text(&PropertyValue::Bool(true)), "true");
    assert_eq!(canonical_text(&PropertyValue::Bool(false)), "false");
}

#[test]
fn integers_canonicalize_to_plain_decimal() {
    assert_eq!(canonical_text(&PropertyValue::Int(0)), "0");
    assert_eq!(canonical_text(&PropertyValue::Int(23)), "23");
    assert_eq!(canonical_text(&PropertyValue::Int(-7)), "-7");
}

#[test]
fn doubles_canonicalize_at_natural_precision() {
    assert_eq!(canonical_text(&PropertyValue::Double(0.5)), "0.5");
    assert_eq!(canonical_text(&PropertyValue::Double(3.22)), "3.22");
    // Whole values print without a fractional part
    assert_eq!(canonical_text(&PropertyValue::Double(68.0)), "68");
    assert_eq!(canonical_text(&PropertyValue::Double(-2.0)), "-2");
}

#[test]
fn double_round_trips_through_its_canonical_form() {
    for value in [0.5, 3.22, 0.498433, 0.244333, 68.0] {
        let text = canonical_text(&PropertyValue::Double(value));
        let reparsed: f64 = text.parse().expect("canonical text reparses");
        assert_eq!(reparsed, value, "canonical form '{}' must round-trip", text);
    }
}

#[test]
fn text_and_enum_tokens_pass_through_verbatim() {
    assert_eq!(
        canonical_text(&PropertyValue::Text("Combo1-2".into())),
        "Combo1-2"
    );
    assert_eq!(
        canonical_text(&PropertyValue::EnumToken("AlignLeft".into())),
        "AlignLeft"
    );
}

#[test]
fn dates_and_times_use_stable_zero_padded_forms() {
    let date = CalendarDate {
        year: 2022,
        month: 2,
        day: 1,
    };
    let time = ClockTime {
        hour: 0,
        minute: 22,
        second: 0,
    };

    assert_eq!(canonical_text(&PropertyValue::Date(date)), "2022-02-01");
    assert_eq!(canonical_text(&PropertyValue::Time(time)), "00:22:00");
    assert_eq!(
        canonical_text(&PropertyValue::DateTime(date, time)),
        "2022-02-01T00:22:00"
    );
}

#[test]
fn fonts_use_the_stable_field_order() {
    let font = FontDescriptor {
        family: "AkrutiMal2".into(),
        point_size: 10,
        pixel_size: -1,
        style_hint: 5,
        weight: 50,
        italic: false,
        underline: false,
        strikeout: false,
        fixed_pitch: false,
    };

    assert_eq!(
        canonical_text(&PropertyValue::Font(font)),
        "AkrutiMal2,10,-1,5,50,0,0,0,0,0"
    );
}

// =========================================================================
// Verification against a live element
// =========================================================================

#[test]
fn matching_property_passes() {
    let (mut tree, window) = window_only();
    let slider = add_slider(&mut tree, window, "slider");
    tree.set_prop(slider, "value", PropertyValue::Double(0.5));

    let handle = ElementHandle {
        node: slider,
        kind: WidgetKind::Slider,
    };
    let outcome = verify(&tree, handle, "value", "0.5").expect("verify");
    assert_eq!(outcome, VerifyOutcome::Passed);
}

#[test]
fn mismatch_reports_the_actual_value() {
    let (mut tree, window) = window_only();
    let slider = add_slider(&mut tree, window, "slider");
    tree.set_prop(slider, "value", PropertyValue::Double(0.75));

    let handle = ElementHandle {
        node: slider,
        kind: WidgetKind::Slider,
    };
    match verify(&tree, handle, "value", "0.5").expect("verify") {
        VerifyOutcome::Failed { expected, actual } => {
            assert_eq!(expected, "0.5");
            assert_eq!(actual, "0.75");
        }
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn comparison_is_byte_for_byte() {
    let (mut tree, window) = window_only();
    let label = tree.add_node(window, "QLabel", "label", WidgetKind::Label);
    tree.set_prop(label, "text", PropertyValue::Text("Ready".into()));

    let handle = ElementHandle {
        node: label,
        kind: WidgetKind::Label,
    };
    // Case and whitespace differences are mismatches
    assert!(verify(&tree, handle, "text", "Ready").expect("verify").passed());
    assert!(!verify(&tree, handle, "text", "ready").expect("verify").passed());
    assert!(!verify(&tree, handle, "text", "Ready ").expect("verify").passed());
}

#[test]
fn unknown_property_is_fatal() {
    let (mut tree, window) = window_only();
    let slider = add_slider(&mut tree, window, "slider");

    let handle = ElementHandle {
        node: slider,
        kind: WidgetKind::Slider,
    };
    match verify(&tree, handle, "nonexistent", "1") {
        Err(ReplayError::UnknownProperty { property, kind }) => {
            assert_eq!(property, "nonexistent");
            assert_eq!(kind, WidgetKind::Slider);
        }
        other => panic!("expected UnknownProperty, got {:?}", other),
    }
}
