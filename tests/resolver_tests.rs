use std::time::Duration;

use widget_replay::address::parser::parse;
use widget_replay::script::error::ReplayError;
use widget_replay::tree::resolver::PathResolver;
use widget_replay::tree::tree_model::{ObjectTree, WidgetKind};

mod common;
use common::{add_button, window_only};

fn resolver() -> PathResolver {
    PathResolver::new(1, Duration::from_millis(1))
}

// =========================================================================
// Class locators: direct children, sibling index among same-class matches
// =========================================================================

#[test]
fn class_locator_counts_only_matching_siblings() {
    let (mut tree, window) = window_only();
    // Interleave tool buttons with other widgets; the class index must
    // skip the non-matching ones
    let first = tree.add_node(window, "QToolButton", "", WidgetKind::PushButton);
    tree.add_node(window, "QLabel", "", WidgetKind::Label);
    let second = tree.add_node(window, "QToolButton", "", WidgetKind::PushButton);

    let address = parse("c=MainWindow_0/c=QToolButton_0").expect("parse");
    let handle = resolver().resolve(&tree, &address).expect("resolve");
    assert_eq!(handle.node, first);

    let address = parse("c=MainWindow_0/c=QToolButton_1").expect("parse");
    let handle = resolver().resolve(&tree, &address).expect("resolve");
    assert_eq!(handle.node, second);
}

#[test]
fn class_locator_does_not_descend_into_grandchildren() {
    let (mut tree, window) = window_only();
    let panel = tree.add_node(window, "QWidget", "panel", WidgetKind::Other);
    tree.add_node(panel, "QToolButton", "", WidgetKind::PushButton);

    // The button is a grandchild of the window, so a class segment on
    // the window must not find it
    let address = parse("c=MainWindow_0/c=QToolButton_0").expect("parse");
    let result = resolver().resolve(&tree, &address);
    assert!(matches!(result, Err(ReplayError::ElementNotFound { .. })));
}

// =========================================================================
// Name locators: whole subtree, pre-order duplicate index
// =========================================================================

#[test]
fn name_locator_searches_nested_subtree() {
    let (mut tree, window) = window_only();
    let panel = tree.add_node(window, "QWidget", "panel", WidgetKind::Other);
    let inner = tree.add_node(panel, "QWidget", "inner", WidgetKind::Other);
    let target = add_button(&mut tree, inner, "submit");

    let address = parse("n=MainWindow_0/n=submit_0").expect("parse");
    let handle = resolver().resolve(&tree, &address).expect("resolve");
    assert_eq!(handle.node, target);
    assert_eq!(handle.kind, WidgetKind::PushButton);
}

#[test]
fn duplicate_names_disambiguate_in_document_order() {
    let (mut tree, window) = window_only();
    let left = tree.add_node(window, "QWidget", "panel", WidgetKind::Other);
    let right = tree.add_node(window, "QWidget", "panel", WidgetKind::Other);
    let in_left = add_button(&mut tree, left, "submit");
    let in_right = add_button(&mut tree, right, "submit");

    let first = resolver()
        .resolve(&tree, &parse("n=MainWindow_0/n=submit_0").expect("parse"))
        .expect("resolve");
    let second = resolver()
        .resolve(&tree, &parse("n=MainWindow_0/n=submit_1").expect("parse"))
        .expect("resolve");

    // Pre-order: the left panel's button comes first
    assert_eq!(first.node, in_left);
    assert_eq!(second.node, in_right);
    assert_ne!(first.node, second.node);
}

#[test]
fn index_beyond_the_duplicate_set_fails_with_counts() {
    let (mut tree, window) = window_only();
    add_button(&mut tree, window, "submit");
    add_button(&mut tree, window, "submit");

    // Two duplicates exist; index 5 must report both numbers
    let address = parse("n=MainWindow_0/n=submit_5").expect("parse");
    let resolver = PathResolver::new(3, Duration::from_millis(1));
    match resolver.resolve(&tree, &address) {
        Err(ReplayError::ElementNotFound {
            attempted_index,
            available_count,
            attempts,
            segment,
            ..
        }) => {
            assert_eq!(attempted_index, 5);
            assert_eq!(available_count, 2);
            assert_eq!(attempts, 3);
            assert_eq!(segment, "n=submit_5");
        }
        other => panic!("expected ElementNotFound, got {:?}", other),
    }
}

// =========================================================================
// Determinism
// =========================================================================

#[test]
fn resolution_is_deterministic_for_a_fixed_tree() {
    let (mut tree, window) = window_only();
    let panel = tree.add_node(window, "QWidget", "panel", WidgetKind::Other);
    add_button(&mut tree, panel, "submit");

    let address = parse("n=MainWindow_0/n=panel_0/n=submit_0").expect("parse");
    let first = resolver().resolve(&tree, &address).expect("resolve");
    let second = resolver().resolve(&tree, &address).expect("resolve");

    assert_eq!(first.node, second.node);
    assert_eq!(first.kind, second.kind);
}

// =========================================================================
// Bounded retry against lazily-created elements
// =========================================================================

#[test]
fn retry_absorbs_lazy_instantiation() {
    let (mut tree, window) = window_only();
    let target = add_button(&mut tree, window, "submit");
    // Invisible for the first two enumerations of the window's children
    tree.set_reveal_countdown(target, 2);

    let address = parse("n=MainWindow_0/n=submit_0").expect("parse");
    let resolver = PathResolver::new(5, Duration::from_millis(1));
    let handle = resolver.resolve(&tree, &address).expect("resolve");
    assert_eq!(handle.node, target);
}

#[test]
fn exhausted_retry_budget_surfaces_not_found() {
    let (mut tree, window) = window_only();
    let target = add_button(&mut tree, window, "submit");
    tree.set_reveal_countdown(target, 10);

    let address = parse("n=MainWindow_0/n=submit_0").expect("parse");
    let resolver = PathResolver::new(2, Duration::from_millis(1));
    let result = resolver.resolve(&tree, &address);
    assert!(matches!(
        result,
        Err(ReplayError::ElementNotFound { attempts: 2, .. })
    ));
}

#[test]
fn detached_nodes_are_invisible_until_attached() {
    let (mut tree, window) = window_only();
    let dialog = tree.add_detached(window, "Dialog", "", WidgetKind::Window);

    let address = parse("n=MainWindow_0/c=Dialog_0").expect("parse");
    assert!(resolver().resolve(&tree, &address).is_err());
    assert!(!tree.children(window).contains(&dialog));
}
