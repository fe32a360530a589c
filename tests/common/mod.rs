#![allow(dead_code)] // each test binary uses its own subset of helpers

use widget_replay::sim::sim_tree::SimTree;
use widget_replay::tree::tree_model::{NodeId, ObjectTree, PropertyValue, WidgetKind};

/// A tree with just a main window under the virtual root.
pub fn window_only() -> (SimTree, NodeId) {
    let mut tree = SimTree::new();
    let root = tree.root();
    let window = tree.add_node(root, "MainWindow", "MainWindow", WidgetKind::Window);
    (tree, window)
}

/// Add a push button with a `checked` property when checkable.
pub fn add_button(tree: &mut SimTree, parent: NodeId, name: &str) -> NodeId {
    tree.add_node(parent, "QPushButton", name, WidgetKind::PushButton)
}

pub fn add_check_box(tree: &mut SimTree, parent: NodeId, name: &str) -> NodeId {
    let node = tree.add_node(parent, "QCheckBox", name, WidgetKind::CheckBox);
    tree.set_prop(node, "checked", PropertyValue::Bool(false));
    node
}

/// Add a 0..=1 slider with a `value` property.
pub fn add_slider(tree: &mut SimTree, parent: NodeId, name: &str) -> NodeId {
    let node = tree.add_node(parent, "QSlider", name, WidgetKind::Slider);
    tree.set_prop(node, "value", PropertyValue::Double(0.0));
    tree.set_prop(node, "minimum", PropertyValue::Double(0.0));
    tree.set_prop(node, "maximum", PropertyValue::Double(1.0));
    node
}

pub fn add_combo(tree: &mut SimTree, parent: NodeId, name: &str, items: &[&str]) -> NodeId {
    let node = tree.add_node(parent, "QComboBox", name, WidgetKind::ComboBox);
    tree.set_items(node, items);
    tree.set_prop(node, "currentIndex", PropertyValue::Int(0));
    if let Some(first) = items.first() {
        tree.set_prop(node, "currentText", PropertyValue::Text(first.to_string()));
    }
    node
}

pub fn add_table(tree: &mut SimTree, parent: NodeId, name: &str, rows: usize, cols: usize) -> NodeId {
    let node = tree.add_node(parent, "QTableView", name, WidgetKind::ItemView);
    tree.set_table(
        node,
        (0..rows)
            .map(|r| (0..cols).map(|c| format!("Cell {}, {}", r, c)).collect())
            .collect(),
    );
    node
}
