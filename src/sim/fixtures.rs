use crate::sim::sim_model::{DeferredOp, TreeItem};
use crate::sim::sim_tree::SimTree;
use crate::tree::tree_model::{
    CalendarDate, FontDescriptor, NodeId, ObjectTree, PropertyValue, WidgetKind,
};

/// Handles into the demo application, for tests that assert on
/// simulator state directly.
pub struct DemoHandles {
    pub main_window: NodeId,
    pub tab_bar: NodeId,
    pub label: NodeId,
    pub table_view: NodeId,
    pub tree_view: NodeId,
    pub dialog: NodeId,
}

/// Build the demo application the CLI runs scripts against: a tabbed
/// main window with the widget inventory of a typical forms app, a
/// toolbar button that opens a modal dialog, and a couple of command
/// actions.
pub fn demo_application() -> (SimTree, DemoHandles) {
    let mut tree = SimTree::new();
    let root = tree.root();

    let main_window = tree.add_node(root, "MainWindow", "MainWindow", WidgetKind::Window);

    // ---- Central widget with the tab stack ----
    let central = tree.add_node(main_window, "QWidget", "centralwidget", WidgetKind::Other);
    let tab_widget = tree.add_node(central, "QTabWidget", "tabWidget", WidgetKind::Other);
    let tab_bar = tree.add_node(
        tab_widget,
        "QTabBar",
        "qt_tabwidget_tabbar",
        WidgetKind::TabBar,
    );
    tree.set_items(tab_bar, &["General", "Text", "Views"]);
    tree.set_prop(tab_bar, "currentIndex", PropertyValue::Int(0));
    let stack = tree.add_node(
        tab_widget,
        "QStackedWidget",
        "qt_tabwidget_stackedwidget",
        WidgetKind::Other,
    );
    tree.set_prop(stack, "currentIndex", PropertyValue::Int(0));
    tree.link_tab_pages(tab_bar, stack);

    // ---- General page ----
    let general = tree.add_node(stack, "QWidget", "tab", WidgetKind::Other);

    let label = tree.add_node(general, "QLabel", "label", WidgetKind::Label);
    tree.set_prop(
        label,
        "text",
        PropertyValue::Text("Here will be displayed info after button push".to_string()),
    );
    tree.set_prop(
        label,
        "font",
        PropertyValue::Font(FontDescriptor {
            family: "Sans Serif".to_string(),
            point_size: 9,
            pixel_size: -1,
            style_hint: 5,
            weight: 50,
            italic: false,
            underline: false,
            strikeout: false,
            fixed_pitch: false,
        }),
    );

    let simple_button = tree.add_node(
        general,
        "QPushButton",
        "simplePushButton",
        WidgetKind::PushButton,
    );
    tree.add_click_effect(
        simple_button,
        DeferredOp::SetProperty {
            node: label,
            name: "text".to_string(),
            value: PropertyValue::Text("Simple Button Clicked".to_string()),
        },
    );

    let checkable_button = tree.add_node(
        general,
        "QPushButton",
        "checkablePushButton",
        WidgetKind::PushButton,
    );
    tree.set_prop(checkable_button, "checkable", PropertyValue::Bool(true));
    tree.set_prop(checkable_button, "checked", PropertyValue::Bool(false));

    for name in ["firstCheckBox", "secondCheckBox", "thirdCheckBox"] {
        let check_box = tree.add_node(general, "QCheckBox", name, WidgetKind::CheckBox);
        tree.set_prop(check_box, "checked", PropertyValue::Bool(false));
    }

    let radio_row = tree.add_node(general, "QWidget", "radioRow", WidgetKind::Other);
    for name in ["firstEnabledRadio", "secondEnabledRadio"] {
        let radio = tree.add_node(radio_row, "QRadioButton", name, WidgetKind::RadioButton);
        tree.set_prop(radio, "checked", PropertyValue::Bool(false));
    }
    let disabled_radio = tree.add_node(
        radio_row,
        "QRadioButton",
        "disabledRadioButton",
        WidgetKind::RadioButton,
    );
    tree.set_prop(disabled_radio, "checked", PropertyValue::Bool(false));
    tree.set_enabled(disabled_radio, false);

    let combo = tree.add_node(general, "QComboBox", "comboBox", WidgetKind::ComboBox);
    tree.set_items(combo, &["Combo1-0", "Combo1-1", "Combo1-2"]);
    tree.set_prop(combo, "currentIndex", PropertyValue::Int(0));
    tree.set_prop(combo, "currentText", PropertyValue::Text("Combo1-0".to_string()));

    let editable_combo = tree.add_node(
        general,
        "QComboBox",
        "editableComboBox",
        WidgetKind::ComboBox,
    );
    tree.set_items(editable_combo, &["Apple", "Banana", "Cherry"]);
    tree.set_prop(editable_combo, "currentIndex", PropertyValue::Int(0));
    tree.set_prop(
        editable_combo,
        "currentText",
        PropertyValue::Text("Apple".to_string()),
    );

    let spin_box = tree.add_node(general, "QSpinBox", "spinBox", WidgetKind::SpinBox);
    tree.set_prop(spin_box, "value", PropertyValue::Int(0));
    tree.set_prop(spin_box, "minimum", PropertyValue::Int(0));
    tree.set_prop(spin_box, "maximum", PropertyValue::Int(99));

    let double_spin = tree.add_node(
        general,
        "QDoubleSpinBox",
        "doubleSpinBox",
        WidgetKind::DoubleSpinBox,
    );
    tree.set_prop(double_spin, "value", PropertyValue::Double(0.0));
    tree.set_prop(double_spin, "minimum", PropertyValue::Double(0.0));
    tree.set_prop(double_spin, "maximum", PropertyValue::Double(99.0));

    let slider = tree.add_node(general, "QSlider", "slider", WidgetKind::Slider);
    tree.set_prop(slider, "value", PropertyValue::Double(0.0));
    tree.set_prop(slider, "minimum", PropertyValue::Double(0.0));
    tree.set_prop(slider, "maximum", PropertyValue::Double(1.0));
    tree.set_prop(slider, "singleStep", PropertyValue::Double(0.1));

    let dial = tree.add_node(general, "QDial", "dial", WidgetKind::Dial);
    tree.set_prop(dial, "value", PropertyValue::Double(0.0));
    tree.set_prop(dial, "minimum", PropertyValue::Double(0.0));
    tree.set_prop(dial, "maximum", PropertyValue::Double(100.0));

    let scroll_bar = tree.add_node(
        general,
        "QScrollBar",
        "horizontalScrollBar",
        WidgetKind::ScrollBar,
    );
    tree.set_prop(scroll_bar, "value", PropertyValue::Double(0.0));
    tree.set_prop(scroll_bar, "minimum", PropertyValue::Double(0.0));
    tree.set_prop(scroll_bar, "maximum", PropertyValue::Double(100.0));
    tree.set_prop(scroll_bar, "pageStep", PropertyValue::Double(10.0));

    let calendar = tree.add_node(
        general,
        "QCalendarWidget",
        "calendarWidget",
        WidgetKind::Calendar,
    );
    tree.set_prop(
        calendar,
        "selectedDate",
        PropertyValue::Date(CalendarDate {
            year: 2024,
            month: 1,
            day: 1,
        }),
    );

    tree.add_node(general, "QDateTimeEdit", "dateTimeEdit", WidgetKind::DateTimeEdit);
    tree.add_node(general, "QTimeEdit", "timeEdit", WidgetKind::DateTimeEdit);
    tree.add_node(general, "QDateEdit", "dateEdit", WidgetKind::DateTimeEdit);

    let delay_button = tree.add_node(
        general,
        "QDelayButton",
        "delayButton",
        WidgetKind::DelayButton,
    );
    tree.set_prop(delay_button, "progress", PropertyValue::Double(0.0));
    tree.set_prop(delay_button, "checked", PropertyValue::Bool(false));

    // ---- Text page ----
    let text_page = tree.add_node(stack, "QWidget", "tab_2", WidgetKind::Other);
    for (class, name) in [
        ("QLineEdit", "lineEdit"),
        ("QTextEdit", "textEdit"),
        ("QPlainTextEdit", "plainTextEdit"),
    ] {
        let kind = if class == "QLineEdit" {
            WidgetKind::LineEdit
        } else {
            WidgetKind::TextEdit
        };
        let editor = tree.add_node(text_page, class, name, kind);
        tree.set_prop(editor, "text", PropertyValue::Text(String::new()));
    }

    // ---- Views page ----
    let views_page = tree.add_node(stack, "QWidget", "tab_3", WidgetKind::Other);

    let table_view = tree.add_node(views_page, "QTableView", "tableView", WidgetKind::ItemView);
    tree.set_table(
        table_view,
        (0..3)
            .map(|r| (0..3).map(|c| format!("Cell {}, {}", r, c)).collect())
            .collect(),
    );

    let tree_view = tree.add_node(views_page, "QTreeView", "treeView", WidgetKind::TreeView);
    tree.set_tree_items(
        tree_view,
        vec![
            TreeItem::with_children(
                "Item 0",
                vec![TreeItem::new("Subitem 0"), TreeItem::new("Subitem 1")],
            ),
            TreeItem::new("Item 1"),
        ],
    );

    // ---- Toolbar with a dialog-opening button ----
    let toolbar = tree.add_node(main_window, "QToolBar", "toolBar", WidgetKind::Other);
    let dialog = tree.add_detached(main_window, "Dialog", "", WidgetKind::Window);
    let ok_button = tree.add_node(dialog, "QPushButton", "", WidgetKind::PushButton);
    tree.add_click_effect(ok_button, DeferredOp::Detach { node: dialog });

    let open_dialog = tree.add_node(toolbar, "QToolButton", "", WidgetKind::PushButton);
    tree.add_click_effect(open_dialog, DeferredOp::Attach { node: dialog });

    // ---- Command actions ----
    let toggle_action = tree.add_node(
        main_window,
        "QAction",
        "actionToggleViews",
        WidgetKind::MenuAction,
    );
    tree.set_prop(toggle_action, "checkable", PropertyValue::Bool(true));
    tree.set_prop(toggle_action, "checked", PropertyValue::Bool(false));

    let reset_action = tree.add_node(
        main_window,
        "QAction",
        "actionResetLabel",
        WidgetKind::MenuAction,
    );
    tree.add_click_effect(
        reset_action,
        DeferredOp::SetProperty {
            node: label,
            name: "text".to_string(),
            value: PropertyValue::Text("Here will be displayed info after button push".to_string()),
        },
    );

    let handles = DemoHandles {
        main_window,
        tab_bar,
        label,
        table_view,
        tree_view,
        dialog,
    };
    (tree, handles)
}
