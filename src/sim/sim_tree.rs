use std::collections::{HashMap, VecDeque};

use crate::adapter::capability::{parse_date_time_text, parse_decimal};
use crate::script::error::ReplayError;
use crate::sim::sim_model::{DeferredOp, SimNode, TableData, TreeItem, tree_item, tree_item_mut};
use crate::tree::tree_model::{
    CalendarDate, DelegateRef, MouseButton, NodeId, ObjectTree, PropertyValue, SelectionEntry,
    RowOrCol, StepDirection, UiDriver, WidgetKind,
};

/// In-memory implementation of the toolkit collaborator.
///
/// Mutating primitives apply element-local state synchronously (the way
/// a real toolkit updates the widget that received the event) and queue
/// structural side effects (dialogs opening and closing, labels reacting
/// to clicks) that only land when `settle` runs. Nodes can also be
/// marked lazily instantiated: they stay invisible for a number of
/// child enumerations, which is what the resolver's retry loop absorbs.
pub struct SimTree {
    nodes: HashMap<NodeId, SimNode>,
    root: NodeId,
    next_id: NodeId,
    deferred: VecDeque<DeferredOp>,
    settle_count: u32,
}

impl SimTree {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(0, SimNode::new("ApplicationRoot", "", WidgetKind::Other));
        SimTree {
            nodes,
            root: 0,
            next_id: 1,
            deferred: VecDeque::new(),
            settle_count: 0,
        }
    }

    // ------------------------------------------------------------------
    // Tree construction
    // ------------------------------------------------------------------

    pub fn add_node(
        &mut self,
        parent: NodeId,
        class_name: &str,
        object_name: &str,
        kind: WidgetKind,
    ) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;

        let mut node = SimNode::new(class_name, object_name, kind);
        node.parent = Some(parent);
        self.nodes.insert(id, node);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Add a node that starts detached (an unopened dialog). Invisible
    /// to traversal until an `Attach` deferred op lands.
    pub fn add_detached(
        &mut self,
        parent: NodeId,
        class_name: &str,
        object_name: &str,
        kind: WidgetKind,
    ) -> NodeId {
        let id = self.add_node(parent, class_name, object_name, kind);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attached = false;
        }
        id
    }

    pub fn set_prop(&mut self, node: NodeId, name: &str, value: PropertyValue) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.props.insert(name.to_string(), value);
        }
    }

    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        self.set_prop(node, "enabled", PropertyValue::Bool(enabled));
    }

    pub fn set_items(&mut self, node: NodeId, items: &[&str]) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.items = items.iter().map(|s| s.to_string()).collect();
        }
    }

    pub fn set_table(&mut self, node: NodeId, rows: Vec<Vec<String>>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.table = Some(TableData::new(rows));
        }
    }

    pub fn set_tree_items(&mut self, node: NodeId, items: Vec<TreeItem>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.tree_items = items;
        }
    }

    pub fn add_click_effect(&mut self, node: NodeId, op: DeferredOp) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.click_effects.push(op);
        }
    }

    /// The node stays invisible for `polls` enumerations of its parent's
    /// children, simulating asynchronous creation.
    pub fn set_reveal_countdown(&mut self, node: NodeId, polls: u32) {
        if let Some(n) = self.nodes.get(&node) {
            n.reveal_countdown.set(polls);
        }
    }

    /// Tab selections on `tab_bar` also drive `pages`' current index.
    pub fn link_tab_pages(&mut self, tab_bar: NodeId, pages: NodeId) {
        if let Some(n) = self.nodes.get_mut(&tab_bar) {
            n.tab_target = Some(pages);
        }
    }

    // ------------------------------------------------------------------
    // Test/inspection accessors
    // ------------------------------------------------------------------

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.nodes.get(&node).map(|n| n.attached).unwrap_or(false)
    }

    pub fn settle_count(&self) -> u32 {
        self.settle_count
    }

    pub fn pending_deferred(&self) -> usize {
        self.deferred.len()
    }

    pub fn selected_cells(&self, node: NodeId) -> Vec<(usize, usize)> {
        self.nodes
            .get(&node)
            .and_then(|n| n.table.as_ref())
            .map(|t| t.selected.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn cell_text(&self, node: NodeId, row: usize, column: usize) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|n| n.table.as_ref())
            .and_then(|t| t.rows.get(row))
            .and_then(|r| r.get(column))
            .cloned()
    }

    pub fn tree_item_expanded(&self, node: NodeId, path: &[usize]) -> Option<bool> {
        self.nodes
            .get(&node)
            .and_then(|n| tree_item(&n.tree_items, path))
            .map(|item| item.expanded)
    }

    pub fn tree_item_text(&self, node: NodeId, path: &[usize]) -> Option<String> {
        self.nodes
            .get(&node)
            .and_then(|n| tree_item(&n.tree_items, path))
            .map(|item| item.text.clone())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn require(&self, node: NodeId, operation: &'static str) -> Result<&SimNode, ReplayError> {
        self.nodes.get(&node).ok_or(ReplayError::Backend {
            operation,
            message: format!("node {} does not exist", node),
        })
    }

    fn require_mut(
        &mut self,
        node: NodeId,
        operation: &'static str,
    ) -> Result<&mut SimNode, ReplayError> {
        self.nodes.get_mut(&node).ok_or(ReplayError::Backend {
            operation,
            message: format!("node {} does not exist", node),
        })
    }

    fn prop_f64(&self, node: NodeId, name: &str) -> Option<f64> {
        match self.nodes.get(&node)?.props.get(name)? {
            PropertyValue::Double(d) => Some(*d),
            PropertyValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn clamp_to_range(&self, node: NodeId, value: f64) -> f64 {
        let mut clamped = value;
        if let Some(min) = self.prop_f64(node, "minimum") {
            clamped = clamped.max(min);
        }
        if let Some(max) = self.prop_f64(node, "maximum") {
            clamped = clamped.min(max);
        }
        clamped
    }

    fn apply_checked(&mut self, node: NodeId, checked: bool) {
        let (kind, parent) = match self.nodes.get(&node) {
            Some(n) => (n.kind, n.parent),
            None => return,
        };

        self.set_prop(node, "checked", PropertyValue::Bool(checked));

        // Radio groups are exclusive within one parent
        if kind == WidgetKind::RadioButton && checked {
            if let Some(parent) = parent {
                let siblings: Vec<NodeId> = self
                    .nodes
                    .get(&parent)
                    .map(|p| p.children.clone())
                    .unwrap_or_default();
                for sibling in siblings {
                    if sibling != node {
                        if let Some(s) = self.nodes.get(&sibling) {
                            if s.kind == WidgetKind::RadioButton {
                                self.set_prop(sibling, "checked", PropertyValue::Bool(false));
                            }
                        }
                    }
                }
            }
        }
    }

    fn queue_click_effects(&mut self, node: NodeId) {
        if let Some(n) = self.nodes.get(&node) {
            let effects = n.click_effects.clone();
            self.deferred.extend(effects);
        }
    }
}

impl Default for SimTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectTree for SimTree {
    fn root(&self) -> NodeId {
        self.root
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        let parent = match self.nodes.get(&node) {
            Some(n) => n,
            None => return Vec::new(),
        };

        let mut visible = Vec::new();
        for &child_id in &parent.children {
            let child = match self.nodes.get(&child_id) {
                Some(c) => c,
                None => continue,
            };
            if !child.attached {
                continue;
            }
            let countdown = child.reveal_countdown.get();
            if countdown > 0 {
                // One enumeration observed; the node materializes once
                // the countdown runs out
                child.reveal_countdown.set(countdown - 1);
                continue;
            }
            visible.push(child_id);
        }
        visible
    }

    fn class_name(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map(|n| n.class_name.clone())
            .unwrap_or_default()
    }

    fn object_name(&self, node: NodeId) -> String {
        self.nodes
            .get(&node)
            .map(|n| n.object_name.clone())
            .unwrap_or_default()
    }

    fn widget_kind(&self, node: NodeId) -> WidgetKind {
        self.nodes
            .get(&node)
            .map(|n| n.kind)
            .unwrap_or(WidgetKind::Other)
    }

    fn property(&self, node: NodeId, name: &str) -> Option<PropertyValue> {
        self.nodes.get(&node)?.props.get(name).cloned()
    }
}

impl UiDriver for SimTree {
    fn button_click(&mut self, node: NodeId) -> Result<(), ReplayError> {
        let (enabled, checkable, kind, checked) = {
            let n = self.require(node, "buttonClick")?;
            let checked = matches!(n.props.get("checked"), Some(PropertyValue::Bool(true)));
            (n.enabled(), n.checkable(), n.kind, checked)
        };

        // Clicks on disabled elements are delivered but have no effect
        if !enabled {
            return Ok(());
        }

        if checkable {
            let target = if kind == WidgetKind::RadioButton {
                true
            } else {
                !checked
            };
            self.apply_checked(node, target);
        }

        self.queue_click_effects(node);
        Ok(())
    }

    fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<(), ReplayError> {
        let (enabled, checkable) = {
            let n = self.require(node, "checkButton")?;
            (n.enabled(), n.checkable())
        };

        if !checkable {
            return Err(ReplayError::Backend {
                operation: "checkButton",
                message: "element is not checkable".to_string(),
            });
        }
        if !enabled {
            return Ok(());
        }

        self.apply_checked(node, checked);
        self.queue_click_effects(node);
        Ok(())
    }

    fn post_mouse_click(
        &mut self,
        node: NodeId,
        _button: MouseButton,
        _x: i32,
        _y: i32,
    ) -> Result<(), ReplayError> {
        self.require(node, "mouseClick")?;
        self.queue_click_effects(node);
        Ok(())
    }

    fn set_value(
        &mut self,
        node: NodeId,
        first: f64,
        second: Option<f64>,
    ) -> Result<(), ReplayError> {
        let kind = self.require(node, "setValue")?.kind;

        match kind {
            WidgetKind::RangeSlider => {
                let second = second.ok_or(ReplayError::Backend {
                    operation: "setValue",
                    message: "range slider needs both handle values".to_string(),
                })?;
                let first = self.clamp_to_range(node, first);
                let second = self.clamp_to_range(node, second);
                self.set_prop(node, "firstValue", PropertyValue::Double(first));
                self.set_prop(node, "secondValue", PropertyValue::Double(second));
            }
            WidgetKind::SpinBox => {
                let value = self.clamp_to_range(node, first).round() as i64;
                self.set_prop(node, "value", PropertyValue::Int(value));
            }
            _ => {
                let value = self.clamp_to_range(node, first);
                self.set_prop(node, "value", PropertyValue::Double(value));
            }
        }
        Ok(())
    }

    fn set_date(&mut self, node: NodeId, date: CalendarDate) -> Result<(), ReplayError> {
        self.require(node, "setValue")?;
        self.set_prop(node, "selectedDate", PropertyValue::Date(date));
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), ReplayError> {
        let kind = self.require(node, "setText")?.kind;

        match kind {
            WidgetKind::SpinBox => {
                let value = parse_decimal(text).ok_or(ReplayError::Backend {
                    operation: "setText",
                    message: format!("'{}' is not numeric", text),
                })?;
                let value = self.clamp_to_range(node, value).round() as i64;
                self.set_prop(node, "value", PropertyValue::Int(value));
            }
            WidgetKind::DoubleSpinBox => {
                let value = parse_decimal(text).ok_or(ReplayError::Backend {
                    operation: "setText",
                    message: format!("'{}' is not numeric", text),
                })?;
                let value = self.clamp_to_range(node, value);
                self.set_prop(node, "value", PropertyValue::Double(value));
            }
            WidgetKind::DateTimeEdit => {
                let (date, time) = parse_date_time_text(text).ok_or(ReplayError::Backend {
                    operation: "setText",
                    message: format!("'{}' is not a date, time, or date-time", text),
                })?;
                match (date, time) {
                    (Some(d), Some(t)) => {
                        self.set_prop(node, "dateTime", PropertyValue::DateTime(d, t))
                    }
                    (Some(d), None) => self.set_prop(node, "date", PropertyValue::Date(d)),
                    (None, Some(t)) => self.set_prop(node, "time", PropertyValue::Time(t)),
                    (None, None) => {}
                }
            }
            WidgetKind::ComboBox => {
                self.set_prop(node, "text", PropertyValue::Text(text.to_string()));
                self.set_prop(node, "currentText", PropertyValue::Text(text.to_string()));
            }
            _ => {
                self.set_prop(node, "text", PropertyValue::Text(text.to_string()));
            }
        }
        Ok(())
    }

    fn set_delegate_text(
        &mut self,
        node: NodeId,
        delegate: &DelegateRef,
        text: &str,
    ) -> Result<(), ReplayError> {
        let n = self.require_mut(node, "setText")?;
        match delegate {
            DelegateRef::Cell { row, column } => {
                let table = n.table.as_mut().ok_or(ReplayError::Backend {
                    operation: "setText",
                    message: "element has no cell grid".to_string(),
                })?;
                let cell = table
                    .rows
                    .get_mut(*row)
                    .and_then(|r| r.get_mut(*column))
                    .ok_or(ReplayError::Backend {
                        operation: "setText",
                        message: format!("cell ({}, {}) is out of range", row, column),
                    })?;
                *cell = text.to_string();
            }
            DelegateRef::Path(path) => {
                let item =
                    tree_item_mut(&mut n.tree_items, path).ok_or(ReplayError::Backend {
                        operation: "setText",
                        message: format!("no tree item at path {:?}", path),
                    })?;
                item.text = text.to_string();
            }
        }
        Ok(())
    }

    fn step_value(&mut self, node: NodeId, direction: StepDirection) -> Result<(), ReplayError> {
        self.require(node, "changeValue")?;

        let single = self.prop_f64(node, "singleStep").unwrap_or(1.0);
        let page = self.prop_f64(node, "pageStep").unwrap_or(10.0);
        let current = self.prop_f64(node, "value").unwrap_or(0.0);

        let next = match direction {
            StepDirection::Up | StepDirection::SingleStepAdd => current + single,
            StepDirection::Down | StepDirection::SingleStepSub => current - single,
            StepDirection::PageStepAdd => current + page,
            StepDirection::PageStepSub => current - page,
            StepDirection::ToMinimum => self.prop_f64(node, "minimum").unwrap_or(current),
            StepDirection::ToMaximum => self.prop_f64(node, "maximum").unwrap_or(current),
        };
        let next = self.clamp_to_range(node, next);

        let value = match self.nodes.get(&node).and_then(|n| n.props.get("value")) {
            Some(PropertyValue::Int(_)) => PropertyValue::Int(next.round() as i64),
            _ => PropertyValue::Double(next),
        };
        self.set_prop(node, "value", value);
        Ok(())
    }

    fn set_delay_progress(&mut self, node: NodeId, fraction: f64) -> Result<(), ReplayError> {
        self.require(node, "setDelayProgress")?;
        self.set_prop(
            node,
            "progress",
            PropertyValue::Double(fraction.clamp(0.0, 1.0)),
        );
        Ok(())
    }

    fn select_item(&mut self, node: NodeId, index: usize) -> Result<(), ReplayError> {
        let text = {
            let n = self.require(node, "selectItem")?;
            n.items.get(index).cloned().ok_or(ReplayError::Backend {
                operation: "selectItem",
                message: format!("item index {} out of range ({} items)", index, n.items.len()),
            })?
        };
        self.set_prop(node, "currentIndex", PropertyValue::Int(index as i64));
        self.set_prop(node, "currentText", PropertyValue::Text(text));
        Ok(())
    }

    fn select_tab(&mut self, node: NodeId, index: usize) -> Result<(), ReplayError> {
        let (count, target) = {
            let n = self.require(node, "selectTabItem")?;
            (n.items.len(), n.tab_target)
        };
        if index >= count {
            return Err(ReplayError::Backend {
                operation: "selectTabItem",
                message: format!("tab index {} out of range ({} tabs)", index, count),
            });
        }
        self.set_prop(node, "currentIndex", PropertyValue::Int(index as i64));
        if let Some(pages) = target {
            self.set_prop(pages, "currentIndex", PropertyValue::Int(index as i64));
        }
        self.queue_click_effects(node);
        Ok(())
    }

    fn delegate_click(
        &mut self,
        node: NodeId,
        delegate: &DelegateRef,
        double: bool,
    ) -> Result<(), ReplayError> {
        let operation = if double {
            "delegateDblClick"
        } else {
            "delegateClick"
        };
        let n = self.require(node, operation)?;

        match delegate {
            DelegateRef::Cell { row, column } => {
                let table = n.table.as_ref().ok_or(ReplayError::Backend {
                    operation,
                    message: "element has no cell grid".to_string(),
                })?;
                if *row >= table.row_count() || *column >= table.column_count() {
                    return Err(ReplayError::Backend {
                        operation,
                        message: format!("cell ({}, {}) is out of range", row, column),
                    });
                }
                self.set_prop(node, "currentRow", PropertyValue::Int(*row as i64));
                self.set_prop(node, "currentColumn", PropertyValue::Int(*column as i64));
            }
            DelegateRef::Path(path) => {
                let text = tree_item(&n.tree_items, path)
                    .map(|item| item.text.clone())
                    .ok_or(ReplayError::Backend {
                        operation,
                        message: format!("no tree item at path {:?}", path),
                    })?;
                self.set_prop(node, "currentItem", PropertyValue::Text(text));
            }
        }
        self.queue_click_effects(node);
        Ok(())
    }

    fn set_expanded(
        &mut self,
        node: NodeId,
        path: &[usize],
        expanded: bool,
    ) -> Result<(), ReplayError> {
        let operation = if expanded {
            "expandDelegate"
        } else {
            "collapseDelegate"
        };
        let n = self.require_mut(node, operation)?;
        let item = tree_item_mut(&mut n.tree_items, path).ok_or(ReplayError::Backend {
            operation,
            message: format!("no tree item at path {:?}", path),
        })?;
        item.expanded = expanded;
        Ok(())
    }

    fn set_selection(
        &mut self,
        node: NodeId,
        entries: &[SelectionEntry],
    ) -> Result<(), ReplayError> {
        let n = self.require_mut(node, "setSelection")?;
        let table = n.table.as_mut().ok_or(ReplayError::Backend {
            operation: "setSelection",
            message: "element has no cell grid".to_string(),
        })?;

        let row_count = table.row_count();
        let column_count = table.column_count();

        // A new selection replaces the previous one
        table.selected.clear();
        for entry in entries {
            let rows: Vec<usize> = match entry.row {
                RowOrCol::Index(r) if r < row_count => vec![r],
                RowOrCol::Index(r) => {
                    return Err(ReplayError::Backend {
                        operation: "setSelection",
                        message: format!("row {} out of range ({} rows)", r, row_count),
                    });
                }
                RowOrCol::All => (0..row_count).collect(),
            };
            let columns: Vec<usize> = match entry.column {
                RowOrCol::Index(c) if c < column_count => vec![c],
                RowOrCol::Index(c) => {
                    return Err(ReplayError::Backend {
                        operation: "setSelection",
                        message: format!("column {} out of range ({} columns)", c, column_count),
                    });
                }
                RowOrCol::All => (0..column_count).collect(),
            };
            for &row in &rows {
                for &column in &columns {
                    table.selected.insert((row, column));
                }
            }
        }
        Ok(())
    }

    fn trigger_action(&mut self, node: NodeId, checked: Option<bool>) -> Result<(), ReplayError> {
        let (enabled, checkable) = {
            let n = self.require(node, "triggerAction")?;
            (n.enabled(), n.checkable())
        };
        if !enabled {
            return Ok(());
        }
        if let Some(checked) = checked {
            if checkable {
                self.apply_checked(node, checked);
            }
        }
        self.queue_click_effects(node);
        Ok(())
    }

    fn settle(&mut self, _timeout_ms: u64) -> Result<(), ReplayError> {
        // The simulator's event queue drains instantly; the timeout
        // ceiling only matters for real toolkits
        while let Some(op) = self.deferred.pop_front() {
            match op {
                DeferredOp::Attach { node } => {
                    if let Some(n) = self.nodes.get_mut(&node) {
                        n.attached = true;
                    }
                }
                DeferredOp::Detach { node } => {
                    if let Some(n) = self.nodes.get_mut(&node) {
                        n.attached = false;
                    }
                }
                DeferredOp::SetProperty { node, name, value } => {
                    self.set_prop(node, &name, value);
                }
            }
        }
        self.settle_count += 1;
        Ok(())
    }
}
