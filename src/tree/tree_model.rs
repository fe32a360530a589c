use serde::{Deserialize, Serialize};

use crate::script::error::ReplayError;

/// Opaque identifier of a live UI node inside the toolkit's object tree.
///
/// Only meaningful to the `ObjectTree` that produced it, and only until
/// the next structural mutation. The engine never stores node ids across
/// script lines; every line re-resolves its address from the root.
pub type NodeId = u64;

/// An ephemeral reference to a resolved element: the node plus the
/// widget-kind tag the adapter registry dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementHandle {
    pub node: NodeId,
    pub kind: WidgetKind,
}

/// Widget families the engine knows how to drive.
///
/// The tag is supplied by the toolkit collaborator for each node; the
/// adapter registry maps it to the set of verbs the element supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    PushButton,
    RadioButton,
    CheckBox,
    Switch,
    DelayButton,
    Slider,
    RangeSlider,
    Dial,
    ScrollBar,
    SpinBox,
    DoubleSpinBox,
    ComboBox,
    Calendar,
    DateTimeEdit,
    LineEdit,
    TextEdit,
    TabBar,
    ItemView,
    TreeView,
    MenuAction,
    Window,
    Label,
    Other,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::PushButton => "PushButton",
            WidgetKind::RadioButton => "RadioButton",
            WidgetKind::CheckBox => "CheckBox",
            WidgetKind::Switch => "Switch",
            WidgetKind::DelayButton => "DelayButton",
            WidgetKind::Slider => "Slider",
            WidgetKind::RangeSlider => "RangeSlider",
            WidgetKind::Dial => "Dial",
            WidgetKind::ScrollBar => "ScrollBar",
            WidgetKind::SpinBox => "SpinBox",
            WidgetKind::DoubleSpinBox => "DoubleSpinBox",
            WidgetKind::ComboBox => "ComboBox",
            WidgetKind::Calendar => "Calendar",
            WidgetKind::DateTimeEdit => "DateTimeEdit",
            WidgetKind::LineEdit => "LineEdit",
            WidgetKind::TextEdit => "TextEdit",
            WidgetKind::TabBar => "TabBar",
            WidgetKind::ItemView => "ItemView",
            WidgetKind::TreeView => "TreeView",
            WidgetKind::MenuAction => "MenuAction",
            WidgetKind::Window => "Window",
            WidgetKind::Label => "Label",
            WidgetKind::Other => "Other",
        }
    }
}

/// A calendar date as exposed by date-valued properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    /// Parse the `YYYY-MM-DD` form used by script arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.splitn(3, '-');
        let year = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(CalendarDate { year, month, day })
    }
}

/// A wall-clock time as exposed by time-valued properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    /// Parse the `HH:MM:SS` form used by script arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.splitn(3, ':');
        let hour: u32 = parts.next()?.parse().ok()?;
        let minute: u32 = parts.next()?.parse().ok()?;
        let second: u32 = parts.next()?.parse().ok()?;
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        Some(ClockTime {
            hour,
            minute,
            second,
        })
    }
}

/// A composite font descriptor with the stable field order used for
/// canonical text encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub family: String,
    pub point_size: i32,
    pub pixel_size: i32,
    pub style_hint: i32,
    pub weight: i32,
    pub italic: bool,
    pub underline: bool,
    pub strikeout: bool,
    pub fixed_pitch: bool,
}

/// A property value read off a live element.
///
/// The native type varies per property; the verification engine converts
/// each variant to a canonical text form before comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    EnumToken(String),
    Date(CalendarDate),
    Time(ClockTime),
    DateTime(CalendarDate, ClockTime),
    Font(FontDescriptor),
}

/// Mouse button tokens accepted by `mouseClick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "LeftButton" => Some(MouseButton::Left),
            "RightButton" => Some(MouseButton::Right),
            "MiddleButton" => Some(MouseButton::Middle),
            "BackButton" => Some(MouseButton::Back),
            "ForwardButton" => Some(MouseButton::Forward),
            _ => None,
        }
    }

    pub fn as_token(&self) -> &'static str {
        match self {
            MouseButton::Left => "LeftButton",
            MouseButton::Right => "RightButton",
            MouseButton::Middle => "MiddleButton",
            MouseButton::Back => "BackButton",
            MouseButton::Forward => "ForwardButton",
        }
    }
}

/// Discrete step tokens accepted by `changeValue` on stepped controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
    SingleStepAdd,
    SingleStepSub,
    PageStepAdd,
    PageStepSub,
    ToMinimum,
    ToMaximum,
}

impl StepDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Up" => Some(StepDirection::Up),
            "Down" => Some(StepDirection::Down),
            "SingleStepAdd" => Some(StepDirection::SingleStepAdd),
            "SingleStepSub" => Some(StepDirection::SingleStepSub),
            "PageStepAdd" => Some(StepDirection::PageStepAdd),
            "PageStepSub" => Some(StepDirection::PageStepSub),
            "ToMinimum" => Some(StepDirection::ToMinimum),
            "ToMaximum" => Some(StepDirection::ToMaximum),
            _ => None,
        }
    }
}

/// Position of a delegate inside an item view: a (row, column) cell for
/// table-like views, or a root-to-item index path for tree views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateRef {
    Cell { row: usize, column: usize },
    Path(Vec<usize>),
}

/// One rectangular selection descriptor for `setSelection`: each side is
/// either a concrete index or the `ALL` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub row: RowOrCol,
    pub column: RowOrCol,
}

/// An index or the `ALL` wildcard inside a selection descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrCol {
    Index(usize),
    All,
}

impl Serialize for RowOrCol {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            RowOrCol::Index(i) => serializer.serialize_u64(*i as u64),
            RowOrCol::All => serializer.serialize_str("ALL"),
        }
    }
}

impl<'de> Deserialize<'de> for RowOrCol {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct RowOrColVisitor;

        impl<'de> serde::de::Visitor<'de> for RowOrColVisitor {
            type Value = RowOrCol;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a non-negative index or the string \"ALL\"")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<RowOrCol, E> {
                Ok(RowOrCol::Index(v as usize))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<RowOrCol, E> {
                if v < 0 {
                    return Err(E::custom("selection index cannot be negative"));
                }
                Ok(RowOrCol::Index(v as usize))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<RowOrCol, E> {
                if v == "ALL" {
                    Ok(RowOrCol::All)
                } else {
                    Err(E::custom(format!("unknown selection wildcard '{}'", v)))
                }
            }
        }

        deserializer.deserialize_any(RowOrColVisitor)
    }
}

/// Read-only introspection of the live object tree, supplied by the
/// toolkit collaborator.
///
/// `children` returns direct children in creation/document order. The
/// root is a virtual container whose children are the application's
/// top-level windows.
pub trait ObjectTree {
    fn root(&self) -> NodeId;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
    fn class_name(&self, node: NodeId) -> String;
    fn object_name(&self, node: NodeId) -> String;
    fn widget_kind(&self, node: NodeId) -> WidgetKind;

    /// Read a named property. `None` means the element has no property
    /// with that name.
    fn property(&self, node: NodeId, name: &str) -> Option<PropertyValue>;
}

/// Input-injection primitives plus the settle wait, supplied by the
/// toolkit collaborator.
///
/// Every mutating primitive may enqueue structural tree mutations
/// (dialogs opening, tab pages swapping); `settle` blocks until those
/// have been applied and the tree is stable, or until the timeout
/// ceiling elapses.
pub trait UiDriver: ObjectTree {
    fn button_click(&mut self, node: NodeId) -> Result<(), ReplayError>;
    fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<(), ReplayError>;
    fn post_mouse_click(
        &mut self,
        node: NodeId,
        button: MouseButton,
        x: i32,
        y: i32,
    ) -> Result<(), ReplayError>;
    fn set_value(&mut self, node: NodeId, first: f64, second: Option<f64>)
    -> Result<(), ReplayError>;
    fn set_date(&mut self, node: NodeId, date: CalendarDate) -> Result<(), ReplayError>;
    fn set_text(&mut self, node: NodeId, text: &str) -> Result<(), ReplayError>;
    fn set_delegate_text(
        &mut self,
        node: NodeId,
        delegate: &DelegateRef,
        text: &str,
    ) -> Result<(), ReplayError>;
    fn step_value(&mut self, node: NodeId, direction: StepDirection) -> Result<(), ReplayError>;
    fn set_delay_progress(&mut self, node: NodeId, fraction: f64) -> Result<(), ReplayError>;
    fn select_item(&mut self, node: NodeId, index: usize) -> Result<(), ReplayError>;
    fn select_tab(&mut self, node: NodeId, index: usize) -> Result<(), ReplayError>;
    fn delegate_click(
        &mut self,
        node: NodeId,
        delegate: &DelegateRef,
        double: bool,
    ) -> Result<(), ReplayError>;
    fn set_expanded(
        &mut self,
        node: NodeId,
        path: &[usize],
        expanded: bool,
    ) -> Result<(), ReplayError>;
    fn set_selection(
        &mut self,
        node: NodeId,
        entries: &[SelectionEntry],
    ) -> Result<(), ReplayError>;
    fn trigger_action(&mut self, node: NodeId, checked: Option<bool>) -> Result<(), ReplayError>;

    /// Block until the toolkit's event queue has drained and the tree is
    /// stable, bounded by `timeout_ms`.
    fn settle(&mut self, timeout_ms: u64) -> Result<(), ReplayError>;
}
