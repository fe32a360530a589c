use crate::adapter::adapters::{
    ActionAdapter, CalendarAdapter, CapabilityAdapter, ComboBoxAdapter, DateTimeEditAdapter,
    DelayButtonAdapter, GenericAdapter, RangeAdapter, RangeSliderAdapter, SpinBoxAdapter,
    TabBarAdapter, TableViewAdapter, TextEditAdapter, ToggleButtonAdapter, TreeViewAdapter,
};
use crate::tree::tree_model::WidgetKind;

static TOGGLE_BUTTON: ToggleButtonAdapter = ToggleButtonAdapter;
static DELAY_BUTTON: DelayButtonAdapter = DelayButtonAdapter;
static RANGE: RangeAdapter = RangeAdapter;
static RANGE_SLIDER: RangeSliderAdapter = RangeSliderAdapter;
static SPIN_BOX: SpinBoxAdapter = SpinBoxAdapter;
static COMBO_BOX: ComboBoxAdapter = ComboBoxAdapter;
static CALENDAR: CalendarAdapter = CalendarAdapter;
static DATE_TIME_EDIT: DateTimeEditAdapter = DateTimeEditAdapter;
static TEXT_EDIT: TextEditAdapter = TextEditAdapter;
static TAB_BAR: TabBarAdapter = TabBarAdapter;
static TABLE_VIEW: TableViewAdapter = TableViewAdapter;
static TREE_VIEW: TreeViewAdapter = TreeViewAdapter;
static ACTION: ActionAdapter = ActionAdapter;
static GENERIC: GenericAdapter = GenericAdapter;

/// Every distinct adapter family, for callers that reason about the
/// verb taxonomy without a resolved element (static script checking).
pub fn distinct_adapters() -> [&'static dyn CapabilityAdapter; 14] {
    [
        &TOGGLE_BUTTON,
        &DELAY_BUTTON,
        &RANGE,
        &RANGE_SLIDER,
        &SPIN_BOX,
        &COMBO_BOX,
        &CALENDAR,
        &DATE_TIME_EDIT,
        &TEXT_EDIT,
        &TAB_BAR,
        &TABLE_VIEW,
        &TREE_VIEW,
        &ACTION,
        &GENERIC,
    ]
}

/// Select the capability adapter for a resolved element's kind tag.
///
/// Total over `WidgetKind`: kinds without a dedicated family fall back
/// to the generic pointer-input adapter.
pub fn adapter_for(kind: WidgetKind) -> &'static dyn CapabilityAdapter {
    match kind {
        WidgetKind::PushButton
        | WidgetKind::RadioButton
        | WidgetKind::CheckBox
        | WidgetKind::Switch => &TOGGLE_BUTTON,
        WidgetKind::DelayButton => &DELAY_BUTTON,
        WidgetKind::Slider | WidgetKind::Dial | WidgetKind::ScrollBar => &RANGE,
        WidgetKind::RangeSlider => &RANGE_SLIDER,
        WidgetKind::SpinBox | WidgetKind::DoubleSpinBox => &SPIN_BOX,
        WidgetKind::ComboBox => &COMBO_BOX,
        WidgetKind::Calendar => &CALENDAR,
        WidgetKind::DateTimeEdit => &DATE_TIME_EDIT,
        WidgetKind::LineEdit | WidgetKind::TextEdit => &TEXT_EDIT,
        WidgetKind::TabBar => &TAB_BAR,
        WidgetKind::ItemView => &TABLE_VIEW,
        WidgetKind::TreeView => &TREE_VIEW,
        WidgetKind::MenuAction => &ACTION,
        WidgetKind::Window | WidgetKind::Label | WidgetKind::Other => &GENERIC,
    }
}
