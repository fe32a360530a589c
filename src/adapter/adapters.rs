use crate::adapter::capability::{
    ArgShape, ArgValue, Verb, expect_bool, expect_index, expect_integer, expect_number,
    expect_path, expect_selection, expect_text,
};
use crate::script::error::ReplayError;
use crate::tree::tree_model::{
    CalendarDate, DelegateRef, ElementHandle, MouseButton, NodeId, PropertyValue, StepDirection,
    UiDriver,
};

/// Per-widget-family mapping from verb to concrete primitive.
///
/// Each adapter advertises the argument shape of every verb it supports;
/// the dispatcher validates against that shape before `invoke` runs, so
/// the typed accessors in `invoke` cannot fail on well-formed dispatch.
pub trait CapabilityAdapter: Sync {
    /// Family name used in reports and error messages.
    fn family(&self) -> &'static str;

    /// The argument shape for `verb`, or `None` when the family does not
    /// support it.
    fn shape_for(&self, verb: Verb) -> Option<ArgShape>;

    /// Invoke the primitive for an already-validated (verb, args) pair.
    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError>;
}

fn arg_error(verb: Verb) -> impl FnOnce(String) -> ReplayError {
    move |reason| ReplayError::InvalidArgument { verb, reason }
}

fn unsupported(verb: Verb, handle: ElementHandle) -> ReplayError {
    ReplayError::UnsupportedAction {
        verb,
        kind: handle.kind,
    }
}

/// Shared `mouseClick` invocation: token and coordinates were validated
/// by `ArgShape::MouseClick`.
fn invoke_mouse_click(
    driver: &mut dyn UiDriver,
    node: NodeId,
    args: &[ArgValue],
) -> Result<(), ReplayError> {
    let verb = Verb::MouseClick;
    let token = expect_text(args, 0).map_err(arg_error(verb))?;
    let button = MouseButton::from_token(token).ok_or_else(|| ReplayError::InvalidArgument {
        verb,
        reason: format!("unknown mouse button '{}'", token),
    })?;
    let x = expect_integer(args, 1).map_err(arg_error(verb))?;
    let y = expect_integer(args, 2).map_err(arg_error(verb))?;
    driver.post_mouse_click(node, button, x, y)
}

/// Shared `checkButton` invocation: drives toward the target state, a
/// no-op when the element is already there.
fn invoke_check_button(
    driver: &mut dyn UiDriver,
    node: NodeId,
    args: &[ArgValue],
) -> Result<(), ReplayError> {
    let target = expect_bool(args, 0).map_err(arg_error(Verb::CheckButton))?;
    if let Some(PropertyValue::Bool(current)) = driver.property(node, "checked") {
        if current == target {
            return Ok(());
        }
    }
    driver.set_checked(node, target)
}

fn invoke_step(
    driver: &mut dyn UiDriver,
    node: NodeId,
    args: &[ArgValue],
) -> Result<(), ReplayError> {
    let verb = Verb::ChangeValue;
    let token = expect_text(args, 0).map_err(arg_error(verb))?;
    let direction = StepDirection::from_token(token).ok_or_else(|| ReplayError::InvalidArgument {
        verb,
        reason: format!("unknown step token '{}'", token),
    })?;
    driver.step_value(node, direction)
}

// ============================================================================
// Clickable / toggleable buttons (push buttons, radio buttons, check
// boxes, switches)
// ============================================================================

pub struct ToggleButtonAdapter;

impl CapabilityAdapter for ToggleButtonAdapter {
    fn family(&self) -> &'static str {
        "button"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::ButtonClick => Some(ArgShape::Empty),
            Verb::CheckButton => Some(ArgShape::Checked),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::ButtonClick => driver.button_click(handle.node),
            Verb::CheckButton => invoke_check_button(driver, handle.node, args),
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Delay buttons (press-and-hold progress)
// ============================================================================

pub struct DelayButtonAdapter;

impl CapabilityAdapter for DelayButtonAdapter {
    fn family(&self) -> &'static str {
        "delay button"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::ButtonClick => Some(ArgShape::Empty),
            Verb::CheckButton => Some(ArgShape::Checked),
            Verb::SetDelayProgress => Some(ArgShape::Fraction),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::ButtonClick => driver.button_click(handle.node),
            Verb::CheckButton => invoke_check_button(driver, handle.node, args),
            Verb::SetDelayProgress => {
                let fraction = expect_number(args, 0).map_err(arg_error(verb))?;
                driver.set_delay_progress(handle.node, fraction)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Single-handle ranged controls (sliders, dials, scroll bars)
// ============================================================================

pub struct RangeAdapter;

impl CapabilityAdapter for RangeAdapter {
    fn family(&self) -> &'static str {
        "ranged control"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetValue => Some(ArgShape::Scalar),
            Verb::ChangeValue => Some(ArgShape::StepToken),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetValue => {
                let value = expect_number(args, 0).map_err(arg_error(verb))?;
                driver.set_value(handle.node, value, None)
            }
            Verb::ChangeValue => invoke_step(driver, handle.node, args),
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Two-handle range sliders
// ============================================================================

pub struct RangeSliderAdapter;

impl CapabilityAdapter for RangeSliderAdapter {
    fn family(&self) -> &'static str {
        "range slider"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetValue => Some(ArgShape::ScalarPair),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetValue => {
                let first = expect_number(args, 0).map_err(arg_error(verb))?;
                let second = expect_number(args, 1).map_err(arg_error(verb))?;
                driver.set_value(handle.node, first, Some(second))
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Spin boxes (integer and double)
// ============================================================================

pub struct SpinBoxAdapter;

impl CapabilityAdapter for SpinBoxAdapter {
    fn family(&self) -> &'static str {
        "spin box"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetValue => Some(ArgShape::Scalar),
            Verb::SetText => Some(ArgShape::NumericText),
            Verb::ChangeValue => Some(ArgShape::StepToken),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetValue => {
                let value = expect_number(args, 0).map_err(arg_error(verb))?;
                driver.set_value(handle.node, value, None)
            }
            Verb::SetText => {
                let text = expect_text(args, 0).map_err(arg_error(verb))?;
                driver.set_text(handle.node, text)
            }
            Verb::ChangeValue => invoke_step(driver, handle.node, args),
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Combo boxes
// ============================================================================

pub struct ComboBoxAdapter;

impl CapabilityAdapter for ComboBoxAdapter {
    fn family(&self) -> &'static str {
        "combo box"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SelectItem => Some(ArgShape::Index),
            Verb::SetText => Some(ArgShape::Text),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SelectItem => {
                let index = expect_index(args, 0).map_err(arg_error(verb))?;
                driver.select_item(handle.node, index)
            }
            Verb::SetText => {
                let text = expect_text(args, 0).map_err(arg_error(verb))?;
                driver.set_text(handle.node, text)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Calendars
// ============================================================================

pub struct CalendarAdapter;

impl CapabilityAdapter for CalendarAdapter {
    fn family(&self) -> &'static str {
        "calendar"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetValue => Some(ArgShape::DateText),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetValue => {
                let text = expect_text(args, 0).map_err(arg_error(verb))?;
                let date =
                    CalendarDate::parse(text).ok_or_else(|| ReplayError::InvalidArgument {
                        verb,
                        reason: format!("'{}' is not a YYYY-MM-DD date", text),
                    })?;
                driver.set_date(handle.node, date)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Date/time editors (date, time, and combined editors)
// ============================================================================

pub struct DateTimeEditAdapter;

impl CapabilityAdapter for DateTimeEditAdapter {
    fn family(&self) -> &'static str {
        "date/time editor"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetText => Some(ArgShape::DateTimeText),
            Verb::ChangeValue => Some(ArgShape::StepToken),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetText => {
                let text = expect_text(args, 0).map_err(arg_error(verb))?;
                driver.set_text(handle.node, text)
            }
            Verb::ChangeValue => invoke_step(driver, handle.node, args),
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Plain text editors (line edits, text edits)
// ============================================================================

pub struct TextEditAdapter;

impl CapabilityAdapter for TextEditAdapter {
    fn family(&self) -> &'static str {
        "text editor"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SetText => Some(ArgShape::Text),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SetText => {
                let text = expect_text(args, 0).map_err(arg_error(verb))?;
                driver.set_text(handle.node, text)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Tab bars
// ============================================================================

pub struct TabBarAdapter;

impl CapabilityAdapter for TabBarAdapter {
    fn family(&self) -> &'static str {
        "tab bar"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::SelectTabItem => Some(ArgShape::Index),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::SelectTabItem => {
                let index = expect_index(args, 0).map_err(arg_error(verb))?;
                driver.select_tab(handle.node, index)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Table-like item views (row/column delegates)
// ============================================================================

pub struct TableViewAdapter;

impl CapabilityAdapter for TableViewAdapter {
    fn family(&self) -> &'static str {
        "table view"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::DelegateClick | Verb::DelegateDblClick => Some(ArgShape::Cell),
            Verb::SetText => Some(ArgShape::CellText),
            Verb::SetSelection => Some(ArgShape::SelectionList),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::DelegateClick | Verb::DelegateDblClick => {
                let row = expect_index(args, 0).map_err(arg_error(verb))?;
                let column = expect_index(args, 1).map_err(arg_error(verb))?;
                let delegate = DelegateRef::Cell { row, column };
                driver.delegate_click(handle.node, &delegate, verb == Verb::DelegateDblClick)
            }
            Verb::SetText => {
                let row = expect_index(args, 0).map_err(arg_error(verb))?;
                let column = expect_index(args, 1).map_err(arg_error(verb))?;
                let text = expect_text(args, 2).map_err(arg_error(verb))?;
                driver.set_delegate_text(handle.node, &DelegateRef::Cell { row, column }, text)
            }
            Verb::SetSelection => {
                let entries = expect_selection(args, 0).map_err(arg_error(verb))?;
                driver.set_selection(handle.node, entries)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Tree views (index-path delegates)
// ============================================================================

pub struct TreeViewAdapter;

impl CapabilityAdapter for TreeViewAdapter {
    fn family(&self) -> &'static str {
        "tree view"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::DelegateClick | Verb::DelegateDblClick => Some(ArgShape::IndexPath),
            Verb::ExpandDelegate | Verb::CollapseDelegate => Some(ArgShape::IndexPath),
            Verb::SetText => Some(ArgShape::PathText),
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::DelegateClick | Verb::DelegateDblClick => {
                let path = expect_path(args, 0).map_err(arg_error(verb))?;
                let delegate = DelegateRef::Path(path.to_vec());
                driver.delegate_click(handle.node, &delegate, verb == Verb::DelegateDblClick)
            }
            Verb::ExpandDelegate | Verb::CollapseDelegate => {
                let path = expect_path(args, 0).map_err(arg_error(verb))?;
                driver.set_expanded(handle.node, path, verb == Verb::ExpandDelegate)
            }
            Verb::SetText => {
                let path = expect_path(args, 0).map_err(arg_error(verb))?;
                let text = expect_text(args, 1).map_err(arg_error(verb))?;
                driver.set_delegate_text(handle.node, &DelegateRef::Path(path.to_vec()), text)
            }
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Command actions (menu/toolbar action objects)
// ============================================================================

pub struct ActionAdapter;

impl CapabilityAdapter for ActionAdapter {
    fn family(&self) -> &'static str {
        "action"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::TriggerAction => Some(ArgShape::OptionalChecked),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::TriggerAction => {
                let checked = if args.is_empty() {
                    None
                } else {
                    Some(expect_bool(args, 0).map_err(arg_error(verb))?)
                };
                driver.trigger_action(handle.node, checked)
            }
            _ => Err(unsupported(verb, handle)),
        }
    }
}

// ============================================================================
// Everything else (windows, labels, plain items): pointer input only
// ============================================================================

pub struct GenericAdapter;

impl CapabilityAdapter for GenericAdapter {
    fn family(&self) -> &'static str {
        "generic element"
    }

    fn shape_for(&self, verb: Verb) -> Option<ArgShape> {
        match verb {
            Verb::MouseClick => Some(ArgShape::MouseClick),
            _ => None,
        }
    }

    fn invoke(
        &self,
        driver: &mut dyn UiDriver,
        handle: ElementHandle,
        verb: Verb,
        args: &[ArgValue],
    ) -> Result<(), ReplayError> {
        match verb {
            Verb::MouseClick => invoke_mouse_click(driver, handle.node, args),
            _ => Err(unsupported(verb, handle)),
        }
    }
}
