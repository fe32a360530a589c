use serde::{Deserialize, Serialize};

use crate::tree::tree_model::{CalendarDate, ClockTime, MouseButton, SelectionEntry, StepDirection};

/// The closed verb taxonomy.
///
/// Serialized in the camelCase spelling the script records use
/// (`buttonClick`, `selectTabItem`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verb {
    ButtonClick,
    CheckButton,
    MouseClick,
    SetValue,
    SetText,
    ChangeValue,
    SetDelayProgress,
    SelectItem,
    SelectTabItem,
    DelegateClick,
    DelegateDblClick,
    ExpandDelegate,
    CollapseDelegate,
    SetSelection,
    TriggerAction,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::ButtonClick => "buttonClick",
            Verb::CheckButton => "checkButton",
            Verb::MouseClick => "mouseClick",
            Verb::SetValue => "setValue",
            Verb::SetText => "setText",
            Verb::ChangeValue => "changeValue",
            Verb::SetDelayProgress => "setDelayProgress",
            Verb::SelectItem => "selectItem",
            Verb::SelectTabItem => "selectTabItem",
            Verb::DelegateClick => "delegateClick",
            Verb::DelegateDblClick => "delegateDblClick",
            Verb::ExpandDelegate => "expandDelegate",
            Verb::CollapseDelegate => "collapseDelegate",
            Verb::SetSelection => "setSelection",
            Verb::TriggerAction => "triggerAction",
        }
    }
}

/// A typed script argument.
///
/// Untagged on the wire: `true`, `0.5`, `'LeftButton'`, `[0, 1]` and
/// `[{row: 'ALL', column: 2}]` all deserialize to the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    Text(String),
    IndexPath(Vec<usize>),
    Selection(Vec<SelectionEntry>),
}

impl ArgValue {
    fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "bool",
            ArgValue::Number(_) => "number",
            ArgValue::Text(_) => "string",
            ArgValue::IndexPath(_) => "index path",
            ArgValue::Selection(_) => "selection list",
        }
    }
}

/// Declared argument shape for one verb on one adapter.
///
/// The dispatcher validates arity, types, and ranges against the shape
/// before any primitive is invoked, so adapters never see malformed
/// argument lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgShape {
    /// No arguments
    Empty,
    /// One bool: the target checked state
    Checked,
    /// Zero arguments, or one bool checked state
    OptionalChecked,
    /// Mouse button token plus element-relative x, y
    MouseClick,
    /// One number
    Scalar,
    /// Two numbers (both handles of a ranged control)
    ScalarPair,
    /// One string
    Text,
    /// One string that parses as a number (`.` or `,` decimal separator)
    NumericText,
    /// One `YYYY-MM-DD` date string
    DateText,
    /// One date, time, or combined `YYYY-MM-DDTHH:MM:SS` string
    DateTimeText,
    /// Row, column, then the replacement text
    CellText,
    /// Index path, then the replacement text
    PathText,
    /// One step-direction token (`Up`, `PageStepAdd`, ...)
    StepToken,
    /// One number in [0, 1]
    Fraction,
    /// One non-negative integer index
    Index,
    /// Row and column integers
    Cell,
    /// One non-empty index path
    IndexPath,
    /// One non-empty selection-descriptor list
    SelectionList,
}

impl ArgShape {
    /// Check `args` against this shape. Returns the reason on mismatch.
    pub fn validate(&self, args: &[ArgValue]) -> Result<(), String> {
        match self {
            ArgShape::Empty => expect_arity(args, 0),
            ArgShape::Checked => {
                expect_arity(args, 1)?;
                expect_bool(args, 0).map(|_| ())
            }
            ArgShape::OptionalChecked => {
                if args.is_empty() {
                    return Ok(());
                }
                expect_arity(args, 1)?;
                expect_bool(args, 0).map(|_| ())
            }
            ArgShape::MouseClick => {
                expect_arity(args, 3)?;
                let token = expect_text(args, 0)?;
                if MouseButton::from_token(token).is_none() {
                    return Err(format!("unknown mouse button '{}'", token));
                }
                expect_integer(args, 1)?;
                expect_integer(args, 2)?;
                Ok(())
            }
            ArgShape::Scalar => {
                expect_arity(args, 1)?;
                expect_number(args, 0).map(|_| ())
            }
            ArgShape::ScalarPair => {
                expect_arity(args, 2)?;
                expect_number(args, 0)?;
                expect_number(args, 1)?;
                Ok(())
            }
            ArgShape::Text => {
                expect_arity(args, 1)?;
                expect_text(args, 0).map(|_| ())
            }
            ArgShape::NumericText => {
                expect_arity(args, 1)?;
                let text = expect_text(args, 0)?;
                parse_decimal(text)
                    .map(|_| ())
                    .ok_or_else(|| format!("'{}' is not a numeric value", text))
            }
            ArgShape::DateText => {
                expect_arity(args, 1)?;
                let text = expect_text(args, 0)?;
                CalendarDate::parse(text)
                    .map(|_| ())
                    .ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", text))
            }
            ArgShape::DateTimeText => {
                expect_arity(args, 1)?;
                let text = expect_text(args, 0)?;
                if parse_date_time_text(text).is_none() {
                    return Err(format!("'{}' is not a date, time, or date-time", text));
                }
                Ok(())
            }
            ArgShape::CellText => {
                expect_arity(args, 3)?;
                expect_index(args, 0)?;
                expect_index(args, 1)?;
                expect_text(args, 2).map(|_| ())
            }
            ArgShape::PathText => {
                expect_arity(args, 2)?;
                expect_path(args, 0)?;
                expect_text(args, 1).map(|_| ())
            }
            ArgShape::StepToken => {
                expect_arity(args, 1)?;
                let token = expect_text(args, 0)?;
                StepDirection::from_token(token)
                    .map(|_| ())
                    .ok_or_else(|| format!("unknown step token '{}'", token))
            }
            ArgShape::Fraction => {
                expect_arity(args, 1)?;
                let value = expect_number(args, 0)?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(format!("fraction {} is outside [0, 1]", value));
                }
                Ok(())
            }
            ArgShape::Index => {
                expect_arity(args, 1)?;
                expect_index(args, 0).map(|_| ())
            }
            ArgShape::Cell => {
                expect_arity(args, 2)?;
                expect_index(args, 0)?;
                expect_index(args, 1)?;
                Ok(())
            }
            ArgShape::IndexPath => {
                expect_arity(args, 1)?;
                expect_path(args, 0).map(|_| ())
            }
            ArgShape::SelectionList => {
                expect_arity(args, 1)?;
                match args.first() {
                    Some(ArgValue::Selection(entries)) if !entries.is_empty() => Ok(()),
                    Some(ArgValue::Selection(_)) => Err("selection list is empty".to_string()),
                    Some(other) => Err(format!(
                        "expected a selection list, got {}",
                        other.type_name()
                    )),
                    None => Err("missing selection list".to_string()),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Typed argument accessors. Validation runs first, so adapters use these
// with `?` and the error text only surfaces on a dispatcher bug.
// ---------------------------------------------------------------------------

pub fn expect_arity(args: &[ArgValue], expected: usize) -> Result<(), String> {
    if args.len() != expected {
        return Err(format!(
            "expected {} argument(s), got {}",
            expected,
            args.len()
        ));
    }
    Ok(())
}

pub fn expect_bool(args: &[ArgValue], at: usize) -> Result<bool, String> {
    match args.get(at) {
        Some(ArgValue::Bool(b)) => Ok(*b),
        Some(other) => Err(format!(
            "argument {} must be a bool, got {}",
            at,
            other.type_name()
        )),
        None => Err(format!("missing argument {}", at)),
    }
}

pub fn expect_number(args: &[ArgValue], at: usize) -> Result<f64, String> {
    match args.get(at) {
        Some(ArgValue::Number(n)) => Ok(*n),
        Some(other) => Err(format!(
            "argument {} must be a number, got {}",
            at,
            other.type_name()
        )),
        None => Err(format!("missing argument {}", at)),
    }
}

/// A number that must be a whole value (pointer coordinates).
pub fn expect_integer(args: &[ArgValue], at: usize) -> Result<i32, String> {
    let value = expect_number(args, at)?;
    if value.fract() != 0.0 {
        return Err(format!("argument {} must be an integer, got {}", at, value));
    }
    Ok(value as i32)
}

/// A number that must be a non-negative whole value (item/row indexes).
pub fn expect_index(args: &[ArgValue], at: usize) -> Result<usize, String> {
    let value = expect_number(args, at)?;
    if value.fract() != 0.0 || value < 0.0 {
        return Err(format!(
            "argument {} must be a non-negative index, got {}",
            at, value
        ));
    }
    Ok(value as usize)
}

pub fn expect_text<'a>(args: &'a [ArgValue], at: usize) -> Result<&'a str, String> {
    match args.get(at) {
        Some(ArgValue::Text(s)) => Ok(s),
        Some(other) => Err(format!(
            "argument {} must be a string, got {}",
            at,
            other.type_name()
        )),
        None => Err(format!("missing argument {}", at)),
    }
}

pub fn expect_path<'a>(args: &'a [ArgValue], at: usize) -> Result<&'a [usize], String> {
    match args.get(at) {
        Some(ArgValue::IndexPath(path)) if !path.is_empty() => Ok(path),
        Some(ArgValue::IndexPath(_)) => Err(format!("argument {} is an empty index path", at)),
        Some(other) => Err(format!(
            "argument {} must be an index path, got {}",
            at,
            other.type_name()
        )),
        None => Err(format!("missing argument {}", at)),
    }
}

pub fn expect_selection<'a>(args: &'a [ArgValue], at: usize) -> Result<&'a [SelectionEntry], String> {
    match args.get(at) {
        Some(ArgValue::Selection(entries)) => Ok(entries),
        Some(other) => Err(format!(
            "argument {} must be a selection list, got {}",
            at,
            other.type_name()
        )),
        None => Err(format!("missing argument {}", at)),
    }
}

/// Parse a decimal string, accepting `,` as the decimal separator as
/// well as `.` (text entry into spin boxes is locale-tolerant).
pub fn parse_decimal(text: &str) -> Option<f64> {
    let normalized = text.trim().replace(',', ".");
    normalized.parse::<f64>().ok()
}

/// Parse a date, a time, or a combined `YYYY-MM-DDTHH:MM:SS` string.
pub fn parse_date_time_text(text: &str) -> Option<(Option<CalendarDate>, Option<ClockTime>)> {
    if let Some((date_part, time_part)) = text.split_once('T') {
        let date = CalendarDate::parse(date_part)?;
        let time = ClockTime::parse(time_part)?;
        return Some((Some(date), Some(time)));
    }
    if let Some(date) = CalendarDate::parse(text) {
        return Some((Some(date), None));
    }
    if let Some(time) = ClockTime::parse(text) {
        return Some((None, Some(time)));
    }
    None
}
