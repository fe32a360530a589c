use crate::tree::tree_model::{CalendarDate, ClockTime, FontDescriptor, PropertyValue};

/// Convert a property value to its canonical text form.
///
/// The rules are fixed per type so that recorded expectations compare
/// byte-for-byte across runs:
/// - booleans as `true` / `false`
/// - integers in plain decimal
/// - doubles in their shortest round-trip form (`0.5`, `3.22`, `68`)
/// - enum tokens verbatim
/// - dates as `YYYY-MM-DD`, times as `HH:MM:SS`, combined as
///   `YYYY-MM-DDTHH:MM:SS`
/// - fonts as the comma-joined field order
///   `family,pointSize,pixelSize,styleHint,weight,italic,underline,strikeout,fixedPitch,raw`
pub fn canonical_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        PropertyValue::Int(i) => i.to_string(),
        PropertyValue::Double(d) => format_double(*d),
        PropertyValue::Text(s) => s.clone(),
        PropertyValue::EnumToken(token) => token.clone(),
        PropertyValue::Date(date) => format_date(date),
        PropertyValue::Time(time) => format_time(time),
        PropertyValue::DateTime(date, time) => {
            format!("{}T{}", format_date(date), format_time(time))
        }
        PropertyValue::Font(font) => format_font(font),
    }
}

/// Shortest form that round-trips to the same double: whole values print
/// without a fractional part (`68`), others at natural precision
/// (`0.5`, `3.22`).
fn format_double(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn format_date(date: &CalendarDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year, date.month, date.day)
}

fn format_time(time: &ClockTime) -> String {
    format!("{:02}:{:02}:{:02}", time.hour, time.minute, time.second)
}

fn format_font(font: &FontDescriptor) -> String {
    format!(
        "{},{},{},{},{},{},{},{},{},0",
        font.family,
        font.point_size,
        font.pixel_size,
        font.style_hint,
        font.weight,
        font.italic as u8,
        font.underline as u8,
        font.strikeout as u8,
        font.fixed_pitch as u8,
    )
}
