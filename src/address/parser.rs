use crate::address::address_model::{Address, LocatorSegment};
use crate::script::error::ReplayError;

/// Parse an address path like `n=MainWindow_0/n=toolBar_0/c=QToolButton_1`
/// into an ordered list of locator segments.
///
/// Each `/`-separated token is `c=<Identifier>` or `n=<Identifier>` with
/// an optional `_<index>` suffix. Identifiers may contain underscores
/// (`qt_tabwidget_stackedwidget_0`), so the index is the part after the
/// last underscore, and only when that part is all digits. A missing
/// index defaults to 0.
///
/// The parser is pure: it never touches the live tree and parsing the
/// same text twice yields equal addresses.
pub fn parse(text: &str) -> Result<Address, ReplayError> {
    if text.trim().is_empty() {
        return Err(malformed(text, "address is empty"));
    }

    let mut segments = Vec::new();
    for token in text.split('/') {
        segments.push(parse_segment(text, token)?);
    }

    Ok(Address::new(segments))
}

fn parse_segment(input: &str, token: &str) -> Result<LocatorSegment, ReplayError> {
    if token.is_empty() {
        return Err(malformed(input, "empty path segment"));
    }

    let (prefix, rest) = match token.split_once('=') {
        Some(parts) => parts,
        None => {
            return Err(malformed(
                input,
                &format!("segment '{}' has no locator prefix", token),
            ));
        }
    };

    let (identifier, index) = split_index(input, rest)?;
    if identifier.is_empty() {
        return Err(malformed(
            input,
            &format!("segment '{}' has an empty identifier", token),
        ));
    }

    match prefix {
        "c" => Ok(LocatorSegment::Class {
            class_name: identifier.to_string(),
            sibling_index: index,
        }),
        "n" => Ok(LocatorSegment::Name {
            object_name: identifier.to_string(),
            duplicate_index: index,
        }),
        other => Err(malformed(
            input,
            &format!("unknown locator prefix '{}' in segment '{}'", other, token),
        )),
    }
}

/// Split `rest` into (identifier, index) at the last underscore.
///
/// `tab_7_0` parses as identifier `tab_7` with index 0; `comboBox`
/// parses as identifier `comboBox` with the default index 0. A trailing
/// underscore (`lineEdit_`) is a malformed index.
fn split_index(input: &str, rest: &str) -> Result<(String, usize), ReplayError> {
    match rest.rsplit_once('_') {
        Some((identifier, suffix)) => {
            if suffix.is_empty() {
                return Err(malformed(
                    input,
                    &format!("segment '{}' has an empty index suffix", rest),
                ));
            }
            if suffix.chars().all(|c| c.is_ascii_digit()) {
                let index = suffix.parse::<usize>().map_err(|_| {
                    malformed(input, &format!("index '{}' is out of range", suffix))
                })?;
                Ok((identifier.to_string(), index))
            } else {
                // Underscore belongs to the identifier, no explicit index
                Ok((rest.to_string(), 0))
            }
        }
        None => Ok((rest.to_string(), 0)),
    }
}

fn malformed(input: &str, reason: &str) -> ReplayError {
    ReplayError::MalformedAddress {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
