use std::fmt;

use crate::adapter::capability::Verb;
use crate::tree::tree_model::WidgetKind;

/// Engine-wide error taxonomy.
///
/// Every variant except verification mismatch (which is an outcome, not
/// an error) is fatal to the current script: remaining lines are skipped
/// and already-collected outcomes are still reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// Address text failed to parse. Never retried.
    MalformedAddress { input: String, reason: String },

    /// No element matched a segment after exhausting the retry budget.
    ElementNotFound {
        path: String,
        segment: String,
        attempted_index: usize,
        available_count: usize,
        attempts: u32,
        interval_ms: u64,
    },

    /// The resolved element's kind does not support the verb.
    UnsupportedAction { verb: Verb, kind: WidgetKind },

    /// Arguments did not match the adapter's declared shape.
    InvalidArgument { verb: Verb, reason: String },

    /// Verification named a property the element does not have.
    UnknownProperty { property: String, kind: WidgetKind },

    /// The toolkit collaborator reported a failure for a primitive.
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::MalformedAddress { input, reason } => {
                write!(f, "Malformed address '{}': {}", input, reason)
            }
            ReplayError::ElementNotFound {
                path,
                segment,
                attempted_index,
                available_count,
                attempts,
                interval_ms,
            } => {
                write!(
                    f,
                    "Failed to find the element at path '{}' (segment '{}' selects index {} \
                     but only {} candidates exist) after {} attempts with an interval of {} ms",
                    path, segment, attempted_index, available_count, attempts, interval_ms
                )
            }
            ReplayError::UnsupportedAction { verb, kind } => {
                write!(
                    f,
                    "Action '{}' is not supported by {} elements",
                    verb.as_str(),
                    kind.as_str()
                )
            }
            ReplayError::InvalidArgument { verb, reason } => {
                write!(f, "Invalid arguments for '{}': {}", verb.as_str(), reason)
            }
            ReplayError::UnknownProperty { property, kind } => {
                write!(
                    f,
                    "Unknown property name '{}' on {} element",
                    property,
                    kind.as_str()
                )
            }
            ReplayError::Backend { operation, message } => {
                write!(f, "Toolkit failure during '{}': {}", operation, message)
            }
        }
    }
}

impl std::error::Error for ReplayError {}
