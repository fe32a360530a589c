use crate::script::error::ReplayError;
use crate::tree::tree_model::{ElementHandle, ObjectTree};
use crate::verify::canonical::canonical_text;

/// Result of comparing a live property against its expected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    Passed,
    Failed { expected: String, actual: String },
}

impl VerifyOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, VerifyOutcome::Passed)
    }
}

/// Read `property` off a resolved element, canonicalize it, and compare
/// byte-for-byte with `expected`.
///
/// A mismatch is an outcome, not an error: the runner records it and
/// continues. Naming a property the element does not have is fatal.
pub fn verify(
    tree: &dyn ObjectTree,
    handle: ElementHandle,
    property: &str,
    expected: &str,
) -> Result<VerifyOutcome, ReplayError> {
    let value = tree
        .property(handle.node, property)
        .ok_or_else(|| ReplayError::UnknownProperty {
            property: property.to_string(),
            kind: handle.kind,
        })?;

    let actual = canonical_text(&value);
    if actual == expected {
        Ok(VerifyOutcome::Passed)
    } else {
        Ok(VerifyOutcome::Failed {
            expected: expected.to_string(),
            actual,
        })
    }
}
