use std::fmt;

use serde::{Deserialize, Serialize};

/// One hop in an address path.
///
/// A segment either matches by runtime class name among the parent's
/// direct children, or by assigned object name anywhere in the subtree
/// below the current node. Both carry a 0-based disambiguating index
/// for duplicate matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocatorSegment {
    /// `c=<ClassName>_<index>`: nth same-class child of the current node
    Class {
        class_name: String,
        sibling_index: usize,
    },

    /// `n=<objectName>_<index>`: nth same-name element in the subtree
    Name {
        object_name: String,
        duplicate_index: usize,
    },
}

impl LocatorSegment {
    /// The identifier this segment matches against (class or object name).
    pub fn identifier(&self) -> &str {
        match self {
            LocatorSegment::Class { class_name, .. } => class_name,
            LocatorSegment::Name { object_name, .. } => object_name,
        }
    }

    /// The disambiguating index of this segment.
    pub fn index(&self) -> usize {
        match self {
            LocatorSegment::Class { sibling_index, .. } => *sibling_index,
            LocatorSegment::Name {
                duplicate_index, ..
            } => *duplicate_index,
        }
    }
}

impl fmt::Display for LocatorSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocatorSegment::Class {
                class_name,
                sibling_index,
            } => write!(f, "c={}_{}", class_name, sibling_index),
            LocatorSegment::Name {
                object_name,
                duplicate_index,
            } => write!(f, "n={}_{}", object_name, duplicate_index),
        }
    }
}

/// An ordered, non-empty locator path identifying exactly one element
/// in a tree snapshot.
///
/// Addresses are immutable once parsed and re-resolved from the root on
/// every use; they never hold references into the live tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub segments: Vec<LocatorSegment>,
}

impl Address {
    pub fn new(segments: Vec<LocatorSegment>) -> Self {
        Address { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
