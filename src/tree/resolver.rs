use std::thread::sleep;
use std::time::Duration;

use crate::address::address_model::{Address, LocatorSegment};
use crate::script::error::ReplayError;
use crate::tree::tree_model::{ElementHandle, NodeId, ObjectTree};

/// Walks the live object tree and maps an address to exactly one element.
///
/// Intermediate UI may not exist yet (lazy instantiation, a dialog still
/// opening after the previous action), so a failed walk is re-attempted
/// from the root up to `attempts` times with a fixed `interval` sleep in
/// between. The retry budget is bounded; exhausting it surfaces the last
/// failure to the caller.
pub struct PathResolver {
    attempts: u32,
    interval: Duration,
}

impl PathResolver {
    pub fn new(attempts: u32, interval: Duration) -> Self {
        PathResolver {
            attempts: attempts.max(1),
            interval,
        }
    }

    /// Resolve `address` against the current tree, retrying on failure.
    pub fn resolve(
        &self,
        tree: &dyn ObjectTree,
        address: &Address,
    ) -> Result<ElementHandle, ReplayError> {
        let mut last_error = None;

        for attempt in 0..self.attempts {
            match resolve_once(tree, address, self.attempts, self.interval) {
                Ok(handle) => return Ok(handle),
                Err(e) => last_error = Some(e),
            }
            if attempt + 1 != self.attempts {
                sleep(self.interval);
            }
        }

        // attempts >= 1, so at least one walk ran and set the error
        Err(last_error.unwrap_or_else(|| ReplayError::MalformedAddress {
            input: address.to_string(),
            reason: "address has no segments".to_string(),
        }))
    }
}

/// One full walk of the address chain against the current snapshot.
fn resolve_once(
    tree: &dyn ObjectTree,
    address: &Address,
    attempts: u32,
    interval: Duration,
) -> Result<ElementHandle, ReplayError> {
    let mut current = tree.root();

    for segment in &address.segments {
        let candidates = match segment {
            LocatorSegment::Class { class_name, .. } => {
                class_matches(tree, current, class_name)
            }
            LocatorSegment::Name { object_name, .. } => {
                name_matches(tree, current, object_name)
            }
        };

        let index = segment.index();
        match candidates.get(index) {
            Some(&node) => current = node,
            None => {
                return Err(ReplayError::ElementNotFound {
                    path: address.to_string(),
                    segment: segment.to_string(),
                    attempted_index: index,
                    available_count: candidates.len(),
                    attempts,
                    interval_ms: interval.as_millis() as u64,
                });
            }
        }
    }

    Ok(ElementHandle {
        node: current,
        kind: tree.widget_kind(current),
    })
}

/// Direct children of `node` whose runtime class name matches, in
/// document order.
fn class_matches(tree: &dyn ObjectTree, node: NodeId, class_name: &str) -> Vec<NodeId> {
    tree.children(node)
        .into_iter()
        .filter(|&child| tree.class_name(child) == class_name)
        .collect()
}

/// All elements below `node` (the node itself excluded) whose assigned
/// identifier matches, in depth-first pre-order.
fn name_matches(tree: &dyn ObjectTree, node: NodeId, object_name: &str) -> Vec<NodeId> {
    let mut matches = Vec::new();
    collect_name_matches(tree, node, object_name, &mut matches);
    matches
}

fn collect_name_matches(
    tree: &dyn ObjectTree,
    node: NodeId,
    object_name: &str,
    matches: &mut Vec<NodeId>,
) {
    for child in tree.children(node) {
        if tree.object_name(child) == object_name {
            matches.push(child);
        }
        collect_name_matches(tree, child, object_name, matches);
    }
}
