use sha1::{Digest, Sha1};

use crate::tree::tree_model::{NodeId, ObjectTree};

/// SHA-1 fingerprint of the tree's structure: class and object names in
/// pre-order, one node per line.
///
/// Two fingerprints differ exactly when the tree's shape or naming
/// changed between two script lines, which localizes structural
/// mutations in the trace without dumping whole snapshots.
pub fn tree_fingerprint(tree: &dyn ObjectTree) -> String {
    let mut hasher = Sha1::new();
    hash_subtree(tree, tree.root(), &mut hasher);
    format!("{:x}", hasher.finalize())
}

fn hash_subtree(tree: &dyn ObjectTree, node: NodeId, hasher: &mut Sha1) {
    for child in tree.children(node) {
        hasher.update(tree.class_name(child).as_bytes());
        hasher.update(b"=");
        hasher.update(tree.object_name(child).as_bytes());
        hasher.update(b"\n");
        hash_subtree(tree, child, hasher);
    }
}
