use std::collections::BTreeSet;
use std::sync::Arc;

use axaudit_types::NodeId;

use crate::node::NodeHandle;

/// Flatten the full descendant closure of `root` into one vector.
///
/// Each node appears exactly once: a node reachable over multiple paths is
/// deduplicated by its host id. Iteration is depth-first, but callers must
/// not rely on ordering. Hosts guarantee finite, acyclic trees.
pub fn all_nodes(root: &NodeHandle) -> Vec<NodeHandle> {
    let mut seen = BTreeSet::<NodeId>::new();
    let mut out: Vec<NodeHandle> = Vec::new();
    let mut stack: Vec<NodeHandle> = vec![Arc::clone(root)];

    while let Some(node) = stack.pop() {
        if !seen.insert(node.id()) {
            continue;
        }
        for child in node.children().into_iter().rev() {
            stack.push(child);
        }
        out.push(node);
    }

    out
}
