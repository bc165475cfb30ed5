//! Call tree aggregation.
//!
//! Folds every trace of a log into one arena-backed tree. Each node carries
//! the number of traces whose path passes through it; counts only grow while
//! the tree is being built, and the finished tree is read-only from then on.

use rayon::prelude::*;
use std::collections::HashMap;

use crate::domain::signature::normalize_frame;
use crate::domain::trace::{collapse_recursion, split_traces};

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// The root node, present from construction.
pub const ROOT: NodeId = 0;

/// Fixed sentinel signature of the root. The first frame of a trace
/// (conventionally `main`) is treated as already represented by the root,
/// whatever it actually says.
pub const ROOT_SIGNATURE: &str = "main ()";

/// One call-tree position.
#[derive(Debug)]
pub struct CallNode {
    pub signature: String,
    /// Number of traces whose path passes through this node.
    pub sample_count: u64,
    /// Back-reference for upward walks. Children own their subtree; this
    /// never participates in lifetime.
    pub parent: Option<NodeId>,
    /// Child ids in creation order. Render-time ordering is imposed by the
    /// report layer, never here.
    pub children: Vec<NodeId>,
    child_index: HashMap<String, NodeId>,
}

impl CallNode {
    fn new(signature: String, parent: Option<NodeId>) -> Self {
        Self {
            signature,
            sample_count: 0,
            parent,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }
}

/// The aggregated call tree. Built once per log, then handed to the report
/// layer and discarded.
#[derive(Debug)]
pub struct CallTree {
    nodes: Vec<CallNode>,
}

impl CallTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![CallNode::new(ROOT_SIGNATURE.to_string(), None)],
        }
    }

    pub fn node(&self, id: NodeId) -> &CallNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &CallNode {
        &self.nodes[ROOT]
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Read-only child lookup. Never inserts.
    pub fn child_named(&self, parent: NodeId, signature: &str) -> Option<NodeId> {
        self.nodes[parent].child_index.get(signature).copied()
    }

    /// Fold one raw trace (outermost-first lines) into the tree.
    ///
    /// Lines that are not frames are dropped; a trace with no surviving
    /// frames contributes nothing.
    pub fn ingest(&mut self, trace: &[&str]) {
        let calls: Vec<String> = trace.iter().filter_map(|line| normalize_frame(line)).collect();
        if calls.is_empty() {
            return;
        }
        self.fold(&collapse_recursion(calls));
    }

    /// Walk an already collapsed signature path, bumping counts. The first
    /// element stands for the root and is skipped; every surviving trace
    /// bumps the root unconditionally.
    fn fold(&mut self, calls: &[String]) {
        self.nodes[ROOT].sample_count += 1;
        let mut current = ROOT;
        for call in &calls[1..] {
            current = self.child_of(current, call);
            self.nodes[current].sample_count += 1;
        }
    }

    /// Lookup-or-insert a child keyed by signature.
    fn child_of(&mut self, parent: NodeId, signature: &str) -> NodeId {
        if let Some(&id) = self.nodes[parent].child_index.get(signature) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(CallNode::new(signature.to_string(), Some(parent)));
        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(id);
        parent_node.child_index.insert(signature.to_string(), id);
        id
    }
}

impl Default for CallTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the call tree for a whole log.
///
/// Traces are independent until the fold, so normalization and collapsing
/// run on the rayon pool; the fold itself stays serial because sibling
/// creation mutates shared nodes. Input order is preserved throughout, so
/// the result is identical to a fully serial run.
pub fn build_tree(log: &str) -> CallTree {
    let traces = split_traces(log);
    let collapsed: Vec<Vec<String>> = traces
        .par_iter()
        .filter_map(|trace| {
            let calls: Vec<String> =
                trace.iter().filter_map(|line| normalize_frame(line)).collect();
            if calls.is_empty() {
                None
            } else {
                Some(collapse_recursion(calls))
            }
        })
        .collect();

    let mut tree = CallTree::new();
    for calls in &collapsed {
        tree.fold(calls);
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_identical_traces_share_one_path() {
        let log = "#0 0x1 in foo (x=1)\n#1 0x2 in main\n\n\
                   #0 0x1 in foo (x=1)\n#1 0x2 in main\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().sample_count, 2);
        assert_eq!(tree.root().children.len(), 1);
        let foo = tree.child_named(ROOT, "foo (x=1)").unwrap();
        assert_eq!(tree.node(foo).sample_count, 2);
        assert!(tree.node(foo).children.is_empty());
    }

    #[test]
    fn test_immediate_recursion_collapses_into_one_node() {
        // Innermost first: bar, foo, foo, main. Reversed, the repeated foo
        // frames become adjacent and collapse to one.
        let log = "#0 0x1 in bar\n#1 0x2 in foo\n#2 0x3 in foo\n#3 0x4 in main\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().sample_count, 1);
        let foo = tree.child_named(ROOT, "foo ()").unwrap();
        let bar = tree.child_named(foo, "bar ()").unwrap();
        assert_eq!(tree.node(foo).sample_count, 1);
        assert_eq!(tree.node(bar).sample_count, 1);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_empty_log_yields_zero_root_and_no_children() {
        let tree = build_tree("");
        assert_eq!(tree.root().sample_count, 0);
        assert!(tree.root().children.is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_frameless_traces_are_not_counted() {
        // Lines inside the capture that never match the frame shape leave an
        // empty trace behind, which must not bump the root.
        let log = "random banner\nmore noise\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().sample_count, 0);
    }

    #[test]
    fn test_root_is_bumped_even_for_non_main_first_frames() {
        // The first collapsed element is skipped whatever it is; the tree
        // keeps its fixed sentinel root.
        let log = "#0 0x1 in start\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().signature, ROOT_SIGNATURE);
        assert_eq!(tree.root().sample_count, 1);
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_separator_splits_one_capture_into_two_traces() {
        let log = "#0 0x1 in main\nsome metadata\n#0 0x2 in main\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().sample_count, 2);
    }

    #[test]
    fn test_shared_prefix_reuses_nodes() {
        let log = "#0 0x1 in leaf_a ()\n#1 0x2 in branch ()\n#2 0x3 in main\n\n\
                   #0 0x1 in leaf_b ()\n#1 0x2 in branch ()\n#2 0x3 in main\n";
        let tree = build_tree(log);
        let branch = tree.child_named(ROOT, "branch ()").unwrap();
        assert_eq!(tree.node(branch).sample_count, 2);
        assert_eq!(tree.node(branch).children.len(), 2);
        assert_eq!(tree.node(branch).parent, Some(ROOT));
    }

    #[test]
    fn test_count_is_monotone_down_every_edge() {
        let log = "#0 0x1 in a ()\n#1 0x2 in main\n\n\
                   #0 0x1 in b ()\n#1 0x2 in a ()\n#2 0x3 in main\n\n\
                   #0 0x1 in main\n";
        let tree = build_tree(log);
        assert_eq!(tree.root().sample_count, 3);
        for id in 0..tree.len() {
            for &child in &tree.node(id).children {
                assert!(tree.node(id).sample_count >= tree.node(child).sample_count);
            }
        }
    }

    #[test]
    fn test_ingest_matches_build_tree() {
        let mut tree = CallTree::new();
        tree.ingest(&["#1 0x2 in main", "#0 0x1 in foo (x=1)"]);
        assert_eq!(tree.root().sample_count, 1);
        assert!(tree.child_named(ROOT, "foo (x=1)").is_some());

        // An all-noise trace is silently skipped.
        tree.ingest(&["not a frame", "also not a frame"]);
        assert_eq!(tree.root().sample_count, 1);
    }

    #[test]
    fn test_child_lookup_never_inserts() {
        let tree = CallTree::new();
        assert!(tree.child_named(ROOT, "ghost ()").is_none());
        assert_eq!(tree.len(), 1);
    }
}
