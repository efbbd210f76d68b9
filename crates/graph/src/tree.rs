use crate::types::{DirectedGraph, VertexId};
use std::collections::VecDeque;

/// Per-level transient state: the tentative arborescence and the
/// zero-weight reachability marks.
///
/// A fresh value is built at every level; only the graph itself is shared
/// between levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TentativeTree {
    parent: Vec<Option<VertexId>>,
    children: Vec<Vec<VertexId>>,
    reached: Vec<bool>,
}

impl TentativeTree {
    pub(crate) fn new(slots: usize) -> Self {
        Self {
            parent: vec![None; slots],
            children: vec![Vec::new(); slots],
            reached: vec![false; slots],
        }
    }

    pub(crate) fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent.get(vertex).copied().flatten()
    }

    pub(crate) fn children(&self, vertex: VertexId) -> &[VertexId] {
        self.children.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Reached from the root over zero-weight edges at this level
    pub(crate) fn is_reached(&self, vertex: VertexId) -> bool {
        self.reached.get(vertex).copied().unwrap_or(false)
    }

    /// Make `child` a tree child of `parent`, detaching it from any previous parent
    pub(crate) fn attach(&mut self, parent: VertexId, child: VertexId) {
        self.detach(child);
        self.ensure_slot(parent.max(child));
        self.parent[child] = Some(parent);
        self.children[parent].push(child);
    }

    /// Remove the tree edge entering `child`, if any
    pub(crate) fn detach(&mut self, child: VertexId) {
        let Some(parent) = self.parent(child) else {
            return;
        };
        self.children[parent].retain(|&c| c != child);
        self.parent[child] = None;
    }

    fn mark_reached(&mut self, vertex: VertexId) {
        self.ensure_slot(vertex);
        self.reached[vertex] = true;
    }

    fn ensure_slot(&mut self, vertex: VertexId) {
        if vertex >= self.parent.len() {
            self.parent.resize(vertex + 1, None);
            self.children.resize(vertex + 1, Vec::new());
            self.reached.resize(vertex + 1, false);
        }
    }
}

/// Breadth-first search from the root over zero-weight edges only.
///
/// Every vertex discovered is marked reached and hung under the vertex it was
/// discovered from.
pub(crate) fn build_zero_tree(graph: &DirectedGraph) -> TentativeTree {
    let root = graph.root();
    let mut tree = TentativeTree::new(graph.slot_count());
    let mut queue = VecDeque::new();
    tree.mark_reached(root);
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for (next, weight) in graph.successors(current) {
            if weight != 0 || tree.is_reached(next) {
                continue;
            }
            tree.mark_reached(next);
            tree.attach(current, next);
            queue.push_back(next);
        }
    }

    tree
}

/// Breadth-first search from the root over all edges, looking for a vertex the
/// zero-weight tree missed.
///
/// Returns `None` when the tree already spans everything reachable from the
/// root, i.e. it is final for this level.
pub(crate) fn find_witness(graph: &DirectedGraph, tree: &TentativeTree) -> Option<VertexId> {
    let root = graph.root();
    let mut seen = vec![false; graph.slot_count()];
    let mut queue = VecDeque::new();
    seen[root] = true;
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for (next, _) in graph.successors(current) {
            if !tree.is_reached(next) {
                return Some(next);
            }
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeightedEdge;

    #[test]
    fn test_zero_tree_follows_zero_edges_only() {
        let graph = DirectedGraph::from_edges(
            4,
            1,
            [
                WeightedEdge::new(1, 2, 0),
                WeightedEdge::new(2, 3, 0),
                WeightedEdge::new(1, 4, 3),
            ],
        )
        .unwrap();

        let tree = build_zero_tree(&graph);
        assert!(tree.is_reached(1) && tree.is_reached(2) && tree.is_reached(3));
        assert!(!tree.is_reached(4));
        assert_eq!(tree.parent(3), Some(2));
        assert_eq!(tree.children(1), &[2]);
        assert_eq!(tree.parent(1), None);
    }

    #[test]
    fn test_witness_reported_for_positive_only_vertex() {
        let graph = DirectedGraph::from_edges(
            3,
            1,
            [WeightedEdge::new(1, 2, 0), WeightedEdge::new(2, 3, 5)],
        )
        .unwrap();

        let tree = build_zero_tree(&graph);
        assert_eq!(find_witness(&graph, &tree), Some(3));
    }

    #[test]
    fn test_no_witness_when_tree_spans() {
        let graph = DirectedGraph::from_edges(
            3,
            1,
            [
                WeightedEdge::new(1, 2, 0),
                WeightedEdge::new(1, 3, 0),
                WeightedEdge::new(2, 3, 4),
                WeightedEdge::new(3, 1, 2),
            ],
        )
        .unwrap();

        let tree = build_zero_tree(&graph);
        assert_eq!(find_witness(&graph, &tree), None);
    }

    #[test]
    fn test_attach_moves_child_between_parents() {
        let mut tree = TentativeTree::new(4);
        tree.attach(1, 3);
        tree.attach(2, 3);

        assert_eq!(tree.parent(3), Some(2));
        assert!(tree.children(1).is_empty());
        assert_eq!(tree.children(2), &[3]);

        tree.attach(3, 6);
        assert_eq!(tree.parent(6), Some(3));

        tree.detach(3);
        assert_eq!(tree.parent(3), None);
        assert!(tree.children(2).is_empty());
    }
}
