use crate::error::{GraphError, Result};
use crate::tree::TentativeTree;
use crate::types::{DirectedGraph, VertexId, Weight, WeightedEdge};
use serde::Serialize;
use std::collections::VecDeque;

/// Spanning arborescence over the input vertices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arborescence {
    root: VertexId,

    /// Tree edges in breadth-first order from the root, children ascending,
    /// each carrying the input weight of the edge it uses
    edges: Vec<WeightedEdge>,

    #[serde(skip)]
    parents: Vec<Option<VertexId>>,
}

impl Arborescence {
    /// Read the final tree off the expanded tentative tree and check that it
    /// is a spanning arborescence of the input graph
    pub(crate) fn from_tree(graph: &DirectedGraph, tree: &TentativeTree) -> Result<Self> {
        let n = graph.vertex_count();
        let root = graph.root();
        let mut parents = vec![None; n + 1];
        let mut children: Vec<Vec<VertexId>> = vec![Vec::new(); n + 1];

        for vertex in (1..=n).filter(|&v| v != root) {
            let parent = tree
                .parent(vertex)
                .filter(|&p| (1..=n).contains(&p))
                .ok_or_else(|| {
                    GraphError::internal(format!(
                        "vertex {} left without an input parent",
                        vertex
                    ))
                })?;
            parents[vertex] = Some(parent);
            children[parent].push(vertex);
        }

        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        let mut queue = VecDeque::from([root]);
        let mut reached = 1;
        while let Some(current) = queue.pop_front() {
            children[current].sort_unstable();
            for &child in &children[current] {
                let weight = graph.input_weight(current, child).ok_or_else(|| {
                    GraphError::internal(format!(
                        "tree edge ({},{}) is not an input edge",
                        current, child
                    ))
                })?;
                edges.push(WeightedEdge::new(current, child, weight));
                queue.push_back(child);
                reached += 1;
            }
        }

        if reached != n {
            return Err(GraphError::internal(format!(
                "tree reaches {} of {} vertices",
                reached, n
            )));
        }

        Ok(Self {
            root,
            edges,
            parents,
        })
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Tree parent of a vertex; `None` for the root
    pub fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parents.get(vertex).copied().flatten()
    }

    /// Tree edges in breadth-first order from the root
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Sum of the input weights of the tree edges.
    ///
    /// Partial sums may wrap; the total is exact whenever it fits in `i64`,
    /// which holds for any tree a solve returns.
    pub fn input_weight(&self) -> Weight {
        self.edges.iter().fold(0, |total: Weight, e| total.wrapping_add(e.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> DirectedGraph {
        DirectedGraph::from_edges(
            3,
            1,
            [
                WeightedEdge::new(1, 2, 4),
                WeightedEdge::new(1, 2, 2),
                WeightedEdge::new(2, 3, 1),
                WeightedEdge::new(1, 3, 7),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_tree_uses_cheapest_input_edge() {
        let graph = path_graph();
        let mut tree = TentativeTree::new(4);
        tree.attach(1, 2);
        tree.attach(2, 3);

        let arborescence = Arborescence::from_tree(&graph, &tree).unwrap();
        assert_eq!(
            arborescence.edges(),
            &[WeightedEdge::new(1, 2, 2), WeightedEdge::new(2, 3, 1)]
        );
        assert_eq!(arborescence.input_weight(), 3);
        assert_eq!(arborescence.parent(3), Some(2));
        assert_eq!(arborescence.parent(1), None);
    }

    #[test]
    fn test_from_tree_rejects_missing_parent() {
        let graph = path_graph();
        let mut tree = TentativeTree::new(4);
        tree.attach(1, 2);

        let err = Arborescence::from_tree(&graph, &tree).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_from_tree_rejects_cycle() {
        let graph = DirectedGraph::from_edges(
            3,
            1,
            [
                WeightedEdge::new(1, 2, 1),
                WeightedEdge::new(2, 3, 1),
                WeightedEdge::new(3, 2, 1),
            ],
        )
        .unwrap();
        let mut tree = TentativeTree::new(4);
        tree.attach(3, 2);
        tree.attach(2, 3);

        assert!(Arborescence::from_tree(&graph, &tree).is_err());
    }
}
