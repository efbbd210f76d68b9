use crate::types::{DirectedGraph, VertexId, Weight};
use petgraph::Direction;
use std::collections::VecDeque;

impl DirectedGraph {
    /// Input vertices that no directed path from the root reaches, ascending
    pub fn unreachable_from_root(&self) -> Vec<VertexId> {
        let mut seen = vec![false; self.slot_count()];
        let mut queue = VecDeque::new();
        seen[self.root()] = true;
        queue.push_back(self.root());

        while let Some(current) = queue.pop_front() {
            for (next, _) in self.successors(current) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }

        (1..=self.vertex_count()).filter(|&id| !seen[id]).collect()
    }

    /// Cheapest current weight among the incoming edges of a vertex
    pub fn min_incoming_weight(&self, id: VertexId) -> Option<Weight> {
        self.incoming(id).iter().map(|e| e.weight).min()
    }

    /// Source of the first zero-weight incoming edge of a vertex
    pub fn zero_weight_predecessor(&self, id: VertexId) -> Option<VertexId> {
        self.edge_records(id, Direction::Incoming)
            .into_iter()
            .find(|(_, edge)| edge.weight == 0)
            .map(|(_, edge)| edge.source)
    }
}
