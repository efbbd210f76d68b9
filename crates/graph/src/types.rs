use crate::error::{GraphError, Result};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Vertex id. Input vertices use `1..=n`; super-vertices get ids above `n`.
pub type VertexId = usize;

/// Edge weight. Input weights may be negative, reduced weights never are.
pub type Weight = i64;

/// Largest supported `n`. Slot 0, the `n` input vertices and up to `n - 1`
/// super-vertices must all fit below petgraph's `u32` index limit.
pub const MAX_VERTICES: usize = (u32::MAX as usize - 1) / 2;

/// Role of a vertex slot in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    /// Slot 0, kept so ids line up with the 1-indexed input
    Reserved,

    /// Vertex from the input
    Original,

    /// Stands for a contracted zero-weight cycle
    Contracted,
}

/// Vertex slot data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub kind: VertexKind,

    /// Super-vertex this vertex was merged into, if any
    pub absorbed_into: Option<VertexId>,
}

impl Vertex {
    fn new(kind: VertexKind) -> Self {
        Self {
            kind,
            absorbed_into: None,
        }
    }

    /// Live vertices take part in the current level of the algorithm
    pub fn is_live(&self) -> bool {
        self.kind != VertexKind::Reserved && self.absorbed_into.is_none()
    }
}

/// A directed weighted edge as seen from outside the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(source: VertexId, target: VertexId, weight: Weight) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }
}

/// Directed graph with a distinguished root.
///
/// Every edge is one record in a petgraph arena that is linked into both the
/// source's outgoing list and the target's incoming list, so a weight change or
/// a removal is always seen from both endpoints.
pub struct DirectedGraph {
    /// Arena of vertices and edges (slot index == vertex id)
    graph: StableDiGraph<Vertex, Weight>,

    root: VertexId,

    /// Number of input vertices (`n`)
    vertex_count: usize,

    /// (source, target) -> cheapest input weight, kept for reconstructing tree cost
    input_weights: HashMap<(VertexId, VertexId), Weight>,
}

impl DirectedGraph {
    /// Create a graph with vertices `1..=vertex_count` and no edges
    pub fn new(vertex_count: usize, root: VertexId) -> Result<Self> {
        if root == 0 || root > vertex_count {
            return Err(GraphError::InvalidRoot { root, vertex_count });
        }
        if vertex_count > MAX_VERTICES {
            return Err(GraphError::TooManyVertices {
                vertex_count,
                max: MAX_VERTICES,
            });
        }

        let mut graph = StableDiGraph::with_capacity(vertex_count + 1, 0);
        graph.add_node(Vertex::new(VertexKind::Reserved));
        for _ in 0..vertex_count {
            graph.add_node(Vertex::new(VertexKind::Original));
        }

        Ok(Self {
            graph,
            root,
            vertex_count,
            input_weights: HashMap::new(),
        })
    }

    /// Build a graph from raw edge triples
    pub fn from_edges(
        vertex_count: usize,
        root: VertexId,
        edges: impl IntoIterator<Item = WeightedEdge>,
    ) -> Result<Self> {
        let mut graph = Self::new(vertex_count, root)?;
        for edge in edges {
            graph.add_edge(edge.source, edge.target, edge.weight)?;
        }
        Ok(graph)
    }

    /// Insert an input edge.
    ///
    /// Self-loops can never be part of an arborescence and are dropped.
    pub fn add_edge(&mut self, source: VertexId, target: VertexId, weight: Weight) -> Result<()> {
        for vertex in [source, target] {
            if vertex == 0 || vertex > self.vertex_count {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.vertex_count,
                });
            }
        }

        if source == target {
            log::debug!("Dropping self-loop on vertex {} (weight {})", source, weight);
            return Ok(());
        }

        self.insert_edge(source, target, weight);
        self.input_weights
            .entry((source, target))
            .and_modify(|w| *w = (*w).min(weight))
            .or_insert(weight);
        Ok(())
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Number of input vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of vertex slots, including slot 0 and every super-vertex
    pub fn slot_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of live edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get vertex data
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    pub fn is_live(&self, id: VertexId) -> bool {
        self.vertex(id).is_some_and(Vertex::is_live)
    }

    /// Ids of all live vertices, ascending
    pub fn live_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (1..self.slot_count()).filter(move |&id| self.is_live(id))
    }

    /// Cheapest input weight of an edge `source -> target`
    pub fn input_weight(&self, source: VertexId, target: VertexId) -> Option<Weight> {
        self.input_weights.get(&(source, target)).copied()
    }

    /// Incoming edges of a vertex with their current weights
    pub fn incoming(&self, id: VertexId) -> Vec<WeightedEdge> {
        self.edge_records(id, Direction::Incoming)
            .into_iter()
            .map(|(_, edge)| edge)
            .collect()
    }

    /// Outgoing edges of a vertex with their current weights
    pub fn outgoing(&self, id: VertexId) -> Vec<WeightedEdge> {
        self.edge_records(id, Direction::Outgoing)
            .into_iter()
            .map(|(_, edge)| edge)
            .collect()
    }

    /// All live edges, ordered by (source, target, weight)
    pub fn edges(&self) -> Vec<WeightedEdge> {
        let mut edges: Vec<WeightedEdge> = self
            .graph
            .edge_indices()
            .filter_map(|idx| self.edge_at(idx))
            .collect();
        edges.sort_by_key(|e| (e.source, e.target, e.weight));
        edges
    }

    /// Ids of live out-neighbours, in adjacency order
    pub(crate) fn successors(&self, id: VertexId) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(id), Direction::Outgoing)
            .map(|e| (e.target().index(), *e.weight()))
    }

    pub(crate) fn edge_records(
        &self,
        id: VertexId,
        direction: Direction,
    ) -> Vec<(EdgeIndex, WeightedEdge)> {
        self.graph
            .edges_directed(NodeIndex::new(id), direction)
            .filter_map(|e| self.edge_at(e.id()).map(|edge| (e.id(), edge)))
            .collect()
    }

    /// Subtract `amount` from every incoming edge of `id`.
    ///
    /// Either every weight is updated or, on overflow, none is.
    pub(crate) fn lower_incoming(&mut self, id: VertexId, amount: Weight) -> Result<()> {
        let mut updates: Vec<(EdgeIndex, Weight)> = Vec::new();
        for edge in self.graph.edges_directed(NodeIndex::new(id), Direction::Incoming) {
            let lowered = edge.weight().checked_sub(amount).ok_or_else(|| {
                GraphError::WeightOverflow(format!(
                    "edge ({},{}) weight {} minus {}",
                    edge.source().index(),
                    id,
                    edge.weight(),
                    amount
                ))
            })?;
            updates.push((edge.id(), lowered));
        }

        for (idx, new_weight) in updates {
            if let Some(weight) = self.graph.edge_weight_mut(idx) {
                *weight = new_weight;
            }
        }
        Ok(())
    }

    pub(crate) fn insert_edge(&mut self, source: VertexId, target: VertexId, weight: Weight) {
        self.graph
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), weight);
    }

    pub(crate) fn remove_edge(&mut self, idx: EdgeIndex) {
        self.graph.remove_edge(idx);
    }

    /// Append a super-vertex and return its id
    pub(crate) fn add_super_vertex(&mut self) -> VertexId {
        self.graph
            .add_node(Vertex::new(VertexKind::Contracted))
            .index()
    }

    pub(crate) fn absorb(&mut self, member: VertexId, into: VertexId) {
        if let Some(vertex) = self.graph.node_weight_mut(NodeIndex::new(member)) {
            vertex.absorbed_into = Some(into);
        }
    }

    fn edge_at(&self, idx: EdgeIndex) -> Option<WeightedEdge> {
        let (source, target) = self.graph.edge_endpoints(idx)?;
        let weight = *self.graph.edge_weight(idx)?;
        Some(WeightedEdge::new(source.index(), target.index(), weight))
    }
}

impl std::fmt::Debug for DirectedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectedGraph")
            .field("root", &self.root)
            .field("vertex_count", &self.vertex_count)
            .field("slot_count", &self.slot_count())
            .field("edges", &self.edges())
            .finish()
    }
}
