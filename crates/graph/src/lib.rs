//! # DMST Graph
//!
//! Minimum-weight spanning arborescences (directed minimum spanning trees) with
//! the Chu-Liu/Edmonds contraction algorithm.
//!
//! ## Features
//!
//! - **Graph store** - vertices and weighted edges in one petgraph arena, each
//!   edge visible from both endpoints
//! - **Contraction solver** - reduce, grow a zero-weight tree, contract a
//!   zero-weight cycle, repeat, then expand
//! - **Tree reconstruction** - the chosen edges, not only the weight
//! - **Explicit infeasibility** - unreachable vertices are reported, never looped on
//!
//! ## Architecture
//!
//! ```text
//! DirectedGraph (edge insertion)
//!     │
//!     ├──> Reachability precheck ── unreachable ──> GraphError::NoArborescence
//!     │
//!     └──> per level
//!            ├─ Weight reduction (every non-root vertex gets a 0-weight in-edge)
//!            ├─ Zero-edge tree (BFS over 0-weight edges)
//!            ├─ Spanning check (BFS over all edges) ── spans ──> stop
//!            ├─ Cycle extraction (walk 0-weight in-edges backward)
//!            └─ Cycle contraction (new super-vertex, cheapest boundary edges)
//!
//! Contractions are expanded in reverse ──> Arborescence + weight
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dmst_graph::{ArborescenceSolver, DirectedGraph, WeightedEdge};
//!
//! let graph = DirectedGraph::from_edges(
//!     3,
//!     1,
//!     [
//!         WeightedEdge::new(1, 2, 4),
//!         WeightedEdge::new(1, 3, 10),
//!         WeightedEdge::new(2, 3, 1),
//!         WeightedEdge::new(3, 2, 1),
//!     ],
//! )
//! .unwrap();
//!
//! let solution = ArborescenceSolver::default().solve(graph).unwrap();
//! assert_eq!(solution.weight, 5);
//! assert_eq!(solution.arborescence.input_weight(), 5);
//! ```

mod arborescence;
mod config;
mod cycle;
mod error;
mod graph;
mod reduce;
mod solver;
mod tree;
mod types;

pub use arborescence::Arborescence;
pub use config::SolverConfig;
pub use error::{GraphError, Result};
pub use solver::{min_arborescence_weight, ArborescenceSolver, LevelStats, Solution};
pub use types::{
    DirectedGraph, Vertex, VertexId, VertexKind, Weight, WeightedEdge, MAX_VERTICES,
};
