use thiserror::Error;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Invalid root {root}: expected a vertex in 1..={vertex_count}")]
    InvalidRoot { root: usize, vertex_count: usize },

    #[error("Too many vertices: {vertex_count} exceeds the supported {max}")]
    TooManyVertices { vertex_count: usize, max: usize },

    #[error("Vertex {vertex} out of range: expected 1..={vertex_count}")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    /// Some vertex cannot be reached from the root by any directed path
    #[error("No arborescence rooted at {root}: unreachable vertices {unreachable:?}")]
    NoArborescence { root: usize, unreachable: Vec<usize> },

    /// Weight reduction left a vertex without a zero-weight incoming edge
    #[error("Internal invariant violated: vertex {vertex} has no zero-weight incoming edge")]
    MissingZeroIncoming { vertex: usize },

    #[error("Internal invariant violated: {0}")]
    Internal(String),

    /// Reduced or accumulated weights left the `i64` range
    #[error("Weight overflow: {0}")]
    WeightOverflow(String),

    #[error("Deadline exceeded at level {level} after {elapsed_ms} ms")]
    DeadlineExceeded { level: usize, elapsed_ms: u128 },

    #[error("Contraction limit of {limit} reached")]
    ContractionLimit { limit: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GraphError {
    /// Create an internal invariant error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True for errors caused by the graph or caller, false for broken invariants
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::MissingZeroIncoming { .. } | Self::Internal(_))
    }
}
