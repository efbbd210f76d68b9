use crate::error::{GraphError, Result};
use crate::types::{DirectedGraph, VertexId, Weight};

/// Subtract each live non-root vertex's cheapest incoming weight from all of its
/// incoming edges.
///
/// Afterwards every such vertex has a zero-weight incoming edge and no edge
/// weight is negative. Returns the total amount subtracted, which is this
/// level's contribution to the arborescence weight, or
/// [`GraphError::WeightOverflow`] if a weight leaves the `i64` range.
pub(crate) fn reduce_weights(graph: &mut DirectedGraph) -> Result<Weight> {
    let root = graph.root();
    let vertices: Vec<VertexId> = graph.live_vertices().filter(|&v| v != root).collect();

    let mut reduction: Weight = 0;
    for vertex in vertices {
        let Some(min) = graph.min_incoming_weight(vertex) else {
            continue;
        };
        if min == 0 {
            continue;
        }
        graph.lower_incoming(vertex, min)?;
        reduction = reduction.checked_add(min).ok_or_else(|| {
            GraphError::WeightOverflow(format!("level reduction {} plus {}", reduction, min))
        })?;
    }
    Ok(reduction)
}
