use crate::error::{GraphError, Result};
use crate::tree::TentativeTree;
use crate::types::{DirectedGraph, VertexId, WeightedEdge};
use petgraph::Direction;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

/// One contracted cycle together with the boundary edges needed to undo it.
///
/// Produced by [`contract_cycle`] and consumed by [`expand_cycle`] at the same level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Contraction {
    pub super_vertex: VertexId,

    /// Cycle members in walk order: `cycle[i + 1] -> cycle[i]` and
    /// `cycle[0] -> cycle[last]` are the zero-weight cycle edges
    pub cycle: Vec<VertexId>,

    /// External source -> cheapest edge from it into the cycle
    pub min_incoming: BTreeMap<VertexId, WeightedEdge>,

    /// External target -> cheapest edge from the cycle to it
    pub min_outgoing: BTreeMap<VertexId, WeightedEdge>,
}

/// Walk backward over zero-weight incoming edges from `witness` until a vertex repeats.
pub(crate) fn extract_cycle(graph: &DirectedGraph, witness: VertexId) -> Result<Vec<VertexId>> {
    let mut walk = vec![witness];
    let mut position: HashMap<VertexId, usize> = HashMap::from([(witness, 0)]);
    let mut current = witness;

    loop {
        let source = graph
            .zero_weight_predecessor(current)
            .ok_or(GraphError::MissingZeroIncoming { vertex: current })?;

        if let Some(&start) = position.get(&source) {
            return Ok(walk.split_off(start));
        }

        position.insert(source, walk.len());
        walk.push(source);
        current = source;
    }
}

/// Merge `cycle` into a new super-vertex.
///
/// Every edge touching a cycle member is removed. For each external vertex only
/// the cheapest crossing edge in each direction survives, re-pointed at the
/// super-vertex. Ties keep the first edge seen.
pub(crate) fn contract_cycle(graph: &mut DirectedGraph, cycle: Vec<VertexId>) -> Contraction {
    let members: HashSet<VertexId> = cycle.iter().copied().collect();
    let mut min_incoming = BTreeMap::new();
    let mut min_outgoing = BTreeMap::new();

    for &member in &cycle {
        for (idx, edge) in graph.edge_records(member, Direction::Incoming) {
            graph.remove_edge(idx);
            if !members.contains(&edge.source) {
                keep_cheaper(&mut min_incoming, edge.source, edge);
            }
        }
    }

    // Intra-cycle edges are already gone with the incoming pass.
    for &member in &cycle {
        for (idx, edge) in graph.edge_records(member, Direction::Outgoing) {
            graph.remove_edge(idx);
            keep_cheaper(&mut min_outgoing, edge.target, edge);
        }
    }

    let super_vertex = graph.add_super_vertex();
    for &member in &cycle {
        graph.absorb(member, super_vertex);
    }

    for (&source, edge) in &min_incoming {
        graph.insert_edge(source, super_vertex, edge.weight);
    }
    for (&target, edge) in &min_outgoing {
        graph.insert_edge(super_vertex, target, edge.weight);
    }

    Contraction {
        super_vertex,
        cycle,
        min_incoming,
        min_outgoing,
    }
}

fn keep_cheaper(best: &mut BTreeMap<VertexId, WeightedEdge>, key: VertexId, edge: WeightedEdge) {
    match best.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(edge);
        }
        Entry::Occupied(mut slot) => {
            if edge.weight < slot.get().weight {
                slot.insert(edge);
            }
        }
    }
}

/// Replace the super-vertex in `tree` by the cycle it stands for.
///
/// The cycle's own zero-weight edges become tree edges, except the one entering
/// the member hit by the chosen entry edge; the super-vertex's tree children are
/// re-hung under the cycle members their boundary edges leave from.
pub(crate) fn expand_cycle(tree: &mut TentativeTree, contraction: &Contraction) -> Result<()> {
    let x = contraction.super_vertex;
    let cycle = &contraction.cycle;

    let entry = tree.parent(x).ok_or_else(|| {
        GraphError::internal(format!("super-vertex {} has no tree parent", x))
    })?;
    let entry_edge = contraction.min_incoming.get(&entry).ok_or_else(|| {
        GraphError::internal(format!(
            "no boundary edge from {} into the cycle of super-vertex {}",
            entry, x
        ))
    })?;

    for (i, &member) in cycle.iter().enumerate() {
        tree.attach(cycle[(i + 1) % cycle.len()], member);
    }

    tree.detach(entry_edge.target);
    tree.detach(x);
    tree.attach(entry, entry_edge.target);

    let exits: Vec<VertexId> = tree.children(x).to_vec();
    for child in exits {
        let exit_edge = contraction.min_outgoing.get(&child).ok_or_else(|| {
            GraphError::internal(format!(
                "no boundary edge from the cycle of super-vertex {} to {}",
                x, child
            ))
        })?;
        tree.attach(exit_edge.source, child);
    }

    Ok(())
}
