use crate::arborescence::Arborescence;
use crate::config::SolverConfig;
use crate::cycle::{contract_cycle, expand_cycle, extract_cycle, Contraction};
use crate::error::{GraphError, Result};
use crate::reduce::reduce_weights;
use crate::tree::{build_zero_tree, find_witness, TentativeTree};
use crate::types::{DirectedGraph, VertexId, Weight};
use serde::Serialize;
use std::time::Instant;

/// What happened at one recursion level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelStats {
    pub depth: usize,

    /// Weight subtracted by the reduction step at this level
    pub reduction: Weight,

    /// Length of the contracted cycle; `None` at the final level
    pub cycle_len: Option<usize>,

    pub super_vertex: Option<VertexId>,
}

/// Result of a solve
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Minimum arborescence weight
    pub weight: Weight,

    pub contractions: usize,

    pub levels: Vec<LevelStats>,

    pub arborescence: Arborescence,
}

/// Chu-Liu/Edmonds minimum spanning arborescence solver
///
/// Each level reduces weights, grows a zero-weight tree from the root and, if
/// that tree misses a vertex, contracts one zero-weight cycle and goes one level
/// deeper. Contractions are kept on a stack and expanded in reverse once the
/// deepest level's tree spans.
#[derive(Debug, Clone, Default)]
pub struct ArborescenceSolver {
    config: SolverConfig,
}

impl ArborescenceSolver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate().map_err(GraphError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find a minimum-weight spanning arborescence of `graph` rooted at its root
    pub fn solve(&self, mut graph: DirectedGraph) -> Result<Solution> {
        let started = Instant::now();
        let root = graph.root();

        let unreachable = graph.unreachable_from_root();
        if !unreachable.is_empty() {
            return Err(GraphError::NoArborescence { root, unreachable });
        }

        let mut levels: Vec<LevelStats> = Vec::new();
        let mut pending: Vec<Contraction> = Vec::new();
        let mut weight: Weight = 0;

        let mut tree: TentativeTree = loop {
            let depth = levels.len();
            self.check_deadline(depth, started)?;

            let reduction = reduce_weights(&mut graph)?;
            weight = weight.checked_add(reduction).ok_or_else(|| {
                GraphError::WeightOverflow(format!(
                    "running total {} plus level {} reduction {}",
                    weight, depth, reduction
                ))
            })?;
            let tree = build_zero_tree(&graph);

            let Some(witness) = find_witness(&graph, &tree) else {
                log::debug!(
                    "Level {}: reduced by {}, zero-weight tree spans",
                    depth,
                    reduction
                );
                levels.push(LevelStats {
                    depth,
                    reduction,
                    cycle_len: None,
                    super_vertex: None,
                });
                break tree;
            };

            if let Some(limit) = self.config.max_contractions {
                if pending.len() >= limit {
                    return Err(GraphError::ContractionLimit { limit });
                }
            }

            let cycle = extract_cycle(&graph, witness)?;
            let contraction = contract_cycle(&mut graph, cycle);
            log::debug!(
                "Level {}: reduced by {}, witness {}, contracted {}-cycle into {}",
                depth,
                reduction,
                witness,
                contraction.cycle.len(),
                contraction.super_vertex
            );
            levels.push(LevelStats {
                depth,
                reduction,
                cycle_len: Some(contraction.cycle.len()),
                super_vertex: Some(contraction.super_vertex),
            });
            pending.push(contraction);
        };

        let contractions = pending.len();
        while let Some(contraction) = pending.pop() {
            expand_cycle(&mut tree, &contraction)?;
        }

        let arborescence = Arborescence::from_tree(&graph, &tree)?;

        log::info!(
            "Minimum arborescence from {}: weight {}, {} levels, {} contractions",
            root,
            weight,
            levels.len(),
            contractions
        );

        Ok(Solution {
            weight,
            contractions,
            levels,
            arborescence,
        })
    }

    fn check_deadline(&self, depth: usize, started: Instant) -> Result<()> {
        if let Some(deadline_ms) = self.config.deadline_ms {
            let elapsed_ms = started.elapsed().as_millis();
            if elapsed_ms > u128::from(deadline_ms) {
                return Err(GraphError::DeadlineExceeded {
                    level: depth,
                    elapsed_ms,
                });
            }
        }

        Ok(())
    }
}

/// Weight of a minimum spanning arborescence with default limits
pub fn min_arborescence_weight(graph: DirectedGraph) -> Result<Weight> {
    ArborescenceSolver::default()
        .solve(graph)
        .map(|solution| solution.weight)
}
