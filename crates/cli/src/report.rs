use crate::flags::OutputFormat;
use anyhow::Result;
use dmst_graph::{LevelStats, Solution, VertexId, Weight, WeightedEdge};
use serde::Serialize;
use std::time::Duration;

/// Everything one run produced, in a printable shape
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub weight: Weight,
    pub elapsed_ms: u128,
    pub vertices: usize,
    pub edges: usize,
    pub root: VertexId,
    pub contractions: usize,
    pub levels: Vec<LevelStats>,
    pub tree: Vec<WeightedEdge>,
}

impl RunReport {
    pub fn new(vertices: usize, edges: usize, solution: Solution, elapsed: Duration) -> Self {
        Self {
            weight: solution.weight,
            elapsed_ms: elapsed.as_millis(),
            vertices,
            edges,
            root: solution.arborescence.root(),
            contractions: solution.contractions,
            levels: solution.levels,
            tree: solution.arborescence.edges().to_vec(),
        }
    }
}

/// Render a report for stdout.
///
/// `print_tree` appends the tree edges as `(u,v)` lines to the plain and
/// timing formats; JSON always carries the tree.
pub fn render_report(report: &RunReport, format: OutputFormat, print_tree: bool) -> Result<String> {
    let mut out = match format {
        OutputFormat::Plain => format!("{}\n", report.weight),
        OutputFormat::Timing => format!("{} {}\n", report.weight, report.elapsed_ms),
        OutputFormat::Json => return Ok(serde_json::to_string_pretty(report)? + "\n"),
    };

    if print_tree {
        for edge in &report.tree {
            out.push_str(&format!("({},{})\n", edge.source, edge.target));
        }
    }

    Ok(out)
}
