use dmst_graph::{DirectedGraph, VertexId, WeightedEdge};
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

/// Errors in the textual graph description
#[derive(Error, Debug)]
pub enum InputError {
    #[error("line {line}: expected 3 header fields (numVertices numEdges source), found {found}")]
    Header { line: usize, found: usize },

    #[error("line {line}: expected 3 edge fields (src dst weight), found {found}")]
    EdgeLine { line: usize, found: usize },

    #[error("line {line}: invalid integer {token:?}")]
    InvalidNumber { line: usize, token: String },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed graph description, before any range checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphInput {
    pub vertex_count: usize,

    /// Edge count announced on the header line
    pub declared_edges: usize,

    pub root: VertexId,

    pub edges: Vec<WeightedEdge>,
}

impl GraphInput {
    /// Build the graph by inserting the edges one by one
    pub fn into_graph(self) -> dmst_graph::Result<DirectedGraph> {
        DirectedGraph::from_edges(self.vertex_count, self.root, self.edges)
    }
}

/// Read and parse a graph description from any reader
pub fn read_graph_input(mut reader: impl Read) -> Result<Option<GraphInput>, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_graph_input(&text)
}

/// Parse `numVertices numEdges source` followed by `src dst weight` lines.
///
/// Returns `Ok(None)` when the first line is missing or blank. Edge lines are
/// read up to EOF or the first blank line.
pub fn parse_graph_input(text: &str) -> Result<Option<GraphInput>, InputError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

    let Some((header_line, header)) = lines.next() else {
        return Ok(None);
    };
    if header.is_empty() {
        return Ok(None);
    }

    let [n, m, s] = split_fields(header).map_err(|found| InputError::Header {
        line: header_line,
        found,
    })?;
    let vertex_count = number::<usize>(n, header_line)?;
    let declared_edges = number::<usize>(m, header_line)?;
    let root = number::<VertexId>(s, header_line)?;

    let mut edges = Vec::new();
    for (line_no, line) in lines {
        if line.is_empty() {
            break;
        }
        let [src, dst, weight] = split_fields(line).map_err(|found| InputError::EdgeLine {
            line: line_no,
            found,
        })?;
        edges.push(WeightedEdge::new(
            number(src, line_no)?,
            number(dst, line_no)?,
            number(weight, line_no)?,
        ));
    }

    if edges.len() != declared_edges {
        log::warn!(
            "Header announces {} edges but {} edge lines were read",
            declared_edges,
            edges.len()
        );
    }

    Ok(Some(GraphInput {
        vertex_count,
        declared_edges,
        root,
        edges,
    }))
}

/// The three whitespace-separated fields of a line, or the number found
fn split_fields(line: &str) -> Result<[&str; 3], usize> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(tokens.len()),
    }
}

fn number<T: FromStr>(token: &str, line: usize) -> Result<T, InputError> {
    token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
