//! Structural validation of networks.

use std::collections::HashSet;

use hn_core::{PipeId, Real};

use crate::error::{GraphError, GraphResult};
use crate::graph::{NetworkGraph, Node, Pipe};

fn positive(v: Real) -> bool {
    v.is_finite() && v > 0.0
}

/// Node values are usable, pipe endpoints exist and pipe geometry is non-degenerate.
pub(crate) fn validate_structure(nodes: &[Node], pipes: &[Pipe]) -> GraphResult<()> {
    for node in nodes {
        let reason = if !node.elevation.is_finite() {
            Some(format!("elevation {} is not finite", node.elevation))
        } else if !node.demand.is_finite() || node.demand < 0.0 {
            Some(format!("demand {} must be finite and >= 0", node.demand))
        } else if node.fixed_head.is_some_and(|h| !h.is_finite()) {
            Some("fixed head is not finite".to_string())
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(GraphError::InvalidNode {
                node: node.key.clone(),
                reason,
            });
        }
    }

    for pipe in pipes {
        for end in [pipe.source, pipe.target] {
            if end.idx() >= nodes.len() {
                return Err(GraphError::UnknownNode {
                    pipe: pipe.key.clone(),
                    node: end.to_string(),
                });
            }
        }

        let reason = if pipe.source == pipe.target {
            Some("connects a node to itself".to_string())
        } else if !positive(pipe.length) {
            Some(format!("length {} m must be > 0", pipe.length))
        } else if !positive(pipe.diameter_mm) {
            Some(format!("diameter {} mm must be > 0", pipe.diameter_mm))
        } else if !positive(pipe.roughness) {
            Some(format!("roughness coefficient {} must be > 0", pipe.roughness))
        } else if pipe.initial_flow.is_some_and(|q| !q.is_finite()) {
            Some("initial flow is not finite".to_string())
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(GraphError::DegeneratePipe {
                pipe: pipe.key.clone(),
                reason,
            });
        }
    }

    Ok(())
}

/// Adjacency lists are consistent with the pipe endpoints.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    pipes: &[Pipe],
    node_pipe_offsets: &[usize],
    node_pipes: &[PipeId],
) -> GraphResult<()> {
    let broken = |what: String| GraphError::InvalidNode {
        node: what,
        reason: "inconsistent adjacency".to_string(),
    };

    if node_pipe_offsets.len() != nodes.len() + 1 {
        return Err(broken("<offsets>".to_string()));
    }

    let mut seen: HashSet<(PipeId, usize)> = HashSet::new();
    for node in nodes {
        let idx = node.id.idx();
        let list = &node_pipes[node_pipe_offsets[idx]..node_pipe_offsets[idx + 1]];
        for &pipe_id in list {
            let Some(pipe) = pipes.get(pipe_id.idx()) else {
                return Err(broken(node.key.clone()));
            };
            if pipe.source != node.id && pipe.target != node.id {
                return Err(broken(node.key.clone()));
            }
            if !seen.insert((pipe_id, idx)) {
                return Err(broken(node.key.clone()));
            }
        }
    }

    // Each pipe appears once at each of its two endpoints
    if seen.len() != pipes.len() * 2 {
        return Err(broken("<pipes>".to_string()));
    }

    Ok(())
}

/// Every node shares a connected component with at least one source.
pub(crate) fn validate_supply(graph: &NetworkGraph) -> GraphResult<()> {
    if graph.nodes.is_empty() {
        return Ok(());
    }
    if graph.nodes.iter().all(|n| !n.is_source()) {
        return Err(GraphError::NoSource);
    }

    let (labels, count) = graph.component_labels();
    let mut supplied = vec![false; count];
    for node in graph.nodes.iter().filter(|n| n.is_source()) {
        supplied[labels[node.id.idx()]] = true;
    }

    match graph.nodes.iter().find(|n| !supplied[labels[n.id.idx()]]) {
        Some(node) => Err(GraphError::Disconnected {
            node: node.key.clone(),
        }),
        None => Ok(()),
    }
}
