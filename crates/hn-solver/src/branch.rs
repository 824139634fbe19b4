//! Demand accumulation over the spanning forest.
//!
//! With chord flows fixed, continuity fixes every tree flow: sweeping the forest
//! leaves-first, each tree pipe carries everything its subtree consumes. For an
//! open network there are no chords and this is the exact solution; otherwise it
//! is the mass-conserving starting point for Hardy Cross.

use hn_core::Real;

use crate::problem::HydraulicProblem;

/// Pipe flows (arena order) satisfying continuity at every consumption node.
///
/// Chords take their initial guess (or 0). A source that is not a tree root
/// supplies what the guessed flows around it say it does, or nothing when any of
/// its pipes has no guess.
pub fn distribute_demand(problem: &HydraulicProblem<'_>) -> Vec<Real> {
    let graph = problem.graph();
    let forest = problem.topology().forest();
    let guesses = problem.initial_flows();
    let pipes = graph.pipes();

    let mut flows = vec![0.0; graph.pipe_count()];
    // Net flow each node's subtree must receive through its parent pipe
    let mut required: Vec<Real> = graph
        .nodes()
        .iter()
        .map(|n| if n.is_source() { 0.0 } else { n.demand })
        .collect();

    for node in graph.nodes().iter().filter(|n| n.is_source()) {
        if forest.parent(node.id).is_none() {
            continue;
        }
        let incident = graph.incident_pipes(node.id);
        if incident.iter().all(|p| guesses[p.idx()].is_some()) {
            let supplied: Real = incident
                .iter()
                .map(|&p| {
                    let q = guesses[p.idx()].unwrap_or(0.0);
                    if pipes[p.idx()].source == node.id { q } else { -q }
                })
                .sum();
            required[node.id.idx()] -= supplied;
        }
    }

    for chord in forest.chords() {
        let q = guesses[chord.idx()].unwrap_or(0.0);
        let pipe = &pipes[chord.idx()];
        flows[chord.idx()] = q;
        required[pipe.source.idx()] += q;
        required[pipe.target.idx()] -= q;
    }

    for &node in forest.order().iter().rev() {
        let Some((pipe, parent)) = forest.parent(node) else {
            continue;
        };
        let q = required[node.idx()];
        flows[pipe.idx()] = if pipes[pipe.idx()].target == node { q } else { -q };
        required[parent.idx()] += q;
    }

    flows
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_graph::NetworkBuilder;

    #[test]
    fn branch_flows_sum_downstream_demand() {
        //        /- B (0.002)
        // R - A -
        //        \- C (0.003) - D (0.004)
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let a = b.junction("A", 0.0, 0.001);
        let bb = b.junction("B", 0.0, 0.002);
        let c = b.junction("C", 0.0, 0.003);
        let d = b.junction("D", 0.0, 0.004);
        b.add_pipe("RA", r, a, 10.0, 100.0, 140.0);
        b.add_pipe("AB", a, bb, 10.0, 100.0, 140.0);
        // declared against the flow direction
        b.add_pipe("CA", c, a, 10.0, 100.0, 140.0);
        b.add_pipe("CD", c, d, 10.0, 100.0, 140.0);
        let g = b.build().unwrap();
        let problem = HydraulicProblem::new(&g).unwrap();

        let flows = distribute_demand(&problem);
        assert!((flows[0] - 0.010).abs() < 1e-15);
        assert!((flows[1] - 0.002).abs() < 1e-15);
        assert!((flows[2] + 0.007).abs() < 1e-15);
        assert!((flows[3] - 0.004).abs() < 1e-15);
    }

    #[test]
    fn chord_guess_is_respected() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let j = b.junction("J", 0.0, 0.05);
        b.add_pipe("P0", r, j, 10.0, 150.0, 140.0);
        let p1 = b.add_pipe("P1", r, j, 10.0, 100.0, 140.0);
        b.set_initial_flow(p1, 0.02);
        let g = b.build().unwrap();
        let problem = HydraulicProblem::new(&g).unwrap();

        let flows = distribute_demand(&problem);
        assert!((flows[1] - 0.02).abs() < 1e-15);
        assert!((flows[0] - 0.03).abs() < 1e-15);
    }
}
