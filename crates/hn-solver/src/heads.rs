//! Head propagation from the fixed-head sources.

use hn_core::Real;
use hn_graph::{LoopMember, NodeKind};

use crate::error::{SolverError, SolverResult};
use crate::problem::HydraulicProblem;

/// Piezometric head per node (arena order), walking the forest from its roots.
///
/// A child's head is its parent's less the signed loss of the tree pipe between
/// them. Sources keep their fixed head. A pressure-break chamber reached with
/// positive pressure is reset to its elevation before propagation continues.
pub fn propagate_heads(problem: &HydraulicProblem<'_>, flows: &[Real]) -> SolverResult<Vec<Real>> {
    let graph = problem.graph();
    let forest = problem.topology().forest();
    let mut heads = vec![0.0; graph.node_count()];

    for &id in forest.order() {
        let node = &graph.nodes()[id.idx()];
        let mut head = match (node.source_head(), forest.parent(id)) {
            (Some(fixed), _) => fixed,
            (None, Some((pipe, parent))) => {
                let member = LoopMember::walking(graph, pipe, parent);
                heads[parent.idx()] - member.sign() * problem.resistance(pipe).head_loss(flows[pipe.idx()])
            }
            (None, None) => {
                return Err(SolverError::InvalidState {
                    what: format!("node {} has neither a source nor a supply path", node.key),
                });
            }
        };
        if node.kind == NodeKind::PressureBreakChamber && head > node.elevation {
            head = node.elevation;
        }
        if !head.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("head at node {} is not finite", node.key),
            });
        }
        heads[id.idx()] = head;
    }

    Ok(heads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::distribute_demand;
    use hn_graph::NetworkBuilder;

    #[test]
    fn chamber_resets_head_for_everything_below_it() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 200.0, None);
        let c = b.add_node("CRP", NodeKind::PressureBreakChamber, 150.0, 0.0);
        let j = b.junction("J", 100.0, 0.002);
        b.add_pipe("P1", r, c, 100.0, 100.0, 140.0);
        let p2 = b.add_pipe("P2", c, j, 100.0, 100.0, 140.0);
        let g = b.build().unwrap();
        let problem = HydraulicProblem::new(&g).unwrap();
        let flows = distribute_demand(&problem);

        let heads = propagate_heads(&problem, &flows).unwrap();
        assert_eq!(heads[1], 150.0);
        let hf = problem.resistance(p2).head_loss(0.002);
        assert!((heads[2] - (150.0 - hf)).abs() < 1e-12);
    }

    #[test]
    fn reversed_pipe_still_loses_head_downstream() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let j = b.junction("J", 50.0, 0.01);
        // declared from the junction back to the reservoir
        let p = b.add_pipe("P", j, r, 300.0, 100.0, 140.0);
        let g = b.build().unwrap();
        let problem = HydraulicProblem::new(&g).unwrap();
        let flows = distribute_demand(&problem);
        assert!(flows[0] < 0.0);

        let heads = propagate_heads(&problem, &flows).unwrap();
        let hf = problem.resistance(p).head_loss(0.01);
        assert!((heads[1] - (100.0 - hf)).abs() < 1e-12);
    }
}
