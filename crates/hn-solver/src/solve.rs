//! Solver entry points.

use hn_core::Real;
use hn_graph::{NetworkGraph, NodeRecord, PipeRecord};
use hn_hydraulics::velocity;
use tracing::{debug, info, warn};

use crate::branch::distribute_demand;
use crate::config::SolverConfig;
use crate::control::SolveControl;
use crate::error::SolverResult;
use crate::hardy_cross::{BalanceOutcome, balance};
use crate::heads::propagate_heads;
use crate::problem::HydraulicProblem;
use crate::solution::{NetworkSolution, NodeState, PipeState, Termination};

/// Solve to convergence or until `max_iterations` passes.
pub fn solve(problem: &HydraulicProblem<'_>, config: &SolverConfig) -> SolverResult<NetworkSolution> {
    solve_with_control(problem, config, &SolveControl::unbounded())
}

/// Solve, stopping early when `control` says so. A stopped solve still returns the
/// flows of its last complete pass, flagged as not converged.
pub fn solve_with_control(
    problem: &HydraulicProblem<'_>,
    config: &SolverConfig,
    control: &SolveControl,
) -> SolverResult<NetworkSolution> {
    config.validate()?;
    let graph = problem.graph();
    let topology = problem.topology();

    info!(
        kind = topology.kind().as_str(),
        nodes = graph.node_count(),
        pipes = graph.pipe_count(),
        loops = topology.loops().len(),
        balancing = topology.balancing().len(),
        "solving network"
    );

    let mut flows = distribute_demand(problem);
    let outcome = balance(problem, &mut flows, config, control)?;

    match outcome.termination {
        Termination::Converged => debug!(
            iterations = outcome.iterations,
            error = outcome.error_final,
            "converged"
        ),
        other => warn!(
            termination = ?other,
            iterations = outcome.iterations,
            error = outcome.error_final,
            "solve stopped before convergence"
        ),
    }

    let heads = propagate_heads(problem, &flows)?;
    Ok(assemble(problem, config, &flows, &heads, outcome))
}

/// Build the network from plain records and solve it.
pub fn solve_records(
    nodes: &[NodeRecord],
    pipes: &[PipeRecord],
    config: &SolverConfig,
) -> SolverResult<NetworkSolution> {
    config.validate()?;
    let graph = NetworkGraph::from_records(nodes, pipes)?;
    let problem = HydraulicProblem::new(&graph)?;
    solve(&problem, config)
}

fn assemble(
    problem: &HydraulicProblem<'_>,
    config: &SolverConfig,
    flows: &[Real],
    heads: &[Real],
    outcome: BalanceOutcome,
) -> NetworkSolution {
    let graph = problem.graph();
    let topology = problem.topology();

    let nodes = graph
        .nodes()
        .iter()
        .zip(heads)
        .map(|(n, &head)| NodeState {
            id: n.key.clone(),
            kind: n.kind,
            elevation: n.elevation,
            demand: n.demand,
            head,
            pressure: head - n.elevation,
        })
        .collect();

    let pipes = graph
        .pipes()
        .iter()
        .zip(flows)
        .zip(problem.diameters_mm())
        .map(|((p, &flow), &diameter_mm)| {
            let stagnant = flow.abs() < config.tolerance;
            PipeState {
                id: p.key.clone(),
                source: graph.nodes()[p.source.idx()].key.clone(),
                target: graph.nodes()[p.target.idx()].key.clone(),
                length: p.length,
                diameter_mm,
                roughness: p.roughness,
                flow,
                velocity: if stagnant { 0.0 } else { velocity(flow, diameter_mm).abs() },
                head_loss: problem.resistance(p.id).head_loss(flow),
                stagnant,
            }
        })
        .collect();

    NetworkSolution {
        nodes,
        pipes,
        kind: topology.kind(),
        loop_count: topology.loops().len(),
        balancing_loop_count: topology.balancing().len(),
        converged: outcome.termination == Termination::Converged,
        termination: outcome.termination,
        error_final: outcome.error_final,
        iterations_run: outcome.iterations,
        iteration_log: outcome.log,
    }
}
