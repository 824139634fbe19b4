//! Hardy Cross loop balancing.
//!
//! Each pass computes every loop's correction from the same flow field, then
//! applies all of them at once; a pipe shared by two loops receives both.

use hn_core::Real;
use hn_graph::NetworkGraph;
use hn_hydraulics::{FLOW_EXPONENT, PipeResistance};
use tracing::debug;

use crate::config::SolverConfig;
use crate::control::SolveControl;
use crate::error::{SolverError, SolverResult};
use crate::problem::HydraulicProblem;
use crate::solution::{IterationRecord, LoopCorrection, Termination};
use crate::topology::{BalancingLoop, LoopKind};

/// Flow (m³/s) around which a still, unbalanced source path is linearised.
pub const REFERENCE_FLOW: Real = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceOutcome {
    pub iterations: usize,
    pub error_final: Real,
    pub termination: Termination,
    pub log: Vec<IterationRecord>,
}

/// Correction for one loop from the current flows.
pub fn loop_correction(
    graph: &NetworkGraph,
    resistances: &[PipeResistance],
    loop_index: usize,
    lp: &BalancingLoop,
    flows: &[Real],
) -> LoopCorrection {
    let head_loss_sum = loop_imbalance(graph, resistances, lp, flows);
    let mut slope: Real = lp
        .members
        .iter()
        .map(|m| resistances[m.pipe.idx()].loss_slope(flows[m.pipe.idx()]))
        .sum();

    let degenerate = slope <= 0.0;
    if degenerate && head_loss_sum != 0.0 && matches!(lp.kind, LoopKind::SourcePath { .. }) {
        slope = lp
            .members
            .iter()
            .map(|m| resistances[m.pipe.idx()].loss_slope(REFERENCE_FLOW))
            .sum();
    }

    let derivative_sum = FLOW_EXPONENT * slope;
    let correction = if derivative_sum > 0.0 {
        -head_loss_sum / derivative_sum
    } else {
        0.0
    };

    LoopCorrection {
        loop_index,
        head_loss_sum,
        derivative_sum,
        correction,
        degenerate,
    }
}

/// Head-loss imbalance of a loop: Σ sign·hf, less the head drop between the
/// end reservoirs for a source path. Zero when the loop is balanced.
pub fn loop_imbalance(
    graph: &NetworkGraph,
    resistances: &[PipeResistance],
    lp: &BalancingLoop,
    flows: &[Real],
) -> Real {
    lp.members.iter().fold(-lp.head_drop(graph), |sum, member| {
        sum + member.sign() * resistances[member.pipe.idx()].head_loss(flows[member.pipe.idx()])
    })
}

/// Iterate until both max |ΔQ| and the largest remaining loop imbalance are
/// below tolerance, the pass budget runs out, or `control` stops us.
/// `flows` always holds the field after the last complete pass.
pub fn balance(
    problem: &HydraulicProblem<'_>,
    flows: &mut [Real],
    config: &SolverConfig,
    control: &SolveControl,
) -> SolverResult<BalanceOutcome> {
    let graph = problem.graph();
    let loops = problem.topology().balancing();
    let resistances = problem.resistances_slice();

    let mut outcome = BalanceOutcome {
        iterations: 0,
        error_final: 0.0,
        termination: Termination::Converged,
        log: Vec::new(),
    };
    if loops.is_empty() {
        return Ok(outcome);
    }
    outcome.termination = Termination::MaxIterations;

    for iteration in 1..=config.max_iterations {
        if let Some(stop) = control.check() {
            outcome.termination = stop;
            break;
        }

        let corrections: Vec<LoopCorrection> = loops
            .iter()
            .enumerate()
            .map(|(i, lp)| loop_correction(graph, resistances, i, lp, flows))
            .collect();

        if let Some(bad) = corrections.iter().find(|c| !c.correction.is_finite()) {
            return Err(SolverError::Numeric {
                what: format!(
                    "non-finite correction on loop {} at iteration {}",
                    bad.loop_index, iteration
                ),
            });
        }

        for (lp, c) in loops.iter().zip(&corrections) {
            for member in &lp.members {
                flows[member.pipe.idx()] += member.sign() * c.correction;
            }
        }

        let max_error = corrections
            .iter()
            .map(|c| c.correction.abs())
            .fold(0.0, Real::max);
        let total_correction: Real = corrections.iter().map(|c| c.correction.abs()).sum();
        let max_imbalance = loops
            .iter()
            .map(|lp| loop_imbalance(graph, resistances, lp, flows).abs())
            .fold(0.0, Real::max);
        let converged = max_error < config.tolerance && max_imbalance < config.tolerance;

        debug!(iteration, max_error, max_imbalance, total_correction, "hardy cross pass");

        outcome.iterations = iteration;
        outcome.error_final = max_error.max(max_imbalance);
        if config.record_iterations {
            outcome.log.push(IterationRecord {
                iteration,
                loops: corrections,
                max_error,
                total_correction,
                max_imbalance,
                converged,
            });
        }

        if converged {
            outcome.termination = Termination::Converged;
            break;
        }
    }

    Ok(outcome)
}
