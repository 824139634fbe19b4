//! Solver output.

use hn_core::Real;
use hn_graph::NodeKind;
use serde::Serialize;

/// Topology class, picked automatically from the loops found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    /// Tree-shaped with one source per component: flows follow from demands.
    Open,
    /// Every pipe lies on some balancing loop.
    Looped,
    /// Loops with branches hanging off them.
    Mixed,
}

impl NetworkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NetworkKind::Open => "open",
            NetworkKind::Looped => "looped",
            NetworkKind::Mixed => "mixed",
        }
    }
}

/// Why the iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Converged,
    MaxIterations,
    Cancelled,
    TimedOut,
}

/// One loop's row of a Hardy Cross pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoopCorrection {
    /// Position in the balancing loop list.
    pub loop_index: usize,
    /// Σ sign·hf around the loop, less the head difference for source paths (m).
    pub head_loss_sum: Real,
    /// Σ n·r·|Q|^(n-1).
    pub derivative_sum: Real,
    /// ΔQ applied along the loop's walking direction (m³/s).
    pub correction: Real,
    /// All member flows were zero on this pass.
    pub degenerate: bool,
}

/// One Hardy Cross pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    /// 1-based pass number.
    pub iteration: usize,
    pub loops: Vec<LoopCorrection>,
    /// max |ΔQ| over loops.
    pub max_error: Real,
    /// Σ |ΔQ| over loops.
    pub total_correction: Real,
    /// max |Σ sign·hf| left over after the corrections were applied (m).
    pub max_imbalance: Real,
    pub converged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeState {
    pub id: String,
    pub kind: NodeKind,
    pub elevation: Real,
    pub demand: Real,
    /// Piezometric head, m.
    pub head: Real,
    /// head - elevation, m of water column.
    pub pressure: Real,
}

impl NodeState {
    pub fn is_source(&self) -> bool {
        self.kind.is_source()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeState {
    pub id: String,
    pub source: String,
    pub target: String,
    pub length: Real,
    pub diameter_mm: Real,
    pub roughness: Real,
    /// Signed along source -> target, m³/s.
    pub flow: Real,
    /// Mean speed |Q|/A, m/s; 0 for stagnant pipes.
    pub velocity: Real,
    /// Signed like the flow, m.
    pub head_loss: Real,
    /// |Q| below the solver tolerance.
    pub stagnant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub element: String,
    pub value: Real,
}

/// Headline figures of a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionSummary {
    pub kind: NetworkKind,
    pub node_count: usize,
    pub pipe_count: usize,
    pub loop_count: usize,
    pub total_demand: Real,
    /// Over consumption (non-source) nodes.
    pub min_pressure: Option<Extreme>,
    pub max_pressure: Option<Extreme>,
    pub max_velocity: Option<Extreme>,
    pub converged: bool,
    pub iterations_run: usize,
}

/// Result of one solve. Returned even when the iteration did not converge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkSolution {
    pub nodes: Vec<NodeState>,
    pub pipes: Vec<PipeState>,
    pub kind: NetworkKind,
    /// Independent loops of the pipe graph.
    pub loop_count: usize,
    /// Loops plus source-to-source paths that were balanced.
    pub balancing_loop_count: usize,
    pub converged: bool,
    pub termination: Termination,
    /// Larger of max |ΔQ| and the residual loop imbalance after the last pass
    /// (0 when no balancing was needed).
    pub error_final: Real,
    pub iterations_run: usize,
    pub iteration_log: Vec<IterationRecord>,
}

impl NetworkSolution {
    pub fn node(&self, id: &str) -> Option<&NodeState> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn pipe(&self, id: &str) -> Option<&PipeState> {
        self.pipes.iter().find(|p| p.id == id)
    }

    /// Signed pipe flows in arena order, e.g. for a warm start.
    pub fn flows(&self) -> Vec<Real> {
        self.pipes.iter().map(|p| p.flow).collect()
    }

    pub fn summary(&self) -> SolutionSummary {
        let consumers = || self.nodes.iter().filter(|n| !n.is_source());
        let min_pressure = extreme(consumers().map(|n| (&n.id, n.pressure)), |a, b| a < b);
        let max_pressure = extreme(consumers().map(|n| (&n.id, n.pressure)), |a, b| a > b);
        let max_velocity = extreme(self.pipes.iter().map(|p| (&p.id, p.velocity)), |a, b| a > b);

        SolutionSummary {
            kind: self.kind,
            node_count: self.nodes.len(),
            pipe_count: self.pipes.len(),
            loop_count: self.loop_count,
            total_demand: self.nodes.iter().map(|n| n.demand).sum(),
            min_pressure,
            max_pressure,
            max_velocity,
            converged: self.converged,
            iterations_run: self.iterations_run,
        }
    }
}

/// First element that no later element beats.
fn extreme<'a>(
    items: impl Iterator<Item = (&'a String, Real)>,
    better: impl Fn(Real, Real) -> bool,
) -> Option<Extreme> {
    let mut best: Option<(&String, Real)> = None;
    for (id, value) in items {
        if best.is_none_or(|(_, b)| better(value, b)) {
            best = Some((id, value));
        }
    }
    best.map(|(id, value)| Extreme {
        element: id.clone(),
        value,
    })
}
