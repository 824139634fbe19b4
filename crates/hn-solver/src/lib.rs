//! Steady-state hydraulic solver for water distribution networks.
//!
//! Flows are balanced with the Hardy Cross method over the independent loops of
//! the network (plus one path between each pair of fixed-head sources); purely
//! branched networks are solved exactly by demand accumulation. Heads are then
//! propagated outward from the sources with Hazen-Williams head losses.

pub mod branch;
pub mod config;
pub mod control;
pub mod error;
pub mod hardy_cross;
pub mod heads;
pub mod problem;
pub mod solution;
pub mod solve;
pub mod topology;

pub use config::SolverConfig;
pub use control::{CancelFlag, SolveControl};
pub use error::{SolverError, SolverResult};
pub use problem::HydraulicProblem;
pub use solution::{
    Extreme, IterationRecord, LoopCorrection, NetworkKind, NetworkSolution, NodeState, PipeState,
    SolutionSummary, Termination,
};
pub use solve::{solve, solve_records, solve_with_control};
pub use topology::{BalancingLoop, LoopKind, Topology};
