//! Least-cost pipe sizing with a genetic algorithm.
//!
//! A genome picks one commercial diameter (catalog index) per pipe. Each
//! candidate is solved with the hydraulic solver and scored as
//! `cost + penalty`, where the penalty grows with how far pressures and
//! velocities fall outside the design window. Random draws are seeded and
//! sequential; only fitness evaluation fans out over rayon, so a given seed
//! always yields the same result.

pub mod config;
pub mod cost;
pub mod error;
pub mod evaluate;
pub mod genetic;
pub mod optimize;
pub mod report;

pub use config::{CrossoverKind, OptimizerConfig, PenaltyWeights};
pub use cost::CostFunction;
pub use error::{OptimizeError, OptimizeResult};
pub use evaluate::{Evaluation, Evaluator, evaluate_design};
pub use genetic::Genome;
pub use optimize::{optimize, optimize_records, optimize_with_control};
pub use report::{
    Action, GenerationStats, OptimizationReport, PipeDesign, Recommendation,
};
