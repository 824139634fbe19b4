//! Error types for solver operations.
//!
//! Non-convergence is deliberately absent: it is reported through
//! `NetworkSolution::converged` and `Termination`.

use hn_core::HnError;
use hn_graph::GraphError;
use hn_hydraulics::HydraulicsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Structural error: {0}")]
    Structural(#[from] GraphError),

    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Hydraulics error: {0}")]
    Hydraulics(#[from] HydraulicsError),

    #[error("Invalid state: {what}")]
    InvalidState { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for HnError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::Structural(g) => g.into(),
            SolverError::Hydraulics(h) => h.into(),
            SolverError::Configuration { what } => HnError::InvalidArg { what },
            SolverError::InvalidState { what } | SolverError::Numeric { what } => {
                HnError::Invariant { what }
            }
        }
    }
}
