//! Error types for the optimizer.

use hn_core::HnError;
use hn_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;

impl From<OptimizeError> for HnError {
    fn from(e: OptimizeError) -> Self {
        match e {
            OptimizeError::Configuration { what } => HnError::InvalidArg { what },
            OptimizeError::Solver(s) => s.into(),
        }
    }
}
