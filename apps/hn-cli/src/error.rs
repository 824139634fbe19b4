use hn_optimize::OptimizeError;
use hn_project::ProjectError;
use hn_solver::SolverError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Network error: {0}")]
    Graph(#[from] hn_graph::GraphError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Optimizer error: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("Invalid limits: {0}")]
    Limits(#[from] hn_validate::LimitsError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}
