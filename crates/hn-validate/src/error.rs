//! Error types for normative limits.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LimitsError {
    #[error("Invalid limit: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type LimitsResult<T> = Result<T, LimitsError>;
