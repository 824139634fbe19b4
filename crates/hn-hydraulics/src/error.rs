//! Error types for hydraulic calculations.

use hn_core::HnError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: String },

    #[error("Diameter catalog is empty")]
    EmptyCatalog,

    #[error("Invalid catalog entry {index}: {what}")]
    InvalidCatalogEntry { index: usize, what: String },
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<HnError> for HydraulicsError {
    fn from(e: HnError) -> Self {
        HydraulicsError::NonPhysical {
            what: e.to_string(),
        }
    }
}

impl From<HydraulicsError> for HnError {
    fn from(e: HydraulicsError) -> Self {
        HnError::InvalidArg {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HydraulicsError::NonPhysical {
            what: "diameter".into(),
        };
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn error_conversion() {
        let core: HnError = HydraulicsError::EmptyCatalog.into();
        assert!(matches!(core, HnError::InvalidArg { .. }));
    }
}
