//! Solver configuration.

use hn_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverResult};

/// Hardy Cross settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Convergence threshold on both the largest loop correction |ΔQ| (m³/s)
    /// and the largest remaining loop imbalance (m).
    pub tolerance: Real,
    /// Maximum Hardy Cross passes before giving up (result flagged non-convergent).
    pub max_iterations: usize,
    /// Keep the per-pass iteration log. The optimizer turns this off.
    pub record_iterations: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-7,
            max_iterations: 1000,
            record_iterations: true,
        }
    }
}

impl SolverConfig {
    pub fn new(tolerance: Real, max_iterations: usize) -> SolverResult<Self> {
        let config = Self {
            tolerance,
            max_iterations,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the iteration meaningless.
    pub fn validate(&self) -> SolverResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolverError::Configuration {
                what: format!("tolerance must be > 0 (got {})", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(SolverError::Configuration {
                what: "max_iterations must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = SolverConfig::default();
        assert_eq!(c.tolerance, 1e-7);
        assert_eq!(c.max_iterations, 1000);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_tolerance_and_iterations() {
        assert!(matches!(
            SolverConfig::new(0.0, 10),
            Err(SolverError::Configuration { .. })
        ));
        assert!(matches!(
            SolverConfig::new(-1e-6, 10),
            Err(SolverError::Configuration { .. })
        ));
        assert!(matches!(
            SolverConfig::new(f64::NAN, 10),
            Err(SolverError::Configuration { .. })
        ));
        assert!(matches!(
            SolverConfig::new(1e-7, 0),
            Err(SolverError::Configuration { .. })
        ));
    }
}
