//! Validation report.

use serde::Serialize;

use crate::alert::{Severity, ValidationAlert};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// No error-severity alerts.
    pub valid: bool,
    /// False when the solution did not converge; the values checked are then
    /// the last iterate and should not be trusted as a design.
    pub reliable: bool,
    pub alerts: Vec<ValidationAlert>,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    /// Checks performed and checks passed without an alert.
    pub checks: usize,
    pub passed: usize,
}

impl ValidationReport {
    pub(crate) fn new(alerts: Vec<ValidationAlert>, checks: usize, reliable: bool) -> Self {
        let count = |s: Severity| alerts.iter().filter(|a| a.severity == s).count();
        let errors = count(Severity::Error);
        let warnings = count(Severity::Warning);
        let infos = count(Severity::Info);
        Self {
            valid: errors == 0,
            reliable,
            passed: checks.saturating_sub(alerts.len()),
            alerts,
            errors,
            warnings,
            infos,
            checks,
        }
    }

    /// Alerts at or above `severity`.
    pub fn at_least(&self, severity: Severity) -> impl Iterator<Item = &ValidationAlert> {
        self.alerts.iter().filter(move |a| a.severity >= severity)
    }
}
