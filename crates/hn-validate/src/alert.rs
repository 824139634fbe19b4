//! Alerts raised by the validator.

use hn_core::Real;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Which check produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    NegativePressure,
    LowPressure,
    HighPressure,
    HighVelocity,
    LowVelocity,
    SmallDiameter,
    NotConverged,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Rule::NegativePressure => "negative_pressure",
            Rule::LowPressure => "low_pressure",
            Rule::HighPressure => "high_pressure",
            Rule::HighVelocity => "high_velocity",
            Rule::LowVelocity => "low_velocity",
            Rule::SmallDiameter => "small_diameter",
            Rule::NotConverged => "not_converged",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Rule::NegativePressure | Rule::LowPressure | Rule::HighVelocity | Rule::SmallDiameter => {
                Severity::Error
            }
            Rule::HighPressure | Rule::LowVelocity | Rule::NotConverged => Severity::Warning,
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            Rule::NegativePressure | Rule::LowPressure => {
                "increase the diameter of the feeding pipes or check the source level"
            }
            Rule::HighPressure => "consider a pressure-reducing valve or a break chamber",
            Rule::HighVelocity => "increase the diameter to lower the velocity and water hammer risk",
            Rule::LowVelocity => "sedimentation risk: reduce the diameter or increase the flow",
            Rule::SmallDiameter => "select a larger commercial diameter",
            Rule::NotConverged => "raise max_iterations or check the network data before relying on these values",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Node,
    Pipe,
    Network,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationAlert {
    pub severity: Severity,
    pub rule: Rule,
    /// Node or pipe id; empty for network-wide alerts.
    pub element_id: String,
    pub element_type: ElementType,
    pub value: Real,
    pub threshold: Real,
    pub unit: &'static str,
    pub message: String,
    pub suggestion: &'static str,
    pub reference: String,
}

impl std::fmt::Display for ValidationAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.severity.as_str(),
            self.message,
            self.reference
        )
    }
}
