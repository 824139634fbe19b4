//! Threshold sets per ambit.

use hn_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::{LimitsError, LimitsResult};

/// Regulatory setting a network is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ambit {
    #[default]
    #[serde(alias = "urbano")]
    Urban,
    Rural,
}

impl Ambit {
    pub fn as_str(self) -> &'static str {
        match self {
            Ambit::Urban => "urban",
            Ambit::Rural => "rural",
        }
    }
}

impl std::str::FromStr for Ambit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "urban" | "urbano" => Ok(Ambit::Urban),
            "rural" => Ok(Ambit::Rural),
            other => Err(format!("unknown ambit '{other}' (expected urban or rural)")),
        }
    }
}

/// Thresholds the validator compares against. Pressures in m of water column,
/// velocities in m/s, diameters in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeLimits {
    pub min_pressure: Real,
    pub max_pressure: Real,
    pub min_velocity: Real,
    pub max_velocity: Real,
    pub min_diameter_mm: Real,
    /// Regulation the thresholds come from, quoted in alerts.
    pub reference: String,
}

impl NormativeLimits {
    pub fn urban() -> Self {
        Self {
            min_pressure: 10.0,
            max_pressure: 50.0,
            min_velocity: 0.6,
            max_velocity: 3.0,
            min_diameter_mm: 75.0,
            reference: "RNE OS.050".to_string(),
        }
    }

    pub fn rural() -> Self {
        Self {
            min_pressure: 5.0,
            max_pressure: 50.0,
            min_velocity: 0.6,
            max_velocity: 3.0,
            min_diameter_mm: 25.0,
            reference: "RM 192-2018".to_string(),
        }
    }

    pub fn for_ambit(ambit: Ambit) -> Self {
        match ambit {
            Ambit::Urban => Self::urban(),
            Ambit::Rural => Self::rural(),
        }
    }

    pub fn validate(&self) -> LimitsResult<()> {
        let fields = [
            ("min_pressure", self.min_pressure),
            ("max_pressure", self.max_pressure),
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
            ("min_diameter_mm", self.min_diameter_mm),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LimitsError::InvalidValue {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
        }
        for (field, value) in [
            ("min_velocity", self.min_velocity),
            ("min_diameter_mm", self.min_diameter_mm),
        ] {
            if value < 0.0 {
                return Err(LimitsError::InvalidValue {
                    field,
                    value,
                    reason: "must be >= 0",
                });
            }
        }
        if self.max_pressure < self.min_pressure {
            return Err(LimitsError::InvalidValue {
                field: "max_pressure",
                value: self.max_pressure,
                reason: "below min_pressure",
            });
        }
        if self.max_velocity < self.min_velocity {
            return Err(LimitsError::InvalidValue {
                field: "max_velocity",
                value: self.max_velocity,
                reason: "below min_velocity",
            });
        }
        Ok(())
    }
}

impl Default for NormativeLimits {
    fn default() -> Self {
        Self::urban()
    }
}
