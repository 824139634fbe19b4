//! Plain node and pipe records exchanged with the caller.
//!
//! Records reference each other by string key only; `NetworkBuilder` resolves
//! them into arena ids.

use hn_core::Real;
use serde::{Deserialize, Serialize};

/// Role of a node in the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    #[default]
    Junction,
    Reservoir,
    ElevatedTank,
    Cistern,
    Valve,
    Pump,
    PressureBreakChamber,
}

impl NodeKind {
    /// Reservoirs, elevated tanks and cisterns impose a fixed head.
    pub fn is_source(self) -> bool {
        matches!(
            self,
            NodeKind::Reservoir | NodeKind::ElevatedTank | NodeKind::Cistern
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Junction => "junction",
            NodeKind::Reservoir => "reservoir",
            NodeKind::ElevatedTank => "elevated_tank",
            NodeKind::Cistern => "cistern",
            NodeKind::Valve => "valve",
            NodeKind::Pump => "pump",
            NodeKind::PressureBreakChamber => "pressure_break_chamber",
        }
    }
}

/// Node as supplied by the caller. Demand is in m³/s, elevation and head in m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub kind: NodeKind,
    pub elevation: Real,
    #[serde(default)]
    pub demand: Real,
    /// Fixed piezometric head for sources; defaults to the elevation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Real>,
}

/// Pipe as supplied by the caller. Length in m, internal diameter in mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeRecord {
    pub id: String,
    pub source: String,
    pub target: String,
    pub length: Real,
    pub diameter_mm: Real,
    /// Hazen-Williams C.
    pub roughness: Real,
    /// Optional first guess for the flow (m³/s, signed along source -> target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_flow: Option<Real>,
}
