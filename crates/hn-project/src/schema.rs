//! Project schema definitions.

use hn_graph::NodeKind;
use hn_hydraulics::Material;
use hn_optimize::OptimizerConfig;
use hn_solver::SolverConfig;
use hn_validate::{Ambit, NormativeLimits};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub ambit: Ambit,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub pipes: Vec<PipeDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverConfig>,
    /// Overrides the ambit's default limits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<NormativeLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimizer: Option<OptimizerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default)]
    pub kind: NodeKind,
    /// m
    pub elevation: f64,
    /// m³/s
    #[serde(default)]
    pub demand: f64,
    /// Fixed head for sources (m); the elevation when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipeDef {
    pub id: String,
    pub from: String,
    pub to: String,
    /// m
    pub length: f64,
    /// Internal diameter, mm.
    pub diameter_mm: f64,
    /// Hazen-Williams C; taken from `material` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    /// m³/s along from -> to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_flow: Option<f64>,
}
