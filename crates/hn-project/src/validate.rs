//! Project validation logic.

use std::collections::HashSet;

use crate::schema::{NodeDef, PipeDef, Project};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid settings: {what}")]
    Settings { what: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: String, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut node_ids = HashSet::new();
    for node in &project.nodes {
        if !node_ids.insert(node.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    let mut pipe_ids = HashSet::new();
    for pipe in &project.pipes {
        if !pipe_ids.insert(pipe.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: pipe.id.clone(),
                context: "pipes".to_string(),
            });
        }
        validate_pipe(pipe, &node_ids)?;
    }

    if !project.nodes.is_empty() && !project.nodes.iter().any(|n| n.kind.is_source()) {
        return Err(ValidationError::Settings {
            what: "network has no reservoir, tank or cistern".to_string(),
        });
    }

    if let Some(solver) = &project.solver {
        solver.validate().map_err(|e| ValidationError::Settings {
            what: e.to_string(),
        })?;
    }
    if let Some(limits) = &project.limits {
        limits.validate().map_err(|e| ValidationError::Settings {
            what: e.to_string(),
        })?;
    }
    if let Some(optimizer) = &project.optimizer {
        optimizer.validate().map_err(|e| ValidationError::Settings {
            what: e.to_string(),
        })?;
    }

    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    if !node.elevation.is_finite() {
        return Err(invalid(
            format!("node {} elevation", node.id),
            node.elevation,
            "must be finite",
        ));
    }
    if !(node.demand.is_finite() && node.demand >= 0.0) {
        return Err(invalid(
            format!("node {} demand", node.id),
            node.demand,
            "must be >= 0",
        ));
    }
    if let Some(head) = node.head {
        if !head.is_finite() {
            return Err(invalid(format!("node {} head", node.id), head, "must be finite"));
        }
        if !node.kind.is_source() {
            return Err(invalid(
                format!("node {} head", node.id),
                head,
                "only sources have a fixed head",
            ));
        }
    }
    Ok(())
}

fn validate_pipe(pipe: &PipeDef, node_ids: &HashSet<&str>) -> Result<(), ValidationError> {
    for end in [&pipe.from, &pipe.to] {
        if !node_ids.contains(end.as_str()) {
            return Err(ValidationError::MissingReference {
                id: end.clone(),
                context: format!("pipe {}", pipe.id),
            });
        }
    }
    if pipe.from == pipe.to {
        return Err(ValidationError::InvalidValue {
            field: format!("pipe {} ends", pipe.id),
            value: pipe.from.clone(),
            reason: "pipe connects a node to itself".to_string(),
        });
    }

    let positive = [
        ("length", pipe.length),
        ("diameter_mm", pipe.diameter_mm),
    ]
    .into_iter()
    .chain(pipe.roughness.map(|c| ("roughness", c)));
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(format!("pipe {} {field}", pipe.id), value, "must be > 0"));
        }
    }
    if let Some(q) = pipe.initial_flow.filter(|q| !q.is_finite()) {
        return Err(invalid(
            format!("pipe {} initial_flow", pipe.id),
            q,
            "must be finite",
        ));
    }
    Ok(())
}
