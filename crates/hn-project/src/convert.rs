//! From project definitions to solver inputs.

use hn_graph::{GraphResult, NetworkGraph, NodeRecord, PipeRecord};
use hn_hydraulics::Material;
use hn_optimize::OptimizerConfig;
use hn_solver::SolverConfig;
use hn_validate::NormativeLimits;

use crate::schema::Project;

impl Project {
    pub fn node_records(&self) -> Vec<NodeRecord> {
        self.nodes
            .iter()
            .map(|n| NodeRecord {
                id: n.id.clone(),
                kind: n.kind,
                elevation: n.elevation,
                demand: n.demand,
                head: n.head,
            })
            .collect()
    }

    /// Pipe records with the roughness resolved from the material when not given.
    pub fn pipe_records(&self) -> Vec<PipeRecord> {
        self.pipes
            .iter()
            .map(|p| PipeRecord {
                id: p.id.clone(),
                source: p.from.clone(),
                target: p.to.clone(),
                length: p.length,
                diameter_mm: p.diameter_mm,
                roughness: Material::resolve_roughness(p.roughness, p.material),
                initial_flow: p.initial_flow,
            })
            .collect()
    }

    pub fn build_graph(&self) -> GraphResult<NetworkGraph> {
        NetworkGraph::from_records(&self.node_records(), &self.pipe_records())
    }

    pub fn solver_config(&self) -> SolverConfig {
        self.solver.unwrap_or_default()
    }

    /// Explicit limits, or the defaults of the project's ambit.
    pub fn effective_limits(&self) -> NormativeLimits {
        self.limits
            .clone()
            .unwrap_or_else(|| NormativeLimits::for_ambit(self.ambit))
    }

    pub fn optimizer_config(&self) -> OptimizerConfig {
        self.optimizer.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NodeDef, PipeDef};
    use hn_graph::NodeKind;
    use hn_validate::Ambit;

    fn project() -> Project {
        Project {
            version: 1,
            name: "t".to_string(),
            ambit: Ambit::Rural,
            nodes: vec![
                NodeDef {
                    id: "R".to_string(),
                    name: String::new(),
                    kind: NodeKind::Reservoir,
                    elevation: 100.0,
                    demand: 0.0,
                    head: None,
                },
                NodeDef {
                    id: "J".to_string(),
                    name: String::new(),
                    kind: NodeKind::Junction,
                    elevation: 80.0,
                    demand: 0.001,
                    head: None,
                },
            ],
            pipes: vec![PipeDef {
                id: "P".to_string(),
                from: "R".to_string(),
                to: "J".to_string(),
                length: 100.0,
                diameter_mm: 50.0,
                roughness: None,
                material: Some(Material::Hdpe),
                initial_flow: None,
            }],
            solver: None,
            limits: None,
            optimizer: None,
        }
    }

    #[test]
    fn material_sets_roughness() {
        let p = project();
        assert_eq!(p.pipe_records()[0].roughness, 140.0);
        let g = p.build_graph().unwrap();
        assert_eq!(g.pipe_count(), 1);
    }

    #[test]
    fn limits_follow_ambit_unless_overridden() {
        let mut p = project();
        assert_eq!(p.effective_limits(), NormativeLimits::rural());
        p.limits = Some(NormativeLimits::urban());
        assert_eq!(p.effective_limits().min_pressure, 10.0);
        assert_eq!(p.solver_config(), SolverConfig::default());
    }
}
