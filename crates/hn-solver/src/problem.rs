//! Problem definition for steady-state network solving.

use std::sync::Arc;

use hn_core::{PipeId, Real};
use hn_graph::NetworkGraph;
use hn_hydraulics::PipeResistance;

use crate::error::{SolverError, SolverResult};
use crate::solution::{NetworkKind, NetworkSolution};
use crate::topology::Topology;

/// A network ready to be solved.
///
/// Construction checks that every node is supplied by a source and analyses the
/// topology once. Diameter variants made with [`HydraulicProblem::with_diameters`]
/// share that analysis, which is what the optimizer relies on.
#[derive(Debug, Clone)]
pub struct HydraulicProblem<'a> {
    graph: &'a NetworkGraph,
    topology: Arc<Topology>,
    diameters_mm: Vec<Real>,
    resistances: Vec<PipeResistance>,
    initial_flows: Vec<Option<Real>>,
}

impl<'a> HydraulicProblem<'a> {
    pub fn new(graph: &'a NetworkGraph) -> SolverResult<Self> {
        graph.ensure_supplied()?;
        let topology = Arc::new(Topology::analyze(graph));
        let diameters_mm: Vec<Real> = graph.pipes().iter().map(|p| p.diameter_mm).collect();
        let resistances = Self::resistances(graph, &diameters_mm)?;
        let initial_flows = graph.pipes().iter().map(|p| p.initial_flow).collect();

        Ok(Self {
            graph,
            topology,
            diameters_mm,
            resistances,
            initial_flows,
        })
    }

    fn resistances(graph: &NetworkGraph, diameters_mm: &[Real]) -> SolverResult<Vec<PipeResistance>> {
        graph
            .pipes()
            .iter()
            .zip(diameters_mm)
            .map(|(p, &d)| Ok(PipeResistance::new(p.length, d, p.roughness)?))
            .collect()
    }

    /// Same network with different internal diameters (mm, arena order).
    /// Initial flows are kept.
    pub fn with_diameters(&self, diameters_mm: &[Real]) -> SolverResult<Self> {
        if diameters_mm.len() != self.graph.pipe_count() {
            return Err(SolverError::InvalidState {
                what: format!(
                    "{} diameters given for {} pipes",
                    diameters_mm.len(),
                    self.graph.pipe_count()
                ),
            });
        }
        Ok(Self {
            graph: self.graph,
            topology: Arc::clone(&self.topology),
            diameters_mm: diameters_mm.to_vec(),
            resistances: Self::resistances(self.graph, diameters_mm)?,
            initial_flows: self.initial_flows.clone(),
        })
    }

    pub fn graph(&self) -> &'a NetworkGraph {
        self.graph
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn kind(&self) -> NetworkKind {
        self.topology.kind()
    }

    pub fn diameters_mm(&self) -> &[Real] {
        &self.diameters_mm
    }

    pub fn resistance(&self, pipe: PipeId) -> &PipeResistance {
        &self.resistances[pipe.idx()]
    }

    pub(crate) fn resistances_slice(&self) -> &[PipeResistance] {
        &self.resistances
    }

    pub fn initial_flows(&self) -> &[Option<Real>] {
        &self.initial_flows
    }

    pub fn set_initial_flow(&mut self, pipe: PipeId, flow: Real) -> SolverResult<()> {
        if !flow.is_finite() {
            return Err(SolverError::Numeric {
                what: format!("initial flow {flow} for pipe {pipe} is not finite"),
            });
        }
        let slot = self
            .initial_flows
            .get_mut(pipe.idx())
            .ok_or_else(|| SolverError::InvalidState {
                what: format!("pipe {pipe} out of range"),
            })?;
        *slot = Some(flow);
        Ok(())
    }

    /// Start the next solve from a previous solution's flows.
    pub fn warm_start(&mut self, previous: &NetworkSolution) -> SolverResult<()> {
        if previous.pipes.len() != self.graph.pipe_count() {
            return Err(SolverError::InvalidState {
                what: "warm start solution belongs to a different network".to_string(),
            });
        }
        for (i, flow) in previous.flows().into_iter().enumerate() {
            self.set_initial_flow(PipeId::from_usize(i), flow)?;
        }
        Ok(())
    }

    pub fn clear_initial_flows(&mut self) {
        self.initial_flows.iter_mut().for_each(|q| *q = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_graph::{GraphError, NetworkBuilder};

    fn two_pipe_graph() -> NetworkGraph {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let a = b.junction("A", 0.0, 0.01);
        let c = b.junction("C", 0.0, 0.01);
        b.add_pipe("P1", r, a, 100.0, 100.0, 140.0);
        b.add_pipe("P2", a, c, 100.0, 80.0, 140.0);
        b.build().unwrap()
    }

    #[test]
    fn unsupplied_network_is_rejected_up_front() {
        let mut b = NetworkBuilder::new();
        let a = b.junction("A", 0.0, 0.01);
        let c = b.junction("C", 0.0, 0.01);
        b.add_pipe("P", a, c, 10.0, 50.0, 150.0);
        let g = b.build().unwrap();

        assert_eq!(
            HydraulicProblem::new(&g).unwrap_err(),
            SolverError::Structural(GraphError::NoSource)
        );
    }

    #[test]
    fn diameter_variants_share_topology() {
        let g = two_pipe_graph();
        let base = HydraulicProblem::new(&g).unwrap();
        let variant = base.with_diameters(&[150.0, 60.0]).unwrap();

        assert!(Arc::ptr_eq(&base.topology, &variant.topology));
        assert_eq!(variant.diameters_mm(), &[150.0, 60.0]);
        assert!(
            variant.resistance(PipeId::from_index(1)).resistance()
                > base.resistance(PipeId::from_index(1)).resistance()
        );
    }

    #[test]
    fn wrong_diameter_count_rejected() {
        let g = two_pipe_graph();
        let base = HydraulicProblem::new(&g).unwrap();
        assert!(matches!(
            base.with_diameters(&[100.0]),
            Err(SolverError::InvalidState { .. })
        ));
        assert!(matches!(
            base.with_diameters(&[100.0, 0.0]),
            Err(SolverError::Hydraulics(_))
        ));
    }
}
