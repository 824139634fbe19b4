//! Incremental network builder.

use std::collections::HashMap;

use hn_core::{NodeId, PipeId, Real};

use crate::error::{GraphError, GraphResult};
use crate::graph::{NetworkGraph, Node, Pipe};
use crate::indexing::KeyIndex;
use crate::records::{NodeKind, NodeRecord, PipeRecord};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `add_pipe` (or the record variants) to build up the
/// network, then call `build()` to validate and freeze it into a `NetworkGraph`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    pipes: Vec<Pipe>,
    // First id registered under each key; duplicates are reported by `build`.
    node_keys: HashMap<String, NodeId>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(
        &mut self,
        key: impl Into<String>,
        kind: NodeKind,
        elevation: Real,
        demand: Real,
    ) -> NodeId {
        let id = NodeId::from_usize(self.nodes.len());
        let key = key.into();
        self.node_keys.entry(key.clone()).or_insert(id);
        self.nodes.push(Node {
            id,
            key,
            kind,
            elevation,
            demand,
            fixed_head: None,
        });
        id
    }

    /// Shorthand for a reservoir; `head` defaults to the elevation.
    pub fn reservoir(&mut self, key: impl Into<String>, elevation: Real, head: Option<Real>) -> NodeId {
        let id = self.add_node(key, NodeKind::Reservoir, elevation, 0.0);
        if let Some(h) = head {
            self.set_fixed_head(id, h);
        }
        id
    }

    /// Shorthand for a consumption junction.
    pub fn junction(&mut self, key: impl Into<String>, elevation: Real, demand: Real) -> NodeId {
        self.add_node(key, NodeKind::Junction, elevation, demand)
    }

    pub fn set_fixed_head(&mut self, node: NodeId, head: Real) {
        if let Some(n) = self.nodes.get_mut(node.idx()) {
            n.fixed_head = Some(head);
        }
    }

    /// Add a pipe between two existing nodes and return its id.
    pub fn add_pipe(
        &mut self,
        key: impl Into<String>,
        source: NodeId,
        target: NodeId,
        length: Real,
        diameter_mm: Real,
        roughness: Real,
    ) -> PipeId {
        let id = PipeId::from_usize(self.pipes.len());
        self.pipes.push(Pipe {
            id,
            key: key.into(),
            source,
            target,
            length,
            diameter_mm,
            roughness,
            initial_flow: None,
        });
        id
    }

    pub fn set_initial_flow(&mut self, pipe: PipeId, flow: Real) {
        if let Some(p) = self.pipes.get_mut(pipe.idx()) {
            p.initial_flow = Some(flow);
        }
    }

    pub fn add_node_record(&mut self, record: &NodeRecord) -> NodeId {
        let id = self.add_node(
            record.id.clone(),
            record.kind,
            record.elevation,
            record.demand,
        );
        if let Some(h) = record.head {
            self.set_fixed_head(id, h);
        }
        id
    }

    /// Add a pipe whose endpoints are given by node key.
    pub fn add_pipe_record(&mut self, record: &PipeRecord) -> GraphResult<PipeId> {
        let source = self.resolve(&record.id, &record.source)?;
        let target = self.resolve(&record.id, &record.target)?;
        let id = self.add_pipe(
            record.id.clone(),
            source,
            target,
            record.length,
            record.diameter_mm,
            record.roughness,
        );
        if let Some(q) = record.initial_flow {
            self.set_initial_flow(id, q);
        }
        Ok(id)
    }

    fn resolve(&self, pipe: &str, node: &str) -> GraphResult<NodeId> {
        self.node_keys
            .get(node)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode {
                pipe: pipe.to_string(),
                node: node.to_string(),
            })
    }

    /// Validate and freeze the network.
    ///
    /// Connectivity to sources is not required here (see `NetworkGraph::ensure_supplied`),
    /// so partial networks can still be inspected.
    pub fn build(self) -> GraphResult<NetworkGraph> {
        let index = KeyIndex::from_keys(
            self.nodes.iter().map(|n| n.key.clone()),
            self.pipes.iter().map(|p| p.key.clone()),
        )?;

        validate::validate_structure(&self.nodes, &self.pipes)?;

        let (node_pipe_offsets, node_pipes) = Self::build_adjacency(&self.nodes, &self.pipes);

        validate::validate_adjacency(&self.nodes, &self.pipes, &node_pipe_offsets, &node_pipes)?;

        Ok(NetworkGraph {
            nodes: self.nodes,
            pipes: self.pipes,
            node_pipe_offsets,
            node_pipes,
            index,
        })
    }

    /// Compact adjacency: for each node, its incident pipes in ascending id order.
    fn build_adjacency(nodes: &[Node], pipes: &[Pipe]) -> (Vec<usize>, Vec<PipeId>) {
        let mut per_node: Vec<Vec<PipeId>> = vec![Vec::new(); nodes.len()];
        // Pipes are visited in id order, so each list comes out sorted.
        for pipe in pipes {
            per_node[pipe.source.idx()].push(pipe.id);
            per_node[pipe.target.idx()].push(pipe.id);
        }

        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat = Vec::with_capacity(pipes.len() * 2);
        offsets.push(0);
        for list in per_node {
            flat.extend_from_slice(&list);
            offsets.push(flat.len());
        }

        (offsets, flat)
    }
}
