//! Core network data structures.

use hn_core::{NodeId, PipeId, Real};

use crate::error::GraphResult;
use crate::indexing::KeyIndex;
use crate::records::{NodeKind, NodeRecord, PipeRecord};

/// A node of the distribution network.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub key: String,
    pub kind: NodeKind,
    /// Ground/invert elevation, m.
    pub elevation: Real,
    /// Base demand, m³/s.
    pub demand: Real,
    /// Explicit fixed head for sources, m.
    pub fixed_head: Option<Real>,
}

impl Node {
    pub fn is_source(&self) -> bool {
        self.kind.is_source()
    }

    /// Boundary head of a source node; `None` for nodes whose head is solved for.
    pub fn source_head(&self) -> Option<Real> {
        if self.is_source() {
            Some(self.fixed_head.unwrap_or(self.elevation))
        } else {
            None
        }
    }
}

/// A pipe between two nodes. `source -> target` is only the sign convention for flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub id: PipeId,
    pub key: String,
    pub source: NodeId,
    pub target: NodeId,
    /// m
    pub length: Real,
    /// Internal diameter, mm.
    pub diameter_mm: Real,
    /// Hazen-Williams C.
    pub roughness: Real,
    /// Optional first guess for the flow, m³/s.
    pub initial_flow: Option<Real>,
}

impl Pipe {
    /// The endpoint opposite to `node`.
    pub fn other_end(&self, node: NodeId) -> NodeId {
        if node == self.source {
            self.target
        } else {
            self.source
        }
    }
}

/// Validated, immutable network: an undirected multigraph held in arenas.
///
/// - Nodes and pipes live in vectors indexed by their ids.
/// - Adjacency is stored compactly: node i's incident pipes are
///   `node_pipes[node_pipe_offsets[i]..node_pipe_offsets[i + 1]]`, sorted by pipe id.
///
/// Nothing here is mutated by the solver, so one graph can back many solves.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) pipes: Vec<Pipe>,
    pub(crate) node_pipe_offsets: Vec<usize>,
    pub(crate) node_pipes: Vec<PipeId>,
    pub(crate) index: KeyIndex,
}

impl NetworkGraph {
    /// Build a graph straight from caller records.
    pub fn from_records(nodes: &[NodeRecord], pipes: &[PipeRecord]) -> GraphResult<Self> {
        let mut builder = crate::NetworkBuilder::new();
        for node in nodes {
            builder.add_node_record(node);
        }
        for pipe in pipes {
            builder.add_pipe_record(pipe)?;
        }
        builder.build()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Get a pipe by ID (returns None if ID out of bounds).
    pub fn pipe(&self, id: PipeId) -> Option<&Pipe> {
        self.pipes.get(id.idx())
    }

    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    pub fn node_id(&self, key: &str) -> GraphResult<NodeId> {
        self.index.node_id(key)
    }

    pub fn pipe_id(&self, key: &str) -> GraphResult<PipeId> {
        self.index.pipe_id(key)
    }

    /// Pipes incident to a node, ascending by pipe id.
    pub fn incident_pipes(&self, node: NodeId) -> &[PipeId] {
        let idx = node.idx();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_pipe_offsets[idx];
        let end = self.node_pipe_offsets[idx + 1];
        &self.node_pipes[start..end]
    }

    /// `(pipe, neighbour)` pairs around a node. Parallel pipes yield the same
    /// neighbour more than once.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (PipeId, NodeId)> + '_ {
        self.incident_pipes(node)
            .iter()
            .map(move |&p| (p, self.pipes[p.idx()].other_end(node)))
    }

    /// All reservoir, tank and cistern nodes, ascending by id.
    pub fn source_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_source())
            .map(|n| n.id)
            .collect()
    }

    /// Connected component label per node, plus the number of components.
    /// Labels are assigned in ascending order of each component's smallest node id.
    pub fn component_labels(&self) -> (Vec<usize>, usize) {
        let mut labels = vec![usize::MAX; self.nodes.len()];
        let mut count = 0;
        let mut stack = Vec::new();

        for start in 0..self.nodes.len() {
            if labels[start] != usize::MAX {
                continue;
            }
            labels[start] = count;
            stack.push(NodeId::from_usize(start));
            while let Some(node) = stack.pop() {
                for (_, next) in self.neighbors(node) {
                    if labels[next.idx()] == usize::MAX {
                        labels[next.idx()] = count;
                        stack.push(next);
                    }
                }
            }
            count += 1;
        }

        (labels, count)
    }

    pub fn component_count(&self) -> usize {
        self.component_labels().1
    }

    /// True when every node lies in a single connected component.
    pub fn is_connected(&self) -> bool {
        self.component_count() <= 1
    }

    /// Check that every node can be assigned a head, i.e. shares a component with a source.
    pub fn ensure_supplied(&self) -> GraphResult<()> {
        crate::validate::validate_supply(self)
    }

    /// Cycle rank `pipes - nodes + components`: the number of independent loops.
    pub fn cycle_rank(&self) -> usize {
        (self.pipes.len() + self.component_count()).saturating_sub(self.nodes.len())
    }
}
