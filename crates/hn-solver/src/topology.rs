//! Topology derived once per network and shared by every solve on it.

use hn_core::{NodeId, Real};
use hn_graph::{Loop, LoopMember, NetworkGraph, SpanningForest, find_loops_in};

use crate::solution::NetworkKind;

/// What a balancing loop closes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// A real cycle of pipes: Σ sign·hf = 0.
    Closed,
    /// Tree path between two fixed-head sources: Σ sign·hf = H(start) - H(end).
    SourcePath { start: NodeId, end: NodeId },
}

/// A loop whose flow correction is solved for.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancingLoop {
    pub kind: LoopKind,
    pub members: Vec<LoopMember>,
}

impl BalancingLoop {
    /// Head the signed losses along the walk must add up to.
    pub fn head_drop(&self, graph: &NetworkGraph) -> Real {
        match self.kind {
            LoopKind::Closed => 0.0,
            LoopKind::SourcePath { start, end } => {
                let head = |n: NodeId| graph.node(n).and_then(|n| n.source_head()).unwrap_or(0.0);
                head(start) - head(end)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Topology {
    forest: SpanningForest,
    loops: Vec<Loop>,
    balancing: Vec<BalancingLoop>,
    kind: NetworkKind,
}

impl Topology {
    pub fn analyze(graph: &NetworkGraph) -> Self {
        let forest = SpanningForest::build(graph);
        let loops = find_loops_in(graph, &forest);

        let mut balancing: Vec<BalancingLoop> = loops
            .iter()
            .map(|l| BalancingLoop {
                kind: LoopKind::Closed,
                members: l.members.clone(),
            })
            .collect();

        // Each further source in a tree is tied to the tree's root source
        for source in graph.source_nodes() {
            let root = forest.root_of(source);
            if root == source {
                continue;
            }
            if let Some(members) = forest.path(graph, root, source) {
                balancing.push(BalancingLoop {
                    kind: LoopKind::SourcePath {
                        start: root,
                        end: source,
                    },
                    members,
                });
            }
        }

        let kind = if balancing.is_empty() {
            NetworkKind::Open
        } else {
            let mut covered = vec![false; graph.pipe_count()];
            for member in balancing.iter().flat_map(|l| &l.members) {
                covered[member.pipe.idx()] = true;
            }
            if covered.iter().all(|&c| c) {
                NetworkKind::Looped
            } else {
                NetworkKind::Mixed
            }
        };

        Self {
            forest,
            loops,
            balancing,
            kind,
        }
    }

    pub fn forest(&self) -> &SpanningForest {
        &self.forest
    }

    /// Independent pipe loops.
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    /// Pipe loops followed by source-to-source paths.
    pub fn balancing(&self) -> &[BalancingLoop] {
        &self.balancing
    }

    pub fn kind(&self) -> NetworkKind {
        self.kind
    }
}
