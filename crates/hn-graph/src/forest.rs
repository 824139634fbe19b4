//! Breadth-first spanning forest of a network.
//!
//! Each connected component gets one tree, rooted at its lowest-id source when it
//! has one (otherwise at its lowest-id node). Neighbours are visited in ascending
//! pipe id, so the forest (and everything derived from it) is reproducible.

use std::collections::VecDeque;

use hn_core::{NodeId, PipeId};

use crate::graph::NetworkGraph;
use crate::loops::LoopMember;

#[derive(Debug, Clone)]
pub struct SpanningForest {
    parent: Vec<Option<(PipeId, NodeId)>>,
    depth: Vec<u32>,
    root_of: Vec<NodeId>,
    order: Vec<NodeId>,
    roots: Vec<NodeId>,
    tree_pipe: Vec<bool>,
}

impl SpanningForest {
    pub fn build(graph: &NetworkGraph) -> Self {
        let n = graph.node_count();
        let mut forest = Self {
            parent: vec![None; n],
            depth: vec![0; n],
            root_of: (0..n).map(NodeId::from_usize).collect(),
            order: Vec::with_capacity(n),
            roots: Vec::new(),
            tree_pipe: vec![false; graph.pipe_count()],
        };

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        let candidates = graph
            .source_nodes()
            .into_iter()
            .chain((0..n).map(NodeId::from_usize));

        for root in candidates {
            if visited[root.idx()] {
                continue;
            }
            visited[root.idx()] = true;
            forest.roots.push(root);
            queue.push_back(root);

            while let Some(node) = queue.pop_front() {
                forest.order.push(node);
                forest.root_of[node.idx()] = root;
                for (pipe, next) in graph.neighbors(node) {
                    if visited[next.idx()] {
                        continue;
                    }
                    visited[next.idx()] = true;
                    forest.parent[next.idx()] = Some((pipe, node));
                    forest.depth[next.idx()] = forest.depth[node.idx()] + 1;
                    forest.tree_pipe[pipe.idx()] = true;
                    queue.push_back(next);
                }
            }
        }

        forest
    }

    /// Tree roots, one per connected component.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Visit order: every node appears after its parent.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Tree pipe and parent node, `None` for roots.
    pub fn parent(&self, node: NodeId) -> Option<(PipeId, NodeId)> {
        self.parent.get(node.idx()).copied().flatten()
    }

    pub fn depth(&self, node: NodeId) -> u32 {
        self.depth[node.idx()]
    }

    pub fn root_of(&self, node: NodeId) -> NodeId {
        self.root_of[node.idx()]
    }

    pub fn is_tree_pipe(&self, pipe: PipeId) -> bool {
        self.tree_pipe[pipe.idx()]
    }

    /// Pipes outside the forest, ascending by id. Each closes exactly one loop.
    pub fn chords(&self) -> impl Iterator<Item = PipeId> + '_ {
        self.tree_pipe
            .iter()
            .enumerate()
            .filter(|(_, in_tree)| !**in_tree)
            .map(|(i, _)| PipeId::from_usize(i))
    }

    /// Tree path walked from `from` to `to`, or `None` when they lie in different trees.
    pub fn path(&self, graph: &NetworkGraph, from: NodeId, to: NodeId) -> Option<Vec<LoopMember>> {
        if self.root_of(from) != self.root_of(to) {
            return None;
        }

        let mut up_from = Vec::new();
        let mut up_to = Vec::new();
        let (mut a, mut b) = (from, to);

        while self.depth(a) > self.depth(b) {
            let (pipe, parent) = self.parent(a)?;
            up_from.push(LoopMember::walking(graph, pipe, a));
            a = parent;
        }
        while self.depth(b) > self.depth(a) {
            let (pipe, parent) = self.parent(b)?;
            up_to.push(LoopMember::walking(graph, pipe, parent));
            b = parent;
        }
        while a != b {
            let (pa, parent_a) = self.parent(a)?;
            up_from.push(LoopMember::walking(graph, pa, a));
            a = parent_a;
            let (pb, parent_b) = self.parent(b)?;
            up_to.push(LoopMember::walking(graph, pb, parent_b));
            b = parent_b;
        }

        up_from.extend(up_to.into_iter().rev());
        Some(up_from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkBuilder;
    use crate::loops::Orientation;

    #[test]
    fn rooted_at_source_even_when_not_first() {
        let mut b = NetworkBuilder::new();
        let a = b.junction("A", 0.0, 0.01);
        let r = b.reservoir("R", 50.0, None);
        let c = b.junction("C", 0.0, 0.01);
        b.add_pipe("P1", a, r, 10.0, 50.0, 150.0);
        b.add_pipe("P2", a, c, 10.0, 50.0, 150.0);
        let g = b.build().unwrap();
        let f = SpanningForest::build(&g);

        assert_eq!(f.roots(), &[r]);
        assert_eq!(f.order(), &[r, a, c]);
        assert_eq!(f.depth(c), 2);
        assert_eq!(f.chords().count(), 0);
    }

    #[test]
    fn lowest_parallel_pipe_joins_the_tree() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 50.0, None);
        let j = b.junction("J", 0.0, 0.01);
        let p0 = b.add_pipe("P0", r, j, 10.0, 50.0, 150.0);
        let p1 = b.add_pipe("P1", j, r, 10.0, 80.0, 150.0);
        let g = b.build().unwrap();
        let f = SpanningForest::build(&g);

        assert!(f.is_tree_pipe(p0));
        assert_eq!(f.chords().collect::<Vec<_>>(), vec![p1]);
    }

    #[test]
    fn path_orientation_follows_walk() {
        // R -P0-> A -P1-> B, walk B to R goes against both pipes
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 50.0, None);
        let a = b.junction("A", 0.0, 0.0);
        let c = b.junction("B", 0.0, 0.0);
        let p0 = b.add_pipe("P0", r, a, 10.0, 50.0, 150.0);
        let p1 = b.add_pipe("P1", a, c, 10.0, 50.0, 150.0);
        let g = b.build().unwrap();
        let f = SpanningForest::build(&g);

        let path = f.path(&g, c, r).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!((path[0].pipe, path[0].orientation), (p1, Orientation::Reverse));
        assert_eq!((path[1].pipe, path[1].orientation), (p0, Orientation::Reverse));

        let back = f.path(&g, r, c).unwrap();
        assert!(back.iter().all(|m| m.orientation == Orientation::Forward));
    }
}
