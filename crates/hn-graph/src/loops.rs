//! Independent loop (mesh) detection.
//!
//! Every chord of the spanning forest closes exactly one loop with the tree path
//! between its endpoints. The loop is walked in the chord's own direction, so the
//! chord always has `Orientation::Forward`.

use hn_core::{LoopId, NodeId, PipeId, Real};

use crate::forest::SpanningForest;
use crate::graph::NetworkGraph;

/// Whether a pipe is walked along or against its declared source -> target direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Forward,
    Reverse,
}

impl Orientation {
    /// +1 or -1.
    pub fn sign(self) -> Real {
        match self {
            Orientation::Forward => 1.0,
            Orientation::Reverse => -1.0,
        }
    }
}

/// One pipe of a loop or path together with its traversal sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopMember {
    pub pipe: PipeId,
    pub orientation: Orientation,
}

impl LoopMember {
    /// Member for walking `pipe` starting at node `from`.
    pub fn walking(graph: &NetworkGraph, pipe: PipeId, from: NodeId) -> Self {
        let orientation = match graph.pipe(pipe) {
            Some(p) if p.source == from => Orientation::Forward,
            _ => Orientation::Reverse,
        };
        Self { pipe, orientation }
    }

    pub fn sign(&self) -> Real {
        self.orientation.sign()
    }

    /// Node reached after walking this member.
    pub fn end(&self, graph: &NetworkGraph) -> Option<NodeId> {
        let pipe = graph.pipe(self.pipe)?;
        Some(match self.orientation {
            Orientation::Forward => pipe.target,
            Orientation::Reverse => pipe.source,
        })
    }
}

/// A closed cycle of signed pipe memberships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
    pub id: LoopId,
    /// Chord that closed this loop; always the first member.
    pub chord: PipeId,
    pub members: Vec<LoopMember>,
}

impl Loop {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn orientation_of(&self, pipe: PipeId) -> Option<Orientation> {
        self.members
            .iter()
            .find(|m| m.pipe == pipe)
            .map(|m| m.orientation)
    }

    /// Nodes in walking order, starting at the chord's source.
    pub fn nodes(&self, graph: &NetworkGraph) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.members.len());
        if let Some(chord) = graph.pipe(self.chord) {
            nodes.push(chord.source);
        }
        for member in &self.members[..self.members.len().saturating_sub(1)] {
            if let Some(end) = member.end(graph) {
                nodes.push(end);
            }
        }
        nodes
    }
}

/// Find a basis of independent loops: `pipes - nodes + components` of them.
pub fn find_loops(graph: &NetworkGraph) -> Vec<Loop> {
    let forest = SpanningForest::build(graph);
    find_loops_in(graph, &forest)
}

/// Same as [`find_loops`] over an already built forest.
pub fn find_loops_in(graph: &NetworkGraph, forest: &SpanningForest) -> Vec<Loop> {
    let mut loops = Vec::new();
    for chord in forest.chords() {
        let Some(pipe) = graph.pipe(chord) else {
            continue;
        };
        // Chord endpoints always share a tree
        let Some(back) = forest.path(graph, pipe.target, pipe.source) else {
            continue;
        };
        let mut members = Vec::with_capacity(back.len() + 1);
        members.push(LoopMember {
            pipe: chord,
            orientation: Orientation::Forward,
        });
        members.extend(back);
        loops.push(Loop {
            id: LoopId::from_usize(loops.len()),
            chord,
            members,
        });
    }
    loops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NetworkBuilder;

    #[test]
    fn tree_has_no_loops() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let a = b.junction("A", 0.0, 0.01);
        let c = b.junction("C", 0.0, 0.01);
        b.add_pipe("P1", r, a, 10.0, 50.0, 150.0);
        b.add_pipe("P2", r, c, 10.0, 50.0, 150.0);
        let g = b.build().unwrap();
        assert!(find_loops(&g).is_empty());
    }

    #[test]
    fn triangle_walks_in_chord_direction() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let a = b.junction("A", 0.0, 0.01);
        let c = b.junction("C", 0.0, 0.01);
        let p1 = b.add_pipe("P1", r, a, 10.0, 50.0, 150.0);
        let p2 = b.add_pipe("P2", r, c, 10.0, 50.0, 150.0);
        let p3 = b.add_pipe("P3", a, c, 10.0, 50.0, 150.0);
        let g = b.build().unwrap();

        let loops = find_loops(&g);
        assert_eq!(loops.len(), 1);
        let l = &loops[0];
        assert_eq!(l.chord, p3);
        // A -> C along P3, C -> R against P2, R -> A along P1
        assert_eq!(l.orientation_of(p3), Some(Orientation::Forward));
        assert_eq!(l.orientation_of(p2), Some(Orientation::Reverse));
        assert_eq!(l.orientation_of(p1), Some(Orientation::Forward));
        assert_eq!(l.nodes(&g), vec![a, c, r]);
    }

    #[test]
    fn parallel_pipes_form_a_two_member_loop() {
        let mut b = NetworkBuilder::new();
        let r = b.reservoir("R", 100.0, None);
        let j = b.junction("J", 0.0, 0.05);
        let p0 = b.add_pipe("P0", r, j, 300.0, 150.0, 140.0);
        let p1 = b.add_pipe("P1", r, j, 300.0, 100.0, 140.0);
        let g = b.build().unwrap();

        let loops = find_loops(&g);
        assert_eq!(loops.len(), 1);
        assert_eq!(
            loops[0].members,
            vec![
                LoopMember {
                    pipe: p1,
                    orientation: Orientation::Forward
                },
                LoopMember {
                    pipe: p0,
                    orientation: Orientation::Reverse
                },
            ]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::NetworkBuilder;
    use proptest::prelude::*;

    fn multigraph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..9).prop_flat_map(|n| {
            let edge = (0..n, 0..n).prop_filter("no self-loops", |(a, b)| a != b);
            let edges = if n < 2 {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec(edge, 0..16).boxed()
            };
            (Just(n), edges)
        })
    }

    fn build(n: usize, edges: &[(usize, usize)]) -> NetworkGraph {
        let mut b = NetworkBuilder::new();
        let ids: Vec<NodeId> = (0..n)
            .map(|i| b.junction(format!("N{i}"), 0.0, 0.0))
            .collect();
        for (k, &(s, t)) in edges.iter().enumerate() {
            b.add_pipe(format!("P{k}"), ids[s], ids[t], 10.0, 50.0, 150.0);
        }
        b.build().unwrap()
    }

    proptest! {
        #[test]
        fn loop_count_is_cycle_rank((n, edges) in multigraph()) {
            let g = build(n, &edges);
            let loops = find_loops(&g);
            prop_assert_eq!(loops.len(), edges.len() + g.component_count() - n);
            prop_assert_eq!(loops.len(), g.cycle_rank());
        }

        #[test]
        fn every_loop_is_a_closed_walk((n, edges) in multigraph()) {
            let g = build(n, &edges);
            for l in find_loops(&g) {
                let start = g.pipe(l.chord).unwrap().source;
                let mut at = start;
                for m in &l.members {
                    let pipe = g.pipe(m.pipe).unwrap();
                    let from = match m.orientation {
                        Orientation::Forward => pipe.source,
                        Orientation::Reverse => pipe.target,
                    };
                    prop_assert_eq!(from, at);
                    at = m.end(&g).unwrap();
                }
                prop_assert_eq!(at, start);
            }
        }
    }
}
