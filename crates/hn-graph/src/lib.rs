//! hn-graph: network model layer for hydronet.
//!
//! Provides:
//! - Plain node/pipe records exchanged with the outside world
//! - Arena graph (`NetworkGraph`) with compact adjacency and connectivity queries
//! - Incremental builder with structural validation
//! - Spanning forest and independent loop detection (`find_loops`)
//!
//! # Example
//!
//! ```
//! use hn_graph::{NetworkBuilder, find_loops};
//!
//! let mut builder = NetworkBuilder::new();
//! let r = builder.reservoir("R1", 100.0, None);
//! let a = builder.junction("A", 20.0, 0.01);
//! let b = builder.junction("B", 20.0, 0.01);
//! builder.add_pipe("P1", r, a, 500.0, 150.0, 140.0);
//! builder.add_pipe("P2", a, b, 300.0, 100.0, 140.0);
//! builder.add_pipe("P3", r, b, 600.0, 100.0, 140.0);
//! let graph = builder.build().unwrap();
//!
//! assert_eq!(graph.nodes().len(), 3);
//! assert_eq!(find_loops(&graph).len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod forest;
pub mod graph;
pub mod indexing;
pub mod loops;
pub mod records;
pub(crate) mod validate;

pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use forest::SpanningForest;
pub use graph::{NetworkGraph, Node, Pipe};
pub use indexing::KeyIndex;
pub use loops::{Loop, LoopMember, Orientation, find_loops, find_loops_in};
pub use records::{NodeKind, NodeRecord, PipeRecord};
