//! Graph-specific error types.
//!
//! Every variant is structural: the network cannot be solved as described.

use hn_core::HnError;

pub type GraphResult<T> = Result<T, GraphError>;

/// Network construction and topology errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes or two pipes share the same key.
    DuplicateId { kind: &'static str, key: String },

    /// A pipe references a node key that does not exist.
    UnknownNode { pipe: String, node: String },

    /// Zero/negative/non-finite length, diameter or roughness, or a self-loop.
    DegeneratePipe { pipe: String, reason: String },

    /// A node carries an unusable elevation, demand or head.
    InvalidNode { node: String, reason: String },

    /// A consumption node cannot be reached from any source.
    Disconnected { node: String },

    /// The network has nodes but no reservoir, tank or cistern.
    NoSource,

    /// Key not found in the index.
    IdNotFound { what: &'static str, key: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateId { kind, key } => {
                write!(f, "Duplicate {} id '{}'", kind, key)
            }
            GraphError::UnknownNode { pipe, node } => {
                write!(f, "Pipe '{}' references unknown node '{}'", pipe, node)
            }
            GraphError::DegeneratePipe { pipe, reason } => {
                write!(f, "Pipe '{}' is degenerate: {}", pipe, reason)
            }
            GraphError::InvalidNode { node, reason } => {
                write!(f, "Node '{}' is invalid: {}", node, reason)
            }
            GraphError::Disconnected { node } => {
                write!(
                    f,
                    "Node '{}' is not reachable from any reservoir, tank or cistern",
                    node
                )
            }
            GraphError::NoSource => {
                write!(f, "Network has no source node (reservoir, tank or cistern)")
            }
            GraphError::IdNotFound { what, key } => {
                write!(f, "{} '{}' not found", what, key)
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for HnError {
    fn from(err: GraphError) -> Self {
        HnError::Invariant {
            what: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_element() {
        let err = GraphError::UnknownNode {
            pipe: "P7".into(),
            node: "N99".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("P7") && msg.contains("N99"));

        let core: HnError = GraphError::Disconnected { node: "J4".into() }.into();
        assert!(core.to_string().contains("J4"));
    }
}
