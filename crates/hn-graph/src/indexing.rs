//! Key indexing between caller-facing string ids and arena ids.
//!
//! Callers name nodes and pipes with arbitrary strings; the engine works on
//! contiguous `NodeId`/`PipeId`s. This map provides O(1) lookup both ways.

use std::collections::HashMap;

use hn_core::{NodeId, PipeId};

use crate::error::{GraphError, GraphResult};

#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    node_keys: Vec<String>,
    pipe_keys: Vec<String>,
    node_lookup: HashMap<String, NodeId>,
    pipe_lookup: HashMap<String, PipeId>,
}

impl KeyIndex {
    /// Build an index from arena-ordered keys, rejecting duplicates.
    pub fn from_keys<N, P>(node_keys: N, pipe_keys: P) -> GraphResult<Self>
    where
        N: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        let mut index = Self::default();

        for key in node_keys {
            let id = NodeId::from_usize(index.node_keys.len());
            if index.node_lookup.insert(key.clone(), id).is_some() {
                return Err(GraphError::DuplicateId { kind: "node", key });
            }
            index.node_keys.push(key);
        }

        for key in pipe_keys {
            let id = PipeId::from_usize(index.pipe_keys.len());
            if index.pipe_lookup.insert(key.clone(), id).is_some() {
                return Err(GraphError::DuplicateId { kind: "pipe", key });
            }
            index.pipe_keys.push(key);
        }

        Ok(index)
    }

    pub fn node_count(&self) -> usize {
        self.node_keys.len()
    }

    pub fn pipe_count(&self) -> usize {
        self.pipe_keys.len()
    }

    pub fn node_id(&self, key: &str) -> GraphResult<NodeId> {
        self.node_lookup
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::IdNotFound {
                what: "Node",
                key: key.to_string(),
            })
    }

    pub fn pipe_id(&self, key: &str) -> GraphResult<PipeId> {
        self.pipe_lookup
            .get(key)
            .copied()
            .ok_or_else(|| GraphError::IdNotFound {
                what: "Pipe",
                key: key.to_string(),
            })
    }

    /// Key of a node id (None if out of range).
    pub fn node_key(&self, id: NodeId) -> Option<&str> {
        self.node_keys.get(id.idx()).map(String::as_str)
    }

    /// Key of a pipe id (None if out of range).
    pub fn pipe_key(&self, id: PipeId) -> Option<&str> {
        self.pipe_keys.get(id.idx()).map(String::as_str)
    }
}
