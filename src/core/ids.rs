use crate::core::graph::GraphError;
use std::collections::HashMap;

pub type NodeId = u32;

/// Maps project identifiers to dense node ids in insertion order.
pub struct NodeRegistry {
    map: HashMap<String, NodeId>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, external_id: &str) -> Result<NodeId, GraphError> {
        if self.map.contains_key(external_id) {
            return Err(GraphError::DuplicateProject(external_id.to_string()));
        }
        let next = self.map.len();
        if next == u32::MAX as usize {
            return Err(GraphError::TooManyProjects);
        }
        self.map.insert(external_id.to_string(), next as NodeId);
        Ok(next as NodeId)
    }

    pub fn get(&self, external_id: &str) -> Option<NodeId> {
        self.map.get(external_id).copied()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
