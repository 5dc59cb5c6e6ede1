//! The relationship graph aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{Connection, EntityId, GraphNode, NodeKey};

/// A bounded, deduplicated relationship graph.
///
/// Construction order guarantees that every connection endpoint resolves to
/// a node already present in `nodes` (node before edge), that node keys and
/// connection triples are unique, and that no node sits deeper than
/// `max_depth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationGraph {
    pub nodes: Vec<GraphNode>,
    pub connections: Vec<Connection>,
    /// Size of the node set.
    pub total_nodes: usize,
    /// The configured expansion bound, not the deepest observed node.
    pub max_depth: u32,
    /// Textual tree view, present when rendering was requested.
    pub rendered_tree: Option<String>,
    pub built_at: DateTime<Utc>,
}

impl RelationGraph {
    pub fn new(max_depth: u32) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            total_nodes: 0,
            max_depth,
            rendered_tree: None,
            built_at: Utc::now(),
        }
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.node_by_key(key).is_some()
    }

    pub fn node_by_key(&self, key: NodeKey) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.key() == key)
    }

    /// First node carrying the given id, in admission order. Connections
    /// store plain ids (the category implies the kind), so this is how edge
    /// endpoints are resolved.
    pub fn node_by_id(&self, id: EntityId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All connections touching the given id, in either direction.
    pub fn connections_of(&self, id: EntityId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.touches(id))
    }
}
