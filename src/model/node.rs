//! Node in the relationship graph.

use serde::{Deserialize, Serialize};
use super::{ConnectionCategory, Entity, EntityId, EntityKind};

/// Composite node identity. Unique within a graph; the same id under a
/// different kind is a distinct node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl std::fmt::Display for NodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A node in the relationship graph.
///
/// Created once, the first time its identity is discovered during traversal,
/// and never mutated afterwards. A later discovery of the same identity is
/// silently dropped (first write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: EntityId,
    pub kind: EntityKind,
    pub name: String,
    /// Raw upstream type code of the underlying entity.
    pub type_code: String,
    pub active: bool,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    /// Expansion distance from the root; the root itself is 0.
    pub depth: u32,
    /// Heuristic strength in [0,1] of the connection that admitted this node.
    pub connection_strength: f64,
    /// How the node was first reached. None for roots.
    pub connection_type: Option<ConnectionCategory>,
}

impl GraphNode {
    /// Root node: depth 0, full strength, no inbound connection.
    pub fn root(entity: &Entity) -> Self {
        Self::from_entity(entity, 0, 1.0, None)
    }

    /// Node admitted during expansion via `category` at the given depth.
    pub fn discovered(
        entity: &Entity,
        depth: u32,
        strength: f64,
        category: ConnectionCategory,
    ) -> Self {
        Self::from_entity(entity, depth, strength, Some(category))
    }

    fn from_entity(
        entity: &Entity,
        depth: u32,
        strength: f64,
        category: Option<ConnectionCategory>,
    ) -> Self {
        Self {
            id: entity.id,
            kind: entity.kind,
            name: entity.name.clone(),
            type_code: entity.type_code.clone(),
            active: entity.active,
            email: entity.email.clone(),
            phone: entity.phone.clone(),
            address: entity.address.clone(),
            city: entity.city.clone(),
            country: entity.country.clone(),
            depth,
            connection_strength: strength,
            connection_type: category,
        }
    }

    pub fn key(&self) -> NodeKey {
        NodeKey { id: self.id, kind: self.kind }
    }
}
