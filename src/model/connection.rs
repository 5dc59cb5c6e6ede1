//! Connection (scored directed edge) in the relationship graph.

use serde::{Deserialize, Serialize};
use super::EntityId;

/// Relationship category. The category implies the endpoint kinds, which is
/// why connections carry plain entity ids rather than composite keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionCategory {
    /// Employee carrying authority/responsibility for a company.
    ResponsibleFor,
    /// Contact person attached to a company.
    ContactOf,
    ParentOf,
    ChildOf,
    /// Same-party links attached when merged views are stitched together.
    RelatedTo,
}

impl ConnectionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionCategory::ResponsibleFor => "responsible_for",
            ConnectionCategory::ContactOf => "contact_of",
            ConnectionCategory::ParentOf => "parent_of",
            ConnectionCategory::ChildOf => "child_of",
            ConnectionCategory::RelatedTo => "related_to",
        }
    }
}

impl std::fmt::Display for ConnectionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed relationship between two node identities.
///
/// Uniquely identified by `(from_id, to_id, category)`; duplicates are never
/// added to a graph. Created immediately after its target node is admitted,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub from_id: EntityId,
    pub to_id: EntityId,
    pub category: ConnectionCategory,
    /// Heuristic strength in [0,1].
    pub strength: f64,
    pub description: String,
}

impl Connection {
    pub fn new(
        from_id: EntityId,
        to_id: EntityId,
        category: ConnectionCategory,
        strength: f64,
        description: impl Into<String>,
    ) -> Self {
        Self { from_id, to_id, category, strength, description: description.into() }
    }

    /// The identity triple used for deduplication.
    pub fn dedup_key(&self) -> (EntityId, EntityId, ConnectionCategory) {
        (self.from_id, self.to_id, self.category)
    }

    pub fn touches(&self, id: EntityId) -> bool {
        self.from_id == id || self.to_id == id
    }

    /// The "other" end of the connection from the given entity id.
    pub fn other_end(&self, from: EntityId) -> Option<EntityId> {
        if from == self.from_id {
            Some(self.to_id)
        } else if from == self.to_id {
            Some(self.from_id)
        } else {
            None
        }
    }
}
