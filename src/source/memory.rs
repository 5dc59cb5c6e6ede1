//! In-memory entity source.
//!
//! This is the reference implementation of `EntitySource`. It uses simple
//! maps protected by RwLock, plus per-id failure injection so tests can
//! exercise the builder's partial-failure tolerance.
//!
//! Use this source for:
//! - Testing the builder, merger, and renderer without a live CRM
//! - Embedding relgraph in applications that already hold their records

use std::sync::Arc;
use async_trait::async_trait;
use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;

use crate::model::{Entity, EntityId, EntityKind, NodeKey};
use crate::{Error, Result};
use super::EntitySource;

// ============================================================================
// MemorySource
// ============================================================================

/// In-memory entity records with relationship wiring.
#[derive(Clone, Default)]
pub struct MemorySource {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    entities: RwLock<HashMap<NodeKey, Entity>>,
    /// entity id → responsible employee id
    responsible: RwLock<HashMap<EntityId, EntityId>>,
    /// entity id → associate keys (contacts, related companies), in
    /// insertion order
    associates: RwLock<HashMap<EntityId, Vec<NodeKey>>>,
    fail_responsible: RwLock<HashSet<EntityId>>,
    fail_associates: RwLock<HashSet<EntityId>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) an entity record.
    pub fn insert(&self, entity: Entity) {
        let key = NodeKey { id: entity.id, kind: entity.kind };
        self.inner.entities.write().insert(key, entity);
    }

    /// Assign the responsible employee for an entity.
    pub fn set_responsible(&self, entity_id: EntityId, employee_id: EntityId) {
        self.inner.responsible.write().insert(entity_id, employee_id);
    }

    /// Attach a contact person to an entity's associate list.
    pub fn add_associate(&self, entity_id: EntityId, contact_id: EntityId) {
        let key = NodeKey { id: contact_id, kind: EntityKind::Contact };
        self.inner.associates.write().entry(entity_id).or_default().push(key);
    }

    /// Attach a cross-entity company association.
    pub fn relate_company(&self, entity_id: EntityId, company_id: EntityId) {
        let key = NodeKey { id: company_id, kind: EntityKind::Company };
        self.inner.associates.write().entry(entity_id).or_default().push(key);
    }

    /// Make every `responsible_party` lookup for this id fail.
    pub fn fail_responsible_for(&self, entity_id: EntityId) {
        self.inner.fail_responsible.write().insert(entity_id);
    }

    /// Make every `associates` lookup for this id fail.
    pub fn fail_associates_for(&self, entity_id: EntityId) {
        self.inner.fail_associates.write().insert(entity_id);
    }

    fn get(&self, id: EntityId, kind: EntityKind) -> Option<Entity> {
        self.inner.entities.read().get(&NodeKey { id, kind }).cloned()
    }
}

// ============================================================================
// EntitySource impl
// ============================================================================

#[async_trait]
impl EntitySource for MemorySource {
    /// Kind-ordered lookup: when an id exists under several kinds, companies
    /// win, then employees, then contacts.
    async fn entity(&self, id: EntityId) -> Result<Option<Entity>> {
        for kind in [EntityKind::Company, EntityKind::Employee, EntityKind::Contact] {
            if let Some(entity) = self.get(id, kind) {
                return Ok(Some(entity));
            }
        }
        Ok(None)
    }

    async fn responsible_party(&self, id: EntityId) -> Result<Option<Entity>> {
        if self.inner.fail_responsible.read().contains(&id) {
            return Err(Error::Source(format!(
                "responsible-party lookup failed for entity {id}"
            )));
        }
        let employee_id = match self.inner.responsible.read().get(&id) {
            Some(&eid) => eid,
            None => return Ok(None),
        };
        Ok(self.get(employee_id, EntityKind::Employee))
    }

    async fn associates(&self, id: EntityId, active_only: bool) -> Result<Vec<Entity>> {
        if self.inner.fail_associates.read().contains(&id) {
            return Err(Error::Source(format!(
                "associates lookup failed for entity {id}"
            )));
        }
        let keys = self.inner.associates.read().get(&id).cloned().unwrap_or_default();
        let mut found = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(entity) = self.get(key.id, key.kind) {
                if active_only && !entity.active {
                    continue;
                }
                found.push(entity);
            }
        }
        Ok(found)
    }
}
