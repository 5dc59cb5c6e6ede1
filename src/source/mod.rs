//! # Entity Source Trait
//!
//! This is THE contract between relgraph and the external CRM-like data
//! source. The source is assumed to be remote, latency-bearing, and
//! occasionally failing; every lookup is async and fallible.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySource` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use crate::model::{Entity, EntityId};
use crate::Result;

pub use memory::MemorySource;

/// The universal data-source contract.
///
/// Any backend that can answer these three lookups can feed the graph
/// builder. Timeouts and retries are the source's own business — the builder
/// treats any error from a non-root lookup as a skippable event.
#[async_trait]
pub trait EntitySource: Send + Sync + 'static {
    /// Fetch an entity by id. Returns None when no record exists.
    async fn entity(&self, id: EntityId) -> Result<Option<Entity>>;

    /// The employee responsible for the given entity, if one is assigned.
    async fn responsible_party(&self, id: EntityId) -> Result<Option<Entity>>;

    /// Associates of the given entity: contact persons and cross-entity
    /// company associations. `active_only` pushes the activity filter down
    /// to the source; callers truncate the result for response-size control.
    async fn associates(&self, id: EntityId, active_only: bool) -> Result<Vec<Entity>>;
}
