//! # relgraph — Entity Relationship Graph Builder
//!
//! Given a root business entity (a company, employee, or contact) in an
//! external CRM-like data source, relgraph recursively discovers related
//! entities (responsible parties, contact persons, cross-entity
//! associations), assembles them into a bounded deduplicated graph, scores
//! connection strength, merges multiple such graphs into a network view, and
//! renders the result as a deterministic textual tree.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `EntitySource` is the contract to the data source
//! 2. **Clean DTOs**: `Entity`, `GraphNode`, `Connection`, `RelationGraph`
//!    cross all boundaries
//! 3. **Admit once**: node identity `(id, kind)` enters a graph exactly once;
//!    all set mutation happens on one coordinating task
//! 4. **Fail soft below the root**: only a missing root aborts a build
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relgraph::{BuildOptions, Entity, EntityId, EntityKind, MemorySource, RelationExplorer};
//!
//! # async fn example() -> relgraph::Result<()> {
//! let source = MemorySource::new();
//! source.insert(Entity::new(EntityId(1), EntityKind::Company, "Acme Corp"));
//! source.insert(Entity::new(EntityId(7), EntityKind::Employee, "Mara Voss"));
//! source.set_responsible(EntityId(1), EntityId(7));
//!
//! let explorer = RelationExplorer::new(source);
//! let graph = explorer.build_from_root(EntityId(1), &BuildOptions::default()).await?;
//! println!("{}", graph.rendered_tree.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Entity Sources
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | Memory | `source::memory` | In-memory records for testing/embedding |
//! | Yours | — | Anything implementing `EntitySource` |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod scoring;
pub mod builder;
pub mod network;
pub mod render;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Connection, ConnectionCategory, Entity, EntityId, EntityKind, GraphNode, NodeKey,
    RelationGraph,
};

// ============================================================================
// Re-exports: Source
// ============================================================================

pub use source::{EntitySource, MemorySource};

// ============================================================================
// Re-exports: Operations
// ============================================================================

pub use builder::{BuildOptions, MAX_ASSOCIATES};
pub use network::MAX_NETWORK_ROOTS;
pub use render::render_tree;
pub use scoring::{ConnectionScorer, Endpoint, ScoringWeights};

// ============================================================================
// Top-level explorer handle
// ============================================================================

/// The primary entry point. A `RelationExplorer` wraps an entity source and
/// a scorer, and provides single-root and network graph builds.
pub struct RelationExplorer<S: EntitySource> {
    source: S,
    scorer: ConnectionScorer,
}

impl<S: EntitySource> RelationExplorer<S> {
    /// Create an explorer with default scoring weights.
    pub fn new(source: S) -> Self {
        Self { source, scorer: ConnectionScorer::default() }
    }

    /// Create an explorer with custom scoring weights.
    pub fn with_scorer(source: S, scorer: ConnectionScorer) -> Self {
        Self { source, scorer }
    }

    /// Build a graph by bounded recursive expansion from one root.
    ///
    /// Fails with [`Error::NotFound`] when the root entity does not exist;
    /// every failure below the root is logged and skipped.
    pub async fn build_from_root(
        &self,
        root_id: EntityId,
        opts: &BuildOptions,
    ) -> Result<RelationGraph> {
        builder::build_from_root(&self.source, &self.scorer, root_id, opts).await
    }

    /// Build one graph per root (first 10 roots at most) and merge the
    /// results into a deduplicated network view. Never fails on individual
    /// roots — a network build always returns a graph.
    pub async fn build_network(
        &self,
        root_ids: &[EntityId],
        opts: &BuildOptions,
    ) -> Result<RelationGraph> {
        network::build_network(&self.source, &self.scorer, root_ids, opts).await
    }

    /// Access the underlying source (for advanced use).
    pub fn source(&self) -> &S {
        &self.source
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Root entity missing on a single-root build. The only fatal condition.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data-source lookup failure. Fatal for the root fetch, skippable
    /// everywhere else.
    #[error("Source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, Error>;
