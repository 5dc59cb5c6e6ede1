//! # Relationship Graph Model
//!
//! Clean DTOs that cross every boundary: source ↔ builder ↔ renderer ↔ user.
//!
//! Design rule: this module is pure data — no I/O, no state, no async.

pub mod entity;
pub mod node;
pub mod connection;
pub mod graph;

pub use entity::{Entity, EntityId, EntityKind};
pub use node::{GraphNode, NodeKey};
pub use connection::{Connection, ConnectionCategory};
pub use graph::RelationGraph;
