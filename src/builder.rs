//! Bounded recursive graph expansion from a single root.
//!
//! Expansion is level-synchronous: every node of the current frontier is
//! expanded concurrently, but all node/connection admission happens on the
//! coordinating task, so the admit-once invariant holds without locks even
//! when two branches discover the same identity in the same level.

use futures::future::join_all;
use hashbrown::HashSet;
use tracing::{debug, warn};

use crate::model::{
    Connection, ConnectionCategory, Entity, EntityId, EntityKind, GraphNode, NodeKey,
    RelationGraph,
};
use crate::render::render_tree;
use crate::scoring::{ConnectionScorer, Endpoint};
use crate::source::EntitySource;
use crate::{Error, Result};

/// Associates fetched per node are truncated to this many, for response-size
/// control against chatty sources.
pub const MAX_ASSOCIATES: usize = 5;

/// Options for a single-root build (and, per root, for a network build).
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Expansion bound. Nodes at this depth are included but not expanded.
    pub max_depth: u32,
    /// Admit inactive entities discovered during expansion.
    pub include_inactive: bool,
    /// Attach the rendered tree to the returned graph.
    pub include_rendering: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { max_depth: 3, include_inactive: false, include_rendering: true }
    }
}

impl BuildOptions {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_include_inactive(mut self, include_inactive: bool) -> Self {
        self.include_inactive = include_inactive;
        self
    }

    pub fn with_include_rendering(mut self, include_rendering: bool) -> Self {
        self.include_rendering = include_rendering;
        self
    }
}

/// One related entity discovered while expanding a node.
struct Discovery {
    entity: Entity,
    category: ConnectionCategory,
    description: String,
}

/// Build a graph by bounded expansion from `root_id`.
///
/// A missing root is the only fatal condition; any lookup failure below the
/// root is logged and skipped.
pub(crate) async fn build_from_root<S: EntitySource>(
    source: &S,
    scorer: &ConnectionScorer,
    root_id: EntityId,
    opts: &BuildOptions,
) -> Result<RelationGraph> {
    let root = source
        .entity(root_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("entity {root_id}")))?;

    let mut graph = RelationGraph::new(opts.max_depth);
    let mut seen_nodes: HashSet<NodeKey> = HashSet::new();
    let mut seen_edges: HashSet<(EntityId, EntityId, ConnectionCategory)> = HashSet::new();

    let root_node = GraphNode::root(&root);
    let root_key = root_node.key();
    seen_nodes.insert(root_key);
    graph.nodes.push(root_node);

    // Frontier entries all sit at the same depth; children land one deeper.
    let mut frontier: Vec<Entity> = vec![root];
    let mut depth = 0u32;

    while !frontier.is_empty() && depth < opts.max_depth {
        debug!(depth, width = frontier.len(), "expanding level");

        let expansions =
            join_all(frontier.iter().map(|parent| expand_entity(source, parent, opts))).await;

        let mut next = Vec::new();
        for (parent, discoveries) in frontier.iter().zip(expansions) {
            for discovery in discoveries {
                if !discovery.entity.active && !opts.include_inactive {
                    continue;
                }
                let key = NodeKey { id: discovery.entity.id, kind: discovery.entity.kind };
                if !seen_nodes.insert(key) {
                    // First write wins: identity already admitted elsewhere.
                    continue;
                }

                let strength = scorer.score(
                    discovery.category,
                    Endpoint::from(&discovery.entity),
                    Endpoint::from(parent),
                );
                graph.nodes.push(GraphNode::discovered(
                    &discovery.entity,
                    depth + 1,
                    strength,
                    discovery.category,
                ));

                let edge = (discovery.entity.id, parent.id, discovery.category);
                if seen_edges.insert(edge) {
                    graph.connections.push(Connection::new(
                        discovery.entity.id,
                        parent.id,
                        discovery.category,
                        strength,
                        discovery.description,
                    ));
                }

                next.push(discovery.entity);
            }
        }

        frontier = next;
        depth += 1;
    }

    graph.total_nodes = graph.nodes.len();

    if opts.include_rendering {
        let tree = graph.node_by_key(root_key).map(|node| render_tree(&graph, node));
        graph.rendered_tree = tree;
    }

    Ok(graph)
}

/// Fetch the related entities of one node. Only company-kind nodes expand;
/// the responsible-party and associates lookups run concurrently.
async fn expand_entity<S: EntitySource>(
    source: &S,
    parent: &Entity,
    opts: &BuildOptions,
) -> Vec<Discovery> {
    if parent.kind != EntityKind::Company {
        return Vec::new();
    }

    let (responsible, associates) = futures::join!(
        source.responsible_party(parent.id),
        source.associates(parent.id, !opts.include_inactive),
    );

    let mut found = Vec::new();

    match responsible {
        Ok(Some(employee)) => found.push(Discovery {
            description: format!("{} is responsible for {}", employee.name, parent.name),
            entity: employee,
            category: ConnectionCategory::ResponsibleFor,
        }),
        Ok(None) => {}
        Err(err) => {
            warn!(entity = %parent.id, error = %err, "responsible-party lookup failed, skipping");
        }
    }

    match associates {
        Ok(related) => {
            for entity in related.into_iter().take(MAX_ASSOCIATES) {
                // Contact persons attach as contact_of; cross-entity
                // associations (companies, other employees) as related_to.
                let (category, description) = match entity.kind {
                    EntityKind::Contact => (
                        ConnectionCategory::ContactOf,
                        format!("{} is a contact of {}", entity.name, parent.name),
                    ),
                    _ => (
                        ConnectionCategory::RelatedTo,
                        format!("{} is associated with {}", entity.name, parent.name),
                    ),
                };
                found.push(Discovery { entity, category, description });
            }
        }
        Err(err) => {
            warn!(entity = %parent.id, error = %err, "associates lookup failed, skipping");
        }
    }

    found
}
