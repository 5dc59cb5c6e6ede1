//! Multi-root network builds: independent per-root expansion merged into one
//! deduplicated graph.
//!
//! Per-root builds run concurrently; the merge itself is sequential on the
//! coordinating task so identity dedup stays race-free.

use futures::future::join_all;
use hashbrown::HashSet;
use tracing::warn;

use crate::builder::{self, BuildOptions};
use crate::model::{ConnectionCategory, EntityId, NodeKey, RelationGraph};
use crate::render::render_tree;
use crate::scoring::ConnectionScorer;
use crate::source::EntitySource;
use crate::Result;

/// Network builds expand at most this many roots; excess roots are silently
/// ignored to bound fan-out.
pub const MAX_NETWORK_ROOTS: usize = 10;

/// Build and merge a graph per root. Individual root failures are skipped;
/// the call itself never fails, even when every root does.
pub(crate) async fn build_network<S: EntitySource>(
    source: &S,
    scorer: &ConnectionScorer,
    root_ids: &[EntityId],
    opts: &BuildOptions,
) -> Result<RelationGraph> {
    if root_ids.len() > MAX_NETWORK_ROOTS {
        warn!(
            requested = root_ids.len(),
            cap = MAX_NETWORK_ROOTS,
            "network root list truncated"
        );
    }
    let roots = &root_ids[..root_ids.len().min(MAX_NETWORK_ROOTS)];

    let per_root = opts.clone().with_include_rendering(false);
    let builds =
        join_all(roots.iter().map(|&id| builder::build_from_root(source, scorer, id, &per_root)))
            .await;

    let mut merged = RelationGraph::new(opts.max_depth);
    let mut seen_nodes: HashSet<NodeKey> = HashSet::new();
    let mut seen_edges: HashSet<(EntityId, EntityId, ConnectionCategory)> = HashSet::new();
    // First successfully built root anchors the rendered view.
    let mut display_root: Option<NodeKey> = None;

    for (&root_id, result) in roots.iter().zip(builds) {
        let graph = match result {
            Ok(graph) => graph,
            Err(err) => {
                warn!(root = %root_id, error = %err, "skipping failed network root");
                continue;
            }
        };

        // The builder admits the root before anything else.
        if display_root.is_none() {
            display_root = graph.nodes.first().map(|n| n.key());
        }

        for node in graph.nodes {
            if seen_nodes.insert(node.key()) {
                merged.nodes.push(node);
            }
        }
        for connection in graph.connections {
            if seen_edges.insert(connection.dedup_key()) {
                merged.connections.push(connection);
            }
        }
    }

    merged.total_nodes = merged.nodes.len();

    if opts.include_rendering {
        if let Some(key) = display_root {
            let tree = merged.node_by_key(key).map(|node| render_tree(&merged, node));
            merged.rendered_tree = tree;
        }
    }

    Ok(merged)
}
