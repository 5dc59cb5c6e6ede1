//! Textual tree rendering of a relationship graph.
//!
//! A pure function of (graph, root): depth-first, deterministically ordered,
//! and cycle-safe via an explicit visited set — merged graphs may contain
//! cross-links the call stack alone would not survive.

use std::fmt::Write as _;

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::model::{EntityKind, GraphNode, NodeKey, RelationGraph};

/// Render `graph` as an indented tree anchored at `root`.
///
/// One line per node with branch connectors, a per-kind marker and an
/// activity marker; a header names the root, a footer carries totals.
/// Identical inputs always produce byte-identical output.
pub fn render_tree(graph: &RelationGraph, root: &GraphNode) -> String {
    let mut out = String::new();
    let mut visited: HashSet<NodeKey> = HashSet::new();

    let _ = writeln!(out, "Relationship map: {}", root.name);
    let _ = writeln!(out);
    let _ = writeln!(out, "{} {} {}", kind_marker(root.kind), root.name, status_marker(root.active));

    visited.insert(root.key());
    render_children(graph, root, "", &mut visited, &mut out);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} entities, {} connections",
        graph.total_nodes,
        graph.connections.len()
    );
    out
}

fn render_children(
    graph: &RelationGraph,
    node: &GraphNode,
    prefix: &str,
    visited: &mut HashSet<NodeKey>,
    out: &mut String,
) {
    let mut children: SmallVec<[&GraphNode; 8]> = SmallVec::new();
    for connection in graph.connections_of(node.id) {
        let Some(other_id) = connection.other_end(node.id) else { continue };
        let Some(neighbor) = graph.node_by_id(other_id) else { continue };
        if visited.contains(&neighbor.key()) {
            continue;
        }
        if !children.iter().any(|c| c.key() == neighbor.key()) {
            children.push(neighbor);
        }
    }

    children.sort_by(|a, b| {
        kind_rank(a.kind).cmp(&kind_rank(b.kind)).then_with(|| a.name.cmp(&b.name))
    });

    // Claim all siblings before descending, so a cross-link between two
    // siblings cannot print one of them twice.
    for child in &children {
        visited.insert(child.key());
    }

    let count = children.len();
    for (i, &child) in children.iter().enumerate() {
        let last = i + 1 == count;
        let connector = if last { "└── " } else { "├── " };
        let _ = writeln!(
            out,
            "{prefix}{connector}{} {} {}",
            kind_marker(child.kind),
            child.name,
            status_marker(child.active)
        );

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(graph, child, &child_prefix, visited, out);
    }
}

/// Sibling sort order: employees, then contacts, then companies.
fn kind_rank(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Employee => 0,
        EntityKind::Contact => 1,
        EntityKind::Company => 2,
    }
}

fn kind_marker(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Company => "🏢",
        EntityKind::Employee => "👤",
        EntityKind::Contact => "📇",
    }
}

fn status_marker(active: bool) -> &'static str {
    if active { "✓" } else { "✗" }
}
