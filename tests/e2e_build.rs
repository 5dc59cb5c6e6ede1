//! End-to-end tests for single-root graph builds.
//!
//! Each test wires a MemorySource fixture and exercises the full build path:
//! root fetch -> bounded expansion -> scoring -> dedup -> optional rendering.

use hashbrown::HashSet;
use relgraph::{
    BuildOptions, ConnectionCategory, Entity, EntityId, EntityKind, Error, MemorySource,
    RelationExplorer,
};

// ============================================================================
// Helpers: fixture entities and sources.
// ============================================================================

fn company(id: u64, name: &str) -> Entity {
    Entity::new(EntityId(id), EntityKind::Company, name).with_type_code("client")
}

fn employee(id: u64, name: &str) -> Entity {
    Entity::new(EntityId(id), EntityKind::Employee, name)
}

fn contact(id: u64, name: &str) -> Entity {
    Entity::new(EntityId(id), EntityKind::Contact, name)
}

/// Root company with one active responsible employee and three contacts,
/// two active and one inactive.
fn scenario_source() -> MemorySource {
    let source = MemorySource::new();
    source.insert(company(1, "Acme Corp"));
    source.insert(employee(10, "Mara Voss").with_email("mara@acme.example"));
    source.insert(contact(20, "Ben Ito").with_phone("+1 555 0100"));
    source.insert(contact(21, "Ada Lane"));
    source.insert(contact(22, "Gone Person").inactive());
    source.set_responsible(EntityId(1), EntityId(10));
    source.add_associate(EntityId(1), EntityId(20));
    source.add_associate(EntityId(1), EntityId(21));
    source.add_associate(EntityId(1), EntityId(22));
    source
}

// ============================================================================
// 1. Root + employee + active contacts, inactive contact skipped
// ============================================================================

#[tokio::test]
async fn test_root_with_employee_and_contacts() {
    let explorer = RelationExplorer::new(scenario_source());
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    assert_eq!(graph.total_nodes, 4, "root + employee + 2 active contacts");
    assert_eq!(graph.connections.len(), 3);
    assert!(graph.rendered_tree.is_some(), "rendering is on by default");

    let root = graph.node_by_id(EntityId(1)).unwrap();
    assert_eq!(root.depth, 0);
    assert_eq!(root.connection_strength, 1.0);
    assert!(root.connection_type.is_none());

    let mara = graph.node_by_id(EntityId(10)).unwrap();
    assert_eq!(mara.depth, 1);
    assert_eq!(mara.connection_type, Some(ConnectionCategory::ResponsibleFor));

    assert!(
        graph.node_by_id(EntityId(22)).is_none(),
        "inactive contact must be skipped by default"
    );
}

// ============================================================================
// 2. Missing root is fatal
// ============================================================================

#[tokio::test]
async fn test_missing_root_is_not_found() {
    let explorer = RelationExplorer::new(scenario_source());
    let err = explorer
        .build_from_root(EntityId(999), &BuildOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)), "got: {err}");
}

// ============================================================================
// 3. include_inactive admits the inactive contact
// ============================================================================

#[tokio::test]
async fn test_include_inactive() {
    let explorer = RelationExplorer::new(scenario_source());
    let opts = BuildOptions::default().with_include_inactive(true);
    let graph = explorer.build_from_root(EntityId(1), &opts).await.unwrap();

    assert_eq!(graph.total_nodes, 5);
    let gone = graph.node_by_id(EntityId(22)).unwrap();
    assert!(!gone.active);
    // Inactive endpoint: 0.7 base * 0.7 penalty.
    assert!((gone.connection_strength - 0.49).abs() < 1e-12);
}

// ============================================================================
// 4. Node at max_depth is admitted but never expanded
// ============================================================================

#[tokio::test]
async fn test_depth_limit_node_not_expanded() {
    let source = scenario_source();
    source.insert(company(2, "Acme Logistics"));
    source.relate_company(EntityId(1), EntityId(2));
    // The related company has its own people the bound must cut off.
    source.insert(employee(30, "Iris Wold"));
    source.set_responsible(EntityId(2), EntityId(30));

    let explorer = RelationExplorer::new(source);
    let opts = BuildOptions::default().with_max_depth(1);
    let graph = explorer.build_from_root(EntityId(1), &opts).await.unwrap();

    let related = graph.node_by_id(EntityId(2)).unwrap();
    assert_eq!(related.depth, 1);
    assert_eq!(related.connection_type, Some(ConnectionCategory::RelatedTo));
    assert!(
        graph.node_by_id(EntityId(30)).is_none(),
        "node at max_depth must not contribute children"
    );
    assert!(graph.nodes.iter().all(|n| n.depth <= graph.max_depth));
}

// ============================================================================
// 5. Depth increments by one per expansion step
// ============================================================================

#[tokio::test]
async fn test_depth_increments_along_company_chain() {
    let source = MemorySource::new();
    source.insert(company(1, "Holding"));
    source.insert(company(2, "Division"));
    source.insert(company(3, "Branch"));
    source.relate_company(EntityId(1), EntityId(2));
    source.relate_company(EntityId(2), EntityId(3));

    let explorer = RelationExplorer::new(source);
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    assert_eq!(graph.node_by_id(EntityId(1)).unwrap().depth, 0);
    assert_eq!(graph.node_by_id(EntityId(2)).unwrap().depth, 1);
    assert_eq!(graph.node_by_id(EntityId(3)).unwrap().depth, 2);
}

// ============================================================================
// 6. A failed non-root lookup is skipped, not fatal
// ============================================================================

#[tokio::test]
async fn test_partial_failure_tolerance() {
    let source = scenario_source();
    source.fail_responsible_for(EntityId(1));

    let explorer = RelationExplorer::new(source);
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    assert!(graph.node_by_id(EntityId(10)).is_none(), "failed lookup yields no node");
    assert_eq!(graph.total_nodes, 3, "root + 2 contacts survive the failure");
}

// ============================================================================
// 7. Associates are truncated for response-size control
// ============================================================================

#[tokio::test]
async fn test_associates_truncated() {
    let source = MemorySource::new();
    source.insert(company(1, "Busy Corp"));
    for i in 0..8u64 {
        source.insert(contact(100 + i, &format!("Contact {i}")));
        source.add_associate(EntityId(1), EntityId(100 + i));
    }

    let explorer = RelationExplorer::new(source);
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    assert_eq!(
        graph.total_nodes,
        1 + relgraph::MAX_ASSOCIATES,
        "root plus the first {} contacts",
        relgraph::MAX_ASSOCIATES
    );
}

// ============================================================================
// 8. Whole-graph dedup: a shared identity is admitted exactly once
// ============================================================================

#[tokio::test]
async fn test_shared_contact_admitted_once() {
    let source = MemorySource::new();
    source.insert(company(1, "Acme Corp"));
    source.insert(company(2, "Acme Logistics"));
    source.insert(contact(20, "Ben Ito"));
    source.relate_company(EntityId(1), EntityId(2));
    source.add_associate(EntityId(1), EntityId(20));
    source.add_associate(EntityId(2), EntityId(20));

    let explorer = RelationExplorer::new(source);
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    let ben_nodes = graph.nodes.iter().filter(|n| n.id == EntityId(20)).count();
    assert_eq!(ben_nodes, 1, "dedup is against the whole graph, not one branch");
    // First discovery wins: reached from the root, depth 1.
    assert_eq!(graph.node_by_id(EntityId(20)).unwrap().depth, 1);
}

// ============================================================================
// 9. Structural invariants: unique keys, unique triples, depth parentage
// ============================================================================

#[tokio::test]
async fn test_graph_invariants() {
    let source = scenario_source();
    source.insert(company(2, "Acme Logistics"));
    source.relate_company(EntityId(1), EntityId(2));
    source.add_associate(EntityId(2), EntityId(20));

    let explorer = RelationExplorer::new(source);
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    let keys: HashSet<_> = graph.nodes.iter().map(|n| n.key()).collect();
    assert_eq!(keys.len(), graph.nodes.len(), "node identities must be unique");

    let triples: HashSet<_> = graph.connections.iter().map(|c| c.dedup_key()).collect();
    assert_eq!(triples.len(), graph.connections.len(), "connection triples must be unique");

    for connection in &graph.connections {
        assert!(
            graph.node_by_id(connection.from_id).is_some()
                && graph.node_by_id(connection.to_id).is_some(),
            "every connection endpoint must resolve to an admitted node"
        );
        assert!((0.0..=1.0).contains(&connection.strength));
    }
    for node in &graph.nodes {
        assert!(node.depth <= graph.max_depth);
        assert!((0.0..=1.0).contains(&node.connection_strength));
    }
}

// ============================================================================
// 10. Option defaults and the serde round-trip
// ============================================================================

#[test]
fn test_option_defaults() {
    let opts = BuildOptions::default();
    assert_eq!(opts.max_depth, 3);
    assert!(!opts.include_inactive);
    assert!(opts.include_rendering);
}

#[tokio::test]
async fn test_graph_serde_round_trip() {
    let explorer = RelationExplorer::new(scenario_source());
    let graph = explorer
        .build_from_root(EntityId(1), &BuildOptions::default())
        .await
        .unwrap();

    let json = serde_json::to_string(&graph).unwrap();
    let back: relgraph::RelationGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back.total_nodes, graph.total_nodes);
    assert_eq!(back.connections.len(), graph.connections.len());
    assert_eq!(back.rendered_tree, graph.rendered_tree);
}
