//! Integration tests for whole-graph analysis.
//!
//! These tests exercise the analysis layer end to end over a small
//! bibliography:
//! 1. Tie-inclusive ranking (global and filtered)
//! 2. Importance scores and paper recommendation
//! 3. Count-weighted views
//! 4. Dataset snapshot identity
//! 5. Policy-driven configuration

use coauthor_graph_kernel::{
    CoauthorQuery, CountWeightedViews, GraphSnapshot, GraphStore, ImportanceParams,
    ImportanceScorer, InMemoryGraphStore, KernelPolicyV1, NodeKey, PaperRecord, PolicyError,
    Ranker, RelationPathfinder, DEFAULT_POLICY_VERSION,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn record(title: &str, authors: &[&str]) -> PaperRecord {
    PaperRecord::new(
        "cs.SI",
        "KDD",
        title,
        2015,
        authors.iter().map(|a| a.to_string()).collect(),
    )
}

/// Degrees: Ada 5, Bo 5, Cy 5, Di 3, Ed 2; Fay only writes with Ed.
fn create_bibliography() -> InMemoryGraphStore {
    let records = vec![
        record("Q1", &["Ada", "Bo"]),
        record("Q2", &["Ada", "Bo"]),
        record("Q3", &["Ada", "Cy"]),
        record("Q4", &["Ada", "Cy", "Di"]),
        record("Q5", &["Ada"]),
        record("Q6", &["Bo", "Di"]),
        record("Q7", &["Bo"]),
        record("Q8", &["Bo", "Cy"]),
        record("Q9", &["Cy", "Di"]),
        record("Q10", &["Cy"]),
        record("Q11", &["Ed", "Fay"]),
        record("Q12", &["Ed"]),
    ];
    let mut store = InMemoryGraphStore::new();
    store.ingest_all(&records).unwrap();
    store
}

// ─────────────────────────────────────────────────────────────────────────────
// Ranking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_top_k_keeps_ties() {
    let store = create_bibliography();
    let top = Ranker::new(&store).top_by_degree(2, None);

    assert_eq!(top.names(), vec!["Ada", "Bo", "Cy"]);
    assert!(top.extended_by_ties());
    assert!(top.entries.iter().all(|e| e.degree == 5));
}

#[test]
fn test_top_k_without_tie() {
    let store = create_bibliography();
    let top = Ranker::new(&store).top_by_degree(4, None);

    assert_eq!(top.names(), vec!["Ada", "Bo", "Cy", "Di"]);
    assert!(!top.extended_by_ties());
}

#[test]
fn test_top_k_larger_than_population() {
    let store = create_bibliography();
    let top = Ranker::new(&store).top_by_degree(100, None);

    assert_eq!(top.len(), store.authors().len());
}

#[test]
fn test_top_zero_returns_leading_tie_group() {
    let store = create_bibliography();
    let top = Ranker::new(&store).top_by_degree(0, None);

    assert_eq!(top.names(), vec!["Ada", "Bo", "Cy"]);
    assert_eq!(top.requested, 0);

    let around_fay = Ranker::new(&store).top_by_degree(0, Some("Fay"));
    assert_eq!(around_fay.names(), vec!["Ed"]);
}

#[test]
fn test_filtered_ranking() {
    let store = create_bibliography();
    let ranker = Ranker::new(&store);

    let around_fay = ranker.top_by_degree(5, Some("Fay"));
    assert_eq!(around_fay.names(), vec!["Ed", "Fay"]);
    assert_eq!(around_fay.filter.as_deref(), Some("Fay"));

    let around_di = ranker.top_by_degree(1, Some("Di"));
    // Ada, Bo and Cy all share a paper with Di and tie at 5
    assert_eq!(around_di.names(), vec!["Ada", "Bo", "Cy"]);
}

#[test]
fn test_ranking_serializes() {
    let store = create_bibliography();
    let top = Ranker::new(&store).top_by_degree(1, None);
    let json = serde_json::to_string(&top).unwrap();
    assert!(json.contains("\"requested\":1"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Importance
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_importance_is_distribution() {
    let store = create_bibliography();
    let scores = ImportanceScorer::new().score(&store);

    assert_eq!(scores.len(), store.node_count());
    assert!((scores.total() - 1.0).abs() < 1e-6);
    assert!(scores.scores.values().all(|s| *s > 0.0));
    assert!(scores.converged);
}

#[test]
fn test_importance_deterministic() {
    let store = create_bibliography();
    let scorer = ImportanceScorer::new();
    assert_eq!(scorer.score(&store), scorer.score(&store));
}

#[test]
fn test_recommended_papers_ordered() {
    let store = create_bibliography();
    let scores = ImportanceScorer::new().score(&store);
    let recommended = scores.recommended_papers(3);

    assert_eq!(recommended.len(), 3);
    for pair in recommended.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
    for (title, _) in &recommended {
        assert!(store.paper(title).is_some());
    }
    // The three-author paper outranks every single-author paper
    let q4 = scores.get(&NodeKey::paper("Q4")).unwrap();
    let q5 = scores.get(&NodeKey::paper("Q5")).unwrap();
    assert!(q4 > q5);
}

// ─────────────────────────────────────────────────────────────────────────────
// Count-weighted views
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_weighted_view_agrees_with_proximity() {
    let store = create_bibliography();
    let graph = CountWeightedViews::new(&store).full();

    assert_eq!(graph.edges.len(), store.proximity_edge_count());
    for edge in &graph.edges {
        let weight = store.proximity_weight(&edge.a, &edge.b).unwrap();
        assert!((weight - 1.0 / edge.shared as f64).abs() < 1e-9);
    }
}

#[test]
fn test_weighted_ego_and_group() {
    let store = create_bibliography();
    let views = CountWeightedViews::new(&store);

    let ada = views.ego("Ada");
    assert_eq!(ada.weight("Ada", "Bo"), 2);
    assert_eq!(ada.weight("Ada", "Di"), 1);
    assert_eq!(ada.edges_for("Ada").len(), 3);

    let group = views.group(["Ada", "Ed"]);
    assert!(group.nodes.contains("Fay"));
    assert_eq!(group.edges.len(), 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_snapshot_counts() {
    let store = create_bibliography();
    let snapshot = GraphSnapshot::compute(&store);

    assert_eq!(snapshot.paper_count, 12);
    assert_eq!(snapshot.author_count, 6);
    assert_eq!(snapshot.edge_count as usize, store.edge_count());
    assert_eq!(snapshot.snapshot_id.len(), 16);
    assert!(snapshot.verify(&store));
}

#[test]
fn test_snapshot_round_trips_json() {
    let snapshot = GraphSnapshot::compute(&create_bibliography());
    let bytes = snapshot.to_canonical_bytes();
    let back: GraphSnapshot = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(back.snapshot_id, snapshot.snapshot_id);
}

// ─────────────────────────────────────────────────────────────────────────────
// Policy
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_policy_from_json_drives_queries() {
    let store = create_bibliography();
    let policy = KernelPolicyV1::from_json(
        r#"{"max_relation_length": 1, "importance": {"damping": 0.5}}"#,
    )
    .unwrap();

    assert_eq!(policy.policy_id(), DEFAULT_POLICY_VERSION);
    assert_eq!(policy.importance.max_iterations, 100);

    let relation = RelationPathfinder::from_policy(&store, &policy).relation_graph("Fay", "Ed");
    assert_eq!(relation.max_length, 1);
    assert!(!relation.exceeds_cap());

    let scorer = ImportanceScorer::from_policy(&policy).unwrap();
    assert_eq!(scorer.params().damping, 0.5);
    assert!((scorer.score(&store).total() - 1.0).abs() < 1e-6);
}

#[test]
fn test_policy_hash_tracks_parameters() {
    let base = KernelPolicyV1::default();
    let tweaked = KernelPolicyV1::new(
        base.max_relation_length,
        ImportanceParams {
            damping: 0.9,
            ..ImportanceParams::default()
        },
    );
    assert_eq!(base.params_hash(), KernelPolicyV1::default().params_hash());
    assert_ne!(base.params_hash(), tweaked.params_hash());
}

#[test]
fn test_invalid_policy_rejected() {
    let policy = KernelPolicyV1::from_json(r#"{"importance": {"damping": 1.5}}"#);
    assert!(matches!(policy, Err(PolicyError::InvalidDamping(_))));
    assert!(matches!(
        KernelPolicyV1::from_json("not json"),
        Err(PolicyError::Parse(_))
    ));
}

#[test]
fn test_queries_leave_store_untouched() {
    let store = create_bibliography();
    let before = GraphSnapshot::compute(&store);

    let _ = CoauthorQuery::new(&store).coauthor_subgraph("Ada", "Bo");
    let _ = RelationPathfinder::new(&store).relation_graph("Ada", "Fay");
    let _ = Ranker::new(&store).top_by_degree(3, Some("Cy"));
    let _ = ImportanceScorer::new().score(&store);
    let _ = CountWeightedViews::new(&store).full();

    assert!(before.verify(&store));
}
