//! Dataset fingerprint for a loaded graph.
//!
//! A `GraphSnapshot` identifies the content of a load independently of the
//! order records arrived in. Presentation layers can key cached query
//! results on `snapshot_id`.

use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_hash_hex, set_hash_hex, to_canonical_bytes};
use crate::normalize::KEY_NORMALIZATION_VERSION;
use crate::store::GraphStore;
use crate::types::NodeKey;
use crate::GRAPH_KERNEL_SCHEMA_VERSION;

/// A deterministic fingerprint of the graph state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Unique identifier for this snapshot (xxh64 of all components).
    pub snapshot_id: String,
    /// Paper vertices.
    pub paper_count: u64,
    /// Author vertices.
    pub author_count: u64,
    /// Paper-author edges.
    pub edge_count: u64,
    /// Author-author proximity edges.
    pub proximity_edge_count: u64,
    /// Schema version used for types.
    pub schema_version: String,
    /// Key normalization rules in effect.
    pub normalization_version: String,
    /// Hash of sorted node keys.
    pub node_key_hash: String,
    /// Hash of sorted (paper, author) edge pairs.
    pub edge_pair_hash: String,
    /// Unix timestamp when this snapshot was computed.
    pub computed_at: i64,
}

/// Internal struct for computing snapshot_id hash.
#[derive(Serialize)]
struct SnapshotIdInput<'a> {
    paper_count: u64,
    author_count: u64,
    edge_count: u64,
    proximity_edge_count: u64,
    schema_version: &'a str,
    normalization_version: &'a str,
    node_key_hash: &'a str,
    edge_pair_hash: &'a str,
}

impl GraphSnapshot {
    /// Compute a snapshot of the store's current state.
    ///
    /// The id depends only on graph content; `computed_at` is excluded.
    pub fn compute<S: GraphStore>(store: &S) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;

        let keys: Vec<NodeKey> = store.nodes().into_iter().map(|n| n.key()).collect();
        let paper_count = keys.iter().filter(|k| k.is_paper()).count() as u64;
        let author_count = keys.len() as u64 - paper_count;
        let node_key_hash = set_hash_hex(&keys);

        // bipartite_edges() puts the paper endpoint first
        let edges = store.bipartite_edges();
        let edge_pair_hash = set_hash_hex(edges.iter().map(|e| (e.a.id(), e.b.id())));

        let edge_count = store.edge_count() as u64;
        let proximity_edge_count = store.proximity_edge_count() as u64;

        let snapshot_id = canonical_hash_hex(&SnapshotIdInput {
            paper_count,
            author_count,
            edge_count,
            proximity_edge_count,
            schema_version: GRAPH_KERNEL_SCHEMA_VERSION,
            normalization_version: KEY_NORMALIZATION_VERSION,
            node_key_hash: &node_key_hash,
            edge_pair_hash: &edge_pair_hash,
        });

        Self {
            snapshot_id,
            paper_count,
            author_count,
            edge_count,
            proximity_edge_count,
            schema_version: GRAPH_KERNEL_SCHEMA_VERSION.to_string(),
            normalization_version: KEY_NORMALIZATION_VERSION.to_string(),
            node_key_hash,
            edge_pair_hash,
            computed_at: now,
        }
    }

    /// Serialize to canonical JSON bytes.
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        to_canonical_bytes(self)
    }

    /// Verify that this snapshot matches the store's current state.
    pub fn verify<S: GraphStore>(&self, store: &S) -> bool {
        Self::compute(store).snapshot_id == self.snapshot_id
    }
}
