//! # coauthor-graph-kernel
//!
//! Deterministic coauthorship graphs built from bibliographic records.
//!
//! The kernel answers structural questions about collaboration:
//!
//! > Who works with whom, how strongly, and through whom are two authors related?
//!
//! ## Core Contract
//!
//! 1. Load `(paper, authors, year)` records into a bipartite paper/author graph
//! 2. Maintain a weighted author proximity graph (`weight = 1 / shared papers`)
//! 3. Answer read-only queries: shared papers, relation paths, top authors,
//!    importance scores
//!
//! ## Architecture
//!
//! ```text
//! PaperRecord → InMemoryGraphStore::ingest → GraphStore (read-only)
//!                        ↓                        ↓
//!        combinations + ProximityUpdater    CoauthorQuery / RelationPathfinder
//!                                           Ranker / ImportanceScorer
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same records (in any order) → identical graph and identical query results
//! - Node and edge ordering is canonical (BTreeMap/BTreeSet throughout)
//! - Replaying a record never changes any weight

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod normalize;
pub mod combination;
pub mod proximity;
pub mod store;
pub mod coauthor;
pub mod relation;
pub mod policy;
pub mod analysis;
pub mod canonical;

// Re-exports
pub use types::{Author, Edge, Node, NodeKey, NodeKind, Paper, PaperRecord, ProximityEdge, RecordError, Subgraph};
pub use normalize::{normalize_key, KEY_NORMALIZATION_VERSION};
pub use combination::{combinations, pairs};
pub use proximity::{ProximityUpdater, INITIAL_PROXIMITY_WEIGHT};
pub use store::{GraphStore, GraphStats, InMemoryGraphStore, CollaborationUpdate, LoadSummary};
pub use coauthor::CoauthorQuery;
pub use relation::{
    shortest_path, PathError, RelationGraph, RelationPathfinder, WeightedPath,
    DEFAULT_MAX_RELATION_LENGTH,
};
pub use policy::{KernelPolicyV1, ImportanceParams, PolicyError};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex, set_hash_hex};

// Analysis re-exports
pub use analysis::{
    AuthorDegree, Ranker, TopAuthors,
    ImportanceScorer, ImportanceScores,
    CountEdge, CountWeightedGraph, CountWeightedViews,
    GraphSnapshot,
};

/// Schema version for all graph kernel types.
/// Increment on breaking changes to any schema type.
pub const GRAPH_KERNEL_SCHEMA_VERSION: &str = "1.0.0";

/// Default policy version identifier.
pub const DEFAULT_POLICY_VERSION: &str = "kernel_policy_v1";
