//! Whole-graph analysis over a loaded coauthorship graph.
//!
//! 1. **Ranking**: tie-inclusive top-K authors by paper count
//! 2. **Importance**: damped random-walk scores for papers and authors
//! 3. **Weighted views**: author graphs weighted by shared-paper counts
//! 4. **Snapshot**: order-independent fingerprint of the loaded dataset
//!
//! ```text
//! GraphStore → Ranker           → TopAuthors
//!            → ImportanceScorer → ImportanceScores → recommended papers
//!            → CountWeightedViews → CountWeightedGraph
//!            → GraphSnapshot
//! ```

pub mod ranking;
pub mod importance;
pub mod weighted;
pub mod snapshot;

// Re-exports
pub use ranking::{AuthorDegree, Ranker, TopAuthors, rank_order, select_tie_inclusive};
pub use importance::{ImportanceScorer, ImportanceScores, Stationary, stationary_distribution};
pub use weighted::{CountEdge, CountWeightedGraph, CountWeightedViews};
pub use snapshot::GraphSnapshot;
