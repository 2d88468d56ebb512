//! Core types for the coauthorship graph kernel.

pub mod node;
pub mod edge;
pub mod record;
pub mod subgraph;

pub use node::{Node, NodeKey, NodeKind, Paper, Author};
pub use edge::{Edge, ProximityEdge};
pub use record::{PaperRecord, RecordError};
pub use subgraph::Subgraph;
