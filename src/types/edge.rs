//! Edge types for the coauthorship graph.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::node::NodeKey;

/// Undirected edge between two nodes.
///
/// Endpoints are stored in canonical order (`a <= b`), so two edges with
/// swapped endpoints compare equal. Implements `Ord` for deterministic
/// ordering: (a, b).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Lower endpoint.
    pub a: NodeKey,
    /// Upper endpoint.
    pub b: NodeKey,
}

impl Edge {
    /// Create a new edge, ordering the endpoints.
    pub fn new(x: NodeKey, y: NodeKey) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Edge between a paper title and an author name.
    pub fn authorship(title: &str, author: &str) -> Self {
        Self::new(NodeKey::paper(title), NodeKey::author(author))
    }

    /// Whether `key` is one of the endpoints.
    pub fn touches(&self, key: &NodeKey) -> bool {
        &self.a == key || &self.b == key
    }

    /// The endpoint opposite `key`, if `key` is an endpoint.
    pub fn other(&self, key: &NodeKey) -> Option<&NodeKey> {
        if &self.a == key {
            Some(&self.b)
        } else if &self.b == key {
            Some(&self.a)
        } else {
            None
        }
    }

    /// Whether the edge joins one paper and one author.
    pub fn is_authorship(&self) -> bool {
        self.a.kind() != self.b.kind()
    }
}

/// Weighted edge of the author proximity graph.
///
/// `weight == 1 / n` where `n` is the number of papers the two authors
/// wrote together. Lower weight means a stronger tie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityEdge {
    /// Lower author name.
    pub a: String,
    /// Upper author name.
    pub b: String,
    /// Reciprocal co-authorship count.
    pub weight: f64,
}

impl ProximityEdge {
    /// Create a new proximity edge, ordering the endpoints.
    pub fn new(x: impl Into<String>, y: impl Into<String>, weight: f64) -> Self {
        let (x, y) = (x.into(), y.into());
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self { a, b, weight }
    }

    /// Co-authorship count implied by the weight.
    pub fn collaborations(&self) -> u32 {
        (1.0 / self.weight).round() as u32
    }
}

// Canonical ordering: a, then b, then weight
impl Eq for ProximityEdge {}

impl PartialOrd for ProximityEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ProximityEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.a.cmp(&other.a) {
            Ordering::Equal => match self.b.cmp(&other.b) {
                Ordering::Equal => self.weight.total_cmp(&other.weight),
                ord => ord,
            },
            ord => ord,
        }
    }
}
