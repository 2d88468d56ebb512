//! Small undirected result graphs handed to a presentation layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::edge::Edge;
use super::node::NodeKey;

/// Undirected simple graph over node keys.
///
/// Uses BTreeSet for deterministic iteration order. Adding an edge adds
/// both endpoints; self-loops are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subgraph {
    /// Vertices.
    pub nodes: BTreeSet<NodeKey>,
    /// Edges (canonical endpoint order).
    pub edges: BTreeSet<Edge>,
}

impl Subgraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_node(&mut self, key: NodeKey) -> bool {
        self.nodes.insert(key)
    }

    /// Add an edge and its endpoints. Returns `false` for duplicates and
    /// self-loops.
    pub fn add_edge(&mut self, x: NodeKey, y: NodeKey) -> bool {
        if x == y {
            return false;
        }
        self.nodes.insert(x.clone());
        self.nodes.insert(y.clone());
        self.edges.insert(Edge::new(x, y))
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether `key` is a vertex.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains(key)
    }

    /// Whether an edge joins `x` and `y`.
    pub fn has_edge(&self, x: &NodeKey, y: &NodeKey) -> bool {
        self.edges.contains(&Edge::new(x.clone(), y.clone()))
    }

    /// Neighbors of `key` in this graph.
    pub fn neighbors<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a NodeKey> + 'a {
        self.edges.iter().filter_map(move |e| e.other(key))
    }

    /// Degree of `key` in this graph.
    pub fn degree(&self, key: &NodeKey) -> usize {
        self.neighbors(key).count()
    }
}
