//! Graph storage backends.

pub mod memory;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::normalize::normalize_key;
use crate::types::{Author, Edge, Node, NodeKey, Paper, ProximityEdge};

/// Read access to the bipartite and proximity graphs.
///
/// Implementations must guarantee deterministic ordering of results.
/// Query components only ever see a store through this trait, so they can
/// never mutate it.
pub trait GraphStore {
    /// Fetch a node by key.
    fn node(&self, key: &NodeKey) -> Option<&Node>;

    /// All nodes (ordered by key).
    fn nodes(&self) -> Vec<&Node>;

    /// Bipartite neighbors of a node, or `None` if the node is absent.
    fn neighbors(&self, key: &NodeKey) -> Option<&BTreeSet<NodeKey>>;

    /// Number of bipartite edges.
    fn edge_count(&self) -> usize;

    /// Proximity weight between two authors, if they ever co-authored.
    ///
    /// Names are normalized before lookup.
    fn proximity_weight(&self, a: &str, b: &str) -> Option<f64>;

    /// Proximity neighbors of an author with edge weights (ordered by name).
    fn proximity_neighbors(&self, name: &str) -> Vec<(&str, f64)>;

    /// All proximity edges (canonical order).
    fn proximity_edges(&self) -> Vec<ProximityEdge>;

    /// Whether the node exists.
    fn contains(&self, key: &NodeKey) -> bool {
        self.node(key).is_some()
    }

    /// Fetch a paper by title (normalized before lookup).
    fn paper(&self, title: &str) -> Option<&Paper> {
        self.node(&NodeKey::paper(normalize_key(title))).and_then(Node::as_paper)
    }

    /// Fetch an author by name (normalized before lookup).
    fn author(&self, name: &str) -> Option<&Author> {
        self.node(&NodeKey::author(normalize_key(name))).and_then(Node::as_author)
    }

    /// Bipartite degree (0 for absent nodes).
    fn degree(&self, key: &NodeKey) -> usize {
        self.neighbors(key).map_or(0, BTreeSet::len)
    }

    /// All authors (ordered by name).
    fn authors(&self) -> Vec<&Author> {
        self.nodes().into_iter().filter_map(Node::as_author).collect()
    }

    /// All papers (ordered by title).
    fn papers(&self) -> Vec<&Paper> {
        self.nodes().into_iter().filter_map(Node::as_paper).collect()
    }

    /// Number of vertices.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// All bipartite edges (canonical order).
    fn bipartite_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for node in self.nodes() {
            let key = node.key();
            if let (NodeKey::Paper(_), Some(adjacent)) = (&key, self.neighbors(&key)) {
                edges.extend(adjacent.iter().map(|n| Edge::new(key.clone(), n.clone())));
            }
        }
        edges.sort();
        edges
    }

    /// Number of proximity edges.
    fn proximity_edge_count(&self) -> usize {
        self.proximity_edges().len()
    }

    /// Summary counts for presentation.
    fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            bipartite_edges: self.edge_count(),
            proximity_edges: self.proximity_edge_count(),
            ..GraphStats::default()
        };
        for node in self.nodes() {
            let key = node.key();
            let degree = self.degree(&key);
            match node {
                Node::Paper(_) => {
                    stats.papers += 1;
                    if degree == 0 {
                        stats.unattributed_papers += 1;
                    }
                    stats.max_authors_per_paper = stats.max_authors_per_paper.max(degree);
                }
                Node::Author(_) => {
                    stats.authors += 1;
                    stats.max_papers_per_author = stats.max_papers_per_author.max(degree);
                }
            }
        }
        stats
    }
}

/// Summary statistics of a loaded graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Paper vertices.
    pub papers: usize,
    /// Author vertices.
    pub authors: usize,
    /// Paper-author edges.
    pub bipartite_edges: usize,
    /// Author-author proximity edges.
    pub proximity_edges: usize,
    /// Papers with an empty author list.
    pub unattributed_papers: usize,
    /// Largest author list on a single paper.
    pub max_authors_per_paper: usize,
    /// Largest number of papers by a single author.
    pub max_papers_per_author: usize,
}

pub use memory::{InMemoryGraphStore, CollaborationUpdate, LoadSummary};
