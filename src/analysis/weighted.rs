//! Count-weighted author graphs.
//!
//! Edge weight is the exact number of papers two authors share. This view
//! is for comparing collaboration magnitude; pathfinding uses the
//! reciprocal proximity weights instead.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::canonical::canonical_hash_hex;
use crate::combination::pairs;
use crate::normalize::normalize_key;
use crate::store::GraphStore;
use crate::types::NodeKey;

/// An edge in the count-weighted author graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CountEdge {
    /// First author (lower name).
    pub a: String,
    /// Second author (upper name).
    pub b: String,
    /// Number of shared papers.
    pub shared: usize,
}

impl CountEdge {
    /// Create a new count edge.
    pub fn new(a: String, b: String, shared: usize) -> Self {
        // Ensure canonical ordering
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        Self { a, b, shared }
    }
}

/// A count-weighted author graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountWeightedGraph {
    /// Authors in the view.
    pub nodes: BTreeSet<String>,
    /// Author pairs with at least one shared paper.
    pub edges: Vec<CountEdge>,
    /// Content hash for integrity verification.
    pub graph_hash: String,
}

impl CountWeightedGraph {
    /// Create a graph from nodes and edges, sorting edges canonically.
    pub fn new(nodes: BTreeSet<String>, mut edges: Vec<CountEdge>) -> Self {
        edges.sort();
        let graph_hash = canonical_hash_hex(&(&nodes, &edges));
        Self {
            nodes,
            edges,
            graph_hash,
        }
    }

    /// Whether the view has no authors.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shared-paper count between two authors (0 if unconnected).
    pub fn weight(&self, x: &str, y: &str) -> usize {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        self.edges
            .iter()
            .find(|e| e.a == a && e.b == b)
            .map_or(0, |e| e.shared)
    }

    /// All edges touching an author.
    pub fn edges_for(&self, author: &str) -> Vec<&CountEdge> {
        self.edges
            .iter()
            .filter(|e| e.a == author || e.b == author)
            .collect()
    }

    /// The `n` heaviest edges, ties in canonical order.
    pub fn strongest(&self, n: usize) -> Vec<&CountEdge> {
        let mut sorted: Vec<_> = self.edges.iter().collect();
        sorted.sort_by(|x, y| y.shared.cmp(&x.shared).then_with(|| x.cmp(y)));
        sorted.truncate(n);
        sorted
    }
}

/// Builds count-weighted views over a store.
#[derive(Debug)]
pub struct CountWeightedViews<'a, S: GraphStore> {
    store: &'a S,
}

impl<'a, S: GraphStore> CountWeightedViews<'a, S> {
    /// Create a view builder over a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every author, with an edge for every pair sharing a paper.
    pub fn full(&self) -> CountWeightedGraph {
        let mut counts: BTreeMap<(String, String), usize> = BTreeMap::new();
        for paper in self.store.papers() {
            let names = self.authors_of(&paper.node_key());
            for (a, b) in pairs(&names) {
                *counts.entry((a.to_string(), b.to_string())).or_default() += 1;
            }
        }

        let nodes = self.store.authors().into_iter().map(|a| a.name.clone()).collect();
        let edges = counts
            .into_iter()
            .map(|((a, b), shared)| CountEdge::new(a, b, shared))
            .collect();
        CountWeightedGraph::new(nodes, edges)
    }

    /// An author and every collaborator, weighted by shared papers.
    ///
    /// Empty if the author is absent.
    pub fn ego(&self, author: &str) -> CountWeightedGraph {
        self.group([author])
    }

    /// Union of the ego views of several authors.
    ///
    /// Names are normalized first. Absent authors are skipped. Edges between
    /// two collaborators that are not themselves in the group are not
    /// included.
    pub fn group<'n, I>(&self, authors: I) -> CountWeightedGraph
    where
        I: IntoIterator<Item = &'n str>,
    {
        let mut nodes = BTreeSet::new();
        let mut edges: BTreeMap<(String, String), usize> = BTreeMap::new();

        for source in authors {
            let source = normalize_key(source);
            if self.store.author(&source).is_none() {
                continue;
            }
            nodes.insert(source.clone());
            for (other, shared) in self.collaborator_counts(&source) {
                nodes.insert(other.clone());
                let edge = CountEdge::new(source.clone(), other, shared);
                edges.insert((edge.a, edge.b), shared);
            }
        }

        let edges = edges
            .into_iter()
            .map(|((a, b), shared)| CountEdge::new(a, b, shared))
            .collect();
        CountWeightedGraph::new(nodes, edges)
    }

    /// Shared-paper count with every collaborator of `source`.
    fn collaborator_counts(&self, source: &str) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let Some(papers) = self.store.neighbors(&NodeKey::author(source)) else {
            return counts;
        };
        for paper in papers {
            for other in self.authors_of(paper) {
                if other != source {
                    *counts.entry(other.to_string()).or_default() += 1;
                }
            }
        }
        counts
    }

    fn authors_of(&self, paper: &NodeKey) -> Vec<&'a str> {
        self.store
            .neighbors(paper)
            .map(|set| set.iter().filter_map(NodeKey::as_author).collect())
            .unwrap_or_default()
    }
}
