//! Common-neighbor queries between two authors.
//!
//! Every "how are X and Y connected" question starts here: the nodes both
//! authors touch in the bipartite graph (their shared papers).
//!
//! Names are normalized at the query boundary, so `" Kim "` finds `Kim`.

use std::collections::BTreeSet;

use tracing::trace;

use crate::normalize::normalize_key;
use crate::store::GraphStore;
use crate::types::{NodeKey, Subgraph};

/// Shared-paper lookups over a graph store.
///
/// Absent authors are a normal outcome: every query returns an empty
/// result for them rather than an error.
#[derive(Debug)]
pub struct CoauthorQuery<'a, S: GraphStore> {
    store: &'a S,
}

impl<'a, S: GraphStore> CoauthorQuery<'a, S> {
    /// Create a query over a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Nodes adjacent to both authors.
    ///
    /// Symmetric in its arguments. Empty if either author is absent.
    pub fn shared_nodes(&self, source: &str, target: &str) -> BTreeSet<NodeKey> {
        let (Some(from), Some(to)) = (self.author_neighbors(source), self.author_neighbors(target))
        else {
            return BTreeSet::new();
        };

        let shared: BTreeSet<NodeKey> = from.intersection(to).cloned().collect();
        trace!(source, target, shared = shared.len(), "shared nodes");
        shared
    }

    /// Number of shared nodes (the count-weighted view's edge weight).
    pub fn count_shared_nodes(&self, source: &str, target: &str) -> usize {
        match (self.author_neighbors(source), self.author_neighbors(target)) {
            (Some(from), Some(to)) => from.intersection(to).count(),
            _ => 0,
        }
    }

    /// Two-hop star around the shared nodes.
    ///
    /// Contains `source`, `target` and every shared node, each shared node
    /// joined to both authors, and nothing else. Empty if either author is
    /// absent.
    pub fn coauthor_subgraph(&self, source: &str, target: &str) -> Subgraph {
        let mut graph = Subgraph::new();
        if self.author_neighbors(source).is_none() || self.author_neighbors(target).is_none() {
            return graph;
        }

        let source_key = NodeKey::author(normalize_key(source));
        let target_key = NodeKey::author(normalize_key(target));
        graph.add_node(source_key.clone());
        graph.add_node(target_key.clone());

        for shared in self.shared_nodes(source, target) {
            graph.add_edge(shared.clone(), source_key.clone());
            graph.add_edge(shared, target_key.clone());
        }
        graph
    }

    /// Authors sharing at least one paper with `author`, excluding itself.
    pub fn collaborators(&self, author: &str) -> BTreeSet<String> {
        let author = normalize_key(author);
        let Some(papers) = self.author_neighbors(&author) else {
            return BTreeSet::new();
        };
        papers
            .iter()
            .filter_map(|paper| self.store.neighbors(paper))
            .flatten()
            .filter_map(NodeKey::as_author)
            .filter(|name| *name != author.as_str())
            .map(str::to_string)
            .collect()
    }

    fn author_neighbors(&self, name: &str) -> Option<&'a BTreeSet<NodeKey>> {
        self.store.neighbors(&NodeKey::author(normalize_key(name)))
    }
}
