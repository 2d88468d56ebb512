//! In-memory graph store.
//!
//! Holds the bipartite paper/author graph and the author proximity graph
//! as adjacency indexes keyed by node identity. Nodes never hold pointers
//! to their edges; every traversal goes through the index.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::combination::pairs;
use crate::normalize::{is_blank, normalize_key};
use crate::proximity::ProximityUpdater;
use crate::types::{Author, Node, NodeKey, Paper, PaperRecord, ProximityEdge, RecordError};
use super::GraphStore;

/// Effect of one `add_collaboration` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationUpdate {
    /// Paper-author edges created by this call.
    pub linked: usize,
    /// Author pairs whose proximity edge was created or reinforced.
    pub reinforced: usize,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Records processed.
    pub records: usize,
    /// Paper vertices created.
    pub new_papers: usize,
    /// Author vertices created.
    pub new_authors: usize,
    /// Paper-author edges created.
    pub new_links: usize,
}

/// In-memory coauthorship graph.
///
/// Uses BTreeMap/BTreeSet for deterministic iteration order. All mutation
/// goes through `add_paper`, `add_author` and `add_collaboration` (or the
/// `ingest` helpers built on them); insertion is idempotent by identity key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGraphStore {
    /// Nodes by key.
    nodes: BTreeMap<NodeKey, Node>,
    /// Bipartite adjacency (both directions).
    adjacency: BTreeMap<NodeKey, BTreeSet<NodeKey>>,
    /// Number of bipartite edges.
    edge_count: usize,
    /// Proximity weights keyed by (lower name, upper name).
    proximity: BTreeMap<(String, String), f64>,
    /// Proximity adjacency (both directions).
    proximity_adjacency: BTreeMap<String, BTreeSet<String>>,
    updater: ProximityUpdater,
}

impl InMemoryGraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the paper described by `record`, or return the existing one.
    ///
    /// Identity is the normalized title; the first-seen record wins for
    /// every other field.
    pub fn add_paper(&mut self, record: &PaperRecord) -> Result<Paper, RecordError> {
        let paper = record.to_paper()?;
        Ok(self.insert_paper(paper))
    }

    /// Insert an already-validated paper, or return the existing one.
    fn insert_paper(&mut self, paper: Paper) -> Paper {
        let key = paper.node_key();
        if let Some(Node::Paper(existing)) = self.nodes.get(&key) {
            return existing.clone();
        }
        self.adjacency.entry(key.clone()).or_default();
        self.nodes.insert(key, Node::Paper(paper.clone()));
        paper
    }

    /// Insert an author by name, or return the existing one.
    pub fn add_author(&mut self, name: &str) -> Result<Author, RecordError> {
        let author = normalized_author(name)?;
        Ok(self.insert_author(author))
    }

    fn insert_author(&mut self, author: Author) -> Author {
        let key = author.node_key();
        if let Some(Node::Author(existing)) = self.nodes.get(&key) {
            return existing.clone();
        }
        self.adjacency.entry(key.clone()).or_default();
        self.proximity_adjacency.entry(author.name.clone()).or_default();
        self.nodes.insert(key, Node::Author(author.clone()));
        author
    }

    /// Credit `authors` on `paper` and reinforce every author pair.
    ///
    /// The title and every name are normalized first. A blank title or a
    /// blank name rejects the whole call before anything is inserted.
    ///
    /// Missing vertices are inserted first. An existing paper-author edge is
    /// left alone. A pair is reinforced only when this call makes the paper
    /// newly shared between them, so replaying a record never inflates the
    /// proximity of its authors.
    pub fn add_collaboration(
        &mut self,
        paper: &Paper,
        authors: &[Author],
    ) -> Result<CollaborationUpdate, RecordError> {
        let paper = normalized_paper(paper)?;
        let authors = authors
            .iter()
            .map(|a| normalized_author(&a.name))
            .collect::<Result<Vec<_>, _>>()?;

        let paper = self.insert_paper(paper);
        let paper_key = paper.node_key();

        let mut update = CollaborationUpdate::default();
        let mut newly_linked: BTreeSet<&str> = BTreeSet::new();
        for author in &authors {
            let stored = self.insert_author(author.clone());
            if self.link(&paper_key, &stored.node_key()) {
                update.linked += 1;
                newly_linked.insert(author.name.as_str());
            }
        }

        let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
        for (a, b) in pairs(&names) {
            if newly_linked.contains(a) || newly_linked.contains(b) {
                self.reinforce(a, b);
                update.reinforced += 1;
            }
        }

        debug!(
            title = %paper.title,
            authors = authors.len(),
            linked = update.linked,
            reinforced = update.reinforced,
            "collaboration recorded"
        );
        Ok(update)
    }

    /// Validate a record and load it: paper, authors, collaboration.
    ///
    /// Nothing is inserted when the record is malformed.
    pub fn ingest(&mut self, record: &PaperRecord) -> Result<Paper, RecordError> {
        let names = record.author_names().map_err(|e| {
            warn!(error = %e, "rejected malformed record");
            e
        })?;
        let paper = self.add_paper(record)?;
        let authors: Vec<Author> = names.into_iter().map(Author::new).collect();
        self.add_collaboration(&paper, &authors)?;
        Ok(paper)
    }

    /// Load a batch of records in order.
    ///
    /// Stops at the first malformed record and returns its error; records
    /// before it stay loaded.
    pub fn ingest_all<'a, I>(&mut self, records: I) -> Result<LoadSummary, RecordError>
    where
        I: IntoIterator<Item = &'a PaperRecord>,
    {
        let papers_before = self.papers().len();
        let authors_before = self.authors().len();
        let links_before = self.edge_count;

        let mut summary = LoadSummary::default();
        for record in records {
            self.ingest(record)?;
            summary.records += 1;
        }
        summary.new_papers = self.papers().len() - papers_before;
        summary.new_authors = self.authors().len() - authors_before;
        summary.new_links = self.edge_count - links_before;

        info!(
            records = summary.records,
            new_papers = summary.new_papers,
            new_authors = summary.new_authors,
            new_links = summary.new_links,
            "records loaded"
        );
        Ok(summary)
    }

    /// Add an undirected bipartite edge. Returns `false` if it existed.
    fn link(&mut self, paper: &NodeKey, author: &NodeKey) -> bool {
        let inserted = self
            .adjacency
            .entry(paper.clone())
            .or_default()
            .insert(author.clone());
        if inserted {
            self.adjacency
                .entry(author.clone())
                .or_default()
                .insert(paper.clone());
            self.edge_count += 1;
        }
        inserted
    }

    /// Apply the reinforcement rule to the pair (a, b).
    fn reinforce(&mut self, a: &str, b: &str) {
        let pair = ordered_pair(a, b);
        let current = self.proximity.get(&pair).copied();
        let weight = self.updater.reinforce(current);
        self.proximity.insert(pair, weight);

        self.proximity_adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.proximity_adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }
}

/// Copy of `paper` with a normalized title; blank titles are rejected.
fn normalized_paper(paper: &Paper) -> Result<Paper, RecordError> {
    if is_blank(&paper.title) {
        return Err(RecordError::MissingTitle {
            paper_id: paper.key.clone(),
        });
    }
    Ok(Paper {
        title: normalize_key(&paper.title),
        ..paper.clone()
    })
}

fn normalized_author(name: &str) -> Result<Author, RecordError> {
    if is_blank(name) {
        return Err(RecordError::BlankName);
    }
    Ok(Author::new(normalize_key(name)))
}

fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl GraphStore for InMemoryGraphStore {
    fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    fn nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    fn neighbors(&self, key: &NodeKey) -> Option<&BTreeSet<NodeKey>> {
        self.adjacency.get(key)
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn proximity_weight(&self, a: &str, b: &str) -> Option<f64> {
        self.proximity
            .get(&ordered_pair(&normalize_key(a), &normalize_key(b)))
            .copied()
    }

    fn proximity_neighbors(&self, name: &str) -> Vec<(&str, f64)> {
        let name = normalize_key(name);
        self.proximity_adjacency
            .get(&name)
            .map(|set| {
                set.iter()
                    .filter_map(|other| {
                        self.proximity
                            .get(&ordered_pair(&name, other))
                            .map(|w| (other.as_str(), *w))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn proximity_edges(&self) -> Vec<ProximityEdge> {
        self.proximity
            .iter()
            .map(|((a, b), w)| ProximityEdge::new(a.clone(), b.clone(), *w))
            .collect()
    }

    fn proximity_edge_count(&self) -> usize {
        self.proximity.len()
    }
}
