//! Tie-inclusive top-K ranking of authors by paper count.
//!
//! Degree is the bipartite degree of an author, i.e. the number of papers
//! credited to them. Ranking is total and reproducible: degree descending,
//! then name ascending.
//!
//! ## Cutoff Rule
//!
//! ```text
//! emit entries in rank order;
//! after k entries, keep emitting only while degree == degree of the last emitted
//! ```
//!
//! A tie at the k-th place is never cut arbitrarily, so the result may hold
//! more than `k` entries. The first entry is always emitted, so `k == 0`
//! yields the top tie group of a non-empty population.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coauthor::CoauthorQuery;
use crate::normalize::normalize_key;
use crate::store::GraphStore;
use crate::types::NodeKey;

/// An author with its paper count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDegree {
    /// Author name.
    pub name: String,
    /// Number of papers.
    pub degree: usize,
}

impl AuthorDegree {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, degree: usize) -> Self {
        Self {
            name: name.into(),
            degree,
        }
    }
}

/// Ranked authors, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopAuthors {
    /// Selected entries in rank order.
    pub entries: Vec<AuthorDegree>,
    /// The `k` that was asked for.
    pub requested: usize,
    /// Reference author restricting the population, if any.
    pub filter: Option<String>,
}

impl TopAuthors {
    /// Number of selected authors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Degree of a selected author.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.degree)
    }

    /// Selected names in rank order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Whether ties pushed the result past `k`.
    pub fn extended_by_ties(&self) -> bool {
        self.entries.len() > self.requested
    }
}

/// Sort entries by degree descending, then name ascending.
pub fn rank_order(entries: &mut [AuthorDegree]) {
    entries.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.name.cmp(&b.name)));
}

/// Apply the tie-inclusive cutoff to entries already in rank order.
pub fn select_tie_inclusive(ranked: Vec<AuthorDegree>, k: usize) -> Vec<AuthorDegree> {
    if ranked.len() <= k {
        return ranked;
    }

    let mut selected: Vec<AuthorDegree> = Vec::with_capacity(k + 1);
    for entry in ranked {
        if let Some(last) = selected.last() {
            if selected.len() >= k && entry.degree < last.degree {
                break;
            }
        }
        selected.push(entry);
    }
    selected
}

/// Degree-based author ranking over a store.
#[derive(Debug)]
pub struct Ranker<'a, S: GraphStore> {
    store: &'a S,
}

impl<'a, S: GraphStore> Ranker<'a, S> {
    /// Create a ranker over a store.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Every author with its degree, in rank order.
    pub fn ranked(&self, filter: Option<&str>) -> Vec<AuthorDegree> {
        let mut entries: Vec<AuthorDegree> = match filter {
            None => self
                .store
                .authors()
                .into_iter()
                .map(|a| AuthorDegree::new(a.name.as_str(), self.store.degree(&a.node_key())))
                .collect(),
            Some(reference) => self
                .population(reference)
                .into_iter()
                .map(|name| {
                    let degree = self.store.degree(&NodeKey::author(name.as_str()));
                    AuthorDegree::new(name, degree)
                })
                .collect(),
        };
        rank_order(&mut entries);
        entries
    }

    /// Top `k` authors by degree, keeping ties at the cutoff.
    ///
    /// With a `filter`, only authors sharing at least one paper with the
    /// reference author are considered; the reference author counts as
    /// sharing its own papers. An absent reference author yields an empty
    /// result.
    pub fn top_by_degree(&self, k: usize, filter: Option<&str>) -> TopAuthors {
        let filter = filter.map(normalize_key);
        let ranked = self.ranked(filter.as_deref());
        let population = ranked.len();
        let entries = select_tie_inclusive(ranked, k);
        trace!(k, ?filter, population, selected = entries.len(), "top authors by degree");

        TopAuthors {
            entries,
            requested: k,
            filter,
        }
    }

    /// Authors sharing at least one paper with `reference`, itself included.
    fn population(&self, reference: &str) -> BTreeSet<String> {
        let reference = normalize_key(reference);
        let mut population = CoauthorQuery::new(self.store).collaborators(&reference);
        if self.store.degree(&NodeKey::author(reference.as_str())) > 0 {
            population.insert(reference);
        }
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryGraphStore;
    use crate::types::PaperRecord;

    fn entries(degrees: &[(&str, usize)]) -> Vec<AuthorDegree> {
        let mut v: Vec<_> = degrees.iter().map(|(n, d)| AuthorDegree::new(*n, *d)).collect();
        rank_order(&mut v);
        v
    }

    fn load(papers: &[(&str, &[&str])]) -> InMemoryGraphStore {
        let mut store = InMemoryGraphStore::new();
        for (title, authors) in papers {
            let authors = authors.iter().map(|a| a.to_string()).collect();
            store
                .ingest(&PaperRecord::new("cs", "Conf", *title, 2015, authors))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_ties_extend_past_k() {
        let ranked = entries(&[("a", 5), ("b", 5), ("c", 5), ("d", 3), ("e", 2)]);
        let selected = select_tie_inclusive(ranked, 2);
        let names: Vec<_> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(selected.iter().all(|e| e.degree == 5));
    }

    #[test]
    fn test_no_tie_cuts_at_k() {
        let ranked = entries(&[("a", 5), ("b", 4), ("c", 4), ("d", 1)]);
        assert_eq!(select_tie_inclusive(ranked.clone(), 1).len(), 1);
        assert_eq!(select_tie_inclusive(ranked, 2).len(), 3);
    }

    #[test]
    fn test_k_at_least_population() {
        let ranked = entries(&[("a", 1), ("b", 2)]);
        assert_eq!(select_tie_inclusive(ranked.clone(), 2).len(), 2);
        assert_eq!(select_tie_inclusive(ranked, 10).len(), 2);
    }

    #[test]
    fn test_k_zero_keeps_top_tie_group() {
        let ranked = entries(&[("a", 1), ("b", 1)]);
        assert_eq!(select_tie_inclusive(ranked, 0).len(), 2);

        let ranked = entries(&[("a", 4), ("b", 4), ("c", 2)]);
        let names: Vec<_> = select_tie_inclusive(ranked, 0).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert!(select_tie_inclusive(Vec::new(), 0).is_empty());
    }

    #[test]
    fn test_k_zero_on_store() {
        let store = load(&[("P1", &["A", "B"])]);
        let top = Ranker::new(&store).top_by_degree(0, None);
        assert_eq!(top.names(), vec!["A", "B"]);
        assert!(top.extended_by_ties());
        assert!(Ranker::new(&InMemoryGraphStore::new()).top_by_degree(0, None).is_empty());
    }

    #[test]
    fn test_padded_filter_is_normalized() {
        let store = load(&[("P1", &["A", "B"]), ("P2", &["B", "C"])]);
        let top = Ranker::new(&store).top_by_degree(5, Some(" C "));
        assert_eq!(top.filter.as_deref(), Some("C"));
        assert_eq!(top.names(), vec!["B", "C"]);
    }

    #[test]
    fn test_rank_order_breaks_ties_by_name() {
        let ranked = entries(&[("zoe", 2), ("amy", 2), ("max", 3)]);
        let names: Vec<_> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["max", "amy", "zoe"]);
    }

    #[test]
    fn test_top_by_degree_on_store() {
        let store = load(&[("P1", &["A", "B"]), ("P2", &["A", "B"]), ("P3", &["B", "C"])]);
        let top = Ranker::new(&store).top_by_degree(1, None);
        assert_eq!(top.names(), vec!["B"]);
        assert_eq!(top.get("B"), Some(3));
        assert!(!top.extended_by_ties());
    }

    #[test]
    fn test_filter_restricts_population() {
        let store = load(&[
            ("P1", &["A", "B"]),
            ("P2", &["B", "C"]),
            ("P3", &["C", "D"]),
            ("P4", &["D"]),
            ("P5", &["D"]),
        ]);
        let top = Ranker::new(&store).top_by_degree(10, Some("A"));
        assert_eq!(top.names(), vec!["B", "A"]);
        assert_eq!(top.filter.as_deref(), Some("A"));
        assert_eq!(top.get("D"), None);
    }

    #[test]
    fn test_filter_absent_author_is_empty() {
        let store = load(&[("P1", &["A", "B"])]);
        assert!(Ranker::new(&store).top_by_degree(3, Some("Nobody")).is_empty());
    }

    #[test]
    fn test_authors_without_papers_have_degree_zero() {
        let mut store = load(&[("P1", &["A"])]);
        store.add_author("Loner").unwrap();
        let ranked = Ranker::new(&store).ranked(None);
        assert_eq!(ranked.last(), Some(&AuthorDegree::new("Loner", 0)));
        // A paperless reference author shares nothing, not even with itself
        assert!(Ranker::new(&store).top_by_degree(5, Some("Loner")).is_empty());
    }
}
