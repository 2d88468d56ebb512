//! Relationship explanation between two authors.
//!
//! ## Algorithm
//!
//! 1. Find the shortest path from source to target in the proximity graph
//!    with Bellman–Ford (label-correcting, no assumption on the weight
//!    range, negative cycles detected).
//! 2. For every author on the path, pull in its whole bipartite
//!    neighborhood and every incident edge.
//!
//! The result is the strongest chain of collaboration plus the 1-hop
//! ego-network of each member. No path (or an absent author) yields an
//! empty relation graph.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::normalize::normalize_key;
use crate::policy::KernelPolicyV1;
use crate::store::GraphStore;
use crate::types::{NodeKey, ProximityEdge, Subgraph};

/// Default advisory cap on relation path length, in hops.
pub const DEFAULT_MAX_RELATION_LENGTH: u32 = 6;

/// Error type for shortest-path computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A cycle of negative total weight is reachable from the source.
    #[error("negative-weight cycle reachable from {0}")]
    NegativeCycle(String),
}

/// A weighted path through the proximity graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedPath {
    /// Author names from source to target.
    pub vertices: Vec<String>,
    /// Sum of edge weights along the path.
    pub total_weight: f64,
}

impl WeightedPath {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

/// Shortest path between two vertices of an undirected weighted graph.
///
/// Each edge may be traversed in either direction. Ties between equally
/// short paths are broken by canonical edge order, so the result is
/// deterministic. `Ok(None)` means the target is unreachable.
pub fn shortest_path(
    edges: &[ProximityEdge],
    source: &str,
    target: &str,
) -> Result<Option<WeightedPath>, PathError> {
    if source == target {
        return Ok(Some(WeightedPath {
            vertices: vec![source.to_string()],
            total_weight: 0.0,
        }));
    }

    let mut sorted: Vec<&ProximityEdge> = edges.iter().collect();
    sorted.sort();

    let vertices: BTreeSet<&str> = sorted
        .iter()
        .flat_map(|e| [e.a.as_str(), e.b.as_str()])
        .collect();
    let (Some(&start), true) = (vertices.get(source), vertices.contains(target)) else {
        return Ok(None);
    };
    let mut dist: BTreeMap<&str, f64> = BTreeMap::new();
    let mut pred: BTreeMap<&str, &str> = BTreeMap::new();
    dist.insert(start, 0.0);

    let mut rounds = 0;
    for _ in 1..vertices.len() {
        rounds += 1;
        if !relax(&sorted, &mut dist, &mut pred) {
            break;
        }
    }
    // A further improvement after |V|-1 rounds means a negative cycle.
    if rounds == vertices.len() - 1 && relax(&sorted, &mut dist, &mut pred) {
        return Err(PathError::NegativeCycle(source.to_string()));
    }
    trace!(source, target, rounds, "bellman-ford finished");

    let Some(&total_weight) = dist.get(target) else {
        return Ok(None);
    };

    let mut path = vec![target.to_string()];
    let mut current = target;
    while current != source {
        match pred.get(current) {
            Some(&prev) if path.len() <= vertices.len() => {
                path.push(prev.to_string());
                current = prev;
            }
            _ => return Err(PathError::NegativeCycle(source.to_string())),
        }
    }
    path.reverse();

    Ok(Some(WeightedPath {
        vertices: path,
        total_weight,
    }))
}

/// One Bellman–Ford round over both directions of every edge.
///
/// Only strict improvements count, so the first-found predecessor wins
/// ties. Returns whether any distance changed.
fn relax<'e>(
    edges: &[&'e ProximityEdge],
    dist: &mut BTreeMap<&'e str, f64>,
    pred: &mut BTreeMap<&'e str, &'e str>,
) -> bool {
    let mut changed = false;
    for edge in edges {
        for (from, to) in [(edge.a.as_str(), edge.b.as_str()), (edge.b.as_str(), edge.a.as_str())] {
            let Some(&d) = dist.get(from) else { continue };
            let candidate = d + edge.weight;
            if dist.get(to).map_or(true, |&current| candidate < current) {
                dist.insert(to, candidate);
                pred.insert(to, from);
                changed = true;
            }
        }
    }
    changed
}

/// Relationship explanation between two authors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationGraph {
    /// Authors on the shortest proximity path, source first. Empty if none.
    pub path: Vec<String>,
    /// Total proximity weight of the path.
    pub total_weight: f64,
    /// Advisory path-length cap (hops) for presentation.
    pub max_length: u32,
    /// Path members with their bipartite ego-networks.
    pub graph: Subgraph,
}

impl RelationGraph {
    /// Whether no relation was found.
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Number of collaboration hops between the two authors.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Whether the path is longer than the advisory cap.
    pub fn exceeds_cap(&self) -> bool {
        self.hops() > self.max_length as usize
    }

    fn empty(max_length: u32) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }
}

/// Computes relation graphs over a store.
#[derive(Debug)]
pub struct RelationPathfinder<'a, S: GraphStore> {
    store: &'a S,
    max_length: u32,
}

impl<'a, S: GraphStore> RelationPathfinder<'a, S> {
    /// Create a pathfinder with the default advisory cap.
    pub fn new(store: &'a S) -> Self {
        Self::with_max_length(store, DEFAULT_MAX_RELATION_LENGTH)
    }

    /// Create a pathfinder with a custom advisory cap.
    ///
    /// The cap is copied onto every result; the search itself is never
    /// truncated.
    pub fn with_max_length(store: &'a S, max_length: u32) -> Self {
        Self { store, max_length }
    }

    /// Create a pathfinder using a policy's advisory cap.
    pub fn from_policy(store: &'a S, policy: &KernelPolicyV1) -> Self {
        Self::with_max_length(store, policy.max_relation_length)
    }

    /// Advisory path-length cap.
    pub fn max_length(&self) -> u32 {
        self.max_length
    }

    /// Shortest proximity path between two authors, if any.
    ///
    /// Names are normalized before lookup.
    pub fn path(&self, source: &str, target: &str) -> Option<WeightedPath> {
        let (source, target) = (normalize_key(source), normalize_key(target));
        if self.store.author(&source).is_none() || self.store.author(&target).is_none() {
            return None;
        }
        match shortest_path(&self.store.proximity_edges(), &source, &target) {
            Ok(path) => path,
            Err(e) => {
                warn!(source = %source, target = %target, error = %e, "no usable relation path");
                None
            }
        }
    }

    /// Shortest path expanded with each member's bipartite ego-network.
    pub fn relation_graph(&self, source: &str, target: &str) -> RelationGraph {
        let Some(path) = self.path(source, target) else {
            trace!(source, target, "no relation");
            return RelationGraph::empty(self.max_length);
        };

        let mut graph = Subgraph::new();
        for name in &path.vertices {
            let key = NodeKey::author(name.as_str());
            graph.add_node(key.clone());
            if let Some(neighbors) = self.store.neighbors(&key) {
                for neighbor in neighbors {
                    graph.add_edge(key.clone(), neighbor.clone());
                }
            }
        }

        let relation = RelationGraph {
            path: path.vertices,
            total_weight: path.total_weight,
            max_length: self.max_length,
            graph,
        };
        if relation.exceeds_cap() {
            trace!(source, target, hops = relation.hops(), cap = self.max_length, "relation exceeds advisory cap");
        }
        relation
    }
}
