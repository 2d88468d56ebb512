//! Global structural importance via a damped random walk.
//!
//! # Algorithm
//!
//! Power iteration on the undirected bipartite graph:
//!
//! ```text
//! S(v) = (1 - d) / N + d * Σ S(u) / degree(u)   for each neighbor u of v
//! ```
//!
//! where `d` is the damping factor (default 0.85). Isolated vertices spread
//! their mass uniformly over all N vertices. Iteration stops when the L1
//! change drops below the tolerance or the iteration cap is reached.
//!
//! Scores sum to 1 over papers and authors together. High-scoring papers
//! are the structurally central ones and are what gets recommended.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::policy::{ImportanceParams, KernelPolicyV1, PolicyError};
use crate::store::GraphStore;
use crate::types::NodeKey;

/// Result of a stationary-distribution computation over index vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Stationary {
    /// Score per vertex index.
    pub scores: Vec<f64>,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached within the cap.
    pub converged: bool,
}

/// Stationary distribution of the damped walk over an adjacency list.
///
/// `adjacency[i]` lists the neighbors of vertex `i`; the graph is treated as
/// given (pass both directions for undirected graphs). Pure function.
pub fn stationary_distribution(adjacency: &[Vec<usize>], params: &ImportanceParams) -> Stationary {
    let n = adjacency.len();
    if n == 0 {
        return Stationary {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let n_f64 = n as f64;
    let base = (1.0 - params.damping) / n_f64;

    let mut scores = vec![1.0 / n_f64; n];
    let mut next = vec![0.0_f64; n];
    let mut iterations = 0;
    let mut converged = false;

    for _ in 0..params.max_iterations {
        iterations += 1;

        // Mass from isolated vertices is spread evenly.
        let dangling: f64 = adjacency
            .iter()
            .zip(&scores)
            .filter(|(neighbors, _)| neighbors.is_empty())
            .map(|(_, s)| *s)
            .sum();
        let floor = base + params.damping * dangling / n_f64;
        next.iter_mut().for_each(|s| *s = floor);

        for (idx, neighbors) in adjacency.iter().enumerate() {
            if neighbors.is_empty() {
                continue;
            }
            let share = params.damping * scores[idx] / neighbors.len() as f64;
            for &neighbor in neighbors {
                next[neighbor] += share;
            }
        }

        let delta: f64 = scores.iter().zip(&next).map(|(old, new)| (old - new).abs()).sum();
        std::mem::swap(&mut scores, &mut next);

        if delta < params.tolerance {
            converged = true;
            break;
        }
    }

    Stationary {
        scores,
        iterations,
        converged,
    }
}

/// Importance score per node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportanceScores {
    /// Score per node key.
    #[serde(with = "key_score_pairs")]
    pub scores: BTreeMap<NodeKey, f64>,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was reached within the cap.
    pub converged: bool,
}

impl ImportanceScores {
    /// Score of a node.
    pub fn get(&self, key: &NodeKey) -> Option<f64> {
        self.scores.get(key).copied()
    }

    /// Sum of all scores (1 for any non-empty graph, up to rounding).
    pub fn total(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Number of scored nodes.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no node was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Papers with the highest scores, best first (ties by title).
    pub fn recommended_papers(&self, n: usize) -> Vec<(&str, f64)> {
        self.top_of(n, NodeKey::is_paper)
    }

    /// Authors with the highest scores, best first (ties by name).
    pub fn central_authors(&self, n: usize) -> Vec<(&str, f64)> {
        self.top_of(n, NodeKey::is_author)
    }

    fn top_of(&self, n: usize, keep: impl Fn(&NodeKey) -> bool) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .scores
            .iter()
            .filter(|(key, _)| keep(key))
            .map(|(key, score)| (key.id(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }
}

/// JSON maps need string keys, so scores travel as `[key, score]` pairs.
mod key_score_pairs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    use crate::types::NodeKey;

    pub fn serialize<S: Serializer>(map: &BTreeMap<NodeKey, f64>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeMap<NodeKey, f64>, D::Error> {
        let pairs: Vec<(NodeKey, f64)> = Vec::deserialize(d)?;
        Ok(pairs.into_iter().collect())
    }
}

/// Computes importance scores over a store.
#[derive(Debug, Clone, Default)]
pub struct ImportanceScorer {
    params: ImportanceParams,
}

impl ImportanceScorer {
    /// Create a scorer with default parameters (damping 0.85).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom parameters.
    ///
    /// Fails if damping is outside `(0, 1)`, the tolerance is not a positive
    /// finite number, or the iteration cap is zero.
    pub fn with_params(params: ImportanceParams) -> Result<Self, PolicyError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Create a scorer from a policy's importance parameters.
    pub fn from_policy(policy: &KernelPolicyV1) -> Result<Self, PolicyError> {
        Self::with_params(policy.importance.clone())
    }

    /// Parameters in use.
    pub fn params(&self) -> &ImportanceParams {
        &self.params
    }

    /// Score every node of the bipartite graph.
    pub fn score<S: GraphStore>(&self, store: &S) -> ImportanceScores {
        let keys: Vec<NodeKey> = store.nodes().into_iter().map(|n| n.key()).collect();
        let index: BTreeMap<&NodeKey, usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

        let adjacency: Vec<Vec<usize>> = keys
            .iter()
            .map(|key| {
                store
                    .neighbors(key)
                    .map(|set| set.iter().filter_map(|n| index.get(n).copied()).collect())
                    .unwrap_or_default()
            })
            .collect();

        let result = stationary_distribution(&adjacency, &self.params);
        if result.converged {
            info!(nodes = keys.len(), iterations = result.iterations, "importance scores computed");
        } else {
            warn!(
                nodes = keys.len(),
                iterations = result.iterations,
                "importance scores did not converge within the iteration cap"
            );
        }

        ImportanceScores {
            scores: keys.into_iter().zip(result.scores).collect(),
            iterations: result.iterations,
            converged: result.converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryGraphStore;
    use crate::types::PaperRecord;

    const EPS: f64 = 1e-6;

    fn load(papers: &[(&str, &[&str])]) -> InMemoryGraphStore {
        let mut store = InMemoryGraphStore::new();
        for (title, authors) in papers {
            let authors = authors.iter().map(|a| a.to_string()).collect();
            store
                .ingest(&PaperRecord::new("cs", "Conf", *title, 2012, authors))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_empty_graph() {
        let scores = ImportanceScorer::new().score(&InMemoryGraphStore::new());
        assert!(scores.is_empty());
        assert!(scores.converged);
    }

    #[test]
    fn test_scores_sum_to_one() {
        let store = load(&[("P1", &["A", "B"]), ("P2", &["A", "B"]), ("P3", &["B", "C"]), ("P4", &[])]);
        let scores = ImportanceScorer::new().score(&store);
        assert_eq!(scores.len(), 7);
        assert!((scores.total() - 1.0).abs() < EPS);
        assert!(scores.converged);
    }

    #[test]
    fn test_hub_scores_highest() {
        let store = load(&[("P1", &["A", "B"]), ("P2", &["A", "B"]), ("P3", &["B", "C"])]);
        let scores = ImportanceScorer::new().score(&store);
        let b = scores.get(&NodeKey::author("B")).unwrap();
        for key in scores.scores.keys().filter(|k| **k != NodeKey::author("B")) {
            assert!(b > scores.get(key).unwrap());
        }
        assert_eq!(scores.central_authors(1)[0].0, "B");
    }

    #[test]
    fn test_symmetric_nodes_score_equally() {
        let store = load(&[("P1", &["A", "B"])]);
        let scores = ImportanceScorer::new().score(&store);
        let a = scores.get(&NodeKey::author("A")).unwrap();
        let b = scores.get(&NodeKey::author("B")).unwrap();
        assert!((a - b).abs() < EPS);
    }

    #[test]
    fn test_single_isolated_node() {
        let store = load(&[("Alone", &[])]);
        let scores = ImportanceScorer::new().score(&store);
        assert!((scores.get(&NodeKey::paper("Alone")).unwrap() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_recommended_papers() {
        let store = load(&[
            ("Big", &["A", "B", "C"]),
            ("Small", &["D"]),
            ("Mid", &["A", "E"]),
        ]);
        let scores = ImportanceScorer::new().score(&store);
        let recommended = scores.recommended_papers(2);
        assert_eq!(recommended.len(), 2);
        assert_eq!(recommended[0].0, "Big");
        assert!(recommended[0].1 >= recommended[1].1);
    }

    #[test]
    fn test_scores_serialize_as_pairs() {
        let store = load(&[("P1", &["A"])]);
        let scores = ImportanceScorer::new().score(&store);
        let json = serde_json::to_string(&scores).unwrap();
        let back: ImportanceScores = serde_json::from_str(&json).unwrap();
        assert_eq!(back.scores.len(), 2);
        assert!(json.contains(r#"{"kind":"author","id":"A"}"#));
    }

    #[test]
    fn test_iteration_cap_reported() {
        let store = load(&[("P1", &["A", "B"]), ("P2", &["B", "C"]), ("P3", &["C"])]);
        let params = ImportanceParams {
            max_iterations: 1,
            tolerance: 1e-15,
            ..ImportanceParams::default()
        };
        let scores = ImportanceScorer::with_params(params).unwrap().score(&store);
        assert_eq!(scores.iterations, 1);
        assert!(!scores.converged);
        assert!((scores.total() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let damping = |d: f64| ImportanceParams {
            damping: d,
            ..ImportanceParams::default()
        };
        assert!(matches!(
            ImportanceScorer::with_params(damping(1.5)),
            Err(PolicyError::InvalidDamping(_))
        ));
        assert!(matches!(
            ImportanceScorer::with_params(damping(f64::NAN)),
            Err(PolicyError::InvalidDamping(_))
        ));
        assert!(matches!(
            ImportanceScorer::with_params(ImportanceParams {
                tolerance: -1.0,
                ..ImportanceParams::default()
            }),
            Err(PolicyError::InvalidTolerance(_))
        ));
        assert!(matches!(
            ImportanceScorer::with_params(ImportanceParams {
                max_iterations: 0,
                ..ImportanceParams::default()
            }),
            Err(PolicyError::ZeroIterations)
        ));
    }

    #[test]
    fn test_from_policy_rejects_unvalidated_policy() {
        let mut policy = KernelPolicyV1::default();
        policy.importance.damping = 0.0;
        assert!(ImportanceScorer::from_policy(&policy).is_err());
        assert!(ImportanceScorer::from_policy(&KernelPolicyV1::default()).is_ok());
    }
}
