//! Proximity reinforcement for author pairs.
//!
//! ## Weight Law
//!
//! ```text
//! first co-authorship:  w = 1
//! each further one:     w' = 1 / (1/w + 1)
//! ```
//!
//! After `n` shared papers the weight is `1/n`, so shortest paths over the
//! proximity graph follow the strongest chains of collaboration. The
//! counter itself is never stored; it is recoverable as `round(1/w)`.

/// Weight of a freshly created proximity edge.
pub const INITIAL_PROXIMITY_WEIGHT: f64 = 1.0;

/// Applies the reinforcement rule to proximity weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProximityUpdater;

impl ProximityUpdater {
    /// Create an updater.
    pub fn new() -> Self {
        Self
    }

    /// Weight after observing one more co-authored paper.
    ///
    /// `current` is `None` when the pair has no edge yet.
    pub fn reinforce(&self, current: Option<f64>) -> f64 {
        match current {
            None => INITIAL_PROXIMITY_WEIGHT,
            Some(w) => 1.0 / (1.0 / w + 1.0),
        }
    }

    /// Closed form of the weight after `n` co-authored papers.
    pub fn weight_for(&self, collaborations: u32) -> Option<f64> {
        (collaborations > 0).then(|| 1.0 / f64::from(collaborations))
    }
}
