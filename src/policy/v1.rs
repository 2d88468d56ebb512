//! KernelPolicy v1: query configuration with a deterministic params hash.
//!
//! ## Float Normalization for Deterministic Hashing
//!
//! Floats are quantized to integers before hashing to avoid cross-platform
//! serialization differences. The quantization factor is 1e6 for the
//! damping factor and 1e12 for the convergence tolerance (which is itself
//! around 1e-6).

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::relation::DEFAULT_MAX_RELATION_LENGTH;
use crate::DEFAULT_POLICY_VERSION;

/// Quantization factor for the damping factor.
const DAMPING_QUANTIZATION_FACTOR: f64 = 1_000_000.0;

/// Quantization factor for the convergence tolerance.
const TOLERANCE_QUANTIZATION_FACTOR: f64 = 1_000_000_000_000.0;

/// Error type for invalid policies.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Damping factor outside the open interval (0, 1).
    #[error("damping factor must lie in (0, 1), got {0}")]
    InvalidDamping(f64),
    /// Tolerance is not a positive finite number.
    #[error("convergence tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    /// Iteration cap of zero.
    #[error("iteration cap must be at least 1")]
    ZeroIterations,
    /// Policy JSON could not be parsed.
    #[error("invalid policy JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parameters of the damped random walk used for importance scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceParams {
    /// Probability of following an edge instead of teleporting.
    pub damping: f64,
    /// Stop when the L1 change between iterations drops below this.
    pub tolerance: f64,
    /// Hard cap on iterations.
    pub max_iterations: usize,
}

impl Default for ImportanceParams {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-6,
            max_iterations: 100,
        }
    }
}

impl ImportanceParams {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(PolicyError::InvalidDamping(self.damping));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PolicyError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(PolicyError::ZeroIterations);
        }
        Ok(())
    }
}

/// Quantized policy parameters for deterministic hashing.
#[derive(Debug, Clone, Serialize)]
struct QuantizedPolicyParams {
    version: String,
    max_relation_length: u32,
    damping: i64,
    tolerance: i64,
    max_iterations: usize,
}

/// Kernel policy version 1.
///
/// ## Parameters
///
/// - `max_relation_length`: advisory hop cap copied onto relation graphs
/// - `importance`: damped random-walk parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelPolicyV1 {
    /// Policy version identifier.
    pub version: String,
    /// Advisory cap on relation path length (hops).
    pub max_relation_length: u32,
    /// Importance scoring parameters.
    pub importance: ImportanceParams,
}

impl KernelPolicyV1 {
    /// Create a policy with custom parameters.
    pub fn new(max_relation_length: u32, importance: ImportanceParams) -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            max_relation_length,
            importance,
        }
    }

    /// Parse and validate a policy from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), PolicyError> {
        self.importance.validate()
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the policy parameters.
    ///
    /// Uses quantized float representation so the same policy hashes the
    /// same everywhere.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&self.to_quantized())
    }

    fn to_quantized(&self) -> QuantizedPolicyParams {
        QuantizedPolicyParams {
            version: self.version.clone(),
            max_relation_length: self.max_relation_length,
            damping: (self.importance.damping * DAMPING_QUANTIZATION_FACTOR).round() as i64,
            tolerance: (self.importance.tolerance * TOLERANCE_QUANTIZATION_FACTOR).round() as i64,
            max_iterations: self.importance.max_iterations,
        }
    }
}

impl Default for KernelPolicyV1 {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            max_relation_length: DEFAULT_MAX_RELATION_LENGTH,
            importance: ImportanceParams::default(),
        }
    }
}
