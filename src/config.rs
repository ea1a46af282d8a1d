//! Configuration and error types for set signatures.
//!
//! [`SignatureConfig`] is the whole public configuration surface. It carries no
//! I/O of its own apart from the optional YAML loaders, so the signature
//! pipeline stays a pure function of `(text, config)`.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: 1
//! num_perm: 128
//! seed: 42
//! shingle_size: 3
//! threshold: 0.7
//! use_parallel: false
//! ```
//!
//! Missing fields fall back to [`SignatureConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for MinHash signatures and LSH banding.
///
/// Two [`crate::SetSignatures`] built from equal configs produce bit-identical
/// signatures and keys for the same text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignatureConfig {
    /// Configuration schema version.
    ///
    /// Any algorithmic change that can affect signatures must bump this
    /// version so stored keys remain comparable.
    pub version: u32,
    /// Number of MinHash permutations, i.e. the signature length.
    pub num_perm: usize,
    /// Seed for the permutation coefficients and both hash stages.
    pub seed: u64,
    /// Number of characters per shingle.
    pub shingle_size: usize,
    /// Target Jaccard similarity the band layout is tuned for, in `(0, 1)`.
    pub threshold: f64,
    /// Spread batch calls across the rayon pool.
    pub use_parallel: bool,
}

impl SignatureConfig {
    /// Create a new configuration with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of permutations. Typical values: 64-256.
    /// More permutations = lower estimator variance, larger signatures.
    pub fn with_num_perm(mut self, num_perm: usize) -> Self {
        self.num_perm = num_perm;
        self
    }

    /// Set the seed for reproducible coefficients and hashes.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the shingle size in characters. Typical values: 3-9.
    /// Smaller shingles tolerate more edits, larger ones are more selective.
    pub fn with_shingle_size(mut self, shingle_size: usize) -> Self {
        self.shingle_size = shingle_size;
        self
    }

    /// Set the similarity threshold the band layout is tuned for.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SignatureError> {
        if self.version < 1 {
            return Err(SignatureError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.num_perm < 1 {
            return Err(SignatureError::InvalidConfigNumPerm {
                num_perm: self.num_perm,
            });
        }
        if self.shingle_size < 1 {
            return Err(SignatureError::InvalidConfigShingleSize {
                shingle_size: self.shingle_size,
            });
        }
        // Written as a negated range check so NaN is rejected too.
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(SignatureError::InvalidConfigThreshold {
                threshold: self.threshold,
            });
        }
        Ok(())
    }

    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SignatureConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            version: 1,
            num_perm: 128,
            seed: 42,
            shingle_size: 3,
            threshold: 0.7,
            use_parallel: false,
        }
    }
}

/// Errors returned by signature construction and computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignatureError {
    #[error("invalid config: num_perm must be >= 1 (got {num_perm})")]
    InvalidConfigNumPerm { num_perm: usize },

    #[error("invalid config: shingle_size must be >= 1 (got {shingle_size})")]
    InvalidConfigShingleSize { shingle_size: usize },

    #[error("invalid config: threshold must lie in (0, 1) (got {threshold})")]
    InvalidConfigThreshold { threshold: f64 },

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("text of {len} chars is shorter than shingle_size={shingle_size}")]
    EmptyInput { len: usize, shingle_size: usize },

    #[error("hash computation failed: {0}")]
    HashComputation(String),

    #[error("signature length {got} does not match num_perm={expected}")]
    SignatureLength { expected: usize, got: usize },

    #[error("invalid band layout: {num_bands} bands x {rows_per_band} rows")]
    InvalidLayout {
        num_bands: usize,
        rows_per_band: usize,
    },
}

impl SignatureError {
    /// True for errors raised while validating a [`SignatureConfig`].
    pub fn is_invalid_config(&self) -> bool {
        matches!(
            self,
            SignatureError::InvalidConfigNumPerm { .. }
                | SignatureError::InvalidConfigShingleSize { .. }
                | SignatureError::InvalidConfigThreshold { .. }
                | SignatureError::InvalidConfigVersion { .. }
        )
    }
}

/// Errors that can occur when loading a YAML configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Invalid(#[from] SignatureError),
}
