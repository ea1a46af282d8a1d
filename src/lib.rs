//! # Set Signatures
//!
//! MinHash signatures and LSH band keys for near-duplicate text detection.
//! A text is reduced to a fixed-length signature whose slot agreement rate
//! estimates Jaccard similarity, and the signature is banded into a handful
//! of bucket keys so similar texts are very likely to share at least one key.
//!
//! ## Contract
//!
//! - The API is a pure function of `(text, config)`: no I/O, no clocks, no
//!   global process state.
//! - A [`SetSignatures`] is built once per [`SignatureConfig`]. Its
//!   permutation coefficients and band layout are derived at construction and
//!   read-only afterwards, so one instance can be shared across threads.
//! - Building the bucket index that stores and queries keys is left to the
//!   caller.
//!
//! Invariant: for the same text and an equal [`SignatureConfig`], signatures
//! and keys are bit-identical across calls and process restarts.
//!
//! ## Pipeline
//!
//! 1.  **Shingling**: the text is split into its set of `shingle_size`
//!     character substrings.
//! 2.  **MinHashing**: each shingle is hashed with seeded XXH3, reduced mod
//!     `2^61 - 1`, and pushed through `num_perm` universal permutations
//!     `(a*x + b) mod P`; the signature keeps the per-permutation minimum,
//!     masked to 32 bits.
//! 3.  **Banding**: the signature is cut into the `b x r` layout whose
//!     S-curve inflection `(1/b)^(1/r)` is closest to `threshold`, and each
//!     band is hashed into a key tagged with its band index.
//!
//! ## Example Usage
//!
//! ```
//! use signatures::SetSignatures;
//!
//! let sigs = SetSignatures::new(128, 42, 3, 0.7).unwrap();
//! assert_eq!(sigs.layout().num_bands * sigs.layout().rows_per_band, 128);
//!
//! let a = sigs.signature_keys("hello world").unwrap();
//! let b = sigs.signature_keys("hello world!").unwrap();
//! assert_eq!(a.len(), sigs.layout().num_bands);
//! assert!(a.iter().any(|k| b.contains(k)));
//! ```
//!
pub mod bands;
mod batch;
pub mod config;
pub mod lsh;
pub mod minhash;
pub mod permutations;
mod shingles;

use std::collections::HashSet;

use tracing::debug;

pub use crate::bands::{pick_layout, BandLayout};
pub use crate::config::{ConfigLoadError, SignatureConfig, SignatureError};
pub use crate::lsh::{compute_keys, LshKey};
pub use crate::minhash::{compute_signature, MinHashSignature};
pub use crate::permutations::{PermutationCoefficients, MERSENNE_PRIME};
pub use crate::shingles::shingles;

use crate::shingles::char_len;

/// Current signature algorithm version for this crate.
pub const SIGNATURE_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const SIGNATURE_ALGORITHM: &str = "charshingle+xxh3+minhash61+lshband_v1";

/// MinHash signer and LSH key deriver for one configuration.
#[derive(Debug, Clone)]
pub struct SetSignatures {
    config: SignatureConfig,
    coeffs: PermutationCoefficients,
    layout: BandLayout,
}

impl SetSignatures {
    /// Build a signer from positional parameters, with all other settings at
    /// their defaults.
    pub fn new(
        num_perm: usize,
        seed: u64,
        shingle_size: usize,
        threshold: f64,
    ) -> Result<Self, SignatureError> {
        Self::from_config(
            SignatureConfig::new()
                .with_num_perm(num_perm)
                .with_seed(seed)
                .with_shingle_size(shingle_size)
                .with_threshold(threshold),
        )
    }

    /// Validate `config` and derive coefficients and band layout.
    pub fn from_config(config: SignatureConfig) -> Result<Self, SignatureError> {
        config.validate()?;
        // Unreachable after `validate`: every num_perm >= 1 has the (num_perm, 1) pair.
        let layout = pick_layout(config.num_perm, config.threshold).ok_or(
            SignatureError::InvalidConfigNumPerm {
                num_perm: config.num_perm,
            },
        )?;
        let coeffs = PermutationCoefficients::generate(config.seed, config.num_perm);
        debug!(
            num_perm = config.num_perm,
            num_bands = layout.num_bands,
            rows_per_band = layout.rows_per_band,
            target_threshold = config.threshold,
            effective_threshold = layout.effective_threshold,
            "band_layout_selected"
        );
        Ok(Self {
            config,
            coeffs,
            layout,
        })
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    pub fn layout(&self) -> &BandLayout {
        &self.layout
    }

    pub fn coefficients(&self) -> &PermutationCoefficients {
        &self.coeffs
    }

    /// Shingle `text` with this signer's shingle size.
    pub fn shingles<'a>(&self, text: &'a str) -> HashSet<&'a str> {
        shingles(text, self.config.shingle_size)
    }

    /// MinHash signature of `text`.
    ///
    /// Fails with [`SignatureError::EmptyInput`] when `text` has fewer
    /// characters than `shingle_size`.
    pub fn signature(&self, text: &str) -> Result<MinHashSignature, SignatureError> {
        let set = self.shingles(text);
        compute_signature(set, &self.coeffs, self.config.seed).ok_or_else(|| {
            SignatureError::EmptyInput {
                len: char_len(text),
                shingle_size: self.config.shingle_size,
            }
        })
    }

    /// Like [`Self::signature`], but texts too short to shingle get
    /// [`MinHashSignature::sentinel`] instead of an error.
    pub fn signature_or_sentinel(&self, text: &str) -> MinHashSignature {
        self.signature(text)
            .unwrap_or_else(|_| MinHashSignature::sentinel(self.config.num_perm))
    }

    /// Derive band keys from a precomputed signature.
    pub fn keys_for_signature(
        &self,
        signature: &MinHashSignature,
    ) -> Result<Vec<LshKey>, SignatureError> {
        compute_keys(signature, &self.layout, self.config.seed)
    }

    /// LSH bucket keys for `text`, one per band.
    pub fn signature_keys(&self, text: &str) -> Result<Vec<LshKey>, SignatureError> {
        let signature = self.signature(text)?;
        compute_keys(&signature, &self.layout, self.config.seed)
    }

    /// LSH bucket keys for UTF-8 bytes.
    ///
    /// Fails with [`SignatureError::HashComputation`] on malformed UTF-8.
    pub fn signature_keys_bytes(&self, bytes: &[u8]) -> Result<Vec<LshKey>, SignatureError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| SignatureError::HashComputation(err.to_string()))?;
        self.signature_keys(text)
    }

    /// Keys for every text, index-aligned with `texts`.
    ///
    /// Runs across the rayon pool when `use_parallel` is set. No partial
    /// result is returned: the first failing text (by index) fails the batch.
    pub fn batch_signature_keys<S>(&self, texts: &[S]) -> Result<Vec<Vec<LshKey>>, SignatureError>
    where
        S: AsRef<str> + Sync,
    {
        batch::batch_keys(texts, self.config.use_parallel, |text| {
            self.signature_keys(text)
        })
    }
}
