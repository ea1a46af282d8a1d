//! Universal hash coefficients.
//!
//! Each permutation is a member `h(x) = (a * x + b) mod P` of the universal
//! family over the Mersenne prime `P = 2^61 - 1`. The coefficients are drawn
//! once from a ChaCha8 stream seeded with the config seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// The Mersenne prime `2^61 - 1`.
pub const MERSENNE_PRIME: u64 = (1 << 61) - 1;

/// Per-permutation coefficients `a[i] ∈ [1, P-1]` and `b[i] ∈ [0, P-1]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermutationCoefficients {
    a: Vec<u64>,
    b: Vec<u64>,
}

impl PermutationCoefficients {
    /// Derive `num_perm` coefficient pairs from `seed`.
    ///
    /// All `a` values are drawn before any `b` value, so the first `n` pairs
    /// of a larger draw do not equal a draw of `n`.
    pub fn generate(seed: u64, num_perm: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let a = (0..num_perm)
            .map(|_| rng.random_range(1..MERSENNE_PRIME))
            .collect();
        let b = (0..num_perm)
            .map(|_| rng.random_range(0..MERSENNE_PRIME))
            .collect();
        Self { a, b }
    }

    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// Multipliers.
    pub fn a(&self) -> &[u64] {
        &self.a
    }

    /// Offsets.
    pub fn b(&self) -> &[u64] {
        &self.b
    }

    /// Iterate `(a[i], b[i])` in permutation order.
    pub fn pairs(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.a.iter().copied().zip(self.b.iter().copied())
    }
}
