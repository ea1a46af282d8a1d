//! MinHash signatures over shingle sets.
//!
//! Every shingle is hashed once with seeded XXH3 and reduced into the field
//! `[0, P)`. Each permutation `i` then maps that base hash through
//! `((a[i] * x + b[i]) mod P) & 0xFFFF_FFFF` and the signature keeps the
//! minimum per permutation. The product `a[i] * x` needs up to 122 bits, so
//! it is evaluated in `u128`.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::permutations::{PermutationCoefficients, MERSENNE_PRIME};

const LOW_32_MASK: u64 = 0xFFFF_FFFF;

/// Fixed-length MinHash signature, one 32-bit slot per permutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MinHashSignature {
    values: Vec<u32>,
}

impl MinHashSignature {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// All slots set to `u32::MAX`, the identity of `min`.
    ///
    /// Empty texts have no defined signature; callers that want a placeholder
    /// for them must ask for this one explicitly.
    pub fn sentinel(num_perm: usize) -> Self {
        Self {
            values: vec![u32::MAX; num_perm],
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Estimate Jaccard similarity as the fraction of agreeing slots.
    ///
    /// Signatures of different lengths come from different configs and are
    /// not comparable; they score 0.0, as do two empty signatures.
    pub fn jaccard(&self, other: &MinHashSignature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        let matches = self
            .values
            .iter()
            .zip(&other.values)
            .filter(|(a, b)| a == b)
            .count();
        matches as f64 / self.values.len() as f64
    }
}

/// Seeded 64-bit hash of a shingle, reduced into the prime field.
#[inline]
pub fn base_hash(shingle: &str, seed: u64) -> u64 {
    xxh3_64_with_seed(shingle.as_bytes(), seed) % MERSENNE_PRIME
}

/// Apply one universal permutation and keep the low 32 bits.
#[inline]
pub fn permute(x: u64, a: u64, b: u64) -> u32 {
    let permuted = (u128::from(a) * u128::from(x) + u128::from(b)) % u128::from(MERSENNE_PRIME);
    (permuted as u64 & LOW_32_MASK) as u32
}

/// Compute the MinHash signature of a shingle set.
///
/// Duplicate shingles do not change the result. Returns `None` when the set is
/// empty, since the minimum over no shingles is undefined.
pub fn compute_signature<I, S>(
    shingles: I,
    coeffs: &PermutationCoefficients,
    seed: u64,
) -> Option<MinHashSignature>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mins = vec![u32::MAX; coeffs.len()];
    let mut seen_any = false;

    for shingle in shingles {
        seen_any = true;
        let x = base_hash(shingle.as_ref(), seed);
        for (slot, (a, b)) in mins.iter_mut().zip(coeffs.pairs()) {
            let h = permute(x, a, b);
            if h < *slot {
                *slot = h;
            }
        }
    }

    seen_any.then(|| MinHashSignature::new(mins))
}
