//! LSH band keys.
//!
//! The signature is cut into contiguous bands in slot order. Each band's
//! slots are widened to little-endian `u64`s, concatenated and hashed with
//! seeded XXH3 into a 64-bit bucket id. The band index sits in the high 64
//! bits of the key so equal bucket ids from different bands never collide.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::bands::BandLayout;
use crate::config::SignatureError;
use crate::minhash::MinHashSignature;

/// Bucket key for one band: `(band_index << 64) | bucket_id`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LshKey(u128);

impl LshKey {
    pub fn new(band: usize, bucket: u64) -> Self {
        Self(((band as u128) << 64) | u128::from(bucket))
    }

    /// Index of the band this key was derived from.
    pub fn band(&self) -> usize {
        (self.0 >> 64) as usize
    }

    /// 64-bit hash of the band's slots.
    pub fn bucket(&self) -> u64 {
        self.0 as u64
    }

    pub fn as_u128(&self) -> u128 {
        self.0
    }
}

impl From<LshKey> for u128 {
    fn from(key: LshKey) -> Self {
        key.0
    }
}

impl fmt::Display for LshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:016x}", self.band(), self.bucket())
    }
}

/// Hash one band's slots into a bucket id.
#[inline]
pub fn band_bucket(rows: &[u32], seed: u64) -> u64 {
    let mut bytes = Vec::with_capacity(rows.len() * 8);
    for &row in rows {
        bytes.extend_from_slice(&u64::from(row).to_le_bytes());
    }
    xxh3_64_with_seed(&bytes, seed)
}

/// Derive one key per band, in band order.
///
/// Fails with [`SignatureError::InvalidLayout`] when either layout dimension
/// is zero, and with [`SignatureError::SignatureLength`] when the signature
/// does not cover exactly `num_bands * rows_per_band` slots.
pub fn compute_keys(
    signature: &MinHashSignature,
    layout: &BandLayout,
    seed: u64,
) -> Result<Vec<LshKey>, SignatureError> {
    if layout.num_bands == 0 || layout.rows_per_band == 0 {
        return Err(SignatureError::InvalidLayout {
            num_bands: layout.num_bands,
            rows_per_band: layout.rows_per_band,
        });
    }
    let expected = layout
        .num_bands
        .checked_mul(layout.rows_per_band)
        .ok_or(SignatureError::InvalidLayout {
            num_bands: layout.num_bands,
            rows_per_band: layout.rows_per_band,
        })?;
    if signature.len() != expected {
        return Err(SignatureError::SignatureLength {
            expected,
            got: signature.len(),
        });
    }

    Ok(signature
        .values()
        .chunks_exact(layout.rows_per_band)
        .enumerate()
        .map(|(band, rows)| LshKey::new(band, band_bucket(rows, seed)))
        .collect())
}
