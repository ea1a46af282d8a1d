//! LSH band layout selection.
//!
//! A signature of length `num_perm` is cut into `b` bands of `r` rows. Two
//! sets with Jaccard similarity `s` share at least one band with probability
//! `1 - (1 - s^r)^b`; the curve is steepest near `(1/b)^(1/r)`, which is the
//! layout's effective threshold. [`pick_layout`] searches the divisor pairs
//! of `num_perm` for the one whose effective threshold is closest to target.

use serde::{Deserialize, Serialize};

/// A banding of the signature with `num_bands * rows_per_band == num_perm`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BandLayout {
    pub num_bands: usize,
    pub rows_per_band: usize,
    /// Similarity at which the S-curve is steepest, `(1/b)^(1/r)`.
    pub effective_threshold: f64,
}

impl BandLayout {
    /// Layout with `num_bands` bands of `rows_per_band` rows.
    pub fn new(num_bands: usize, rows_per_band: usize) -> Self {
        Self {
            num_bands,
            rows_per_band,
            effective_threshold: inflection_point(num_bands, rows_per_band),
        }
    }

    /// Signature length this layout covers.
    pub fn num_perm(&self) -> usize {
        self.num_bands * self.rows_per_band
    }

    /// Probability that two sets with Jaccard similarity `similarity` share at
    /// least one band key under this layout.
    pub fn collision_probability(&self, similarity: f64) -> f64 {
        let band_match = similarity.powf(self.rows_per_band as f64);
        1.0 - (1.0 - band_match).powf(self.num_bands as f64)
    }
}

#[inline]
fn inflection_point(num_bands: usize, rows_per_band: usize) -> f64 {
    (1.0 / num_bands as f64).powf(1.0 / rows_per_band as f64)
}

/// Pick the divisor pair of `num_perm` whose effective threshold is closest to
/// `threshold`.
///
/// Candidates are scanned by ascending `rows_per_band`; on an exact tie in
/// distance the candidate with fewer rows (more bands) wins. A prime
/// `num_perm` still has the two candidates `(num_perm, 1)` and `(1, num_perm)`.
/// `num_perm == 0` has no candidates and yields `None`.
pub fn pick_layout(num_perm: usize, threshold: f64) -> Option<BandLayout> {
    let mut best: Option<(BandLayout, f64)> = None;
    for rows in (1..=num_perm).filter(|r| num_perm % r == 0) {
        let layout = BandLayout::new(num_perm / rows, rows);
        let distance = (layout.effective_threshold - threshold).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((layout, distance)),
        }
    }
    best.map(|(layout, _)| layout)
}
