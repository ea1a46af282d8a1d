//! Character shingling.
//!
//! A shingle is a run of `k` consecutive characters. Shingles are collected
//! into a set, so repeated substrings collapse and order is discarded.

use std::collections::HashSet;

/// Extract the set of `k`-character shingles from `text`.
///
/// Shingles are counted in Unicode scalar values, not bytes, and borrow from
/// `text`. A text with `n >= k` characters yields at most `n - k + 1`
/// distinct shingles. Texts shorter than `k`, and `k == 0`, yield the empty
/// set.
pub fn shingles(text: &str, k: usize) -> HashSet<&str> {
    if k == 0 {
        return HashSet::new();
    }

    // Byte offset of every char boundary, including the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .collect();
    let n = bounds.len() - 1;
    if n < k {
        return HashSet::new();
    }

    let mut out = HashSet::with_capacity(n - k + 1);
    for start in 0..=n - k {
        out.insert(&text[bounds[start]..bounds[start + k]]);
    }
    out
}

/// Number of characters in `text`, the length shingling is measured in.
#[inline]
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
