//! Batch key derivation.
//!
//! Texts are independent, so a batch can be spread over the rayon pool. The
//! output is always index-aligned with the input, and a batch either succeeds
//! for every text or reports the failure at the lowest index.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn, Level};

use crate::config::SignatureError;
use crate::lsh::LshKey;

/// Run `keys_for` over every text, sequentially or across the rayon pool.
pub(crate) fn batch_keys<S, F>(
    texts: &[S],
    use_parallel: bool,
    keys_for: F,
) -> Result<Vec<Vec<LshKey>>, SignatureError>
where
    S: AsRef<str> + Sync,
    F: Fn(&str) -> Result<Vec<LshKey>, SignatureError> + Sync,
{
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "signatures.batch",
        texts = texts.len(),
        parallel = use_parallel
    );
    let _guard = span.enter();

    // Results are gathered per index before any error is surfaced so the
    // reported failure does not depend on worker scheduling.
    let results: Vec<Result<Vec<LshKey>, SignatureError>> = if use_parallel {
        texts.par_iter().map(|t| keys_for(t.as_ref())).collect()
    } else {
        texts.iter().map(|t| keys_for(t.as_ref())).collect()
    };

    let mut out = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(keys) => out.push(keys),
            Err(err) => {
                warn!(index, error = %err, "batch_failure");
                return Err(err);
            }
        }
    }

    info!(
        texts = out.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "batch_complete"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_keys(text: &str) -> Result<Vec<LshKey>, SignatureError> {
        if text.len() < 2 {
            return Err(SignatureError::EmptyInput {
                len: text.len(),
                shingle_size: 2,
            });
        }
        Ok(vec![LshKey::new(0, text.len() as u64)])
    }

    #[test]
    fn batch_preserves_input_order() {
        let texts: Vec<String> = (2..50).map(|n| "x".repeat(n)).collect();
        for parallel in [false, true] {
            let out = batch_keys(&texts, parallel, fake_keys).unwrap();
            assert_eq!(out.len(), texts.len());
            for (text, keys) in texts.iter().zip(&out) {
                assert_eq!(keys[0].bucket(), text.len() as u64);
            }
        }
    }

    #[test]
    fn batch_empty_input() {
        let texts: Vec<&str> = Vec::new();
        assert!(batch_keys(&texts, false, fake_keys).unwrap().is_empty());
        assert!(batch_keys(&texts, true, fake_keys).unwrap().is_empty());
    }

    #[test]
    fn batch_reports_lowest_failing_index() {
        let texts = ["long enough", "a", "also fine", ""];
        for parallel in [false, true] {
            let err = batch_keys(&texts, parallel, fake_keys).unwrap_err();
            assert_eq!(
                err,
                SignatureError::EmptyInput {
                    len: 1,
                    shingle_size: 2
                }
            );
        }
    }
}
