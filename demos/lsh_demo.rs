use std::collections::HashMap;
use std::error::Error;

use signatures::{LshKey, SetSignatures, SignatureConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => SignatureConfig::from_file(path)?,
        None => SignatureConfig::default().with_parallel(true),
    };
    let sigs = SetSignatures::from_config(cfg)?;
    let layout = sigs.layout();
    println!(
        "layout: {} bands x {} rows (effective threshold {:.3})",
        layout.num_bands, layout.rows_per_band, layout.effective_threshold
    );

    let docs = [
        "123 Main Street, Springfield",
        "123 Main Street, Springfield.",
        "123 Main St, Springfield",
        "742 Evergreen Terrace, Springfield",
        "Completely unrelated sentence about sketches",
    ];
    let keys = sigs.batch_signature_keys(&docs)?;

    // A throwaway in-memory bucket map to show which docs collide.
    let mut buckets: HashMap<LshKey, Vec<usize>> = HashMap::new();
    for (doc, doc_keys) in keys.iter().enumerate() {
        for key in doc_keys {
            buckets.entry(*key).or_default().push(doc);
        }
    }

    for (i, doc) in docs.iter().enumerate() {
        let candidates: Vec<usize> = {
            let mut c: Vec<usize> = keys[i]
                .iter()
                .flat_map(|k| buckets[k].iter().copied())
                .filter(|&j| j != i)
                .collect();
            c.sort_unstable();
            c.dedup();
            c
        };
        println!("[{i}] {doc:?} -> candidates {candidates:?}");
        for j in candidates {
            let estimate = sigs.signature(doc)?.jaccard(&sigs.signature(docs[j])?);
            println!("      vs [{j}] estimated jaccard {estimate:.2}");
        }
    }

    Ok(())
}
