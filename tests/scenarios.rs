use std::collections::HashSet;

use signatures::{pick_layout, shingles, BandLayout, SetSignatures, SignatureError};

#[test]
fn scenario_a_shingles_and_short_text() {
    let sigs = SetSignatures::new(16, 42, 3, 0.7).expect("signer");

    let expected: HashSet<&str> = ["abc", "bcd", "cde"].into_iter().collect();
    assert_eq!(shingles("abcde", 3), expected);
    assert_eq!(sigs.shingles("abcde"), expected);

    assert!(shingles("ab", 3).is_empty());
    assert!(matches!(
        sigs.signature_keys("ab"),
        Err(SignatureError::EmptyInput { .. })
    ));
}

#[test]
fn scenario_b_layout_is_closest_divisor_pair() {
    let sigs = SetSignatures::new(128, 42, 3, 0.7).expect("signer");
    let chosen = *sigs.layout();

    let mut best_distance = f64::INFINITY;
    for bands in (1..=128).filter(|b| 128 % b == 0) {
        let rows = 128 / bands;
        let s = (1.0 / bands as f64).powf(1.0 / rows as f64);
        best_distance = best_distance.min((s - 0.7).abs());
    }

    assert_eq!(chosen.num_bands * chosen.rows_per_band, 128);
    assert!(((chosen.effective_threshold - 0.7).abs() - best_distance).abs() < 1e-12);
    assert_eq!((chosen.num_bands, chosen.rows_per_band), (16, 8));

    // b=32, r=4 sits near 0.42 and loses to 16x8.
    let b32 = BandLayout::new(32, 4);
    assert!((b32.effective_threshold - 0.4204).abs() < 1e-3);
    assert!((b32.effective_threshold - 0.7).abs() > (chosen.effective_threshold - 0.7).abs());
}

#[test]
fn scenario_c_trailing_punctuation_shares_a_key() {
    for threshold in [0.3, 0.5, 0.7, 0.75] {
        let sigs = SetSignatures::new(128, 42, 3, threshold).expect("signer");
        let a: HashSet<_> = sigs
            .signature_keys("hello world")
            .expect("keys a")
            .into_iter()
            .collect();
        let b = sigs.signature_keys("hello world!").expect("keys b");
        assert!(
            b.iter().any(|k| a.contains(k)),
            "no shared key at threshold {threshold}"
        );
    }
}

fn shares_a_key(sigs: &SetSignatures, a: &str, b: &str) -> bool {
    let a: HashSet<_> = sigs.signature_keys(a).expect("keys a").into_iter().collect();
    sigs.signature_keys(b)
        .expect("keys b")
        .iter()
        .any(|k| a.contains(k))
}

#[test]
fn scenario_c_at_0_8_tracks_the_s_curve() {
    // At 0.8 the layout is 8x16, so sharing a key is likely but not certain
    // for J = 9/10. The share rate over many seeds must follow the S-curve.
    let layout = pick_layout(128, 0.8).expect("layout");
    assert_eq!((layout.num_bands, layout.rows_per_band), (8, 16));

    let jaccard = {
        let a = shingles("hello world", 3);
        let b = shingles("hello world!", 3);
        a.intersection(&b).count() as f64 / a.union(&b).count() as f64
    };
    assert!((jaccard - 0.9).abs() < 1e-12);

    let seeds = 500u64;
    let hits = (0..seeds)
        .filter(|&seed| {
            let sigs = SetSignatures::new(128, seed, 3, 0.8).expect("signer");
            assert_eq!(sigs.layout(), &layout);
            shares_a_key(&sigs, "hello world", "hello world!")
        })
        .count();
    let rate = hits as f64 / seeds as f64;
    let expected = layout.collision_probability(jaccard);
    assert!(
        (rate - expected).abs() < 0.08,
        "share rate {rate} vs S-curve {expected}"
    );
}

#[test]
fn band_layout_invariant_holds_for_all_valid_configs() {
    for num_perm in 1..=256 {
        for threshold in [0.01, 0.25, 0.5, 0.75, 0.99] {
            let layout = pick_layout(num_perm, threshold).expect("layout");
            assert_eq!(layout.num_bands * layout.rows_per_band, num_perm);
        }
    }
}

#[test]
fn keys_per_text_equal_band_count() {
    let sigs = SetSignatures::new(96, 5, 4, 0.6).expect("signer");
    let keys = sigs.signature_keys("a reasonably long sentence").expect("keys");
    assert_eq!(keys.len(), sigs.layout().num_bands);
    let bands: Vec<usize> = keys.iter().map(|k| k.band()).collect();
    assert_eq!(bands, (0..sigs.layout().num_bands).collect::<Vec<_>>());
}

#[test]
fn batch_is_index_aligned() {
    let sigs = SetSignatures::new(64, 42, 3, 0.7).expect("signer");
    let texts = vec!["first document", "second document", "third one"];
    let batch = sigs.batch_signature_keys(&texts).expect("batch");
    assert_eq!(batch.len(), 3);
    for (text, keys) in texts.iter().zip(batch) {
        assert_eq!(sigs.signature_keys(text).unwrap(), keys);
    }
}
