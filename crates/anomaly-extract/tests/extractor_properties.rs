//! Extraction behaviour on wire-format batches and generated inputs

use anomaly_core::{RawBatch, Sample};
use anomaly_denoise::Denoiser;
use anomaly_extract::{AnomalyExtractor, ExtractorParameters};
use proptest::prelude::*;

fn batch(json: &str) -> RawBatch {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_spike_reported_against_cleaned() {
    let extractor = AnomalyExtractor::with_epsilon(5.0).unwrap();
    let batches = [
        batch(r#"[{"time": 0, "value": 10}, {"time": 1, "value": 100}]"#),
        batch(r#"[{"time": 0, "value": 10}, {"time": 1, "value": 10}]"#),
    ];
    assert_eq!(
        extractor.process(&batches).unwrap(),
        vec![Sample::new(1, 100.0)]
    );
}

#[test]
fn test_wrapped_batches_are_unwrapped() {
    let extractor = AnomalyExtractor::with_epsilon(5.0).unwrap();
    let batches = [
        batch(r#"[[{"time": 0, "value": 10}, {"time": 1, "value": 100}]]"#),
        batch(r#"[[{"time": 0, "value": 10}, {"time": 1, "value": 10}]]"#),
    ];
    assert_eq!(
        extractor.process(&batches).unwrap(),
        vec![Sample::new(1, 100.0)]
    );
}

#[test]
fn test_identical_inputs_have_no_anomalies() {
    let extractor = AnomalyExtractor::default();
    let series = batch(r#"[{"time": 0, "value": 1.5}, {"time": 7, "value": -3.0}]"#);
    assert!(extractor
        .process(&[series.clone(), series])
        .unwrap()
        .is_empty());
}

#[test]
fn test_denoised_spike_is_extracted() {
    let original: Vec<Sample> = [10.0, 10.0, 100.0, 10.0, 10.0]
        .iter()
        .enumerate()
        .map(|(t, &v)| Sample::new(t as i64, v))
        .collect();
    let cleaned = Denoiser::with_defaults()
        .unwrap()
        .process_samples(&original)
        .unwrap();

    let anomalies = AnomalyExtractor::default().process_pair(&original, &cleaned);
    assert_eq!(anomalies, vec![Sample::new(2, 100.0)]);
}

#[test]
fn test_self_comparison_with_zero_epsilon() {
    // duplicates are averaged the same way on both sides
    let records = vec![
        Sample::new(3, 0.1),
        Sample::new(1, 7.25),
        Sample::new(3, 0.2),
        Sample::new(3, 0.7),
        Sample::new(2, -1.0),
    ];
    let extractor = AnomalyExtractor::with_epsilon(0.0).unwrap();
    assert!(extractor.process_pair(&records, &records).is_empty());
}

fn arb_records() -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec((0i64..100, -1e3f64..1e3), 0..80)
        .prop_map(|pairs| pairs.into_iter().map(Sample::from).collect())
}

proptest! {
    // Property: every anomaly is an original record at a shared timestamp
    #[test]
    fn prop_anomalies_within_intersection(
        original in arb_records(),
        cleaned in arb_records(),
        epsilon in 0.0f64..50.0,
    ) {
        let extractor = AnomalyExtractor::new(ExtractorParameters { epsilon }).unwrap();
        let anomalies = extractor.process_pair(&original, &cleaned);

        prop_assert!(anomalies.windows(2).all(|w| w[0].time < w[1].time));
        for anomaly in &anomalies {
            prop_assert!(original.iter().any(|s| s.time == anomaly.time));
            prop_assert!(cleaned.iter().any(|s| s.time == anomaly.time));
        }
    }

    // Property: a series never deviates from itself
    #[test]
    fn prop_self_comparison_is_empty(records in arb_records(), epsilon in 0.0f64..50.0) {
        let extractor = AnomalyExtractor::with_epsilon(epsilon).unwrap();
        prop_assert!(extractor.process_pair(&records, &records).is_empty());
    }

    // Property: raising epsilon never adds anomalies
    #[test]
    fn prop_monotone_in_epsilon(
        original in arb_records(),
        cleaned in arb_records(),
        low in 0.0f64..10.0,
        extra in 0.0f64..10.0,
    ) {
        let loose = AnomalyExtractor::with_epsilon(low).unwrap();
        let strict = AnomalyExtractor::with_epsilon(low + extra).unwrap();
        let a = loose.process_pair(&original, &cleaned);
        let b = strict.process_pair(&original, &cleaned);
        prop_assert!(b.len() <= a.len());
        for s in &b {
            prop_assert!(a.contains(s));
        }
    }
}
