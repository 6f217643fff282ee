//! Cleaning a noisy gauge with spikes and a level shift
//!
//! Run with `RUST_LOG=anomaly_denoise=debug` to see per-pass counts.

use anomaly_core::Sample;
use anomaly_denoise::DenoiserBuilder;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Timeline Cleaning Example ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.5)?;

    // 200 samples, one every 15 seconds, level shift at sample 120
    let mut samples: Vec<Sample> = (0..200)
        .map(|i| {
            let level = if i < 120 { 100.0 } else { 140.0 };
            Sample::new(1_700_000_000 + i * 15, level + noise.sample(&mut rng))
        })
        .collect();

    for &(i, spike) in &[(30usize, 400.0), (75, 20.0), (160, 600.0)] {
        samples[i].value = spike;
    }
    // collectors occasionally report the same timestamp twice
    samples.push(Sample::new(samples[50].time, samples[50].value + 1.0));

    let denoiser = DenoiserBuilder::new().build()?;
    let report = denoiser.process_with_report(&samples)?;

    println!("Input records:      {}", samples.len());
    println!("Distinct timestamps: {}", report.original.len());
    println!("Extreme outliers:   {:?}", report.extreme_outliers);
    println!("Local outliers:     {:?}", report.local_outliers);
    println!(
        "Transition points:  {}",
        report.transition_mask.iter().filter(|&&m| m).count()
    );

    println!("\nReplaced observations:");
    for time in report.replaced_times() {
        let before = report.original.get(time).unwrap_or(f64::NAN);
        let after = report.cleaned.get(time).unwrap_or(f64::NAN);
        println!("  t={time}: {before:.2} -> {after:.2}");
    }

    Ok(())
}
