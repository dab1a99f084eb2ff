mod models;

use crate::models::Vibration;
use clap::Parser;
use rms_stage::{
    DatapointValue, Reading, RmsOptions, RmsStage, Stage, inspect, latency, pipe, progress,
};
use spdlog::prelude::*;
use std::time::Instant;

#[derive(Parser)]
struct Args {
    /// Number of simulated motors.
    #[arg(long, default_value_t = 4)]
    assets: usize,
    /// Readings generated per motor.
    #[arg(long, default_value_t = 100_000)]
    readings: u64,
    /// Samples per RMS window.
    #[arg(long, default_value_t = 1_000)]
    sample_size: u32,
    /// Include peak-to-peak and crest factor.
    #[arg(long)]
    peak: bool,
    /// Forward raw readings alongside the summaries.
    #[arg(long)]
    raw: bool,
    /// Only aggregate assets matching this regular expression.
    #[arg(long = "match", default_value = ".*")]
    asset_filter: String,
    /// Name of the summary asset, `%a` expands to the source asset.
    #[arg(long, default_value = "%a RMS")]
    output_asset: String,
    /// Emit a 4x spike every N readings (0 disables spikes).
    #[arg(long, default_value_t = 250)]
    spike_every: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let stage = RmsStage::new(RmsOptions {
        sample_size: args.sample_size,
        send_raw_data: args.raw,
        send_peak: args.peak,
        asset_filter: args.asset_filter,
        output_asset: args.output_asset,
        enabled: true,
    })?;

    let sources: Vec<Vibration> = (0..args.assets)
        .map(|i| Vibration::new(i, args.spike_every))
        .collect();
    let total = args.readings as usize * sources.len();
    info!("[System] Streaming {} readings from {} motors...", total, sources.len());

    let mut summaries = 0usize;
    let mut p = pipe![
        progress::<Reading>("Ingest", (total / 10).max(1)),
        latency("RMS", (total / 10).max(1), 100, stage),
        inspect(|r: &Reading| {
            // raw readings carry the text state, summaries only carry numbers
            if r.datapoint("state").is_none()
                && let Some(DatapointValue::Float(rms)) = r.datapoint("acceleration")
            {
                summaries += 1;
                debug!("[Summary] {} @ {}us: rms={:.4}", r.asset, r.timestamp, rms);
            }
        })
    ];

    let start = Instant::now();
    let mut forwarded = 0usize;
    for n in 0..args.readings {
        for source in &sources {
            p.process(source.reading(n), &mut |_r: Reading| forwarded += 1);
        }
    }
    let elapsed = start.elapsed();
    drop(p);

    info!(
        "[System] Done in {}ms: {} readings out, {} acceleration summaries",
        elapsed.as_millis(),
        forwarded,
        summaries
    );
    Ok(())
}
