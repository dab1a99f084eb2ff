use crate::accumulator::{AccumulatorStore, Summary};
use crate::error::{ConfigurationError, InvalidSampleError, SampleDefect};
use crate::options::{AssetMatcher, RmsOptions};
use crate::reading::{Datapoint, DatapointValue, Reading};
use crate::stage::{OutputCollector, Stage};
use spdlog::{debug, info, warn};

/// Suffix of the peak-to-peak datapoint added next to the RMS datapoint.
pub const PEAK_SUFFIX: &str = "peak";
/// Suffix of the crest factor datapoint added next to the RMS datapoint.
pub const CREST_SUFFIX: &str = "crest";

/// Result of one `RmsStage::ingest` call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IngestOutput {
    /// Pass-through, raw and summary readings in emission order.
    pub readings: Vec<Reading>,
    /// Readings that were skipped because they lack an identifier.
    pub rejected: Vec<InvalidSampleError>,
}

/// Computes RMS (and optionally peak-to-peak and crest factor) over fixed-size
/// windows of samples, one window per (asset, datapoint).
///
/// A summary reading is emitted right after the reading that completes a
/// window. Readings whose asset does not match the filter pass through
/// untouched, as does everything while the stage is disabled.
///
/// Every successful `configure` drops all partially filled windows.
#[derive(Debug)]
pub struct RmsStage {
    options: RmsOptions,
    matcher: AssetMatcher,
    store: AccumulatorStore,
    processed: usize,
}

impl RmsStage {
    pub fn new(options: RmsOptions) -> Result<Self, ConfigurationError> {
        let matcher = options.validate()?;
        Ok(Self {
            options,
            matcher,
            store: AccumulatorStore::new(),
            processed: 0,
        })
    }

    /// Applies new options. On error the current options stay in effect and no
    /// state is touched.
    pub fn configure(&mut self, options: RmsOptions) -> Result<(), ConfigurationError> {
        let matcher = match options.validate() {
            Ok(matcher) => matcher,
            Err(err) => {
                warn!("[RMS] Rejected configuration: {}", err);
                return Err(err);
            }
        };

        info!(
            "[RMS] Reconfigured: sample_size={}, raw={}, peak={}, filter='{}', output='{}', enabled={}; dropped {} open windows",
            options.sample_size,
            options.send_raw_data,
            options.send_peak,
            options.asset_filter,
            options.output_asset,
            options.enabled,
            self.store.len()
        );
        self.options = options;
        self.matcher = matcher;
        self.store.clear();
        Ok(())
    }

    pub fn is_enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn options(&self) -> &RmsOptions {
        &self.options
    }

    /// Number of samples folded into the open window of a key.
    pub fn pending_samples(&self, asset: &str, datapoint: &str) -> u64 {
        self.store
            .get(asset, datapoint)
            .map_or(0, |acc| acc.samples)
    }

    /// Runs a batch through the stage and returns the resulting batch.
    pub fn ingest(&mut self, batch: impl IntoIterator<Item = Reading>) -> IngestOutput {
        let mut output = IngestOutput::default();
        for (position, reading) in batch.into_iter().enumerate() {
            let readings = &mut output.readings;
            if let Err(err) =
                self.process_reading(position, reading, &mut |r: Reading| readings.push(r))
            {
                warn!("[RMS] Skipping {}", err);
                output.rejected.push(err);
            }
        }
        output
    }

    fn process_reading<C>(
        &mut self,
        position: usize,
        reading: Reading,
        collector: &mut C,
    ) -> Result<(), InvalidSampleError>
    where
        C: OutputCollector<Reading>,
    {
        if !self.options.enabled {
            collector.push(reading);
            return Ok(());
        }

        if let Some(defect) = defect_of(&reading) {
            return Err(InvalidSampleError {
                position,
                asset: reading.asset,
                timestamp: reading.timestamp,
                defect,
            });
        }

        if !self.matcher.matches(&reading.asset) {
            collector.push(reading);
            return Ok(());
        }

        let sample_size = u64::from(self.options.sample_size);
        // Stays unallocated unless a window completes
        let mut summaries: Vec<Reading> = Vec::new();
        for datapoint in &reading.datapoints {
            let Some(value) = datapoint.value.as_f64() else {
                continue;
            };
            let accumulator = self.store.get_or_create(&reading.asset, &datapoint.name);
            if accumulator.fold(value) == sample_size {
                let summary = accumulator.summarize(sample_size);
                self.store.reset(&reading.asset, &datapoint.name);
                summaries.push(self.summary_reading(
                    &reading.asset,
                    &datapoint.name,
                    &summary,
                    reading.timestamp,
                ));
            }
        }

        if self.options.send_raw_data {
            collector.push(reading);
        }
        for summary in summaries {
            collector.push(summary);
        }
        Ok(())
    }

    fn summary_reading(
        &self,
        source: &str,
        datapoint: &str,
        summary: &Summary,
        timestamp: u64,
    ) -> Reading {
        let asset = self.matcher.output_asset(source);
        debug!(
            "[RMS] {}/{} -> {}: rms={}, p2p={}, crest={}",
            source, datapoint, asset, summary.rms, summary.peak_to_peak, summary.crest
        );

        let mut datapoints = vec![Datapoint::new(
            datapoint,
            DatapointValue::Float(summary.rms),
        )];
        if self.options.send_peak {
            datapoints.push(Datapoint::new(
                format!("{}{}", datapoint, PEAK_SUFFIX),
                DatapointValue::Float(summary.peak_to_peak),
            ));
            datapoints.push(Datapoint::new(
                format!("{}{}", datapoint, CREST_SUFFIX),
                DatapointValue::Float(summary.crest),
            ));
        }
        Reading::new(asset, timestamp, datapoints)
    }
}

fn defect_of(reading: &Reading) -> Option<SampleDefect> {
    if reading.asset.is_empty() {
        Some(SampleDefect::MissingAsset)
    } else if reading.datapoints.iter().any(|dp| dp.name.is_empty()) {
        Some(SampleDefect::MissingDatapointName)
    } else {
        None
    }
}

impl Stage<Reading, Reading> for RmsStage {
    fn process<C>(&mut self, data: Reading, collector: &mut C)
    where
        C: OutputCollector<Reading>,
    {
        let position = self.processed;
        self.processed += 1;
        if let Err(err) = self.process_reading(position, data, collector) {
            warn!("[RMS] Skipping {}", err);
        }
    }
}
