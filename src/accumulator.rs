use bytemuck::{Pod, Zeroable};
use fxhash::FxHashMap;

/// Running state of one window.
///
/// The all-zero value is the empty window, so a reset is a plain overwrite with
/// `Accumulator::zeroed()`. `peak_max`/`peak_min` only hold data while
/// `samples > 0`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Accumulator {
    pub samples: u64,
    pub cumulative: f64,
    pub peak_max: f64,
    pub peak_min: f64,
}

/// Values derived from a completed window.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Summary {
    pub rms: f64,
    pub peak_to_peak: f64,
    pub crest: f64,
}

impl Accumulator {
    /// Folds one value into the window and returns the new sample count.
    #[inline(always)]
    pub fn fold(&mut self, value: f64) -> u64 {
        self.cumulative += value * value;
        if self.samples == 0 {
            self.peak_max = value;
            self.peak_min = value;
        } else {
            if value > self.peak_max {
                self.peak_max = value;
            }
            if value < self.peak_min {
                self.peak_min = value;
            }
        }
        self.samples += 1;
        self.samples
    }

    /// Computes the window summary over `sample_size` values.
    ///
    /// A zero RMS yields a zero crest factor instead of dividing by zero.
    #[inline(always)]
    pub fn summarize(&self, sample_size: u64) -> Summary {
        let rms = (self.cumulative / sample_size as f64).sqrt();
        let crest = if rms == 0.0 { 0.0 } else { self.peak_max / rms };
        Summary {
            rms,
            peak_to_peak: self.peak_max - self.peak_min,
            crest,
        }
    }

    #[inline(always)]
    pub fn reset(&mut self) {
        *self = Self::zeroed();
    }
}

/// Owns one accumulator per (asset, datapoint) key.
///
/// Keys are looked up by `&str`, so only the first sample of a key allocates.
#[derive(Debug, Default)]
pub struct AccumulatorStore {
    assets: FxHashMap<String, FxHashMap<String, Accumulator>>,
    len: usize,
}

impl AccumulatorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the accumulator for (asset, datapoint), creating an empty one on first use.
    pub fn get_or_create(&mut self, asset: &str, datapoint: &str) -> &mut Accumulator {
        let known = self
            .assets
            .get(asset)
            .is_some_and(|datapoints| datapoints.contains_key(datapoint));
        if !known {
            self.assets
                .entry(asset.to_owned())
                .or_default()
                .insert(datapoint.to_owned(), Accumulator::zeroed());
            self.len += 1;
        }
        self.assets
            .get_mut(asset)
            .and_then(|datapoints| datapoints.get_mut(datapoint))
            .expect("accumulator registered above")
    }

    pub fn get(&self, asset: &str, datapoint: &str) -> Option<&Accumulator> {
        self.assets.get(asset)?.get(datapoint)
    }

    /// Clears the window of (asset, datapoint). The key itself stays registered.
    pub fn reset(&mut self, asset: &str, datapoint: &str) {
        if let Some(accumulator) = self
            .assets
            .get_mut(asset)
            .and_then(|datapoints| datapoints.get_mut(datapoint))
        {
            accumulator.reset();
        }
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.assets.clear();
        self.len = 0;
    }

    /// Number of registered (asset, datapoint) keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_tracks_peaks_and_squares() {
        let mut acc = Accumulator::zeroed();

        for v in [1.0, 5.0, -3.0, 2.0] {
            acc.fold(v);
        }

        assert_eq!(acc.samples, 4);
        assert_eq!(acc.cumulative, 39.0);
        assert_eq!((acc.peak_max, acc.peak_min), (5.0, -3.0));
    }

    #[test]
    fn test_first_value_seeds_peaks() {
        let mut acc = Accumulator::zeroed();
        acc.fold(-7.0);
        // A zeroed peak_max must not survive into the window
        assert_eq!((acc.peak_max, acc.peak_min), (-7.0, -7.0));
    }

    #[test]
    fn test_summarize_zero_window() {
        let mut acc = Accumulator::zeroed();
        for _ in 0..3 {
            acc.fold(0.0);
        }
        let summary = acc.summarize(3);
        assert_eq!(summary.rms, 0.0);
        assert_eq!(summary.crest, 0.0);
        assert_eq!(summary.peak_to_peak, 0.0);
    }

    #[test]
    fn test_store_reset_keeps_key() {
        let mut store = AccumulatorStore::new();

        store.get_or_create("pump", "voltage").fold(3.0);
        store.get_or_create("pump", "voltage").fold(4.0);
        store.get_or_create("pump", "current").fold(1.0);
        assert_eq!(store.get("pump", "voltage").map(|a| a.samples), Some(2));
        assert_eq!(store.len(), 2);

        store.reset("pump", "voltage");
        assert_eq!(store.get("pump", "voltage"), Some(&Accumulator::zeroed()));
        assert_eq!(store.get("pump", "current").map(|a| a.samples), Some(1));
        assert_eq!(store.get("fan", "voltage"), None);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }
}
