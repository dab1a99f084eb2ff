use rms_stage::{Datapoint, Reading};
use std::f64::consts::TAU;

/// A synthetic vibration source: a sine wave with an occasional spike.
pub struct Vibration {
    pub asset: String,
    pub amplitude: f64,
    pub frequency_hz: f64,
    pub spike_every: u64,
}

impl Vibration {
    pub fn new(index: usize, spike_every: u64) -> Self {
        Self {
            asset: format!("motor-{index}"),
            amplitude: 1.0 + index as f64 * 0.5,
            frequency_hz: 50.0,
            spike_every,
        }
    }

    /// Reading at tick `n`, sampled at 1kHz. Timestamps are in microseconds.
    pub fn reading(&self, n: u64) -> Reading {
        let t = n as f64 / 1_000.0;
        let mut value = self.amplitude * (TAU * self.frequency_hz * t).sin();
        if self.spike_every > 0 && n % self.spike_every == 0 {
            value *= 4.0;
        }
        Reading::new(
            self.asset.as_str(),
            n * 1_000,
            vec![
                Datapoint::new("acceleration", value),
                Datapoint::new("temperature", 40 + (n % 3) as i64),
                Datapoint::new("state", "running"),
            ],
        )
    }
}
