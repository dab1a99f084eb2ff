use crate::measure::LatencyMeasurer;
use crate::stage::{OutputCollector, Stage};
use spdlog::info;
use std::marker::PhantomData;

/// A pipe that measures the latency of an inner stage.
pub struct Latency<In, Out, S> {
    name: String,
    report_interval: usize,
    stage: S,
    measurer: LatencyMeasurer,
    count: usize,
    _phantom: PhantomData<(In, Out)>,
}

impl<In, Out, S> Latency<In, Out, S>
where
    S: Stage<In, Out>,
{
    pub fn new(name: impl Into<String>, report_interval: usize, sample_rate: u64, stage: S) -> Self {
        assert!(report_interval > 0, "report_interval must be greater than 0");
        Latency {
            name: name.into(),
            report_interval,
            stage,
            measurer: LatencyMeasurer::new(sample_rate),
            count: 0,
            _phantom: PhantomData,
        }
    }

    pub fn measurer(&self) -> &LatencyMeasurer {
        &self.measurer
    }

    /// The wrapped stage.
    pub fn inner(&self) -> &S {
        &self.stage
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.stage
    }
}

impl<In, Out, S> Stage<In, Out> for Latency<In, Out, S>
where
    S: Stage<In, Out>,
{
    #[inline(always)]
    fn process<C>(&mut self, data: In, collector: &mut C)
    where
        C: OutputCollector<Out>,
    {
        {
            let _guard = self.measurer.measure_with_guard();
            self.stage.process(data, collector);
        }
        self.count += 1;
        if self.count.is_multiple_of(self.report_interval) {
            info!("[{}] Latency: {}", self.name, self.measurer.format_stats());
        }
    }
}

pub fn latency<In, Out, S>(
    name: impl Into<String>,
    interval: usize,
    sample_rate: u64,
    stage: S,
) -> Latency<In, Out, S>
where
    S: Stage<In, Out>,
{
    Latency::new(name, interval, sample_rate, stage)
}
