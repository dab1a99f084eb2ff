mod accumulator;
mod error;
mod macros;
pub mod measure;
mod options;
mod pipe;
mod reading;
mod rms;
mod stage;

pub use crate::accumulator::{Accumulator, AccumulatorStore, Summary};
pub use crate::error::{ConfigurationError, InvalidSampleError, SampleDefect};
pub use crate::options::{ASSET_PLACEHOLDER, RmsOptions};
pub use crate::pipe::*;
pub use crate::reading::{Datapoint, DatapointValue, Reading};
pub use crate::rms::{CREST_SUFFIX, IngestOutput, PEAK_SUFFIX, RmsStage};
pub use crate::stage::{OutputCollector, Pipeline, Stage, StageExt};
