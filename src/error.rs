use thiserror::Error;

/// Rejected stage configuration. The stage keeps running with its previous options.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("sample size must be greater than zero")]
    ZeroSampleSize,
    #[error("asset filter `{pattern}` is not a valid regular expression")]
    InvalidAssetFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("output asset template must not be empty")]
    EmptyOutputAsset,
}

/// What is wrong with a rejected reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SampleDefect {
    #[error("missing asset name")]
    MissingAsset,
    #[error("missing datapoint name")]
    MissingDatapointName,
}

/// A reading that was skipped because it lacks an identifier.
///
/// `position` is the index within the ingested batch, or the running reading
/// count when the stage is driven through `Stage::process`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid reading #{position} (asset `{asset}`, ts {timestamp}): {defect}")]
pub struct InvalidSampleError {
    pub position: usize,
    pub asset: String,
    pub timestamp: u64,
    pub defect: SampleDefect,
}
