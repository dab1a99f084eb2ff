use crate::error::ConfigurationError;
use regex::Regex;

/// Placeholder replaced by the source asset name in `RmsOptions::output_asset`.
pub const ASSET_PLACEHOLDER: &str = "%a";

/// Configuration of an `RmsStage`.
#[derive(Debug, Clone, PartialEq)]
pub struct RmsOptions {
    /// Samples per window.
    pub sample_size: u32,
    /// Forward the original readings along with the summaries.
    pub send_raw_data: bool,
    /// Add peak-to-peak and crest factor datapoints to each summary.
    pub send_peak: bool,
    /// Regular expression an asset name must match completely to be aggregated.
    pub asset_filter: String,
    /// Name of the summary asset, `%a` expands to the source asset.
    pub output_asset: String,
    /// A disabled stage passes every reading through untouched.
    pub enabled: bool,
}

impl Default for RmsOptions {
    fn default() -> Self {
        Self {
            sample_size: 10,
            send_raw_data: false,
            send_peak: false,
            asset_filter: ".*".into(),
            output_asset: "%a RMS".into(),
            enabled: false,
        }
    }
}

impl RmsOptions {
    pub(crate) fn validate(&self) -> Result<AssetMatcher, ConfigurationError> {
        if self.sample_size == 0 {
            return Err(ConfigurationError::ZeroSampleSize);
        }
        if self.output_asset.is_empty() {
            return Err(ConfigurationError::EmptyOutputAsset);
        }
        AssetMatcher::new(&self.asset_filter, &self.output_asset)
    }
}

/// Compiled asset filter and output name template.
#[derive(Debug, Clone)]
pub(crate) struct AssetMatcher {
    filter: Regex,
    template: String,
}

impl AssetMatcher {
    fn new(pattern: &str, template: &str) -> Result<Self, ConfigurationError> {
        let filter = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            ConfigurationError::InvalidAssetFilter {
                pattern: pattern.to_owned(),
                source,
            }
        })?;
        Ok(Self {
            filter,
            template: template.to_owned(),
        })
    }

    #[inline(always)]
    pub(crate) fn matches(&self, asset: &str) -> bool {
        self.filter.is_match(asset)
    }

    pub(crate) fn output_asset(&self, asset: &str) -> String {
        self.template.replace(ASSET_PLACEHOLDER, asset)
    }
}
