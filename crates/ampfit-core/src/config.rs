//! Loss recipe configuration.

use crate::error::{ConfigError, Result};
use crate::filter::FilterCoefficients;
use crate::resolution::{Resolution, DEFAULT_FFT_SIZES};
use crate::spec::WeightedLossSpec;
use serde::{Deserialize, Serialize};

/// Loss recipe as it appears in a training config file.
///
/// ```toml
/// losses = ["ESR", "DC", "ESRPre"]
/// weights = [0.75, 0.25]
/// pre_emphasis = [-0.85, 1.0]
/// low_pass = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LossConfig {
    /// Metric names, in summation order.
    pub losses: Vec<String>,
    /// Weights matched to `losses` by position; missing ones default to 1.0.
    #[serde(default)]
    pub weights: Vec<f32>,
    #[serde(default)]
    pub pre_emphasis: Option<Vec<f32>>,
    #[serde(default)]
    pub low_pass: bool,
    #[serde(default = "default_fft_sizes")]
    pub fft_sizes: Vec<usize>,
}

fn default_fft_sizes() -> Vec<usize> {
    DEFAULT_FFT_SIZES.to_vec()
}

impl Default for LossConfig {
    fn default() -> Self {
        Self {
            losses: vec!["ESR".into(), "DC".into()],
            weights: vec![0.75, 0.25],
            pre_emphasis: None,
            low_pass: false,
            fft_sizes: default_fft_sizes(),
        }
    }
}

impl LossConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    pub fn validate(&self) -> Result<()> {
        let spec = self.to_spec()?;
        let filter = self.filter_coefficients()?;
        if spec.requires_pre_emphasis() && filter.is_none() {
            return Err(ConfigError::MissingPreEmphasis.into());
        }
        Resolution::from_sizes(&self.fft_sizes)?;
        Ok(())
    }

    pub fn to_spec(&self) -> Result<WeightedLossSpec> {
        WeightedLossSpec::from_names(&self.losses, &self.weights)
    }

    pub fn filter_coefficients(&self) -> Result<Option<FilterCoefficients>> {
        self.pre_emphasis
            .as_ref()
            .map(|taps| FilterCoefficients::new(taps.clone()))
            .transpose()
    }

    pub fn resolutions(&self) -> Result<Vec<Resolution>> {
        Resolution::from_sizes(&self.fft_sizes)
    }
}
