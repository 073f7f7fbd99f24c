//! Error types for ampfit.

use crate::kind::LossKind;
use thiserror::Error;

/// Error type for ampfit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid loss configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid signal shape: {0}")]
    Shape(#[from] ShapeError),
}

impl Error {
    /// Raised while building a metric, filter or aggregator.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Raised per call when the output/target pair is malformed.
    pub fn is_shape(&self) -> bool {
        matches!(self, Error::Shape(_))
    }
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors from building loss recipes and their components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown loss metric: {0:?}")]
    UnknownMetric(String),

    #[error("ESRPre requested without pre-emphasis coefficients")]
    MissingPreEmphasis,

    #[error("Pre-emphasis filter needs at least 2 taps, got {0}")]
    TooFewTaps(usize),

    #[error("Filter taps must be finite")]
    NonFiniteTap,

    #[error("Invalid weight for {kind}: {weight}. Must be finite and non-negative")]
    InvalidWeight { kind: LossKind, weight: f32 },

    #[error("Loss metric {0} listed more than once")]
    DuplicateMetric(LossKind),

    #[error("{weights} weights given for {metrics} metrics")]
    ExtraWeights { metrics: usize, weights: usize },

    #[error("Loss recipe has no metrics")]
    EmptySpec,

    #[error("Invalid FFT size {0}. Must be at least 4")]
    InvalidResolution(usize),

    #[error("Invalid hop size {hop_size} for FFT size {fft_size}. Must be at least 1")]
    InvalidHop { fft_size: usize, hop_size: usize },

    #[error("Multi-resolution spectral loss needs at least one FFT size")]
    NoResolutions,

    #[error("Failed to parse loss config: {0}")]
    Parse(String),
}

/// Errors from evaluating a metric on a malformed signal pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("output shape {output:?} does not match target shape {target:?}")]
    Mismatch {
        output: Vec<usize>,
        target: Vec<usize>,
    },

    #[error("expected a single-channel signal, got {0} channels")]
    MultiChannel(usize),

    #[error("signal of {len} samples is too short, need more than {required}")]
    TooShort { len: usize, required: usize },
}
