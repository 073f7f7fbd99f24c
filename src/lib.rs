//! # ampfit - differentiable audio losses
//!
//! Objective functions for fitting audio models (amp, pedal and effect
//! emulation) to recorded targets.
//!
//! ## Architecture
//!
//! ampfit is an umbrella crate that coordinates:
//! - **ampfit-core** - Loss recipes, TOML config, filter taps, STFT framing, errors
//! - **ampfit-burn** - Burn tensor metrics (ESR, DC, spectral, pre-emphasis, aggregator)
//!
//! ## Quick Start
//!
//! ```ignore
//! use ampfit::prelude::*;
//!
//! let device = Default::default();
//! let config = LossConfig::from_toml_str(r#"
//!     losses = ["ESR", "ESRPre", "DC"]
//!     weights = [0.5, 0.4, 0.1]
//!     pre_emphasis = [-0.85, 1.0]
//! "#)?;
//! let loss_fn = LossAggregator::<CpuBackend>::from_config(&config, &device)?;
//!
//! // (time, batch, channel) tensors
//! let loss = loss_fn.evaluate(&prediction, &target)?;
//! let grads = loss.backward();
//! ```
//!
//! ## Feature Flags
//!
//! - `default` - Recipes plus the Burn implementation
//! - `burn` - Burn losses on NdArray with autodiff
//! - `wgpu` - `GpuBackend` alias for the Burn wgpu backend

/// Re-export of ampfit-core for direct access
pub use ampfit_core as core;

pub use ampfit_core::{
    check_same_shape,
    ConfigError,
    // Error
    Error,
    // Pre-emphasis taps
    FilterCoefficients,
    // Recipes
    LossConfig,
    LossKind,
    // STFT framing
    Resolution,
    Result,
    ShapeError,
    WeightedLossSpec,
    DEFAULT_FFT_SIZES,
    EPSILON,
    LOW_PASS_TAPS,
};

// Burn losses
#[cfg(feature = "burn")]
pub use ampfit_burn as losses;

#[cfg(feature = "burn")]
pub use ampfit_burn::{
    functional::{
        apply_pre_emphasis, build_loss_aggregator, compute_dc, compute_esr,
        compute_multi_resolution_spectral,
    },
    scalar, CpuBackend, DcLoss, EsrLoss, LossAggregator, LossAggregatorBuilder, LossMetric,
    MultiResolutionSpectralLoss, PreEmphasisFilter, PreEmphasized, Signal, SpectralLoss,
};

#[cfg(feature = "wgpu")]
pub use ampfit_burn::GpuBackend;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{Error, LossConfig, LossKind, Result, WeightedLossSpec};

    #[cfg(feature = "burn")]
    pub use crate::{
        scalar, CpuBackend, DcLoss, EsrLoss, LossAggregator, LossMetric,
        MultiResolutionSpectralLoss, PreEmphasisFilter, Signal,
    };
}
