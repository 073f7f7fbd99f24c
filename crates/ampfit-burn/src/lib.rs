//! Burn implementation of the ampfit audio losses.
//!
//! Every metric takes an `(output, target)` pair of [`Signal`] tensors shaped
//! `(time, batch, channel)` and returns a one-element tensor, so the result
//! stays on the autodiff tape when `B` is an [`Autodiff`](burn::backend::Autodiff)
//! backend.
//!
//! ```rust,ignore
//! let device = Default::default();
//! let spec = WeightedLossSpec::new()
//!     .weighted(LossKind::Esr, 0.75)
//!     .weighted(LossKind::EsrPre, 0.25);
//! let loss_fn = LossAggregator::<CpuBackend>::builder(spec)
//!     .pre_emphasis(vec![-0.85, 1.0])
//!     .build(&device)?;
//!
//! let loss = loss_fn.evaluate(&prediction, &target)?;
//! let grads = loss.backward();
//! ```

mod aggregator;
pub mod functional;
mod pre_emphasis;
mod spectral;
mod time_domain;

pub use aggregator::{LossAggregator, LossAggregatorBuilder};
pub use pre_emphasis::{PreEmphasisFilter, PreEmphasized};
pub use spectral::{MultiResolutionSpectralLoss, SpectralLoss};
pub use time_domain::{DcLoss, EsrLoss};

pub use ampfit_core::{
    ConfigError, Error, FilterCoefficients, LossConfig, LossKind, Resolution, Result, ShapeError,
    WeightedLossSpec, EPSILON,
};

use burn::backend::{Autodiff, NdArray};
use burn::prelude::*;
use burn::tensor::ElementConversion;
use std::sync::Arc;

/// `(time, batch, channel)` audio tensor.
pub type Signal<B> = Tensor<B, 3>;

/// Differentiable CPU backend.
pub type CpuBackend = Autodiff<NdArray>;

/// Differentiable GPU backend.
#[cfg(feature = "wgpu")]
pub type GpuBackend = Autodiff<burn::backend::wgpu::Wgpu>;

/// A loss between a predicted signal and its target.
pub trait LossMetric<B: Backend> {
    /// One-element loss tensor. Fails if the pair has mismatched shapes.
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>>;
}

impl<B: Backend, M: LossMetric<B> + ?Sized> LossMetric<B> for Arc<M> {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        (**self).evaluate(output, target)
    }
}

/// Read a loss back to the host, e.g. for logging.
pub fn scalar<B: Backend>(loss: &Tensor<B, 1>) -> f32 {
    loss.clone().into_scalar().elem::<f32>()
}

pub(crate) fn check_pair<B: Backend>(output: &Signal<B>, target: &Signal<B>) -> Result<()> {
    ampfit_core::check_same_shape(&output.dims(), &target.dims())?;
    check_non_empty(target)
}

/// Burn panics on zero-sized operands, so every entry point rejects them.
pub(crate) fn check_non_empty<B: Backend>(signal: &Signal<B>) -> Result<()> {
    if signal.dims().iter().any(|&d| d == 0) {
        return Err(ShapeError::TooShort {
            len: 0,
            required: 0,
        }
        .into());
    }
    Ok(())
}

pub(crate) fn check_mono<B: Backend>(signal: &Signal<B>) -> Result<()> {
    let channels = signal.dims()[2];
    if channels != 1 {
        return Err(ShapeError::MultiChannel(channels).into());
    }
    Ok(())
}
