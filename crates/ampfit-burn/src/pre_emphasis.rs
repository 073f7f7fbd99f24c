//! Pre-emphasis filtering and the metric decorator that uses it.

use crate::{
    check_mono, check_non_empty, check_pair, FilterCoefficients, LossMetric, Result, Signal,
};
use burn::prelude::*;
use burn::tensor::module::conv1d;
use burn::tensor::ops::ConvOptions;

/// Same-length causal FIR applied to single-channel signals, optionally
/// followed by the fixed `(0.85, 1.0)` low-pass stage.
///
/// Filter weights are constant tensors: gradients flow to the signal only.
#[derive(Debug, Clone)]
pub struct PreEmphasisFilter<B: Backend> {
    coefficients: FilterCoefficients,
    weight: Tensor<B, 3>,
    low_pass: Option<Tensor<B, 3>>,
}

impl<B: Backend> PreEmphasisFilter<B> {
    pub fn new(coefficients: FilterCoefficients, low_pass: bool, device: &B::Device) -> Self {
        tracing::debug!(
            "Building pre-emphasis filter: taps {:?}, low-pass {}",
            coefficients.taps(),
            low_pass
        );
        let weight = fir_weight(&coefficients, device);
        let low_pass = low_pass.then(|| fir_weight(&FilterCoefficients::low_pass(), device));
        Self {
            coefficients,
            weight,
            low_pass,
        }
    }

    pub fn from_taps(taps: &[f32], low_pass: bool, device: &B::Device) -> Result<Self> {
        Ok(Self::new(FilterCoefficients::new(taps)?, low_pass, device))
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    pub fn has_low_pass(&self) -> bool {
        self.low_pass.is_some()
    }

    /// Filter one `(time, batch, 1)` signal; the time length is unchanged.
    pub fn filter(&self, signal: &Signal<B>) -> Result<Signal<B>> {
        check_mono(signal)?;
        check_non_empty(signal)?;
        let filtered = same_length_fir(signal.clone(), &self.weight);
        Ok(match &self.low_pass {
            Some(low_pass) => same_length_fir(filtered, low_pass),
            None => filtered,
        })
    }

    /// Filter both sides of an `(output, target)` pair.
    pub fn apply(&self, output: &Signal<B>, target: &Signal<B>) -> Result<(Signal<B>, Signal<B>)> {
        check_pair(output, target)?;
        Ok((self.filter(output)?, self.filter(target)?))
    }
}

/// `(out_channels, in_channels, kernel)` conv weight for a mono FIR.
fn fir_weight<B: Backend>(coefficients: &FilterCoefficients, device: &B::Device) -> Tensor<B, 3> {
    let taps = coefficients.taps().to_vec();
    let len = taps.len();
    Tensor::from_data(TensorData::new(taps, [1, 1, len]), device)
}

fn same_length_fir<B: Backend>(signal: Signal<B>, weight: &Tensor<B, 3>) -> Signal<B> {
    let [_, batch, channels] = signal.dims();
    let padding = weight.dims()[2] - 1;
    let zeros = Tensor::zeros([padding, batch, channels], &signal.device());
    // (time, batch, 1) -> (batch, 1, time) for conv1d and back.
    let padded = Tensor::cat(vec![zeros, signal], 0).permute([1, 2, 0]);
    conv1d(
        padded,
        weight.clone(),
        None,
        ConvOptions::new([1], [0], [1], 1),
    )
    .permute([2, 0, 1])
}

/// Runs an inner metric on the pre-emphasised pair.
#[derive(Debug, Clone)]
pub struct PreEmphasized<B: Backend, M> {
    filter: PreEmphasisFilter<B>,
    inner: M,
}

impl<B: Backend, M: LossMetric<B>> PreEmphasized<B, M> {
    pub fn new(filter: PreEmphasisFilter<B>, inner: M) -> Self {
        Self { filter, inner }
    }

    pub fn filter(&self) -> &PreEmphasisFilter<B> {
        &self.filter
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<B: Backend, M: LossMetric<B>> LossMetric<B> for PreEmphasized<B, M> {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        let (output, target) = self.filter.apply(output, target)?;
        self.inner.evaluate(&output, &target)
    }
}
