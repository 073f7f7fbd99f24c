//! One-shot functions over `(output, target)` pairs.
//!
//! Handy for scripts and tests. Training loops should build the metric
//! structs (or a [`LossAggregator`]) once and reuse them: the spectral and
//! filter variants here rebuild their DFT bases / filter weights per call.

use crate::{
    DcLoss, EsrLoss, LossAggregator, LossMetric, MultiResolutionSpectralLoss, PreEmphasisFilter,
    Result, Signal, WeightedLossSpec,
};
use burn::prelude::*;

pub fn compute_esr<B: Backend>(output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
    EsrLoss::new().evaluate(output, target)
}

pub fn compute_dc<B: Backend>(output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
    DcLoss::new().evaluate(output, target)
}

/// Multi-resolution spectral loss at the default FFT sizes.
pub fn compute_multi_resolution_spectral<B: Backend>(
    output: &Signal<B>,
    target: &Signal<B>,
) -> Result<Tensor<B, 1>> {
    MultiResolutionSpectralLoss::new(&target.device()).evaluate(output, target)
}

pub fn apply_pre_emphasis<B: Backend>(
    output: &Signal<B>,
    target: &Signal<B>,
    taps: &[f32],
    low_pass: bool,
) -> Result<(Signal<B>, Signal<B>)> {
    PreEmphasisFilter::from_taps(taps, low_pass, &target.device())?.apply(output, target)
}

pub fn build_loss_aggregator<B: Backend>(
    spec: WeightedLossSpec,
    pre_emphasis: Option<&[f32]>,
    use_low_pass: bool,
    device: &B::Device,
) -> Result<LossAggregator<B>> {
    let mut builder = LossAggregator::builder(spec).low_pass(use_low_pass);
    if let Some(taps) = pre_emphasis {
        builder = builder.pre_emphasis(taps);
    }
    builder.build(device)
}
