//! Weighted combination of loss metrics.

use crate::pre_emphasis::{PreEmphasisFilter, PreEmphasized};
use crate::spectral::MultiResolutionSpectralLoss;
use crate::time_domain::{DcLoss, EsrLoss};
use crate::{
    check_pair, ConfigError, FilterCoefficients, LossConfig, LossKind, LossMetric, Resolution,
    Result, Signal, WeightedLossSpec,
};
use ampfit_core::DEFAULT_FFT_SIZES;
use burn::prelude::*;
use std::marker::PhantomData;
use std::sync::Arc;

/// Sums `weight * metric(output, target)` over a fixed recipe.
///
/// Built once from a [`WeightedLossSpec`]; immutable afterwards. `ESR` and
/// `ESRPre` share one [`EsrLoss`] instance.
///
/// # Example
///
/// ```rust,ignore
/// let spec = WeightedLossSpec::new()
///     .weighted(LossKind::Esr, 0.5)
///     .weighted(LossKind::Dc, 0.5);
/// let loss_fn = LossAggregator::<CpuBackend>::builder(spec).build(&device)?;
/// let loss = loss_fn.evaluate(&output, &target)?;
/// ```
#[derive(Debug, Clone)]
pub struct LossAggregator<B: Backend> {
    terms: Vec<(LossKind, f32)>,
    esr: Arc<EsrLoss>,
    dc: Arc<DcLoss>,
    esr_pre: Option<PreEmphasized<B, Arc<EsrLoss>>>,
    multi_spec: Option<MultiResolutionSpectralLoss<B>>,
}

impl<B: Backend> LossAggregator<B> {
    pub fn builder(spec: WeightedLossSpec) -> LossAggregatorBuilder<B> {
        LossAggregatorBuilder::new(spec)
    }

    /// Build from a parsed [`LossConfig`].
    pub fn from_config(config: &LossConfig, device: &B::Device) -> Result<Self> {
        let mut builder = LossAggregatorBuilder::new(config.to_spec()?)
            .low_pass(config.low_pass)
            .fft_sizes(config.fft_sizes.clone());
        if let Some(taps) = &config.pre_emphasis {
            builder = builder.pre_emphasis(taps.clone());
        }
        builder.build(device)
    }

    /// `(metric, weight)` terms in summation order.
    pub fn terms(&self) -> &[(LossKind, f32)] {
        &self.terms
    }

    pub fn has_pre_emphasis(&self) -> bool {
        self.esr_pre.is_some()
    }

    pub fn pre_emphasis(&self) -> Option<&PreEmphasisFilter<B>> {
        self.esr_pre.as_ref().map(|m| m.filter())
    }

    fn metric(&self, kind: LossKind) -> Result<&dyn LossMetric<B>> {
        let metric: &dyn LossMetric<B> = match kind {
            LossKind::Esr => &*self.esr,
            LossKind::Dc => &*self.dc,
            LossKind::EsrPre => self
                .esr_pre
                .as_ref()
                .ok_or(ConfigError::MissingPreEmphasis)?,
            LossKind::MultiSpec => self
                .multi_spec
                .as_ref()
                .ok_or(ConfigError::NoResolutions)?,
        };
        Ok(metric)
    }

    /// Weighted sum of every term.
    pub fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        check_pair(output, target)?;
        let mut total: Option<Tensor<B, 1>> = None;
        for &(kind, weight) in &self.terms {
            let value = self.metric(kind)?.evaluate(output, target)?.mul_scalar(weight);
            total = Some(match total {
                Some(sum) => sum.add(value),
                None => value,
            });
        }
        tracing::trace!("Evaluated {} loss terms", self.terms.len());
        total.ok_or_else(|| ConfigError::EmptySpec.into())
    }

    /// Unweighted value of each term, for per-metric logging.
    pub fn evaluate_terms(
        &self,
        output: &Signal<B>,
        target: &Signal<B>,
    ) -> Result<Vec<(LossKind, Tensor<B, 1>)>> {
        check_pair(output, target)?;
        self.terms
            .iter()
            .map(|&(kind, _)| -> Result<(LossKind, Tensor<B, 1>)> {
                Ok((kind, self.metric(kind)?.evaluate(output, target)?))
            })
            .collect()
    }
}

impl<B: Backend> LossMetric<B> for LossAggregator<B> {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        LossAggregator::evaluate(self, output, target)
    }
}

/// Builder for [`LossAggregator`].
#[derive(Debug, Clone)]
pub struct LossAggregatorBuilder<B: Backend> {
    spec: WeightedLossSpec,
    pre_emphasis: Option<Vec<f32>>,
    low_pass: bool,
    fft_sizes: Vec<usize>,
    _backend: PhantomData<B>,
}

impl<B: Backend> LossAggregatorBuilder<B> {
    pub fn new(spec: WeightedLossSpec) -> Self {
        Self {
            spec,
            pre_emphasis: None,
            low_pass: false,
            fft_sizes: DEFAULT_FFT_SIZES.to_vec(),
            _backend: PhantomData,
        }
    }

    /// Pre-emphasis taps; required for `ESRPre`.
    pub fn pre_emphasis(mut self, taps: impl Into<Vec<f32>>) -> Self {
        self.pre_emphasis = Some(taps.into());
        self
    }

    /// Cascade the `(0.85, 1.0)` low-pass after pre-emphasis.
    pub fn low_pass(mut self, enabled: bool) -> Self {
        self.low_pass = enabled;
        self
    }

    /// FFT sizes for `MultiSpec`.
    pub fn fft_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.fft_sizes = sizes.into();
        self
    }

    pub fn build(self, device: &B::Device) -> Result<LossAggregator<B>> {
        self.spec.validate()?;
        let coefficients = self
            .pre_emphasis
            .map(FilterCoefficients::new)
            .transpose()?;
        if self.spec.requires_pre_emphasis() && coefficients.is_none() {
            return Err(ConfigError::MissingPreEmphasis.into());
        }
        let resolutions = Resolution::from_sizes(&self.fft_sizes)?;

        let esr = Arc::new(EsrLoss::new());
        let esr_pre = coefficients.map(|c| {
            PreEmphasized::new(
                PreEmphasisFilter::new(c, self.low_pass, device),
                Arc::clone(&esr),
            )
        });
        let multi_spec = if self.spec.contains(LossKind::MultiSpec) {
            Some(MultiResolutionSpectralLoss::with_resolutions(
                &resolutions,
                device,
            )?)
        } else {
            None
        };

        tracing::debug!("Built loss aggregator: {:?}", self.spec.terms());
        Ok(LossAggregator {
            terms: self.spec.terms().to_vec(),
            esr,
            dc: Arc::new(DcLoss::new()),
            esr_pre,
            multi_spec,
        })
    }
}
