//! STFT magnitude losses.
//!
//! The STFT is computed as a gather of reflect-padded frames followed by two
//! matmuls against fixed cosine/sine DFT bases, so every step is an ordinary
//! differentiable tensor op.

use crate::{
    check_mono, check_non_empty, check_pair, ConfigError, LossMetric, Resolution, Result, Signal,
    EPSILON,
};
use burn::prelude::*;

/// Added under the square root so the magnitude gradient stays finite at
/// exactly-zero bins. Far below [`EPSILON`] and invisible for any audible bin.
const MAGNITUDE_BIAS: f32 = 1e-18;

/// Single-resolution spectral loss:
/// `mean|M_o - M_t| + mean|log max(M_o, ε) - log max(M_t, ε)|`.
///
/// Signals must be single-channel; each batch column is analysed separately.
#[derive(Debug, Clone)]
pub struct SpectralLoss<B: Backend> {
    resolution: Resolution,
    epsilon: f32,
    cos_basis: Tensor<B, 2>,
    sin_basis: Tensor<B, 2>,
}

impl<B: Backend> SpectralLoss<B> {
    pub fn new(resolution: Resolution, device: &B::Device) -> Self {
        let (cos, sin) = resolution.dft_basis();
        let shape = [resolution.fft_size(), resolution.num_bins()];
        Self {
            resolution,
            epsilon: EPSILON,
            cos_basis: Tensor::from_data(TensorData::new(cos, shape), device),
            sin_basis: Tensor::from_data(TensorData::new(sin, shape), device),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// STFT magnitudes shaped `(batch * frames, bins)`, batch-major.
    pub fn magnitude(&self, signal: &Signal<B>) -> Result<Tensor<B, 2>> {
        check_mono(signal)?;
        check_non_empty(signal)?;
        let [len, batch, _] = signal.dims();
        let fft_size = self.resolution.fft_size();
        let frames = self.resolution.num_frames(len)?;
        let indices = self.resolution.frame_indices(len)?;

        let indices = Tensor::<B, 1, Int>::from_data(
            TensorData::new(indices, [frames * fft_size]),
            &signal.device(),
        );
        let framed = signal
            .clone()
            .reshape([len, batch])
            .select(0, indices)
            .reshape([frames, fft_size, batch])
            .permute([2, 0, 1])
            .reshape([batch * frames, fft_size]);

        let re = framed.clone().matmul(self.cos_basis.clone());
        let im = framed.matmul(self.sin_basis.clone());
        Ok(re
            .powf_scalar(2.0)
            .add(im.powf_scalar(2.0))
            .add_scalar(MAGNITUDE_BIAS)
            .sqrt())
    }
}

impl<B: Backend> LossMetric<B> for SpectralLoss<B> {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        check_pair(output, target)?;
        let mag_output = self.magnitude(output)?;
        let mag_target = self.magnitude(target)?;

        let log_output = mag_output.clone().clamp_min(self.epsilon).log();
        let log_target = mag_target.clone().clamp_min(self.epsilon).log();

        let linear = mag_output.sub(mag_target).abs().mean();
        let log = log_output.sub(log_target).abs().mean();
        Ok(linear.add(log))
    }
}

/// Mean of [`SpectralLoss`] over several resolutions.
#[derive(Debug, Clone)]
pub struct MultiResolutionSpectralLoss<B: Backend> {
    losses: Vec<SpectralLoss<B>>,
}

impl<B: Backend> MultiResolutionSpectralLoss<B> {
    /// FFT sizes 2048, 1024, 512, 256 and 128 with quarter-window hops.
    pub fn new(device: &B::Device) -> Self {
        Self::build(&Resolution::defaults(), device)
    }

    pub fn with_resolutions(resolutions: &[Resolution], device: &B::Device) -> Result<Self> {
        if resolutions.is_empty() {
            return Err(ConfigError::NoResolutions.into());
        }
        Ok(Self::build(resolutions, device))
    }

    pub fn from_fft_sizes(fft_sizes: &[usize], device: &B::Device) -> Result<Self> {
        Ok(Self::build(&Resolution::from_sizes(fft_sizes)?, device))
    }

    fn build(resolutions: &[Resolution], device: &B::Device) -> Self {
        tracing::debug!(
            "Building multi-resolution spectral loss: fft sizes {:?}",
            resolutions.iter().map(|r| r.fft_size()).collect::<Vec<_>>()
        );
        Self {
            losses: resolutions
                .iter()
                .map(|&r| SpectralLoss::new(r, device))
                .collect(),
        }
    }

    pub fn resolutions(&self) -> Vec<Resolution> {
        self.losses.iter().map(|l| l.resolution()).collect()
    }
}

impl<B: Backend> LossMetric<B> for MultiResolutionSpectralLoss<B> {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        check_pair(output, target)?;
        let mut total: Option<Tensor<B, 1>> = None;
        for loss in &self.losses {
            let value = loss.evaluate(output, target)?;
            total = Some(match total {
                Some(sum) => sum.add(value),
                None => value,
            });
        }
        let total = total.ok_or(ConfigError::NoResolutions)?;
        Ok(total.div_scalar(self.losses.len() as f32))
    }
}
