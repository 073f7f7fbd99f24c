//! Time-domain error-to-signal metrics.

use crate::{check_pair, LossMetric, Result, Signal, EPSILON};
use burn::prelude::*;

/// Error-to-signal ratio: `mean((t - o)²) / (mean(t²) + ε)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsrLoss {
    epsilon: f32,
}

impl EsrLoss {
    pub fn new() -> Self {
        Self { epsilon: EPSILON }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl Default for EsrLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LossMetric<B> for EsrLoss {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        check_pair(output, target)?;
        let error = target.clone().sub(output.clone()).powf_scalar(2.0).mean();
        Ok(error.div(energy(target, self.epsilon)))
    }
}

/// DC offset error: squared difference of the per-channel time means,
/// normalised by the energy of the full target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcLoss {
    epsilon: f32,
}

impl DcLoss {
    pub fn new() -> Self {
        Self { epsilon: EPSILON }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl Default for DcLoss {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LossMetric<B> for DcLoss {
    fn evaluate(&self, output: &Signal<B>, target: &Signal<B>) -> Result<Tensor<B, 1>> {
        check_pair(output, target)?;
        let offset = target
            .clone()
            .mean_dim(0)
            .sub(output.clone().mean_dim(0))
            .powf_scalar(2.0)
            .mean();
        // Energy is taken over every sample, not over the time means.
        Ok(offset.div(energy(target, self.epsilon)))
    }
}

fn energy<B: Backend>(target: &Signal<B>, epsilon: f32) -> Tensor<B, 1> {
    target.clone().powf_scalar(2.0).mean().add_scalar(epsilon)
}
