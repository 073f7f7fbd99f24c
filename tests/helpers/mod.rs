//! Test fixtures for ampfit integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (identical inputs, weighting)
//! - `REDUCTION_EPSILON` (1e-4): Means and sums over long signals
//! - `SPECTRAL_EPSILON` (1e-3): STFT based comparisons

#![allow(dead_code)]

pub mod tolerances;

use ampfit::Signal;
use burn::prelude::*;

/// Sample rate every fixture is rendered at.
pub const TEST_SAMPLE_RATE: f64 = 48000.0;

/// Backend used by the integration tests.
pub type TestBackend = burn::backend::NdArray<f32>;

/// `seconds` of a sine tone with peak `amplitude`.
pub fn tone(frequency_hz: f64, amplitude: f32, seconds: f64) -> Vec<f32> {
    let num_samples = (seconds * TEST_SAMPLE_RATE).round() as usize;
    let step = std::f64::consts::TAU * frequency_hz / TEST_SAMPLE_RATE;
    (0..num_samples)
        .map(|n| amplitude * (step * n as f64).sin() as f32)
        .collect()
}

/// Uniform noise in -1..1 from a xorshift64 stream, so runs are repeatable.
pub fn noise(num_samples: usize, seed: u64) -> Vec<f32> {
    let mut state = seed.max(1);
    std::iter::repeat_with(|| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 40) as f32 / (1u64 << 23) as f32 - 1.0
    })
    .take(num_samples)
    .collect()
}

pub fn scaled(samples: &[f32], gain: f32) -> Vec<f32> {
    samples.iter().map(|s| s * gain).collect()
}

/// Mean of the squared samples, the denominator of ESR.
pub fn energy(samples: &[f32]) -> f32 {
    let len = samples.len().max(1) as f32;
    samples.iter().map(|s| s * s).sum::<f32>() / len
}

/// Wrap samples as a `(time, 1, 1)` signal.
pub fn mono_signal<B: Backend>(samples: &[f32], device: &B::Device) -> Signal<B> {
    Tensor::from_data(
        TensorData::new(samples.to_vec(), [samples.len(), 1, 1]),
        device,
    )
}

/// Stack equal-length recordings as a `(time, batch, 1)` signal.
pub fn batch_signal<B: Backend>(items: &[Vec<f32>], device: &B::Device) -> Signal<B> {
    let len = items.first().map_or(0, Vec::len);
    let mut data = Vec::with_capacity(len * items.len());
    for t in 0..len {
        data.extend(items.iter().map(|item| item[t]));
    }
    Tensor::from_data(TensorData::new(data, [len, items.len(), 1]), device)
}
