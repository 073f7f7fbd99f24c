//! STFT resolutions: centred framing with reflect padding and DFT bases.
//!
//! Framing follows the common `center = true` convention: the signal is
//! reflect-padded by `fft_size / 2` on both sides, and frame `f` starts at
//! padded sample `f * hop_size`. No window is applied (rectangular).

use crate::error::{ConfigError, Result, ShapeError};

/// FFT sizes used by the multi-resolution spectral loss.
pub const DEFAULT_FFT_SIZES: [usize; 5] = [2048, 1024, 512, 256, 128];

/// One STFT analysis resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    fft_size: usize,
    hop_size: usize,
}

impl Resolution {
    /// Resolution with a quarter-window hop.
    pub fn new(fft_size: usize) -> Result<Self> {
        Self::with_hop(fft_size, fft_size / 4)
    }

    pub fn with_hop(fft_size: usize, hop_size: usize) -> Result<Self> {
        if fft_size < 4 {
            return Err(ConfigError::InvalidResolution(fft_size).into());
        }
        if hop_size == 0 {
            return Err(ConfigError::InvalidHop {
                fft_size,
                hop_size,
            }
            .into());
        }
        Ok(Self { fft_size, hop_size })
    }

    /// Resolutions for a list of FFT sizes.
    pub fn from_sizes(sizes: &[usize]) -> Result<Vec<Self>> {
        if sizes.is_empty() {
            return Err(ConfigError::NoResolutions.into());
        }
        sizes.iter().map(|&size| Self::new(size)).collect()
    }

    pub fn defaults() -> Vec<Self> {
        DEFAULT_FFT_SIZES
            .iter()
            .map(|&fft_size| Self {
                fft_size,
                hop_size: fft_size / 4,
            })
            .collect()
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Bins of the one-sided spectrum.
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    fn padding(&self) -> usize {
        self.fft_size / 2
    }

    /// Reflect padding needs more samples than the pad width.
    pub fn check_len(&self, len: usize) -> Result<()> {
        if len <= self.padding() {
            return Err(ShapeError::TooShort {
                len,
                required: self.padding(),
            }
            .into());
        }
        Ok(())
    }

    pub fn num_frames(&self, len: usize) -> Result<usize> {
        self.check_len(len)?;
        let padded = len + 2 * self.padding();
        Ok(1 + (padded - self.fft_size) / self.hop_size)
    }

    /// Source sample for every `(frame, offset)` pair, frame-major.
    ///
    /// Gathering the signal at these indices yields the reflect-padded
    /// frames as a `(frames, fft_size)` block.
    pub fn frame_indices(&self, len: usize) -> Result<Vec<i64>> {
        let frames = self.num_frames(len)?;
        let pad = self.padding() as i64;
        let last = len as i64 - 1;
        let mut indices = Vec::with_capacity(frames * self.fft_size);
        for frame in 0..frames {
            let start = (frame * self.hop_size) as i64 - pad;
            for offset in 0..self.fft_size as i64 {
                let i = start + offset;
                let reflected = if i < 0 {
                    -i
                } else if i > last {
                    2 * last - i
                } else {
                    i
                };
                indices.push(reflected);
            }
        }
        Ok(indices)
    }

    /// Row-major `(fft_size, num_bins)` cosine and sine DFT matrices.
    ///
    /// `frames · cos` and `frames · sin` give the real part and the negated
    /// imaginary part of the one-sided DFT.
    pub fn dft_basis(&self) -> (Vec<f32>, Vec<f32>) {
        let n = self.fft_size;
        let bins = self.num_bins();
        let mut cos = Vec::with_capacity(n * bins);
        let mut sin = Vec::with_capacity(n * bins);
        for sample in 0..n {
            for bin in 0..bins {
                // Reduce mod n first to keep the phase argument small.
                let k = (sample * bin) % n;
                let phase = 2.0 * core::f64::consts::PI * k as f64 / n as f64;
                cos.push(phase.cos() as f32);
                sin.push(phase.sin() as f32);
            }
        }
        (cos, sin)
    }
}
