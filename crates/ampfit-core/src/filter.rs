//! FIR taps for the pre-emphasis stage.

use crate::error::{ConfigError, Result};

/// Taps of the fixed low-pass stage that can follow pre-emphasis.
pub const LOW_PASS_TAPS: [f32; 2] = [0.85, 1.0];

/// Validated causal FIR taps (at least two, all finite).
///
/// The last tap weights the current sample, the first tap weights the
/// oldest one: `y[t] = Σ_j c[j] · x[t - (k - 1) + j]`. So `[-0.95, 1.0]`
/// is the usual `x[t] - 0.95 x[t-1]` first-order high-pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    taps: Vec<f32>,
}

impl FilterCoefficients {
    pub fn new(taps: impl Into<Vec<f32>>) -> Result<Self> {
        let taps = taps.into();
        if taps.len() < 2 {
            return Err(ConfigError::TooFewTaps(taps.len()).into());
        }
        if taps.iter().any(|t| !t.is_finite()) {
            return Err(ConfigError::NonFiniteTap.into());
        }
        Ok(Self { taps })
    }

    /// The fixed `(0.85, 1.0)` low-pass stage.
    pub fn low_pass() -> Self {
        Self {
            taps: LOW_PASS_TAPS.to_vec(),
        }
    }

    pub fn taps(&self) -> &[f32] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Always false once constructed; pairs with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Zeros prepended so the filtered signal keeps its length.
    pub fn front_padding(&self) -> usize {
        self.taps.len() - 1
    }

    /// Same-length causal FIR on a host buffer.
    pub fn filter(&self, samples: &[f32]) -> Vec<f32> {
        let pad = self.front_padding();
        (0..samples.len())
            .map(|t| {
                self.taps
                    .iter()
                    .enumerate()
                    .filter_map(|(j, &c)| {
                        (t + j).checked_sub(pad).map(|i| c * samples[i])
                    })
                    .sum()
            })
            .collect()
    }
}
