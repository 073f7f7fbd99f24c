//! # ampfit-core
//!
//! Framework-agnostic pieces of the ampfit loss engine:
//!
//! - **Recipes**: [`LossKind`], [`WeightedLossSpec`] and the TOML-backed [`LossConfig`]
//! - **Pre-emphasis taps**: [`FilterCoefficients`] with a host reference FIR
//! - **STFT framing**: [`Resolution`] (reflect-padded frame indices, DFT bases)
//! - **Errors**: [`Error`], split into [`ConfigError`] and [`ShapeError`]
//!
//! Nothing here depends on an ML framework. Tensor implementations live in
//! `ampfit-burn`.

mod config;
mod error;
mod filter;
mod kind;
mod resolution;
mod spec;

pub use config::LossConfig;
pub use error::{ConfigError, Error, Result, ShapeError};
pub use filter::{FilterCoefficients, LOW_PASS_TAPS};
pub use kind::LossKind;
pub use resolution::{Resolution, DEFAULT_FFT_SIZES};
pub use spec::WeightedLossSpec;

/// Floor added to signal energy and applied to spectral magnitudes.
pub const EPSILON: f32 = 1e-5;

/// Check that `output` and `target` dimensions agree.
pub fn check_same_shape(output: &[usize], target: &[usize]) -> Result<()> {
    if output != target {
        return Err(ShapeError::Mismatch {
            output: output.to_vec(),
            target: target.to_vec(),
        }
        .into());
    }
    Ok(())
}
