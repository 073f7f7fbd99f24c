//! Tolerance constants for loss testing.
//!
//! Different checks need different precision levels.

/// Floating point rounding errors (identical inputs, exact weighting).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Tensor reductions over long signals (summation order differs by backend).
pub const REDUCTION_EPSILON: f32 = 1e-4;

/// Spectral comparisons where DFT bases and reductions accumulate error.
pub const SPECTRAL_EPSILON: f32 = 1e-3;

/// Gain error tolerated after a short gradient descent run.
pub const FIT_EPSILON: f32 = 1e-3;
