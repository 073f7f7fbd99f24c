//! Weighted loss recipes.

use crate::error::{ConfigError, Result};
use crate::kind::LossKind;

/// Ordered list of `(metric, weight)` terms.
///
/// Insertion order is the summation order. Terms added without an explicit
/// weight get [`WeightedLossSpec::DEFAULT_WEIGHT`].
///
/// ```
/// use ampfit_core::{LossKind, WeightedLossSpec};
///
/// let spec = WeightedLossSpec::new()
///     .weighted(LossKind::Esr, 0.75)
///     .weighted(LossKind::Dc, 0.25);
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeightedLossSpec {
    terms: Vec<(LossKind, f32)>,
}

impl WeightedLossSpec {
    pub const DEFAULT_WEIGHT: f32 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term with the default weight.
    pub fn with(self, kind: LossKind) -> Self {
        self.weighted(kind, Self::DEFAULT_WEIGHT)
    }

    pub fn weighted(mut self, kind: LossKind, weight: f32) -> Self {
        self.terms.push((kind, weight));
        self
    }

    /// Build from metric names and a weight list that may be shorter than
    /// the name list; missing weights default to 1.0.
    pub fn from_names<S: AsRef<str>>(names: &[S], weights: &[f32]) -> Result<Self> {
        if weights.len() > names.len() {
            return Err(ConfigError::ExtraWeights {
                metrics: names.len(),
                weights: weights.len(),
            }
            .into());
        }
        if weights.len() < names.len() && !weights.is_empty() {
            tracing::warn!(
                "{} weights for {} loss metrics, remaining weights default to {}",
                weights.len(),
                names.len(),
                Self::DEFAULT_WEIGHT
            );
        }

        let mut spec = Self::new();
        for (i, name) in names.iter().enumerate() {
            let kind: LossKind = name.as_ref().parse()?;
            let weight = weights.get(i).copied().unwrap_or(Self::DEFAULT_WEIGHT);
            spec = spec.weighted(kind, weight);
        }
        spec.validate()?;
        Ok(spec)
    }

    pub fn terms(&self) -> &[(LossKind, f32)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, kind: LossKind) -> bool {
        self.weight(kind).is_some()
    }

    pub fn weight(&self, kind: LossKind) -> Option<f32> {
        self.terms.iter().find(|(k, _)| *k == kind).map(|(_, w)| *w)
    }

    pub fn requires_pre_emphasis(&self) -> bool {
        self.terms.iter().any(|(k, _)| k.needs_pre_emphasis())
    }

    /// Reject empty recipes, duplicate metrics and negative or non-finite weights.
    pub fn validate(&self) -> Result<()> {
        if self.terms.is_empty() {
            return Err(ConfigError::EmptySpec.into());
        }
        for (i, &(kind, weight)) in self.terms.iter().enumerate() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { kind, weight }.into());
            }
            if self.terms[..i].iter().any(|(k, _)| *k == kind) {
                return Err(ConfigError::DuplicateMetric(kind).into());
            }
        }
        Ok(())
    }
}

impl FromIterator<(LossKind, f32)> for WeightedLossSpec {
    fn from_iter<I: IntoIterator<Item = (LossKind, f32)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
