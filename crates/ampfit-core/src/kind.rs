//! Closed set of loss metrics a recipe can name.

use crate::error::ConfigError;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// A metric that can appear in a [`WeightedLossSpec`](crate::WeightedLossSpec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LossKind {
    /// Error-to-signal ratio.
    #[serde(rename = "ESR")]
    Esr,
    /// Normalised DC offset error.
    #[serde(rename = "DC")]
    Dc,
    /// ESR on the pre-emphasis filtered pair.
    #[serde(rename = "ESRPre")]
    EsrPre,
    /// Multi-resolution STFT magnitude loss.
    #[serde(rename = "MultiSpec")]
    MultiSpec,
}

impl LossKind {
    pub const ALL: [LossKind; 4] = [
        LossKind::Esr,
        LossKind::Dc,
        LossKind::EsrPre,
        LossKind::MultiSpec,
    ];

    /// Canonical recipe name.
    pub fn name(self) -> &'static str {
        match self {
            LossKind::Esr => "ESR",
            LossKind::Dc => "DC",
            LossKind::EsrPre => "ESRPre",
            LossKind::MultiSpec => "MultiSpec",
        }
    }

    pub fn needs_pre_emphasis(self) -> bool {
        matches!(self, LossKind::EsrPre)
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LossKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LossKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownMetric(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for kind in LossKind::ALL {
            assert_eq!(kind.name().parse::<LossKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "esr".parse::<LossKind>(),
            Err(ConfigError::UnknownMetric("esr".into()))
        );
        assert!("FOO".parse::<LossKind>().is_err());
    }

    #[test]
    fn test_only_esr_pre_needs_filter() {
        let needing: Vec<_> = LossKind::ALL
            .into_iter()
            .filter(|k| k.needs_pre_emphasis())
            .collect();
        assert_eq!(needing, vec![LossKind::EsrPre]);
    }
}
