//! Pipeline policies
//!
//! Two decisions the pipeline makes are configurable rather than hard-wired:
//! what to do when a face cannot be identified at all, and what to do when
//! the provider answers with a non-success status.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Handling of a face whose identification returned no result at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnrecognizedFacePolicy {
    /// Abort the whole request with "No face recognized."
    #[default]
    ShortCircuit,
    /// Skip the face and keep processing the remaining ones
    Skip,
}

/// Handling of a provider call that returned a non-success status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderFailurePolicy {
    /// Treat the call as an empty answer (no faces, no results, nameless person)
    #[default]
    Degrade,
    /// Stop the pipeline and report the failure
    Propagate,
}

/// Policy set applied by `IdentificationPipeline`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelinePolicy {
    pub unrecognized_face: UnrecognizedFacePolicy,
    pub provider_failure: ProviderFailurePolicy,
}

impl FromStr for UnrecognizedFacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short-circuit" => Ok(Self::ShortCircuit),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown unrecognized-face policy '{}' (expected short-circuit or skip)",
                other
            )),
        }
    }
}

impl fmt::Display for UnrecognizedFacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortCircuit => write!(f, "short-circuit"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for ProviderFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(Self::Degrade),
            "propagate" => Ok(Self::Propagate),
            other => Err(format!(
                "unknown provider-failure policy '{}' (expected degrade or propagate)",
                other
            )),
        }
    }
}

impl fmt::Display for ProviderFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degrade => write!(f, "degrade"),
            Self::Propagate => write!(f, "propagate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_preserve_short_circuit_and_degrade() {
        let policy = PipelinePolicy::default();
        assert_eq!(policy.unrecognized_face, UnrecognizedFacePolicy::ShortCircuit);
        assert_eq!(policy.provider_failure, ProviderFailurePolicy::Degrade);
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("skip".parse(), Ok(UnrecognizedFacePolicy::Skip));
        assert_eq!(" Short-Circuit ".parse(), Ok(UnrecognizedFacePolicy::ShortCircuit));
        assert_eq!("propagate".parse(), Ok(ProviderFailurePolicy::Propagate));
        assert!("retry".parse::<ProviderFailurePolicy>().is_err());
    }

    #[test]
    fn test_display_matches_parse() {
        for policy in [UnrecognizedFacePolicy::ShortCircuit, UnrecognizedFacePolicy::Skip] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
        for policy in [ProviderFailurePolicy::Degrade, ProviderFailurePolicy::Propagate] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }
}
