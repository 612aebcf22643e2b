//! Provider seams
//!
//! The identification pipeline talks to the face recognition provider
//! through three traits, one per remote endpoint. The HTTP clients in this
//! module tree implement them against the Face API; tests substitute fakes.

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

use crate::models::{DetectedFace, IdentificationResult, PersonRecord};

/// Failure of a single provider call
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Success status but the body did not match the wire format
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProviderError {
    /// Non-success status, the only failure the degrade policy may absorb
    pub fn is_status(&self) -> bool {
        matches!(self, ProviderError::Status { .. })
    }
}

/// Face detection endpoint
#[async_trait]
pub trait FaceProvider: Send + Sync {
    /// Detect faces in raw image bytes, provider order preserved
    async fn detect_faces(&self, image: Bytes) -> Result<Vec<DetectedFace>, ProviderError>;
}

/// Face identification endpoint
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Identify one face against the configured person group
    async fn identify(&self, face_id: &str) -> Result<Vec<IdentificationResult>, ProviderError>;
}

/// Person lookup endpoint
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Fetch a person of the configured person group
    async fn get_person(&self, person_id: &str) -> Result<PersonRecord, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_status_errors_are_status() {
        assert!(ProviderError::Status {
            status: 429,
            body: String::new()
        }
        .is_status());
        assert!(!ProviderError::Network("timed out".to_string()).is_status());
        assert!(!ProviderError::Parse("expected array".to_string()).is_status());
    }

    #[test]
    fn test_status_error_message() {
        let err = ProviderError::Status {
            status: 401,
            body: "Access denied".to_string(),
        };
        assert_eq!(err.to_string(), "Provider returned 401: Access denied");
    }
}
