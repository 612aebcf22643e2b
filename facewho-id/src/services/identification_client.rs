//! Face identification client
//!
//! Matches one face id against the configured person group.

use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;

use super::{FaceApiConnection, IdentityProvider, ProviderError};
use crate::models::{IdentificationResult, IdentifyRequest};

/// Candidates requested per face unless configured otherwise
pub const DEFAULT_MAX_CANDIDATES: u32 = 1;

/// Minimum candidate confidence unless configured otherwise
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Identification endpoint client
pub struct IdentificationClient {
    connection: Arc<FaceApiConnection>,
    person_group_id: String,
    max_candidates: u32,
    confidence_threshold: f64,
}

impl IdentificationClient {
    pub fn new(connection: Arc<FaceApiConnection>, person_group_id: impl Into<String>) -> Self {
        Self {
            connection,
            person_group_id: person_group_id.into(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: u32) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_confidence_threshold(mut self, confidence_threshold: f64) -> Self {
        self.confidence_threshold = confidence_threshold;
        self
    }

    /// Request body for a single face
    pub fn build_request(&self, face_id: &str) -> IdentifyRequest {
        IdentifyRequest {
            person_group_id: self.person_group_id.clone(),
            face_ids: vec![face_id.to_string()],
            max_num_of_candidates_returned: self.max_candidates,
            confidence_threshold: self.confidence_threshold,
        }
    }
}

#[async_trait]
impl IdentityProvider for IdentificationClient {
    async fn identify(&self, face_id: &str) -> Result<Vec<IdentificationResult>, ProviderError> {
        debug!(face_id, person_group = %self.person_group_id, "Identifying face");

        let request = self
            .connection
            .request(Method::POST, "identify")
            .json(&self.build_request(face_id));

        let results: Vec<IdentificationResult> =
            self.connection.send_json("identify", request).await?;

        debug!(
            face_id,
            results = results.len(),
            candidates = results.first().map(|r| r.candidates.len()).unwrap_or(0),
            "Identification complete"
        );
        Ok(results)
    }
}
