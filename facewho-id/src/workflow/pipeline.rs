//! Detection → identification → person lookup pipeline
//!
//! Runs strictly sequentially for one image:
//! 1. Detect faces. None → `NoFacesDetected`.
//! 2. For each face in provider order, identify it.
//!    - No identification result: short-circuit with `NoFacesRecognized`
//!      (or skip, per `UnrecognizedFacePolicy`).
//!    - Result with no candidates: skip the face.
//!    - Otherwise look up the top-ranked candidate and keep its name.
//! 3. Nothing kept → `OnlyUnknownPersons`, else `Success` in detection order.
//!
//! Logging goes to whatever span the caller runs the pipeline in.

use axum::body::Bytes;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::policy::{PipelinePolicy, ProviderFailurePolicy, UnrecognizedFacePolicy};
use crate::models::ResolvedPerson;
use crate::services::{FaceProvider, IdentityProvider, PersonDirectory, ProviderError};

/// Result of running the pipeline on one image
#[derive(Debug)]
pub enum PipelineOutcome {
    NoFacesDetected,
    NoFacesRecognized,
    OnlyUnknownPersons,
    Success(Vec<ResolvedPerson>),
    /// Provider failure that no policy absorbed
    ProviderFailure(ProviderError),
}

/// Sequences the three provider calls for each request
pub struct IdentificationPipeline {
    faces: Arc<dyn FaceProvider>,
    identities: Arc<dyn IdentityProvider>,
    directory: Arc<dyn PersonDirectory>,
    policy: PipelinePolicy,
}

impl IdentificationPipeline {
    pub fn new(
        faces: Arc<dyn FaceProvider>,
        identities: Arc<dyn IdentityProvider>,
        directory: Arc<dyn PersonDirectory>,
        policy: PipelinePolicy,
    ) -> Self {
        Self {
            faces,
            identities,
            directory,
            policy,
        }
    }

    /// Run the pipeline on raw image bytes
    pub async fn run(&self, image: Bytes) -> PipelineOutcome {
        let outcome = match self.resolve(image).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Identification aborted by provider failure");
                PipelineOutcome::ProviderFailure(e)
            }
        };

        match &outcome {
            PipelineOutcome::Success(people) => info!(people = people.len(), "Faces identified"),
            other => info!(outcome = ?other, "Identification finished without names"),
        }
        outcome
    }

    async fn resolve(&self, image: Bytes) -> Result<PipelineOutcome, ProviderError> {
        let faces = self.settle("detect", self.faces.detect_faces(image).await)?;
        if faces.is_empty() {
            return Ok(PipelineOutcome::NoFacesDetected);
        }

        let mut resolved = Vec::with_capacity(faces.len());

        for (index, face) in faces.iter().enumerate() {
            let results = self.settle("identify", self.identities.identify(&face.face_id).await)?;

            let Some(result) = results.first() else {
                match self.policy.unrecognized_face {
                    UnrecognizedFacePolicy::ShortCircuit => {
                        debug!(index, face_id = %face.face_id, "Face not recognized, stopping");
                        return Ok(PipelineOutcome::NoFacesRecognized);
                    }
                    UnrecognizedFacePolicy::Skip => {
                        debug!(index, face_id = %face.face_id, "Face not recognized, skipping");
                        continue;
                    }
                }
            };

            // Provider ranking is trusted: candidate 0 is the match.
            let Some(candidate) = result.candidates.first() else {
                debug!(index, face_id = %face.face_id, "No candidate above threshold");
                continue;
            };

            let person = self.settle(
                "get_person",
                self.directory.get_person(&candidate.person_id).await,
            )?;

            debug!(
                index,
                person_id = %candidate.person_id,
                confidence = candidate.confidence,
                "Face resolved"
            );
            resolved.push(ResolvedPerson { name: person.name });
        }

        if resolved.is_empty() {
            Ok(PipelineOutcome::OnlyUnknownPersons)
        } else {
            Ok(PipelineOutcome::Success(resolved))
        }
    }

    /// Apply the provider-failure policy to one call result
    ///
    /// Only status failures may degrade to an empty value. Network and
    /// parse failures always propagate.
    fn settle<T: Default>(
        &self,
        step: &'static str,
        result: Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_status() && self.policy.provider_failure == ProviderFailurePolicy::Degrade => {
                warn!(step, error = %e, "Provider call failed, continuing with empty result");
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }
}
