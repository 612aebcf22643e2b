//! Data models
//!
//! - `face_api`: wire formats of the remote face recognition provider
//! - `response`: JSON payloads returned by the identify endpoint

pub mod face_api;
pub mod response;

pub use face_api::{
    DetectedFace, FaceRectangle, IdentificationCandidate, IdentificationResult, IdentifyRequest,
    PersonRecord,
};
pub use response::{ErrorPayload, ResolvedPerson};
