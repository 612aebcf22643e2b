//! Face API wire formats
//!
//! One plain record per endpoint payload. Field names follow the provider's
//! camelCase JSON.

use serde::{Deserialize, Serialize};

/// Face found by the detect endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedFace {
    /// Opaque face token, valid for one provider session
    pub face_id: String,
    pub face_rectangle: FaceRectangle,
}

/// Face bounding box in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct FaceRectangle {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

/// Body of the identify endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyRequest {
    pub person_group_id: String,
    pub face_ids: Vec<String>,
    pub max_num_of_candidates_returned: u32,
    pub confidence_threshold: f64,
}

/// Per-face identification answer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub face_id: String,
    /// Provider-ranked, highest confidence first
    #[serde(default)]
    pub candidates: Vec<IdentificationCandidate>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationCandidate {
    pub person_id: String,
    /// Match confidence (0.0 to 1.0)
    pub confidence: f64,
}

/// Person entry of a person group
///
/// `Default` is the zero record (empty name) used when a lookup is degraded.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(default)]
    pub person_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub persisted_face_ids: Vec<String>,
    #[serde(default)]
    pub user_data: Option<serde_json::Value>,
}
