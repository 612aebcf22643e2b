//! Identify endpoint payloads

use serde::Serialize;

/// Name resolved for one identified face
///
/// Serialized as `{"Name": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPerson {
    #[serde(rename = "Name")]
    pub name: String,
}

/// Domain error payload, `{"Error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    #[serde(rename = "Error")]
    pub error: &'static str,
}

impl ErrorPayload {
    pub const NO_FACE_DETECTED: Self = Self {
        error: "No face detected.",
    };
    pub const NO_FACE_RECOGNIZED: Self = Self {
        error: "No face recognized.",
    };
    // Wording is part of the public contract, including the spelling.
    pub const ONLY_UNKNOWN_PERSONS: Self = Self {
        error: "Only unknow person identified.",
    };
}
