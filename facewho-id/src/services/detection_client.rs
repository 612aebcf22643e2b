//! Face detection client
//!
//! POSTs raw image bytes to `detect` and returns the faces with their ids.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{header, Method};
use std::sync::Arc;
use tracing::debug;

use super::{FaceApiConnection, FaceProvider, ProviderError};
use crate::models::DetectedFace;

/// Detection endpoint client
pub struct DetectionClient {
    connection: Arc<FaceApiConnection>,
    detection_model: Option<String>,
    recognition_model: Option<String>,
}

impl DetectionClient {
    pub fn new(connection: Arc<FaceApiConnection>) -> Self {
        Self {
            connection,
            detection_model: None,
            recognition_model: None,
        }
    }

    /// Request a specific detection model (e.g. `detection_03`)
    pub fn with_detection_model(mut self, model: Option<String>) -> Self {
        self.detection_model = model;
        self
    }

    /// Request a specific recognition model
    ///
    /// Face ids are only comparable with a person group trained on the
    /// same recognition model.
    pub fn with_recognition_model(mut self, model: Option<String>) -> Self {
        self.recognition_model = model;
        self
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        let mut query = vec![("returnFaceId", "true")];
        if let Some(model) = &self.detection_model {
            query.push(("detectionModel", model.as_str()));
        }
        if let Some(model) = &self.recognition_model {
            query.push(("recognitionModel", model.as_str()));
        }
        query
    }
}

#[async_trait]
impl FaceProvider for DetectionClient {
    async fn detect_faces(&self, image: Bytes) -> Result<Vec<DetectedFace>, ProviderError> {
        debug!(bytes = image.len(), "Detecting faces");

        let request = self
            .connection
            .request(Method::POST, "detect")
            .query(&self.query())
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(image);

        let faces: Vec<DetectedFace> = self.connection.send_json("detect", request).await?;
        debug!(faces = faces.len(), "Detection complete");
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn connection() -> Arc<FaceApiConnection> {
        Arc::new(
            FaceApiConnection::new("http://127.0.0.1:9", "key", Duration::from_secs(1)).unwrap(),
        )
    }

    #[test]
    fn test_default_query_only_requests_face_ids() {
        let client = DetectionClient::new(connection());
        assert_eq!(client.query(), vec![("returnFaceId", "true")]);
    }

    #[test]
    fn test_query_includes_models_when_set() {
        let client = DetectionClient::new(connection())
            .with_detection_model(Some("detection_03".to_string()))
            .with_recognition_model(Some("recognition_04".to_string()));

        assert_eq!(
            client.query(),
            vec![
                ("returnFaceId", "true"),
                ("detectionModel", "detection_03"),
                ("recognitionModel", "recognition_04"),
            ]
        );
    }
}
