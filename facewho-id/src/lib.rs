//! facewho-id library interface
//!
//! Identifies the people in an uploaded image by chaining three Face API
//! calls: detect, identify, person lookup.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::services::{
    DetectionClient, FaceApiConnection, IdentificationClient, PersonDirectoryClient, ProviderError,
};
use crate::workflow::IdentificationPipeline;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Detection → identification → lookup pipeline
    pub pipeline: Arc<IdentificationPipeline>,
    /// Largest accepted request body
    pub max_image_bytes: usize,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: Arc<IdentificationPipeline>, max_image_bytes: usize) -> Self {
        Self {
            pipeline,
            max_image_bytes,
            startup_time: Utc::now(),
        }
    }

    /// Wire the Face API clients described by `config`
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ProviderError> {
        let connection = Arc::new(FaceApiConnection::new(
            config.endpoint.clone(),
            config.subscription_key.clone(),
            config.request_timeout,
        )?);

        let detection = DetectionClient::new(connection.clone())
            .with_detection_model(config.recognition.detection_model.clone())
            .with_recognition_model(config.recognition.recognition_model.clone());

        let identification =
            IdentificationClient::new(connection.clone(), config.person_group_id.clone())
                .with_max_candidates(config.recognition.max_candidates)
                .with_confidence_threshold(config.recognition.confidence_threshold);

        let directory = PersonDirectoryClient::new(connection, config.person_group_id.clone());

        let pipeline = IdentificationPipeline::new(
            Arc::new(detection),
            Arc::new(identification),
            Arc::new(directory),
            config.policy,
        );

        Ok(Self::new(Arc::new(pipeline), config.max_image_bytes))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::identify_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
