//! Identify endpoint
//!
//! `POST /api/identify` with the raw image as the request body.
//!
//! | Outcome             | Status | Body                                         |
//! |---------------------|--------|----------------------------------------------|
//! | empty/unreadable    | 400    | empty                                        |
//! | no face detected    | 200    | `{"Error":"No face detected."}`              |
//! | no face recognized  | 200    | `{"Error":"No face recognized."}`            |
//! | only unknown people | 200    | `{"Error":"Only unknow person identified."}` |
//! | names resolved      | 200    | `[{"Name":"..."}]`                           |
//! | provider failure    | 502    | `{"error":{"code":"PROVIDER_ERROR",...}}`    |

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::ErrorPayload;
use crate::workflow::PipelineOutcome;
use crate::AppState;

/// POST /api/identify
pub async fn identify(State(state): State<AppState>, body: Body) -> ApiResult<Response> {
    let request_id = Uuid::new_v4();
    let span = info_span!("identify", %request_id);

    async move {
        let image = match axum::body::to_bytes(body, state.max_image_bytes).await {
            Ok(bytes) if !bytes.is_empty() => bytes,
            Ok(_) => {
                warn!("Rejecting empty request body");
                return Ok(StatusCode::BAD_REQUEST.into_response());
            }
            Err(e) => {
                warn!(error = %e, limit = state.max_image_bytes, "Rejecting unreadable request body");
                return Ok(StatusCode::BAD_REQUEST.into_response());
            }
        };

        info!(bytes = image.len(), "Identifying faces in image");
        outcome_response(state.pipeline.run(image).await)
    }
    .instrument(span)
    .await
}

/// Map a pipeline outcome to the HTTP response
pub fn outcome_response(outcome: PipelineOutcome) -> ApiResult<Response> {
    let response = match outcome {
        PipelineOutcome::NoFacesDetected => Json(ErrorPayload::NO_FACE_DETECTED).into_response(),
        PipelineOutcome::NoFacesRecognized => Json(ErrorPayload::NO_FACE_RECOGNIZED).into_response(),
        PipelineOutcome::OnlyUnknownPersons => {
            Json(ErrorPayload::ONLY_UNKNOWN_PERSONS).into_response()
        }
        PipelineOutcome::Success(people) => Json(people).into_response(),
        PipelineOutcome::ProviderFailure(e) => return Err(ApiError::Provider(e)),
    };
    Ok(response)
}

/// Build identify routes
pub fn identify_routes() -> Router<AppState> {
    Router::new().route("/api/identify", post(identify))
}
