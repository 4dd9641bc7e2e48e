use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrub_core::{ScrubError, ScrubRequest, ScrubResponse};
use serde_json::json;
use tracing::debug;

use crate::server::AppState;

/// Body of every 500 response. Engine causes are only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// A failed request, rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ScrubError);

impl From<ScrubError> for ApiError {
    fn from(error: ScrubError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.is_client_error() {
            debug!(error = %self.0, "Rejected request");
            let status = match self.0 {
                ScrubError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                _ => StatusCode::BAD_REQUEST,
            };
            (status, Json(json!({ "error": self.0.to_string() }))).into_response()
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
            )
                .into_response()
        }
    }
}

/// POST /api/endpoint - Redact PII from text or an image
///
/// The body is taken raw so malformed JSON and oversized bodies get the
/// same error shape as every other client mistake.
pub async fn redact(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ScrubResponse>, ApiError> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ScrubError::BodyTooLarge(state.max_body_bytes)
        } else {
            ScrubError::InvalidBody
        }
    })?;
    let request = ScrubRequest::from_json(&body)?;

    let anonymized = state.scrubber.process(&request).await?;

    Ok(Json(ScrubResponse::ok(anonymized)))
}

/// GET /health - Liveness probe; checks no dependencies
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
