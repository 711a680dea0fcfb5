//! Study-processing route handler.

use axum::{Json, body::Bytes, http::StatusCode};
use tracing::instrument;

use crate::models::study::{StudyRequest, StudyResponse};
use crate::services;

/// Validate a study request and return the matching mock dataset.
///
/// POST /study/process
///
/// The body is read as raw bytes so that missing or wrong content types and
/// unparsable JSON are reported as validation failures (400) rather than
/// extractor rejections.
#[instrument(skip_all)]
pub async fn process(body: Bytes) -> (StatusCode, Json<StudyResponse>) {
    match StudyRequest::from_body(&body) {
        Ok(request) => {
            tracing::info!(action = %request.action, url = %request.url, "Processing study request");
            (StatusCode::OK, Json(services::study::process(&request)))
        }
        Err(errors) => {
            tracing::debug!(%errors, "Rejected study request");
            (
                StatusCode::BAD_REQUEST,
                Json(StudyResponse::invalid(errors)),
            )
        }
    }
}

/// Answer any method other than POST with the study error envelope.
pub async fn method_not_allowed() -> (StatusCode, Json<StudyResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(StudyResponse::method_not_allowed()),
    )
}
