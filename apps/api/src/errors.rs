use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extract::ExtractError;
use crate::analysis::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Completion endpoint or reply failure. The message is shown to the user.
    #[error("Analysis failed: {0}")]
    Analysis(String),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match &err {
            AnalysisError::EmptyInput => AppError::Validation(err.user_message()),
            AnalysisError::Busy => AppError::Conflict(err.user_message()),
            AnalysisError::Completion(_) | AnalysisError::Reply(_) => {
                AppError::Analysis(err.user_message())
            }
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {msg}");
                (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FALLBACK_MESSAGE;
    use crate::llm_client::LlmError;

    #[test]
    fn test_analysis_errors_map_to_statuses() {
        let cases = [
            (AnalysisError::EmptyInput, StatusCode::BAD_REQUEST),
            (AnalysisError::Busy, StatusCode::CONFLICT),
            (
                AnalysisError::Completion(LlmError::EmptyContent),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_empty_content_surfaces_fallback() {
        let err = AppError::from(AnalysisError::Completion(LlmError::EmptyContent));
        match err {
            AppError::Analysis(msg) => assert_eq!(msg, FALLBACK_MESSAGE),
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_unreadable_upload_is_a_validation_error() {
        let err = AppError::from(ExtractError::NoText("PDF"));
        match &err {
            AppError::Validation(msg) => assert_eq!(msg, "PDF has no readable text"),
            other => panic!("unexpected: {other}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
