//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::dispatcher::Analysis;
use crate::analysis::extract::extract_text;
use crate::analysis::render::RenderedReport;
use crate::analysis::report::AnalysisReport;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// Generated once per form page. Requests without one never collide.
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub input_chars: usize,
    pub truncated: bool,
    pub report: AnalysisReport,
    pub view: RenderedReport,
    pub html: String,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        let view = RenderedReport::from_report(&analysis.report);
        let html = view.to_html();

        Self {
            analysis_id: analysis.analysis_id,
            analyzed_at: analysis.analyzed_at,
            input_chars: analysis.input_chars,
            truncated: analysis.truncated,
            report: analysis.report,
            view,
            html,
        }
    }
}

/// In-flight key for a submission.
fn session_key(session_id: Option<String>) -> String {
    session_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Sends the product description to the model once and returns the parsed
/// report together with its rendered view. 409 while the same session already
/// has an analysis running.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let session = session_key(request.session_id);
    let analysis = state.dispatcher.dispatch(&session, &request.text).await?;

    Ok(Json(analysis.into()))
}

/// POST /api/v1/analyze/upload
///
/// Multipart form with a `file` field (.txt or .pdf) and an optional
/// `session_id`. The extracted text goes through the same pipeline as
/// `/api/v1/analyze`, including the length cap.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut session_id: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            "session_id" => {
                session_id = Some(field.text().await.unwrap_or_default());
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let text = extract_text(&file_name, bytes).await?;

    let session = session_key(session_id);
    let analysis = state.dispatcher.dispatch(&session, &text).await?;

    Ok(Json(analysis.into()))
}
