use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_batch, analyze_profile, AnalysisResult};
use crate::errors::AppError;
use crate::export::{self, ExportFormat};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub profile_text: String,
}

#[derive(Serialize)]
pub struct BatchResponse {
    pub count: usize,
    pub results: Vec<AnalysisResult>,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    pub results: Vec<AnalysisResult>,
    pub format: ExportFormat,
    /// True when exporting a batch run; only changes the download filename.
    #[serde(default)]
    pub batch: bool,
}

/// POST /api/v1/analyze
/// One profile in, one judgment out. An API failure here surfaces as an
/// error response for the caller to display.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if req.profile_text.trim().is_empty() {
        return Err(AppError::Validation(
            "profile_text must not be empty".to_string(),
        ));
    }
    let result = analyze_profile(&state.llm, &req.profile_text).await?;
    Ok(Json(result))
}

/// POST /api/v1/analyze/batch
/// Multipart upload of a plain-text file ('file' field) with profiles
/// separated by `===PROFILE===`. Per-profile failures do not abort the batch.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let mut content: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| AppError::Validation("Uploaded file is not valid UTF-8".to_string()))?;
            content = Some(text);
        }
    }

    let content =
        content.ok_or_else(|| AppError::Validation("Missing 'file' field in upload".to_string()))?;

    let results = analyze_batch(&state.llm, &content).await;
    Ok(Json(BatchResponse {
        count: results.len(),
        results,
    }))
}

/// POST /api/v1/export
/// Renders a result set as CSV or TSV and returns it as a file attachment.
/// Pure formatting, no LLM involvement.
pub async fn handle_export(Json(req): Json<ExportRequest>) -> Result<impl IntoResponse, AppError> {
    let body = export::render(&req.results, req.format);
    let headers = [
        (
            header::CONTENT_TYPE,
            req.format.content_type().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                req.format.file_name(req.batch)
            ),
        ),
    ];
    Ok((headers, body))
}
