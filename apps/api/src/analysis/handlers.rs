//! Axum route handlers for the Analysis API.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::analysis::gateway::{analyze, AnalysisRequest};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /analyze_resume
///
/// Multipart form fields: `file` (the resume PDF, required) and
/// `job_description` (required; empty degrades model quality but is accepted).
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read file field: {e}")))?;
                file = Some(data);
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("failed to read job_description field: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("missing required field 'file'".into()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::BadRequest("missing required field 'job_description'".into()))?;

    let resume_text = state.extractor.extract(&file).await?;
    if resume_text.trim().is_empty() {
        return Err(AppError::UnreadableDocument);
    }
    info!("extracted {} chars of resume text", resume_text.len());

    let request = AnalysisRequest {
        resume_text,
        job_description,
    };
    let analysis = analyze(state.model.as_ref(), &request).await?;

    Ok(Json(analysis))
}
