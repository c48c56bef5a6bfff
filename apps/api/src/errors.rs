use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Every pipeline stage returns `Result<T, AppError>`; the mapping to HTTP
/// status happens here and nowhere else.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(
        "Could not extract text from PDF or image. Make sure your resume contains readable text."
    )]
    UnreadableDocument,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// The model's output failed JSON parsing. Carries the raw text so
    /// operators can inspect schema drift.
    #[error("Model output is not valid JSON")]
    ModelOutputMalformed { raw: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Document processing error: {0}")]
    Extraction(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let (status, body) = match self {
            AppError::UnreadableDocument => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            AppError::ModelOutputMalformed { raw } => {
                tracing::error!("Model output failed JSON parse; raw length {}", raw.len());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": message, "raw_response": raw }),
                )
            }
            AppError::Llm(ref msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            AppError::Extraction(ref msg) => {
                tracing::error!("Extraction error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}
