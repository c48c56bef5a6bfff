//! Analyzer gateway — formats an extraction result and a job description into
//! the fixed instruction template, relays it to the model, and parses the
//! output as JSON. Nothing beyond well-formedness is validated; the schema
//! lives in the prompt contract.

use serde_json::Value;
use tracing::warn;

use crate::analysis::prompts::ANALYSIS_PROMPT_TEMPLATE;
use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;

/// Pairing of extracted resume text and the target job description.
/// Immutable once constructed; consumed by a single `analyze` call.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Substitutes both strings into the instruction template. The resume text is
/// forwarded verbatim — no truncation, no sanitization.
pub fn build_prompt(request: &AnalysisRequest) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_description}", &request.job_description)
        .replace("{resume_text}", &request.resume_text)
}

/// Submits the assembled prompt and parses the model's raw output.
/// Parse failure is reported as a distinct error carrying the raw text.
pub async fn analyze(
    model: &dyn GenerativeBackend,
    request: &AnalysisRequest,
) -> Result<Value, AppError> {
    let prompt = build_prompt(request);

    let raw = model
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("analysis call failed: {e}")))?;

    match serde_json::from_str::<Value>(&raw) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("model output failed JSON parse: {e}");
            Err(AppError::ModelOutputMalformed { raw })
        }
    }
}
