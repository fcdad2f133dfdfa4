//! Axum route handler for review document generation.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::review::payload::{GenerateRequest, ReviewInput};
use crate::review::renderer::{content_disposition, download_filename, render_review, DOCX_MIME};
use crate::state::AppState;

/// POST /generate
///
/// Fills the configured template with the review in the request body and
/// returns it as a `.docx` download.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = parse_request(&body)?;
    let input = ReviewInput::from(request);

    let template = state.config.template_path.clone();
    if !tokio::fs::try_exists(&template).await.unwrap_or(false) {
        return Err(AppError::TemplateNotFound(template.display().to_string()));
    }

    info!(
        "Generating review for '{}' ({}): {} evaluations, self-assessment: {}",
        input.evaluado,
        input.period,
        input.evaluations.len(),
        input.self_assessment.is_some()
    );

    let filename = download_filename(&input.evaluado, &input.period);
    let headings = state.headings.clone();
    let document = tokio::task::spawn_blocking(move || render_review(&template, &input, &headings))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    info!("Generated '{filename}' ({} bytes)", document.len());

    let disposition = HeaderValue::from_str(&content_disposition(&filename))
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

/// An empty body is an empty review; anything else must be a JSON object.
fn parse_request(body: &[u8]) -> Result<GenerateRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateRequest::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Request body is not valid JSON: {e}")))?;
    match value {
        Value::Null => Ok(GenerateRequest::default()),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}"))),
        _ => Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        )),
    }
}
