use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::docx::DocxError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Template not found at {0}")]
    TemplateNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Document error: {0}")]
    Document(#[from] DocxError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Document(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::TemplateNotFound(path) => tracing::warn!("Template not found: {path}"),
            AppError::Validation(msg) => tracing::warn!("Rejected request: {msg}"),
            AppError::Document(e) => tracing::error!("Error generating DOCX: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_template_not_found_body() {
        let (status, body) = body_of(AppError::TemplateNotFound("t.docx".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Template not found at t.docx"}));
    }

    #[tokio::test]
    async fn test_document_error_is_500_with_message() {
        let err = AppError::from(DocxError::MissingPart("word/document.xml".to_string()));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Document error: Missing part 'word/document.xml' in DOCX package"
        );
    }

    #[test]
    fn test_validation_status() {
        assert_eq!(
            AppError::Validation("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
