use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("OCR backend error: {0}")]
    OcrBackend(String),

    #[error("Invalid language selector: {0}")]
    InvalidSelector(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// True for failures caused by the caller's input rather than the deployment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::ImageDecode(_)
                | PipelineError::InvalidSelector(_)
                | PipelineError::Validation(_)
        )
    }
}

/// Plain `{"error", "code"}` body used by the legacy upload routes.
impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PipelineError::ImageDecode(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PipelineError::InvalidSelector(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PipelineError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PipelineError::OcrBackend(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            PipelineError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            PipelineError::Io(e) => {
                tracing::error!(error = %e, "IO error while handling upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            PipelineError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error while handling upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
