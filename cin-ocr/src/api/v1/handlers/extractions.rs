use axum::extract::{Multipart, State};

use crate::api::extraction::{extract_text, read_image_upload};
use crate::api::state::AppState;
use crate::api::v1::dto::ExtractionResponse;
use crate::api::v1::response::{ApiError, ApiResponse};

/// `POST /api/v1/extractions`
///
/// The `language` field is validated before the image is written to disk or
/// handed to the OCR engine.
#[utoipa::path(
    post,
    path = "/api/v1/extractions",
    tag = "extractions",
    operation_id = "extractions.create",
    request_body(content_type = "multipart/form-data", content = String, description = "Card photograph in `image`, optional `language` field (latin, arabic, combined)"),
    responses(
        (status = 200, description = "Text extracted", body = ExtractionResponse),
        (status = 400, description = "Invalid upload or unknown language", body = ApiError),
        (status = 503, description = "OCR backend or language model unavailable", body = ApiError),
        (status = 504, description = "OCR timed out", body = ApiError),
    )
)]
pub async fn create_extraction(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResponse<ExtractionResponse> {
    let upload = match read_image_upload(&mut multipart, state.config.upload.max_bytes).await {
        Ok(upload) => upload,
        Err(e) => return e.into(),
    };

    let selector = match upload.selector() {
        Ok(selector) => selector,
        Err(e) => return e.into(),
    };

    match extract_text(&state, upload, selector).await {
        Ok(text) => ApiResponse::success(ExtractionResponse {
            language: selector,
            text: text.into_string(),
        }),
        Err(e) => e.into(),
    }
}
