use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CIN OCR API",
        version = "1.0.0",
        description = "Text extraction from identity card photographs (Latin, Arabic, combined).",
    ),
    paths(
        handlers::health::health_check,
        handlers::extractions::create_extraction,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        crate::ocr::LanguageSelector,
        dto::ExtractionResponse,
        handlers::health::HealthData,
        handlers::health::OcrStatus,
        handlers::health::ModelStatus,
    )),
    tags(
        (name = "health", description = "Health check and model availability"),
        (name = "extractions", description = "OCR text extraction"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
