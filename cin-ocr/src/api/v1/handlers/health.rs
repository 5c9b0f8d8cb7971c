use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;
use crate::ocr::{LanguageSelector, ModelAvailability};

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    /// `ok` when every language model loads, `degraded` otherwise.
    pub status: String,
    pub version: String,
    pub ocr: OcrStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OcrStatus {
    pub engine: String,
    pub models: Vec<ModelStatus>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ModelStatus {
    pub language: LanguageSelector,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let engine = state.pipeline.engine();

    let models: Vec<ModelStatus> = LanguageSelector::ALL
        .into_iter()
        .map(|language| match engine.availability(language) {
            ModelAvailability::Ready { languages } => ModelStatus {
                language,
                status: "ready".to_string(),
                languages: Some(languages),
                reason: None,
            },
            ModelAvailability::Unavailable { reason } => ModelStatus {
                language,
                status: "unavailable".to_string(),
                languages: None,
                reason: Some(reason),
            },
        })
        .collect();

    let status = if models.iter().all(|m| m.status == "ready") {
        "ok"
    } else {
        "degraded"
    };

    ApiResponse::success(HealthData {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ocr: OcrStatus {
            engine: engine.name().to_string(),
            models,
        },
    })
}
