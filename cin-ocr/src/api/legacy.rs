//! Routes kept for clients of the original form-upload service.
//!
//! Each route fixes the selector and answers with a bare one-key object.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::ocr::LanguageSelector;

use super::extraction::{extract_text, read_image_upload};
use super::AppState;

pub(crate) fn legacy_router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_latin))
        .route("/upload_arabic", post(upload_arabic))
        .route("/upload_combined", post(upload_combined))
}

/// Response key for each selector.
pub(crate) fn response_key(selector: LanguageSelector) -> &'static str {
    match selector {
        LanguageSelector::Latin => "data",
        LanguageSelector::Arabic => "data_arabic",
        LanguageSelector::Combined => "data_combined",
    }
}

async fn upload_latin(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>> {
    handle_upload(state, multipart, LanguageSelector::Latin).await
}

async fn upload_arabic(State(state): State<AppState>, multipart: Multipart) -> Result<Json<Value>> {
    handle_upload(state, multipart, LanguageSelector::Arabic).await
}

async fn upload_combined(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>> {
    handle_upload(state, multipart, LanguageSelector::Combined).await
}

async fn handle_upload(
    state: AppState,
    mut multipart: Multipart,
    selector: LanguageSelector,
) -> Result<Json<Value>> {
    let upload = read_image_upload(&mut multipart, state.config.upload.max_bytes).await?;
    let text = extract_text(&state, upload, selector).await?;

    let mut body = Map::new();
    body.insert(
        response_key(selector).to_string(),
        Value::String(text.into_string()),
    );
    Ok(Json(Value::Object(body)))
}
