//! Multipart intake and off-runtime OCR shared by the v1 and legacy routes.

use std::path::PathBuf;
use std::time::Duration;

use axum::extract::Multipart;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};
use crate::ocr::{LanguageSelector, NormalizedText};
use crate::upload::{sanitize_filename, TransientUpload};

use super::AppState;

/// Image part of a multipart request plus the optional `language` field.
#[derive(Debug)]
pub(crate) struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub language: Option<String>,
}

impl ImageUpload {
    /// Selector from the `language` field; absent or blank means Latin.
    pub fn selector(&self) -> Result<LanguageSelector> {
        match self.language.as_deref().map(str::trim) {
            None | Some("") => Ok(LanguageSelector::Latin),
            Some(tag) => tag.parse(),
        }
    }
}

pub(crate) async fn read_image_upload(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<ImageUpload> {
    let mut image: Option<(String, Vec<u8>)> = None;
    let mut language: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(PipelineError::Validation(format!(
                    "Invalid multipart body: {e}"
                )))
            }
        };
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    PipelineError::Validation(format!("Failed to read image: {e}"))
                })?;
                image = Some((file_name, bytes.to_vec()));
            }
            "language" => {
                let text = field.text().await.map_err(|e| {
                    PipelineError::Validation(format!("Invalid language field: {e}"))
                })?;
                language = Some(text);
            }
            _ => {}
        }
    }

    let (file_name, bytes) =
        image.ok_or_else(|| PipelineError::Validation("No image was sent".to_string()))?;

    if file_name.is_empty() {
        return Err(PipelineError::Validation("No file selected".to_string()));
    }
    if bytes.is_empty() {
        return Err(PipelineError::Validation("Uploaded image is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(PipelineError::Validation(format!(
            "Image too large: {} bytes (max {max_bytes} bytes)",
            bytes.len()
        )));
    }

    Ok(ImageUpload {
        file_name,
        bytes,
        language,
    })
}

/// Store the upload, run the pipeline and remove the file again, all on a
/// blocking worker under the configured OCR deadline. On timeout the worker
/// keeps running and still removes its file.
pub(crate) async fn extract_text(
    state: &AppState,
    upload: ImageUpload,
    selector: LanguageSelector,
) -> Result<NormalizedText> {
    let dir = PathBuf::from(&state.config.upload.dir);
    let pipeline = state.pipeline.clone();
    let timeout_secs = state.config.ocr.timeout_secs;
    let file = sanitize_filename(&upload.file_name);
    let size = upload.bytes.len();

    let task = tokio::task::spawn_blocking(move || -> Result<NormalizedText> {
        let transient = TransientUpload::create(&dir, &upload.file_name, &upload.bytes)?;
        drop(upload);
        let result = pipeline.run_file(transient.path(), selector);
        if let Err(e) = transient.close() {
            warn!(error = %e, "Failed to remove transient upload");
        }
        result
    });

    let text = match tokio::time::timeout(Duration::from_secs(timeout_secs), task).await {
        Ok(joined) => {
            joined.map_err(|e| PipelineError::Internal(format!("OCR task failed: {e}")))??
        }
        Err(_) => {
            warn!(%selector, %file, timeout_secs, "OCR deadline exceeded");
            return Err(PipelineError::Timeout(timeout_secs));
        }
    };

    info!(
        %selector,
        %file,
        size,
        chars = text.as_str().chars().count(),
        "Text extracted"
    );

    Ok(text)
}
