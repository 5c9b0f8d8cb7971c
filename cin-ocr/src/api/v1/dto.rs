use serde::{Deserialize, Serialize};

use crate::ocr::LanguageSelector;

/// Result of `POST /api/v1/extractions`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExtractionResponse {
    pub language: LanguageSelector,
    /// Normalised text. Contains `\n` only when line breaks are preserved.
    pub text: String,
}
