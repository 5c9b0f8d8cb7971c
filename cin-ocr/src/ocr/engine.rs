use std::collections::HashMap;

use leptess::{LepTess, Variable};
use tracing::{info, warn};

use crate::config::OcrConfig;
use crate::error::{PipelineError, Result};

use super::{LanguageSelector, ProcessedImage};

/// Highest page segmentation mode Tesseract accepts (raw line, bypassing hacks).
const MAX_PAGE_SEG_MODE: u8 = 13;

/// Whether the model(s) behind a selector can be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAvailability {
    Ready { languages: String },
    Unavailable { reason: String },
}

impl ModelAvailability {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelAvailability::Ready { .. })
    }
}

/// OCR backend seam. Implementations must be callable from several worker
/// threads at once.
pub trait OcrEngine: Send + Sync {
    fn name(&self) -> &str;

    fn availability(&self, selector: LanguageSelector) -> ModelAvailability;

    /// Recognise text in a binarised image. An image without text yields an
    /// empty string, not an error.
    fn recognize(&self, image: &ProcessedImage, selector: LanguageSelector) -> Result<String>;
}

/// Local Tesseract through leptess.
///
/// Models are probed once at construction; a fresh `LepTess` is created per
/// call so concurrent recognitions never share backend state.
pub struct TesseractEngine {
    tessdata_path: Option<String>,
    page_seg_mode: u8,
    models: HashMap<LanguageSelector, ModelAvailability>,
}

fn create_tesseract(
    tessdata_path: Option<&str>,
    languages: &str,
) -> std::result::Result<LepTess, String> {
    LepTess::new(tessdata_path, languages).map_err(|e| e.to_string())
}

impl TesseractEngine {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        if config.page_seg_mode > MAX_PAGE_SEG_MODE {
            return Err(PipelineError::OcrBackend(format!(
                "Invalid page segmentation mode {} (expected 0-{MAX_PAGE_SEG_MODE})",
                config.page_seg_mode
            )));
        }

        let models = LanguageSelector::ALL
            .into_iter()
            .map(|selector| {
                let languages =
                    selector.tesseract_languages(&config.latin_model, &config.arabic_model);
                let status = match create_tesseract(config.tessdata_path.as_deref(), &languages) {
                    Ok(_) => {
                        info!(%selector, languages = %languages, "Tesseract model loaded");
                        ModelAvailability::Ready { languages }
                    }
                    Err(e) => {
                        let reason =
                            format!("Tesseract model '{languages}' not available: {e}");
                        warn!(%selector, "{}", reason);
                        ModelAvailability::Unavailable { reason }
                    }
                };
                (selector, status)
            })
            .collect();

        Ok(Self {
            tessdata_path: config.tessdata_path.clone(),
            page_seg_mode: config.page_seg_mode,
            models,
        })
    }

    pub fn is_available(&self) -> bool {
        self.models.values().any(ModelAvailability::is_ready)
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn availability(&self, selector: LanguageSelector) -> ModelAvailability {
        self.models
            .get(&selector)
            .cloned()
            .unwrap_or_else(|| ModelAvailability::Unavailable {
                reason: format!("No model configured for {selector}"),
            })
    }

    fn recognize(&self, image: &ProcessedImage, selector: LanguageSelector) -> Result<String> {
        let languages = match self.availability(selector) {
            ModelAvailability::Ready { languages } => languages,
            ModelAvailability::Unavailable { reason } => {
                return Err(PipelineError::OcrBackend(reason))
            }
        };

        let png = image.to_png()?;

        let mut lt = create_tesseract(self.tessdata_path.as_deref(), &languages)
            .map_err(|e| PipelineError::OcrBackend(format!("Failed to load '{languages}': {e}")))?;
        lt.set_variable(Variable::TesseditPagesegMode, &self.page_seg_mode.to_string())
            .map_err(|e| {
                PipelineError::OcrBackend(format!("Failed to set page segmentation mode: {e}"))
            })?;
        lt.set_image_from_mem(&png)
            .map_err(|e| PipelineError::OcrBackend(format!("Failed to set image: {e}")))?;

        lt.get_utf8_text()
            .map_err(|e| PipelineError::OcrBackend(format!("Failed to extract text: {e}")))
    }
}
