#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use cin_ocr::error::{PipelineError, Result};
use cin_ocr::ocr::{LanguageSelector, ModelAvailability, OcrEngine, ProcessedImage};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Encode an image into the given container format.
pub fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut output = Vec::new();
    img.write_to(&mut Cursor::new(&mut output), format)
        .unwrap_or_else(|e| panic!("Failed to encode {format:?}: {e}"));
    output
}

/// Light card background crossed by dark vertical strokes.
pub fn card_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if x % 12 < 3 && (height / 4..3 * height / 4).contains(&y) {
            Rgb([25, 25, 35])
        } else {
            Rgb([225, 220, 205])
        }
    }))
}

pub fn card_png() -> Vec<u8> {
    encode(&card_image(120, 48), ImageFormat::Png)
}

/// Engine that returns a fixed raw string, as Tesseract would.
pub struct ScriptedEngine {
    pub text: String,
}

impl ScriptedEngine {
    pub fn shared(text: &str) -> Arc<dyn OcrEngine> {
        Arc::new(Self {
            text: text.to_string(),
        })
    }
}

impl OcrEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn availability(&self, selector: LanguageSelector) -> ModelAvailability {
        ModelAvailability::Ready {
            languages: selector.tesseract_languages("eng", "ara"),
        }
    }

    fn recognize(&self, _image: &ProcessedImage, _selector: LanguageSelector) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Engine whose models never loaded.
pub struct UnavailableEngine;

impl OcrEngine for UnavailableEngine {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn availability(&self, _selector: LanguageSelector) -> ModelAvailability {
        ModelAvailability::Unavailable {
            reason: "no traineddata".to_string(),
        }
    }

    fn recognize(&self, _image: &ProcessedImage, _selector: LanguageSelector) -> Result<String> {
        Err(PipelineError::OcrBackend("no traineddata".to_string()))
    }
}
