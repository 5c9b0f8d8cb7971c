//! OCR (Optical Character Recognition) pipeline
//!
//! Turns a photograph of an identity card into cleaned, script-aware text.
//!
//! # Architecture
//!
//! Three stages, composed by [`OcrPipeline`]:
//! - `preprocessing`: decode, grayscale, Otsu binarisation
//! - `engine`: `OcrEngine` trait, with `TesseractEngine` running local Tesseract via leptess
//! - `normalize`: Latin/Arabic cleanup of the raw OCR text
//!
//! The [`LanguageSelector`] picked by the caller drives both the OCR model and
//! the cleanup strategy.
//!
//! # Usage
//!
//! ```rust,ignore
//! let engine = Arc::new(TesseractEngine::new(&config.ocr)?);
//! let pipeline = OcrPipeline::new(engine, TextNormalizer::default());
//! let text = pipeline.run(&image_bytes, LanguageSelector::Arabic)?;
//! ```

mod engine;
mod language;
mod normalize;
mod pipeline;
mod preprocessing;

pub use engine::{ModelAvailability, OcrEngine, TesseractEngine};
pub use language::LanguageSelector;
pub use normalize::{normalize_arabic, normalize_latin, LineBreaks, NormalizedText, TextNormalizer};
pub use pipeline::{run_pipeline, OcrPipeline};
pub use preprocessing::{decode_image, preprocess, preprocess_bytes, ProcessedImage};
