use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

use super::{preprocess_bytes, LanguageSelector, NormalizedText, OcrEngine, TextNormalizer};

/// Image bytes in, cleaned text out.
///
/// Stateless per call; clones share the engine and can run on separate
/// worker threads without coordination.
#[derive(Clone)]
pub struct OcrPipeline {
    engine: Arc<dyn OcrEngine>,
    normalizer: TextNormalizer,
}

impl OcrPipeline {
    pub fn new(engine: Arc<dyn OcrEngine>, normalizer: TextNormalizer) -> Self {
        Self { engine, normalizer }
    }

    pub fn engine(&self) -> &dyn OcrEngine {
        self.engine.as_ref()
    }

    pub fn normalizer(&self) -> TextNormalizer {
        self.normalizer
    }

    pub fn run(&self, image_bytes: &[u8], selector: LanguageSelector) -> Result<NormalizedText> {
        let processed = preprocess_bytes(image_bytes)?;
        let raw = self.engine.recognize(&processed, selector)?;
        let text = self.normalizer.normalize(&raw, selector);

        debug!(
            %selector,
            engine = self.engine.name(),
            raw_len = raw.len(),
            normalized_len = text.as_str().len(),
            "OCR pipeline finished"
        );

        Ok(text)
    }

    /// Like [`run`](Self::run) with an unparsed selector tag, which is
    /// validated before the image is touched.
    pub fn run_tagged(&self, image_bytes: &[u8], tag: &str) -> Result<NormalizedText> {
        let selector: LanguageSelector = tag.parse()?;
        self.run(image_bytes, selector)
    }

    /// Reads the image from `path`. The file is left in place; removing it is
    /// the caller's job.
    pub fn run_file(&self, path: &Path, selector: LanguageSelector) -> Result<NormalizedText> {
        let bytes = std::fs::read(path)?;
        self.run(&bytes, selector)
    }
}

/// One-shot pipeline run with the default normaliser.
pub fn run_pipeline(
    engine: Arc<dyn OcrEngine>,
    image_bytes: &[u8],
    selector: LanguageSelector,
) -> Result<NormalizedText> {
    OcrPipeline::new(engine, TextNormalizer::default()).run(image_bytes, selector)
}
