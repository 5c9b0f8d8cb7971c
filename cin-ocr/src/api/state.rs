use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{LineBreaks, OcrEngine, OcrPipeline, TextNormalizer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: OcrPipeline,
}

impl AppState {
    pub fn new(config: Config, engine: Arc<dyn OcrEngine>) -> Self {
        let line_breaks = if config.ocr.preserve_line_breaks {
            LineBreaks::Preserve
        } else {
            LineBreaks::Collapse
        };
        let pipeline = OcrPipeline::new(engine, TextNormalizer::new(line_breaks));

        Self {
            config: Arc::new(config),
            pipeline,
        }
    }
}
