use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) if val.trim().is_empty() => None,
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Tesseract backend settings. Read once at start-up and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Directory holding `*.traineddata`; `None` lets libtesseract use its compiled-in default.
    pub tessdata_path: Option<String>,
    pub latin_model: String,
    pub arabic_model: String,
    /// Tesseract page segmentation mode. 6 = single uniform block of text.
    pub page_seg_mode: u8,
    pub timeout_secs: u64,
    pub preserve_line_breaks: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub dir: String,
    pub max_bytes: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tessdata_path: None,
            latin_model: "eng".to_string(),
            arabic_model: "ara".to_string(),
            page_seg_mode: 6,
            timeout_secs: 60,
            preserve_line_breaks: false,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let ocr_defaults = OcrConfig::default();
        let upload_defaults = UploadConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("CIN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CIN_PORT", 5000),
            },
            ocr: OcrConfig {
                tessdata_path: parse_env_opt("OCR_TESSDATA_PATH"),
                latin_model: env::var("OCR_LATIN_MODEL").unwrap_or(ocr_defaults.latin_model),
                arabic_model: env::var("OCR_ARABIC_MODEL").unwrap_or(ocr_defaults.arabic_model),
                page_seg_mode: parse_env_or("OCR_PAGE_SEG_MODE", ocr_defaults.page_seg_mode),
                timeout_secs: parse_env_or("OCR_TIMEOUT", ocr_defaults.timeout_secs),
                preserve_line_breaks: parse_env_or(
                    "OCR_PRESERVE_LINE_BREAKS",
                    ocr_defaults.preserve_line_breaks,
                ),
            },
            upload: UploadConfig {
                dir: env::var("UPLOAD_DIR").unwrap_or(upload_defaults.dir),
                max_bytes: parse_env_or("UPLOAD_MAX_BYTES", upload_defaults.max_bytes),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
