use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Script configuration for one pipeline run.
///
/// Picks both the Tesseract model(s) and the normalisation strategy, so adding
/// a script means adding a variant here and handling it at every `match`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LanguageSelector {
    Latin,
    Arabic,
    Combined,
}

impl LanguageSelector {
    pub const ALL: [LanguageSelector; 3] = [
        LanguageSelector::Latin,
        LanguageSelector::Arabic,
        LanguageSelector::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latin => "latin",
            Self::Arabic => "arabic",
            Self::Combined => "combined",
        }
    }

    /// Tesseract `lang` argument for this selector, e.g. `ara+eng` for combined.
    pub fn tesseract_languages(&self, latin_model: &str, arabic_model: &str) -> String {
        match self {
            Self::Latin => latin_model.to_string(),
            Self::Arabic => arabic_model.to_string(),
            Self::Combined => format!("{arabic_model}+{latin_model}"),
        }
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageSelector {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latin" | "eng" => Ok(Self::Latin),
            "arabic" | "ara" => Ok(Self::Arabic),
            "combined" | "ara+eng" | "eng+ara" => Ok(Self::Combined),
            _ => Err(PipelineError::InvalidSelector(format!(
                "'{s}' is not one of latin, arabic, combined"
            ))),
        }
    }
}
