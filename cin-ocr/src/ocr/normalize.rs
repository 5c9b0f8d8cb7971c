//! Script-aware cleanup of raw Tesseract output.
//!
//! Two strategies share the same shape (collapse whitespace, drop characters
//! outside an allow-list, trim) and differ in the allow-list and in whether
//! the result is line-oriented:
//!
//! - Latin (used for `latin` and `combined`): letters, digits, `_`, the Arabic
//!   block U+0600..U+06FF, whitespace and `: / . -`; result is a set of trimmed
//!   non-empty lines joined with `\n`.
//! - Arabic: the Arabic block, whitespace and `, : ; ! ? . -`; result is a
//!   single trimmed string.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::LanguageSelector;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

static LATIN_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\x{0600}-\x{06FF}\s:/.\-]").expect("static regex"));

static ARABIC_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x{0600}-\x{06FF}\s,:;!?.\-]").expect("static regex"));

/// How the Latin strategy treats line breaks in the raw OCR text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreaks {
    /// Newlines are collapsed with the rest of the whitespace, so the output
    /// is a single line.
    #[default]
    Collapse,
    /// Raw lines are cleaned one by one and kept as separate output lines.
    Preserve,
}

/// Final pipeline output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NormalizedText> for String {
    fn from(text: NormalizedText) -> Self {
        text.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    line_breaks: LineBreaks,
}

impl TextNormalizer {
    pub fn new(line_breaks: LineBreaks) -> Self {
        Self { line_breaks }
    }

    pub fn line_breaks(&self) -> LineBreaks {
        self.line_breaks
    }

    pub fn normalize(&self, raw: &str, selector: LanguageSelector) -> NormalizedText {
        let text = match selector {
            LanguageSelector::Latin | LanguageSelector::Combined => {
                normalize_latin(raw, self.line_breaks)
            }
            LanguageSelector::Arabic => normalize_arabic(raw),
        };
        NormalizedText(text)
    }
}

pub fn normalize_latin(raw: &str, line_breaks: LineBreaks) -> String {
    let cleaned = match line_breaks {
        LineBreaks::Collapse => clean(raw, &LATIN_DISALLOWED),
        LineBreaks::Preserve => raw
            .lines()
            .map(|line| clean(line, &LATIN_DISALLOWED))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    cleaned
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn normalize_arabic(raw: &str) -> String {
    clean(raw, &ARABIC_DISALLOWED).trim().to_string()
}

/// Collapse whitespace, drop disallowed characters, then collapse again so a
/// stripped character between two spaces does not leave a double space.
fn clean(text: &str, disallowed: &Regex) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let stripped = disallowed.replace_all(&collapsed, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").into_owned()
}
