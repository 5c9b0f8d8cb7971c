//! Transient storage for uploaded images.
//!
//! An upload is written to a uniquely named file inside the upload directory
//! and removed when the [`TransientUpload`] is closed or dropped, whichever
//! comes first. The OCR pipeline only ever reads the path.

use std::io::Write;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::NamedTempFile;

use crate::error::Result;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex"));

const FALLBACK_FILENAME: &str = "upload";

/// Reduce a client-supplied filename to a safe ASCII name.
///
/// Path separators become word breaks, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped and leading/trailing `.`/`_` are
/// stripped. Returns `"upload"` when nothing is left.
pub fn sanitize_filename(name: &str) -> String {
    let spaced = name.replace(|c: char| c == '/' || c == '\\', " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let ascii = UNSAFE_FILENAME_CHARS.replace_all(&joined, "");
    let trimmed = ascii.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Uploaded image held on disk for the duration of one request.
#[derive(Debug)]
pub struct TransientUpload {
    file: NamedTempFile,
}

impl TransientUpload {
    pub fn create(dir: &Path, original_name: &str, bytes: &[u8]) -> Result<Self> {
        let suffix = format!("-{}", sanitize_filename(original_name));
        let mut file = tempfile::Builder::new()
            .prefix("cin-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), size = bytes.len(), "Upload stored");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Remove the file now and report failures; dropping removes it silently.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "Upload removed");
        Ok(())
    }
}
