//! Source classification before extraction.
//!
//! Separates the two outcomes every extractor must keep apart: an empty
//! source (valid, zero pages) and a source that is not a readable PDF.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// What a source byte buffer contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// No bytes at all. Indexes to an empty document.
    Empty,
    /// A PDF with the given header version (e.g. "1.7").
    Pdf {
        /// Version string from the `%PDF-x.y` header
        version: String,
    },
}

impl SourceKind {
    /// Check if the source is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, SourceKind::Empty)
    }
}

/// Classify source bytes.
///
/// Whitespace-only input counts as empty. Anything else must start with a
/// `%PDF-x.y` header.
///
/// # Example
/// ```
/// use pdfnav::detect::{detect_source, SourceKind};
///
/// assert_eq!(detect_source(b"").unwrap(), SourceKind::Empty);
/// assert!(detect_source(b"<html>").is_err());
/// ```
pub fn detect_source(data: &[u8]) -> Result<SourceKind> {
    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(SourceKind::Empty);
    }

    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(SourceKind::Pdf { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes carry a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_source(data), Ok(SourceKind::Pdf { .. }))
}
