//! Error types for pdfnav.
//!
//! Only load-time and export failures are errors. Navigation and clipboard
//! misses are ordinary string results and never surface here.

use std::io;
use thiserror::Error;

/// Result type alias for pdfnav operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source or writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source bytes are not a PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// No extraction strategy is registered for the requested budget.
    #[error("No text extractor registered for budget: {0}")]
    NoExtractor(String),

    /// Serialization error (tool specs, export records).
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::TextExtract(err.to_string())
    }
}
