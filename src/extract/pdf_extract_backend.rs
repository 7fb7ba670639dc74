//! Extraction backed by pdf-extract.

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{Error, Result};

use super::{split_lines, LoadOptions, PageTexts, TextExtractor};

/// Extraction through pdf-extract's glyph-positioning text output.
///
/// Slower than [`LopdfExtractor`](super::LopdfExtractor) but resolves font
/// encodings and word spacing more faithfully. The default for the
/// `medium`, `high` and `professional` budgets.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractExtractor {
    _private: (),
}

impl PdfExtractExtractor {
    /// Create a new pdf-extract extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextExtractor for PdfExtractExtractor {
    fn name(&self) -> &str {
        "pdf-extract"
    }

    fn extract(&self, data: &[u8], _options: &LoadOptions) -> Result<PageTexts> {
        // pdf-extract panics on some malformed font programs
        let pages = catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }))
        .map_err(|_| Error::TextExtract("pdf-extract panicked while decoding".to_string()))??;
        log::debug!("pdf-extract extracted {} pages", pages.len());
        Ok(pages.iter().map(|text| split_lines(text)).collect())
    }
}
