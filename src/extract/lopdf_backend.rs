//! Extraction backed by lopdf.

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

use super::{split_lines, ErrorMode, LoadOptions, PageTexts, TextExtractor};

/// Page-by-page extraction with lopdf's content-stream text decoder.
///
/// Cheap and dependency-light; the default for the `low` and `free`
/// budgets.
#[derive(Debug, Clone, Default)]
pub struct LopdfExtractor {
    _private: (),
}

impl LopdfExtractor {
    /// Create a new lopdf extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn load(data: &[u8]) -> Result<LopdfDocument> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; extracted text may be unreadable");
        }

        Ok(doc)
    }
}

impl TextExtractor for LopdfExtractor {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn extract(&self, data: &[u8], options: &LoadOptions) -> Result<PageTexts> {
        let doc = Self::load(data)?;
        let pages = doc.get_pages();

        let texts = pages
            .keys()
            .copied()
            .map(|page_num| (page_num, doc.extract_text(&[page_num])));
        let result = collect_pages(texts, options.error_mode)?;

        log::debug!("lopdf extracted {} pages", result.len());
        Ok(result)
    }
}

/// Split each page's text into lines, applying the error mode to failed pages.
///
/// lopdf yields empty text for most damaged pages (a missing content
/// stream, for one), so a page only fails when decoding itself errors.
fn collect_pages<I, E>(pages: I, error_mode: ErrorMode) -> Result<PageTexts>
where
    I: IntoIterator<Item = (u32, std::result::Result<String, E>)>,
    E: std::fmt::Display,
{
    let mut result = Vec::new();

    for (page_num, text) in pages {
        match text {
            Ok(text) => result.push(split_lines(&text)),
            Err(e) => {
                if error_mode == ErrorMode::Strict {
                    return Err(Error::TextExtract(format!("Page {}: {}", page_num, e)));
                }
                log::warn!("Failed to extract text from page {}: {}", page_num, e);
                result.push(Vec::new());
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lopdf_rejects_garbage() {
        let extractor = LopdfExtractor::new();
        let result = extractor.extract(b"%PDF-1.4\nthis is not a pdf body", &LoadOptions::default());
        assert!(result.is_err());
    }

    fn pages_with_failure() -> Vec<(u32, std::result::Result<String, String>)> {
        vec![
            (1, Ok("Intro\nScope".to_string())),
            (2, Err("bad content stream".to_string())),
            (3, Ok("Findings".to_string())),
        ]
    }

    #[test]
    fn test_strict_mode_fails_on_page_error() {
        let result = collect_pages(pages_with_failure(), ErrorMode::Strict);
        match result {
            Err(Error::TextExtract(msg)) => assert_eq!(msg, "Page 2: bad content stream"),
            other => panic!("expected TextExtract, got {:?}", other),
        }
    }

    #[test]
    fn test_lenient_mode_keeps_failed_page_empty() {
        let pages = collect_pages(pages_with_failure(), ErrorMode::Lenient).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], vec!["Intro".to_string(), "Scope".to_string()]);
        assert!(pages[1].is_empty());
        assert_eq!(pages[2], vec!["Findings".to_string()]);
    }

    #[test]
    fn test_lopdf_name() {
        assert_eq!(LopdfExtractor::new().name(), "lopdf");
    }
}
