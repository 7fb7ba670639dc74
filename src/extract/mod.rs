//! Text extraction strategies.
//!
//! An extractor turns PDF bytes into pages of raw lines. Which extractor
//! runs is picked by [`ProcessBudget`] through an [`ExtractorRegistry`];
//! the index and navigation layers only ever see the lines.

mod cleanup;
mod lopdf_backend;
mod options;
mod pdf_extract_backend;

pub use cleanup::{CleanupOptions, CleanupPreset, LineCleanup};
pub use lopdf_backend::LopdfExtractor;
pub use options::{ErrorMode, LoadOptions};
pub use pdf_extract_backend::PdfExtractExtractor;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pages of raw line strings, in page order.
pub type PageTexts = Vec<Vec<String>>;

/// A text extraction strategy.
///
/// Implementations receive bytes that already carry a PDF header; empty
/// sources are handled before any extractor runs.
pub trait TextExtractor: Send + Sync {
    /// Short strategy name, used in logs and the CLI.
    fn name(&self) -> &str;

    /// Extract every page's lines, in page order.
    fn extract(&self, data: &[u8], options: &LoadOptions) -> Result<PageTexts>;
}

/// Cost/fidelity tier used to pick an extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessBudget {
    /// Higher fidelity tier, served by pdf-extract
    High,
    /// Middle tier, served by pdf-extract
    Medium,
    /// Cheapest tier, served by lopdf
    #[default]
    Low,
    /// Top tier, served by pdf-extract
    Professional,
    /// No-cost tier, served by lopdf
    Free,
}

impl ProcessBudget {
    /// All tiers, in declaration order.
    pub const ALL: [ProcessBudget; 5] = [
        ProcessBudget::High,
        ProcessBudget::Medium,
        ProcessBudget::Low,
        ProcessBudget::Professional,
        ProcessBudget::Free,
    ];

    /// Wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessBudget::High => "high",
            ProcessBudget::Medium => "medium",
            ProcessBudget::Low => "low",
            ProcessBudget::Professional => "professional",
            ProcessBudget::Free => "free",
        }
    }
}

impl fmt::Display for ProcessBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessBudget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ProcessBudget::ALL
            .into_iter()
            .find(|budget| budget.as_str() == s)
            .ok_or_else(|| format!("Unknown process budget: {}", s))
    }
}

/// Maps budgets to extraction strategies.
pub struct ExtractorRegistry {
    extractors: HashMap<ProcessBudget, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Create a registry with the built-in strategies.
    ///
    /// `low` and `free` use lopdf; `medium`, `high` and `professional` use
    /// pdf-extract.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let lopdf: Arc<dyn TextExtractor> = Arc::new(LopdfExtractor::new());
        let pdf_extract: Arc<dyn TextExtractor> = Arc::new(PdfExtractExtractor::new());

        registry.register(ProcessBudget::Low, lopdf.clone());
        registry.register(ProcessBudget::Free, lopdf);
        registry.register(ProcessBudget::Medium, pdf_extract.clone());
        registry.register(ProcessBudget::High, pdf_extract.clone());
        registry.register(ProcessBudget::Professional, pdf_extract);
        registry
    }

    /// Register (or replace) the strategy for a budget.
    pub fn register(&mut self, budget: ProcessBudget, extractor: Arc<dyn TextExtractor>) {
        self.extractors.insert(budget, extractor);
    }

    /// Get the strategy for a budget.
    pub fn get(&self, budget: ProcessBudget) -> Result<Arc<dyn TextExtractor>> {
        self.extractors
            .get(&budget)
            .cloned()
            .ok_or_else(|| Error::NoExtractor(budget.to_string()))
    }

    /// Check if a budget has a strategy.
    pub fn supports(&self, budget: ProcessBudget) -> bool {
        self.extractors.contains_key(&budget)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Split page text into lines.
///
/// Breaks on `\n`, `\r\n`, `\r`, vertical tab, form feed, the file/group/
/// record separators, NEL and the Unicode line and paragraph separators.
/// A trailing break does not add an empty line; interior empty lines stay.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if is_line_break(c) {
            if c == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}' | '\u{1D}' | '\u{1E}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedExtractor;

    impl TextExtractor for FixedExtractor {
        fn name(&self) -> &str {
            "fixed"
        }

        fn extract(&self, _data: &[u8], _options: &LoadOptions) -> Result<PageTexts> {
            Ok(vec![vec!["only line".to_string()]])
        }
    }

    #[test]
    fn test_split_lines_basic() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_split_lines_trailing_and_empty() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_split_lines_unicode_breaks() {
        assert_eq!(
            split_lines("one\u{2028}two\u{0C}three"),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_budget_parse() {
        assert_eq!("HIGH".parse::<ProcessBudget>(), Ok(ProcessBudget::High));
        assert_eq!(
            " professional ".parse::<ProcessBudget>(),
            Ok(ProcessBudget::Professional)
        );
        assert!("premium".parse::<ProcessBudget>().is_err());
    }

    #[test]
    fn test_budget_serde() {
        let json = serde_json::to_string(&ProcessBudget::Free).unwrap();
        assert_eq!(json, "\"free\"");
        let budget: ProcessBudget = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(budget, ProcessBudget::Medium);
    }

    #[test]
    fn test_registry_defaults_cover_all_budgets() {
        let registry = ExtractorRegistry::with_defaults();
        for budget in ProcessBudget::ALL {
            assert!(registry.supports(budget));
        }
        assert_eq!(registry.get(ProcessBudget::Low).unwrap().name(), "lopdf");
        assert_eq!(
            registry.get(ProcessBudget::High).unwrap().name(),
            "pdf-extract"
        );
    }

    #[test]
    fn test_registry_register_replaces() {
        let mut registry = ExtractorRegistry::new();
        assert!(matches!(
            registry.get(ProcessBudget::Low),
            Err(Error::NoExtractor(_))
        ));

        registry.register(ProcessBudget::Low, Arc::new(FixedExtractor));
        let extractor = registry.get(ProcessBudget::Low).unwrap();
        assert_eq!(extractor.name(), "fixed");
        let pages = extractor.extract(b"%PDF-1.4", &LoadOptions::default()).unwrap();
        assert_eq!(pages, vec![vec!["only line".to_string()]]);
    }
}
