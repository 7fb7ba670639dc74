//! Load options and configuration.

use super::{CleanupPreset, ProcessBudget};

/// Options for loading and indexing a document.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Extraction tier
    pub budget: ProcessBudget,

    /// Error handling mode for per-page failures.
    ///
    /// Only the lopdf extractor consults it. pdf-extract decodes the whole
    /// file at once, so any failure there fails the load in either mode.
    pub error_mode: ErrorMode,

    /// Whether to run line cleanup across pages in parallel.
    ///
    /// Extraction itself is sequential for every built-in extractor.
    pub parallel: bool,

    /// Per-line cleanup applied before indexing
    pub cleanup: Option<CleanupPreset>,
}

impl LoadOptions {
    /// Create new load options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extraction budget.
    pub fn with_budget(mut self, budget: ProcessBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (pages that fail to extract become empty pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(preset);
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            budget: ProcessBudget::Low,
            error_mode: ErrorMode::Strict,
            parallel: true,
            cleanup: None,
        }
    }
}

/// Error handling mode during extraction.
///
/// lopdf returns empty text for most damaged pages, so `Lenient` mostly
/// matters for pages whose content stream fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the whole load on any page error
    #[default]
    Strict,
    /// Keep the page with zero lines and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_builder() {
        let options = LoadOptions::new()
            .lenient()
            .with_budget(ProcessBudget::High)
            .with_cleanup(CleanupPreset::Aggressive)
            .sequential();

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert_eq!(options.budget, ProcessBudget::High);
        assert_eq!(options.cleanup, Some(CleanupPreset::Aggressive));
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert_eq!(options.budget, ProcessBudget::Low);
        assert!(options.parallel);
        assert!(options.cleanup.is_none());
    }
}
