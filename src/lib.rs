//! # pdfnav
//!
//! Line-addressable PDF index with navigation primitives for incremental
//! reading.
//!
//! A PDF is extracted once into a [`Document`]: every line gets a stable
//! global number, and every page maps to a contiguous range of those
//! numbers. Navigation ([`Navigator`]) and clipping ([`Clipboard`]) work
//! purely on that index and answer with plain text, so a human or an
//! automated agent can read a document a window at a time.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfnav::{open_file, Navigator};
//!
//! fn main() -> pdfnav::Result<()> {
//!     let doc = open_file("report.pdf")?;
//!     let nav = Navigator::new(&doc);
//!
//!     println!("{}", nav.goto(Some(1), None));
//!     println!("{}", nav.search_next_match("findings", None));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Global line numbering**: one coordinate space across all pages
//! - **Bit-exact rendering**: page and scroll blocks with highlight markers
//! - **Swappable extractors**: strategies picked by [`ProcessBudget`]
//! - **Per-caller sessions**: clipboards are never shared between callers
//! - **Tool surface**: JSON tool calls and schemas for agent frameworks

pub mod clipboard;
pub mod detect;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod navigator;
pub mod render;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use clipboard::{Clipboard, MemoryClip};
pub use detect::{detect_source, SourceKind};
pub use error::{Error, Result};
pub use export::{export_document, DocumentRecord, ExportSink, JsonLinesSink, LineRecord};
pub use extract::{
    CleanupPreset, ErrorMode, ExtractorRegistry, LoadOptions, ProcessBudget, TextExtractor,
};
pub use model::{Document, Line, PageRange};
pub use navigator::{Navigation, Navigator};
pub use session::{CallerId, DocumentId, DocumentRegistry, Session};
pub use tools::{ToolBox, ToolCall, ToolSpec};

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use extract::{LineCleanup, PageTexts};

/// Load and index a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// use pdfnav::open_file;
///
/// let doc = open_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.total_pages());
/// ```
pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Loader::new().load_file(path)
}

/// Load and index a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfnav::{open_file_with_options, LoadOptions, ProcessBudget};
///
/// let options = LoadOptions::new()
///     .with_budget(ProcessBudget::High)
///     .lenient();
/// let doc = open_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn open_file_with_options<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    Loader::new().with_options(options).load_file(path)
}

/// Index PDF bytes with default options.
///
/// `source` labels the document (usually its path or URL).
pub fn open_bytes(source: impl Into<String>, data: &[u8]) -> Result<Document> {
    Loader::new().load_bytes(source, data)
}

/// Load and index a PDF file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn open_file_async<P: AsRef<Path>>(path: P, options: LoadOptions) -> Result<Document> {
    let source = path.as_ref().display().to_string();
    let data = tokio::fs::read(path.as_ref()).await?;
    let loader = Loader::new().with_options(options);

    tokio::task::spawn_blocking(move || loader.load_bytes(source, &data))
        .await
        .map_err(|e| Error::Other(format!("Load task failed: {}", e)))?
}

/// Builder for loading documents.
///
/// # Example
///
/// ```no_run
/// use pdfnav::{CleanupPreset, Loader, ProcessBudget};
///
/// let doc = Loader::new()
///     .with_budget(ProcessBudget::Medium)
///     .with_cleanup(CleanupPreset::Standard)
///     .lenient()
///     .load_file("document.pdf")?;
/// # Ok::<(), pdfnav::Error>(())
/// ```
#[derive(Clone)]
pub struct Loader {
    registry: Arc<ExtractorRegistry>,
    options: LoadOptions,
}

impl Loader {
    /// Create a loader with the built-in extractors and default options.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ExtractorRegistry::with_defaults()),
            options: LoadOptions::default(),
        }
    }

    /// Use a custom extractor registry.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Replace all load options.
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the extraction budget.
    pub fn with_budget(mut self, budget: ProcessBudget) -> Self {
        self.options = self.options.with_budget(budget);
        self
    }

    /// Set the cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.options = self.options.with_cleanup(preset);
        self
    }

    /// Enable lenient mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// The active options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load and index a file.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        self.load_bytes(path.display().to_string(), &data)
    }

    /// Index bytes under the given source label.
    ///
    /// Empty input yields an empty document. Extraction failures are
    /// returned as errors and no partial document is built.
    pub fn load_bytes(&self, source: impl Into<String>, data: &[u8]) -> Result<Document> {
        let source = source.into();

        match detect_source(data)? {
            SourceKind::Empty => {
                log::debug!("{} is empty; indexing zero pages", source);
                return Ok(Document::empty(source));
            }
            SourceKind::Pdf { version } => {
                log::debug!("{} is PDF {}", source, version);
            }
        }

        let extractor = self.registry.get(self.options.budget)?;
        log::debug!(
            "Extracting {} with {} (budget {})",
            source,
            extractor.name(),
            self.options.budget
        );
        let mut pages = extractor.extract(data, &self.options)?;

        if let Some(preset) = self.options.cleanup {
            clean_pages(&mut pages, preset, self.options.parallel);
        }

        Ok(Document::build(source, pages))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_pages(pages: &mut PageTexts, preset: CleanupPreset, parallel: bool) {
    let cleanup = LineCleanup::from_preset(preset);
    if parallel && pages.len() > 1 {
        pages
            .par_iter_mut()
            .for_each(|page| cleanup.apply_page(page));
    } else {
        for page in pages.iter_mut() {
            cleanup.apply_page(page);
        }
    }
}
