//! The document index.

use super::{Line, PageRange};
use serde::Serialize;

/// An indexed document: every extracted line plus the page-range table.
///
/// Built once from extractor output and never mutated afterwards. Share it
/// between sessions behind an `Arc`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Source identifier (file path, URL, or caller-chosen label)
    source: String,

    /// All lines in global order
    lines: Vec<Line>,

    /// One range per page, in page order
    pages: Vec<PageRange>,
}

impl Document {
    /// Index pages of raw line strings.
    ///
    /// Each page, in order, assigns its lines the next global numbers
    /// (starting at 1) and in-page numbers starting at 1. Pages without
    /// lines still get a (degenerate) range and count toward
    /// [`total_pages`](Self::total_pages).
    ///
    /// # Example
    ///
    /// ```
    /// use pdfnav::Document;
    ///
    /// let doc = Document::build("report.pdf", vec![vec!["Intro", "Scope"], vec!["Findings"]]);
    /// assert_eq!(doc.total_lines(), 3);
    /// assert_eq!(doc.total_pages(), 2);
    /// assert_eq!(doc.page_lines(2)[0].global_line_number, 3);
    /// ```
    pub fn build<P, L, S>(source: impl Into<String>, pages: P) -> Self
    where
        P: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines = Vec::new();
        let mut ranges = Vec::new();
        let mut next_global: u32 = 1;

        for (page_index, page) in pages.into_iter().enumerate() {
            let page_number = page_index as u32 + 1;
            let start = next_global;

            for (line_index, text) in page.into_iter().enumerate() {
                lines.push(Line::new(
                    page_number,
                    line_index as u32 + 1,
                    next_global,
                    text,
                ));
                next_global += 1;
            }

            ranges.push(PageRange::from_start_len(start, next_global - start));
        }

        let document = Self {
            source: source.into(),
            lines,
            pages: ranges,
        };

        log::debug!(
            "Indexed {} lines across {} pages from {}",
            document.total_lines(),
            document.total_pages(),
            document.source
        );

        document
    }

    /// Create an empty document (zero pages, zero lines).
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Get the source identifier.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the number of pages, including pages that extracted no lines.
    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get the number of lines.
    pub fn total_lines(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Check if the document has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines in global order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The page-range table, in page order.
    pub fn page_ranges(&self) -> &[PageRange] {
        &self.pages
    }

    /// Get the range of a page (1-indexed).
    pub fn page_range(&self, page_number: u32) -> Option<PageRange> {
        if page_number == 0 {
            return None;
        }
        self.pages.get((page_number - 1) as usize).copied()
    }

    /// Lines of a page in in-page order. Empty for out-of-range pages.
    pub fn page_lines(&self, page_number: u32) -> &[Line] {
        match self.page_range(page_number) {
            Some(range) if !range.is_empty() => {
                &self.lines[(range.start - 1) as usize..range.end as usize]
            }
            _ => &[],
        }
    }

    /// Look up a line by its global number.
    pub fn line(&self, global_line: u32) -> Option<&Line> {
        if global_line == 0 {
            return None;
        }
        self.lines.get((global_line - 1) as usize)
    }

    /// Page holding a global line.
    pub fn page_of_line(&self, global_line: u32) -> Option<u32> {
        self.line(global_line).map(|line| line.page_number)
    }

    /// Lines whose global number falls in `[start, end]`, in order.
    ///
    /// Bounds outside the document are clamped; an inverted range is empty.
    pub fn lines_in_range(&self, start: u32, end: u32) -> &[Line] {
        let lo = start.max(1);
        let hi = end.min(self.total_lines());
        if lo > hi {
            return &[];
        }
        &self.lines[(lo - 1) as usize..hi as usize]
    }

    /// First `n` lines (clamped to the document length).
    pub fn head(&self, n: usize) -> &[Line] {
        &self.lines[..n.min(self.lines.len())]
    }

    /// Last `n` lines (clamped to the document length).
    pub fn tail(&self, n: usize) -> &[Line] {
        let len = self.lines.len();
        &self.lines[len - n.min(len)..]
    }

    /// Plain text of the whole document, one line per row.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
