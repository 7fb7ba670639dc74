//! Line and page-range records.

use serde::{Deserialize, Serialize};

/// A single extracted line of text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Position within the page's extracted text (1-indexed)
    pub line_number_on_page: u32,

    /// Document-wide line number (1-indexed, no gaps)
    pub global_line_number: u32,

    /// Raw extracted text, possibly empty
    pub text: String,
}

impl Line {
    /// Create a new line.
    pub fn new(
        page_number: u32,
        line_number_on_page: u32,
        global_line_number: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            page_number,
            line_number_on_page,
            global_line_number,
            text: text.into(),
        }
    }

    /// Case-insensitive substring test.
    pub fn contains_ignore_case(&self, needle_lower: &str) -> bool {
        self.text.to_lowercase().contains(needle_lower)
    }
}

/// Inclusive span of global line numbers covered by one page.
///
/// A page without lines is stored as `end == start - 1`, so `start`
/// still points at the next global line and the table stays contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First global line on the page
    pub start: u32,

    /// Last global line on the page
    pub end: u32,
}

impl PageRange {
    /// Create a range from its first line and line count.
    pub fn from_start_len(start: u32, len: u32) -> Self {
        Self {
            start,
            end: start + len - 1,
        }
    }

    /// Number of lines on the page.
    pub fn len(&self) -> u32 {
        (self.end + 1).saturating_sub(self.start)
    }

    /// Check if the page extracted zero lines.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Check if a global line number falls on this page.
    pub fn contains(&self, global_line: u32) -> bool {
        self.start <= global_line && global_line <= self.end
    }
}
