//! Render targets.

use std::collections::BTreeSet;

/// A page to render plus optional highlight metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderTarget {
    /// Page number (1-indexed)
    pub page: u32,

    /// Global line numbers to highlight
    pub highlight_lines: BTreeSet<u32>,

    /// 1-based match rank shown in the highlight marker
    pub highlight_ordinal: Option<usize>,
}

impl RenderTarget {
    /// Target a page with no highlights.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Add a highlighted global line.
    pub fn highlight(mut self, global_line: u32) -> Self {
        self.highlight_lines.insert(global_line);
        self
    }

    /// Set the highlight ordinal.
    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.highlight_ordinal = Some(ordinal);
        self
    }

    /// Check if a global line is highlighted.
    pub fn is_highlighted(&self, global_line: u32) -> bool {
        self.highlight_lines.contains(&global_line)
    }
}
