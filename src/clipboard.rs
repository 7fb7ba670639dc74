//! Append-only memory clipboard.

use serde::Serialize;

use crate::model::{Document, Line};

/// Text returned by [`Clipboard::use_memory`] when nothing was clipped.
pub const NO_MEMORY: &str = "No memory clipped.";

/// Lines captured by one clip request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryClip {
    /// Requested first global line
    pub start: u32,

    /// Requested last global line
    pub end: u32,

    /// Lines in `[start, end]` at clip time, in global order
    pub lines: Vec<Line>,
}

impl MemoryClip {
    /// Check if the clip captured no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Ordered list of clips for one (document, caller) pair.
///
/// Clips are never merged, sorted or deduplicated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Clipboard {
    clips: Vec<MemoryClip>,
}

impl Clipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip lines `[start, end]` and return a confirmation.
    ///
    /// A range that selects nothing still appends an (empty) clip.
    pub fn clip(&mut self, doc: &Document, start: u32, end: u32) -> String {
        let lines = doc.lines_in_range(start, end).to_vec();
        log::debug!("Clipped {} lines for range {}..={}", lines.len(), start, end);
        self.clips.push(MemoryClip { start, end, lines });
        format!("Clipped lines {} to {}.", start, end)
    }

    /// Every clipped line's text, in clip order then line order.
    ///
    /// The prompt is accepted for the caller's bookkeeping and does not
    /// change what is returned.
    pub fn use_memory(&self, _prompt: &str) -> String {
        if self.clips.is_empty() {
            return NO_MEMORY.to_string();
        }

        self.clips
            .iter()
            .flat_map(|clip| clip.lines.iter())
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All clips in insertion order.
    pub fn clips(&self) -> &[MemoryClip] {
        &self.clips
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check if nothing was clipped.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::build(
            "s.pdf",
            vec![vec!["one", "two", "three"], vec!["four", "five"]],
        )
    }

    #[test]
    fn test_empty_clipboard() {
        let clipboard = Clipboard::new();
        assert_eq!(clipboard.use_memory("summarize"), NO_MEMORY);
    }

    #[test]
    fn test_clip_confirmation() {
        let doc = sample();
        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.clip(&doc, 2, 4), "Clipped lines 2 to 4.");
        assert_eq!(clipboard.use_memory(""), "two\nthree\nfour");
    }

    #[test]
    fn test_clip_order_not_merged() {
        let doc = sample();
        let mut clipboard = Clipboard::new();
        clipboard.clip(&doc, 5, 5);
        clipboard.clip(&doc, 1, 3);
        clipboard.clip(&doc, 2, 2);
        assert_eq!(
            clipboard.use_memory("anything"),
            "five\none\ntwo\nthree\ntwo"
        );
        assert_eq!(clipboard.len(), 3);
    }

    #[test]
    fn test_empty_selection_still_appends() {
        let doc = sample();
        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.clip(&doc, 9, 12), "Clipped lines 9 to 12.");
        assert_eq!(clipboard.len(), 1);
        assert!(clipboard.clips()[0].is_empty());
        // Clips exist, so this is not the "no memory" sentinel
        assert_eq!(clipboard.use_memory(""), "");
    }

    #[test]
    fn test_prompt_does_not_change_result() {
        let doc = sample();
        let mut clipboard = Clipboard::new();
        clipboard.clip(&doc, 1, 2);
        assert_eq!(clipboard.use_memory("a"), clipboard.use_memory("b"));
    }
}
