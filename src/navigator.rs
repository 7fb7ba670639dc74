//! Stateless navigation over an indexed document.
//!
//! Every call recomputes its answer from the document alone: there is no
//! cursor, viewport or match iterator carried between calls.

use std::fmt;

use crate::model::{Document, Line};
use crate::render::{render_scroll, render_target, RenderTarget, ScrollDirection};

/// Text returned when neither a page nor a line resolves.
pub const INVALID_TARGET: &str = "Invalid target.";

/// Text returned when a search term never occurs.
pub const NO_MATCHES: &str = "No matches found.";

/// Outcome of a navigation request.
///
/// Misses are values, not errors; [`Display`](fmt::Display) gives the text
/// shown to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A rendered page block
    Rendered(String),
    /// Neither page nor line is in range
    InvalidTarget,
    /// The search term does not occur
    NoMatches,
    /// The requested match rank exceeds the number of matches
    TooFewMatches {
        /// Number of matches that exist
        found: usize,
    },
}

impl Navigation {
    /// Check if a page was rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Navigation::Rendered(_))
    }

    /// Convert into the caller-facing text.
    pub fn into_text(self) -> String {
        match self {
            Navigation::Rendered(block) => block,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Navigation::Rendered(block) => f.write_str(block),
            Navigation::InvalidTarget => f.write_str(INVALID_TARGET),
            Navigation::NoMatches => f.write_str(NO_MATCHES),
            Navigation::TooFewMatches { found } => write!(f, "Only {} matches found.", found),
        }
    }
}

/// Read-only navigation over a document.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    doc: &'a Document,
}

impl<'a> Navigator<'a> {
    /// Create a navigator over a document.
    pub fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    /// The underlying document.
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Go to a page, or failing that to a line.
    ///
    /// A page in `[1, total_pages]` wins and renders without highlights.
    /// Otherwise a line in `[1, total_lines]` renders its page with that
    /// line highlighted.
    pub fn goto(&self, page: Option<u32>, line: Option<u32>) -> Navigation {
        if let Some(page) = page {
            if (1..=self.doc.total_pages()).contains(&page) {
                return Navigation::Rendered(render_target(self.doc, &RenderTarget::page(page)));
            }
        }

        if let Some(global) = line {
            if let Some(found) = self.doc.line(global) {
                let target = RenderTarget::page(found.page_number).highlight(global);
                return Navigation::Rendered(render_target(self.doc, &target));
            }
        }

        Navigation::InvalidTarget
    }

    /// Show the last `n` lines of the document.
    pub fn scroll_up(&self, n: usize) -> String {
        render_scroll(self.doc.tail(n), ScrollDirection::Up, n)
    }

    /// Show the first `n` lines of the document.
    pub fn scroll_down(&self, n: usize) -> String {
        render_scroll(self.doc.head(n), ScrollDirection::Down, n)
    }

    /// Every line containing `term`, case-insensitively, in global order.
    pub fn find_matches(&self, term: &str) -> Vec<&'a Line> {
        let needle = term.to_lowercase();
        self.doc
            .lines()
            .iter()
            .filter(|line| line.contains_ignore_case(&needle))
            .collect()
    }

    /// Jump to the `ordinal`-th match of `term` (1-based, default 1).
    ///
    /// `Some(0)` is treated like `None`.
    pub fn search_next_match(&self, term: &str, ordinal: Option<usize>) -> Navigation {
        let matches = self.find_matches(term);
        if matches.is_empty() {
            return Navigation::NoMatches;
        }

        let ordinal = ordinal.filter(|&n| n > 0).unwrap_or(1);
        let Some(hit) = matches.get(ordinal - 1) else {
            return Navigation::TooFewMatches {
                found: matches.len(),
            };
        };

        log::debug!(
            "Match {}/{} for {:?} at line {}",
            ordinal,
            matches.len(),
            term,
            hit.global_line_number
        );

        let target = RenderTarget::page(hit.page_number)
            .highlight(hit.global_line_number)
            .with_ordinal(ordinal);
        Navigation::Rendered(render_target(self.doc, &target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_page;

    fn sample() -> Document {
        Document::build(
            "s.pdf",
            vec![
                vec!["Intro", "Scope of the climate study"],
                vec!["Findings", "Climate trends"],
                vec![],
            ],
        )
    }

    #[test]
    fn test_goto_page() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        assert_eq!(nav.goto(Some(1), None), Navigation::Rendered(render_page(&doc, 1)));
    }

    #[test]
    fn test_goto_page_wins_over_line() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let text = nav.goto(Some(1), Some(3)).into_text();
        assert!(text.contains("Page 1 of 3"));
        assert!(!text.contains("<highlight"));
    }

    #[test]
    fn test_goto_line_highlights() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let text = nav.goto(None, Some(3)).into_text();
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("|003| <highlight match=\"None\"></highlight> Findings"));
    }

    #[test]
    fn test_goto_line_exact_block() {
        let doc = Document::build("s.pdf", vec![vec!["Intro", "Scope"], vec!["Findings"]]);
        let expected = "\
------------------------------------------
|               Page 2 of 2             |
------------------------------------------
|                                        |
|                                        |
|                                        |
|003| <highlight match=\"None\"></highlight> Findings
|                                        |
------------------------------------------";
        assert_eq!(Navigator::new(&doc).goto(None, Some(3)).into_text(), expected);
    }

    #[test]
    fn test_goto_falls_back_to_line_when_page_invalid() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let text = nav.goto(Some(42), Some(1)).into_text();
        assert!(text.contains("Page 1 of 3"));
        assert!(text.contains("|001| <highlight match=\"None\"></highlight> Intro"));
    }

    #[test]
    fn test_goto_empty_page_is_valid() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let text = nav.goto(Some(3), None).into_text();
        assert!(text.contains("Page 3 of 3"));
        assert!(!text.contains("|00"));
    }

    #[test]
    fn test_goto_invalid() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        assert_eq!(nav.goto(None, None), Navigation::InvalidTarget);
        assert_eq!(nav.goto(Some(0), Some(0)), Navigation::InvalidTarget);
        assert_eq!(nav.goto(Some(4), Some(5)).to_string(), INVALID_TARGET);
    }

    #[test]
    fn test_scroll_windows() {
        let doc = sample();
        let nav = Navigator::new(&doc);

        let up = nav.scroll_up(1);
        assert!(up.contains("Scrolled Up 1 lines"));
        assert!(up.contains("|004| Climate trends"));
        assert!(!up.contains("|003|"));

        let down = nav.scroll_down(2);
        assert!(down.contains("Scrolled Down 2 lines"));
        assert!(down.contains("|001| Intro\n|002| Scope"));
        assert!(!down.contains("|003|"));
    }

    #[test]
    fn test_scroll_clamps() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let up = nav.scroll_up(100);
        assert!(up.contains("Scrolled Up 100 lines"));
        assert_eq!(up.matches("\n|0").count(), 4);
        assert_eq!(nav.scroll_down(0).matches("\n|0").count(), 0);
    }

    #[test]
    fn test_search_case_insensitive() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        let matches = nav.find_matches("CLIMATE");
        let numbers: Vec<u32> = matches.iter().map(|l| l.global_line_number).collect();
        assert_eq!(numbers, vec![2, 4]);
    }

    #[test]
    fn test_search_ordinals() {
        let doc = sample();
        let nav = Navigator::new(&doc);

        let first = nav.search_next_match("climate", None).into_text();
        assert!(first.contains("Page 1 of 3"));
        assert!(first.contains("|002| <highlight match=\"1\"></highlight> Scope"));

        let second = nav.search_next_match("climate", Some(2)).into_text();
        assert!(second.contains("Page 2 of 3"));
        assert!(second.contains("|004| <highlight match=\"2\"></highlight> Climate trends"));

        assert_eq!(
            nav.search_next_match("climate", Some(3)),
            Navigation::TooFewMatches { found: 2 }
        );
        assert_eq!(
            nav.search_next_match("climate", Some(3)).to_string(),
            "Only 2 matches found."
        );
    }

    #[test]
    fn test_search_zero_ordinal_means_first() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        assert_eq!(
            nav.search_next_match("climate", Some(0)),
            nav.search_next_match("climate", None)
        );
    }

    #[test]
    fn test_search_no_matches() {
        let doc = sample();
        let nav = Navigator::new(&doc);
        assert_eq!(nav.search_next_match("ocean", None), Navigation::NoMatches);
        assert_eq!(nav.search_next_match("ocean", Some(5)).into_text(), NO_MATCHES);
    }
}
