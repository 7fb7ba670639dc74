//! Integration tests for indexing, rendering and navigation.

use pdfnav::render::render_page;
use pdfnav::{Clipboard, Document, Line, Navigation, Navigator};

fn report() -> Document {
    Document::build("report.pdf", vec![vec!["Intro", "Scope"], vec!["Findings"]])
}

fn long_document() -> Document {
    let pages: Vec<Vec<String>> = (0..6)
        .map(|p| {
            (0..(p % 3) * 4)
                .map(|l| format!("page {} line {} climate", p + 1, l + 1))
                .collect()
        })
        .collect();
    Document::build("long.pdf", pages)
}

#[test]
fn test_two_page_example() {
    let doc = report();
    assert_eq!(doc.total_lines(), 3);
    assert_eq!(doc.total_pages(), 2);
    assert_eq!(
        doc.page_lines(2),
        &[Line::new(2, 1, 3, "Findings")][..]
    );

    let nav = Navigator::new(&doc);
    let by_line = nav.goto(None, Some(3)).into_text();
    assert!(by_line.contains("|               Page 2 of 2             |"));
    assert!(by_line.contains("|003| <highlight match=\"None\"></highlight> Findings"));

    let by_search = nav.search_next_match("Findings", None).into_text();
    assert!(by_search.contains("|               Page 2 of 2             |"));
    assert!(by_search.contains("|003| <highlight match=\"1\"></highlight> Findings"));
}

#[test]
fn test_total_lines_is_sum_of_pages() {
    let doc = long_document();
    let sum: usize = (1..=doc.total_pages()).map(|p| doc.page_lines(p).len()).sum();
    assert_eq!(sum as u32, doc.total_lines());
}

#[test]
fn test_page_ranges_partition_lines() {
    let doc = long_document();
    let mut expected_start = 1;
    for range in doc.page_ranges() {
        assert_eq!(range.start, expected_start);
        expected_start = range.end + 1;
    }
    assert_eq!(expected_start, doc.total_lines() + 1);
}

#[test]
fn test_line_lookup_round_trip() {
    let doc = long_document();
    for line in doc.lines() {
        assert_eq!(doc.line(line.global_line_number), Some(line));
    }
    assert!(doc.line(0).is_none());
    assert!(doc.line(doc.total_lines() + 1).is_none());
}

#[test]
fn test_page_lines_concatenate_to_document() {
    let doc = long_document();
    let mut all: Vec<&Line> = Vec::new();
    for page in 1..=doc.total_pages() {
        let lines = doc.page_lines(page);
        for pair in lines.windows(2) {
            assert!(pair[0].line_number_on_page < pair[1].line_number_on_page);
        }
        all.extend(lines.iter());
    }
    let expected: Vec<&Line> = doc.lines().iter().collect();
    assert_eq!(all, expected);
}

#[test]
fn test_empty_pages_render() {
    let doc = long_document();
    // Page 1 has zero lines but is still a page
    assert!(doc.page_lines(1).is_empty());
    let nav = Navigator::new(&doc);
    let output = nav.goto(Some(1), None).into_text();
    assert_eq!(output, render_page(&doc, 1));
    assert!(output.contains("Page 1 of 6"));
}

#[test]
fn test_scroll_is_absolute() {
    let doc = long_document();
    let nav = Navigator::new(&doc);
    let total = doc.total_lines() as usize;

    let whole = nav.scroll_up(total);
    for n in 0..=total {
        let _ = nav.scroll_down(n);
        assert_eq!(nav.scroll_up(total), whole);
    }
    for line in doc.lines() {
        assert!(whole.contains(&format!("|{:03}| {}", line.global_line_number, line.text)));
    }
}

#[test]
fn test_search_match_counts() {
    let doc = long_document();
    let nav = Navigator::new(&doc);
    let k = nav.find_matches("CLIMATE").len();
    assert_eq!(k as u32, doc.total_lines());

    assert!(nav.search_next_match("climate", Some(k)).is_rendered());
    assert_eq!(
        nav.search_next_match("climate", Some(k + 1)).into_text(),
        format!("Only {} matches found.", k)
    );
    assert_eq!(
        nav.search_next_match("weather", None),
        Navigation::NoMatches
    );
}

#[test]
fn test_search_ordinal_highlights_correct_line() {
    let doc = long_document();
    let nav = Navigator::new(&doc);
    let matches = nav.find_matches("line 2");
    for (index, hit) in matches.iter().enumerate() {
        let output = nav.search_next_match("line 2", Some(index + 1)).into_text();
        assert!(output.contains(&format!(
            "|{:03}| <highlight match=\"{}\"></highlight> {}",
            hit.global_line_number,
            index + 1,
            hit.text
        )));
        assert!(output.contains(&format!("Page {} of", hit.page_number)));
    }
}

#[test]
fn test_clip_ranges_keep_clip_order() {
    let doc = Document::build(
        "clip.pdf",
        vec![vec!["a", "b", "c"], vec!["d", "e"]],
    );
    let mut clipboard = Clipboard::new();
    clipboard.clip(&doc, 1, 3);
    clipboard.clip(&doc, 5, 5);
    assert_eq!(clipboard.use_memory("summarize"), "a\nb\nc\ne");

    let mut single = Clipboard::new();
    single.clip(&doc, 2, 4);
    assert_eq!(single.use_memory(""), "b\nc\nd");
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = long_document();
    let nav = Navigator::new(&doc);
    assert_eq!(nav.goto(None, Some(5)), nav.goto(None, Some(5)));
    assert_eq!(
        nav.search_next_match("line", Some(3)),
        nav.search_next_match("line", Some(3))
    );
}
