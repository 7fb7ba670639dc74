//! Page and scroll block rendering.

use std::fmt::Write;

use crate::model::{Document, Line};

use super::{RenderTarget, BORDER, LINE_NUMBER_WIDTH, PADDING_ROW};

/// Direction of a scroll window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Window over the end of the document
    Up,
    /// Window over the start of the document
    Down,
}

/// Render a page without highlights.
pub fn render_page(doc: &Document, page: u32) -> String {
    render_target(doc, &RenderTarget::page(page))
}

/// Render a page with the target's highlights.
///
/// Out-of-range pages render as a well-formed block with no lines.
pub fn render_target(doc: &Document, target: &RenderTarget) -> String {
    let mut output = String::new();

    output.push_str(BORDER);
    output.push('\n');
    let _ = writeln!(
        output,
        "|               Page {} of {}             |",
        target.page,
        doc.total_pages()
    );
    output.push_str(BORDER);
    for _ in 0..3 {
        output.push('\n');
        output.push_str(PADDING_ROW);
    }

    for line in doc.page_lines(target.page) {
        output.push('\n');
        if target.is_highlighted(line.global_line_number) {
            push_highlighted(&mut output, line, target.highlight_ordinal);
        } else {
            push_line(&mut output, line);
        }
    }

    output.push('\n');
    output.push_str(PADDING_ROW);
    output.push('\n');
    output.push_str(BORDER);
    output
}

/// Render a scroll window.
///
/// `requested` is the count shown in the header; `lines` is the window
/// actually shown.
pub fn render_scroll(lines: &[Line], direction: ScrollDirection, requested: usize) -> String {
    let header = match direction {
        ScrollDirection::Up => format!("|   Scrolled Up {} lines                |", requested),
        ScrollDirection::Down => format!("|   Scrolled Down {} lines              |", requested),
    };

    let mut output = String::new();
    output.push_str(BORDER);
    output.push('\n');
    output.push_str(&header);
    output.push('\n');
    output.push_str(BORDER);
    output.push('\n');
    output.push_str(&render_lines(lines));
    if !lines.is_empty() {
        output.push('\n');
    }
    output.push_str(BORDER);
    output
}

/// Render lines as `|NNN| text` rows, one per line, without framing.
pub fn render_lines(lines: &[Line]) -> String {
    let mut output = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        push_line(&mut output, line);
    }
    output
}

fn push_line(output: &mut String, line: &Line) {
    let _ = write!(
        output,
        "|{:0width$}| {}",
        line.global_line_number,
        line.text,
        width = LINE_NUMBER_WIDTH
    );
}

fn push_highlighted(output: &mut String, line: &Line, ordinal: Option<usize>) {
    let _ = write!(
        output,
        "|{:0width$}| ",
        line.global_line_number,
        width = LINE_NUMBER_WIDTH
    );
    // A highlight without a match rank keeps the attribute as `None`.
    match ordinal {
        Some(ordinal) => {
            let _ = write!(output, "<highlight match=\"{}\"></highlight>", ordinal);
        }
        None => output.push_str("<highlight match=\"None\"></highlight>"),
    }
    output.push(' ');
    output.push_str(&line.text);
}
