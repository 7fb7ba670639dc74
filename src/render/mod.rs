//! Fixed-width text rendering of pages and line windows.
//!
//! The block format is the only bit-exact contract the crate exposes:
//!
//! ```text
//! ------------------------------------------
//! |               Page 2 of 5             |
//! ------------------------------------------
//! |                                        |
//! |                                        |
//! |                                        |
//! |004| first line of page 2
//! |005| <highlight match="1"></highlight> a search hit
//! |                                        |
//! ------------------------------------------
//! ```

mod page;
mod target;

pub use page::{render_lines, render_page, render_scroll, render_target, ScrollDirection};
pub use target::RenderTarget;

/// Top and bottom border of every block.
pub const BORDER: &str = "------------------------------------------";

/// Empty framed row used as padding inside page blocks.
pub const PADDING_ROW: &str = "|                                        |";

/// Minimum width of the zero-padded global line number.
pub const LINE_NUMBER_WIDTH: usize = 3;
