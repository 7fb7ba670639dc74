//! Line-addressable document model.
//!
//! Every extracted line gets one document-wide coordinate (its global line
//! number) alongside its page coordinates. The rest of the crate addresses
//! content through that single coordinate space.

mod document;
mod line;

pub use document::Document;
pub use line::{Line, PageRange};
