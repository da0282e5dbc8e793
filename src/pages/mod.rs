//! Page selection layer
//!
//! Parsing of human-entered page ranges and the caller policies that decide
//! what an empty selection means.

mod range;
mod selection;

pub use range::{
    parse_leading_int, parse_page_order, parse_page_range, parse_page_selection, IgnoreReason,
    IgnoredToken, PageSelection,
};
pub use selection::{resolve_page_order, resolve_pages, SelectionPolicy};
