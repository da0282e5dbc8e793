//! PDF Pages MCP Server Library
//!
//! Page-level PDF editing driven by human-entered page ranges such as
//! `"1-3,5,7"`. The range parser in [`pages`] is usable on its own; the MCP
//! tools built on it are:
//! - `parse_page_range`: Resolve a range expression against a page count
//! - `extract_pages`: Keep only the selected pages
//! - `remove_pages`: Delete the selected pages
//! - `rotate_pages`: Rotate the selected pages (all pages when none are given)
//! - `reorder_pages`: Move pages into a new order
//! - `merge_pdfs`: Concatenate documents
//! - `get_page_count`: Count pages of several documents concurrently

pub mod config;
pub mod error;
pub mod pages;
pub mod pdf;
pub mod server;
pub mod source;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use pages::{parse_page_range, parse_page_selection, PageSelection};
pub use server::{run_server, run_server_with_config, PdfServer, PdfSource};
