//! Caller policies for page selections

use super::range::{parse_page_order, parse_page_range};
use crate::error::{Error, Result};

/// What an empty selection means to the operation consuming it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// No explicit selection applies the operation to every page
    AllWhenEmpty,
    /// An empty selection is a user error
    RequireNonEmpty,
}

/// Resolve an optional range expression to page numbers under `policy`.
///
/// Fails with [`Error::EmptyDocument`] when the document has no pages, since
/// every expression parses to nothing against it.
pub fn resolve_pages(
    expression: Option<&str>,
    max_pages: u32,
    policy: SelectionPolicy,
) -> Result<Vec<u32>> {
    if max_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let expression = expression.unwrap_or_default();
    let pages = parse_page_range(expression, max_pages);
    if !pages.is_empty() {
        return Ok(pages);
    }

    match policy {
        SelectionPolicy::AllWhenEmpty if expression.trim().is_empty() => {
            Ok((1..=max_pages).collect())
        }
        _ => Err(Error::EmptySelection {
            range: expression.to_string(),
        }),
    }
}

/// Resolve a page order expression. An empty order is always an error.
pub fn resolve_page_order(expression: &str, max_pages: u32) -> Result<Vec<u32>> {
    if max_pages == 0 {
        return Err(Error::EmptyDocument);
    }

    let order = parse_page_order(expression, max_pages);
    if order.is_empty() {
        return Err(Error::EmptySelection {
            range: expression.to_string(),
        });
    }

    Ok(order)
}
