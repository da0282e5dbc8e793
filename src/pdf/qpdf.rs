//! qpdf FFI wrapper for page-level PDF editing
//!
//! All operations take raw PDF bytes and 1-based page numbers that have
//! already been resolved from a page range, and return a new PDF in bytes.

use crate::error::{Error, Result};
use qpdf::{QPdf, QPdfDictionary, QPdfScalar};
use std::collections::HashSet;

/// Wrapper for qpdf operations via FFI
pub struct QpdfWrapper;

/// Helper: open a QPdf from memory, optionally with password
fn open_qpdf(data: &[u8], password: Option<&str>) -> Result<QPdf> {
    match password {
        Some(pwd) => QPdf::read_from_memory_encrypted(data, pwd).map_err(map_qpdf_error),
        None => QPdf::read_from_memory(data).map_err(map_qpdf_error),
    }
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::IncorrectPassword,
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

/// Look up a 1-based page, reporting the document size when it is missing
fn page_at(pages: &[QPdfDictionary], page: u32) -> Result<&QPdfDictionary> {
    page.checked_sub(1)
        .and_then(|idx| pages.get(idx as usize))
        .ok_or_else(|| Error::QpdfError {
            reason: format!("page {} out of bounds (total: {})", page, pages.len()),
        })
}

/// Serialize a document without carrying over the source encryption
fn write_plain(qpdf: &QPdf) -> Result<Vec<u8>> {
    let mut writer = qpdf.writer();
    writer.preserve_encryption(false);
    writer.write_to_memory().map_err(map_qpdf_error)
}

/// Build a new document from `source` pages in the given order
fn copy_pages(source: &QPdf, order: &[u32]) -> Result<Vec<u8>> {
    let pages = source.get_pages().map_err(map_qpdf_error)?;
    let dest = QPdf::empty();

    for &number in order {
        let page = page_at(&pages, number)?;
        let copied = dest.copy_from_foreign(page);
        dest.add_page(&copied, false).map_err(map_qpdf_error)?;
    }

    write_plain(&dest)
}

impl QpdfWrapper {
    /// Get the page count of a PDF
    pub fn get_page_count(input_data: &[u8], password: Option<&str>) -> Result<u32> {
        let qpdf = open_qpdf(input_data, password)?;
        qpdf.get_num_pages().map_err(map_qpdf_error)
    }

    /// Extract specific pages into a new PDF
    ///
    /// # Arguments
    /// * `input_data` - Raw PDF bytes
    /// * `pages` - 1-based page numbers, in output order
    /// * `password` - Optional password for encrypted PDFs
    pub fn extract_pages(
        input_data: &[u8],
        pages: &[u32],
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        if pages.is_empty() {
            return Err(Error::EmptySelection {
                range: String::new(),
            });
        }

        let source = open_qpdf(input_data, password)?;
        tracing::debug!(count = pages.len(), "extracting pages");
        copy_pages(&source, pages)
    }

    /// Remove pages from a PDF, keeping everything else in place.
    ///
    /// Removing every page is rejected since the result would not be a usable document.
    pub fn remove_pages(
        input_data: &[u8],
        pages: &[u32],
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        let qpdf = open_qpdf(input_data, password)?;
        let all_pages = qpdf.get_pages().map_err(map_qpdf_error)?;

        let doomed: HashSet<u32> = pages.iter().copied().collect();
        if doomed.is_empty() {
            return Err(Error::EmptySelection {
                range: String::new(),
            });
        }
        let targets = doomed
            .iter()
            .map(|&number| page_at(&all_pages, number))
            .collect::<Result<Vec<_>>>()?;
        if targets.len() >= all_pages.len() {
            return Err(Error::InvalidRequest {
                reason: "cannot remove every page".to_string(),
            });
        }

        for page in targets {
            qpdf.remove_page(page).map_err(map_qpdf_error)?;
        }

        tracing::debug!(removed = doomed.len(), "removed pages");
        write_plain(&qpdf)
    }

    /// Rotate pages clockwise by `angle` degrees on top of their current rotation.
    ///
    /// # Arguments
    /// * `angle` - Multiple of 90; negative values rotate counter-clockwise
    pub fn rotate_pages(
        input_data: &[u8],
        pages: &[u32],
        angle: i32,
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        if angle % 90 != 0 {
            return Err(Error::InvalidRotation { angle });
        }

        let qpdf = open_qpdf(input_data, password)?;
        let all_pages = qpdf.get_pages().map_err(map_qpdf_error)?;

        for &number in pages {
            let page = page_at(&all_pages, number)?;
            let current = page
                .get("/Rotate")
                .map(|r| QPdfScalar::from(r).as_i64())
                .unwrap_or(0);
            // Reduce before adding: /Rotate may hold any integer
            let rotation = (current.rem_euclid(360) + i64::from(angle)).rem_euclid(360);
            page.set("/Rotate", qpdf.new_integer(rotation));
        }

        write_plain(&qpdf)
    }

    /// Rearrange pages: `order` comes first, then every unlisted page in its original order
    pub fn reorder_pages(
        input_data: &[u8],
        order: &[u32],
        password: Option<&str>,
    ) -> Result<Vec<u8>> {
        let source = open_qpdf(input_data, password)?;
        let total = source.get_num_pages().map_err(map_qpdf_error)?;

        let listed: HashSet<u32> = order.iter().copied().collect();
        let full_order: Vec<u32> = order
            .iter()
            .copied()
            .chain((1..=total).filter(|p| !listed.contains(p)))
            .collect();

        copy_pages(&source, &full_order)
    }

    /// Merge multiple PDFs into one, in input order
    pub fn merge(inputs: &[&[u8]]) -> Result<Vec<u8>> {
        if inputs.is_empty() {
            return Err(Error::InvalidRequest {
                reason: "No input PDFs provided".to_string(),
            });
        }

        let dest = QPdf::empty();

        for (i, input_data) in inputs.iter().enumerate() {
            let source = QPdf::read_from_memory(input_data).map_err(|e| Error::QpdfError {
                reason: format!("Failed to read input PDF {}: {}", i, e),
            })?;

            for page in &source.get_pages().map_err(map_qpdf_error)? {
                let copied = dest.copy_from_foreign(page);
                dest.add_page(&copied, false).map_err(map_qpdf_error)?;
            }
        }

        write_plain(&dest)
    }
}
