//! PDF processing layer
//!
//! Page-level document operations backed by qpdf.

mod qpdf;

pub use qpdf::QpdfWrapper;

#[cfg(test)]
pub(crate) mod fixtures;
