//! Error types for the PDF pages MCP server

use thiserror::Error;

/// Result type alias for the PDF pages MCP server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the PDF pages MCP server
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// Incorrect password provided
    #[error("Incorrect password")]
    IncorrectPassword,

    /// Input larger than the configured limit
    #[error("Input too large: {size} bytes (max: {max_size} bytes)")]
    InputTooLarge { size: u64, max_size: u64 },

    /// Document has no pages to select from
    #[error("PDF has no pages")]
    EmptyDocument,

    /// Page range selected no pages where the operation needs at least one
    #[error("Page range selects no pages: {range:?}")]
    EmptySelection { range: String },

    /// Rotation angle is not a multiple of 90 degrees
    #[error("Invalid rotation: {angle} (must be a multiple of 90)")]
    InvalidRotation { angle: i32 },

    /// Request parameters are inconsistent
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// Cache key not found
    #[error("Cache key not found: {key}")]
    CacheKeyNotFound { key: String },

    /// Base64 decode error
    #[error("Invalid base64 data: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// qpdf error
    #[error("qpdf error: {reason}")]
    QpdfError { reason: String },

    /// Blocking worker failed to complete
    #[error("Task join error: {reason}")]
    TaskJoin { reason: String },

    /// Path access denied (outside allowed resource directories)
    #[error("Path access denied: {path}")]
    PathAccessDenied { path: String },
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::PdfNotFound { .. } => "PDF not found".to_string(),
            Error::InvalidPdf { .. } => "Invalid PDF file".to_string(),
            Error::IncorrectPassword => "Incorrect password".to_string(),
            Error::InputTooLarge { max_size, .. } => {
                format!("Input exceeds maximum size of {} bytes", max_size)
            }
            Error::EmptyDocument => "PDF has no pages".to_string(),
            Error::EmptySelection { range } => {
                format!("Page range selects no pages: {:?}", range)
            }
            Error::InvalidRotation { angle } => {
                format!("Invalid rotation: {} (must be a multiple of 90)", angle)
            }
            Error::InvalidRequest { reason } => format!("Invalid request: {}", reason),
            Error::CacheKeyNotFound { .. } => "Cache key not found".to_string(),
            Error::Base64Decode(_) => "Invalid base64 data".to_string(),
            Error::Io(_) => "I/O error".to_string(),
            Error::QpdfError { .. } => "PDF processing error".to_string(),
            Error::TaskJoin { .. } => "Internal error".to_string(),
            Error::PathAccessDenied { .. } => "Access denied".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_hides_internal_details() {
        let err = Error::PdfNotFound {
            path: "/secret/location/report.pdf".to_string(),
        };
        assert!(!err.client_message().contains("/secret"));

        let err = Error::QpdfError {
            reason: "object 12 0 has bad xref".to_string(),
        };
        assert_eq!(err.client_message(), "PDF processing error");
    }

    #[test]
    fn test_client_message_keeps_user_input_errors() {
        let err = Error::EmptySelection {
            range: "x-y".to_string(),
        };
        assert_eq!(err.client_message(), "Page range selects no pages: \"x-y\"");

        let err = Error::InvalidRotation { angle: 45 };
        assert!(err.client_message().contains("45"));
    }
}
