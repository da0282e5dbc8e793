//! Source resolution for PDF data

use crate::error::{Error, Result};
use crate::source::CacheManager;
use base64::Engine;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolved PDF data
pub struct ResolvedPdf {
    pub data: Vec<u8>,
    pub source_name: String,
}

/// Reject payloads that are too large or do not start with a PDF header
fn validate_pdf(data: &[u8], max_bytes: u64, what: &str) -> Result<()> {
    if data.len() as u64 > max_bytes {
        return Err(Error::InputTooLarge {
            size: data.len() as u64,
            max_size: max_bytes,
        });
    }

    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: format!("{} is not a valid PDF file", what),
        });
    }

    Ok(())
}

/// Resolve a file path to PDF data
pub fn resolve_path<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<ResolvedPdf> {
    let path = path.as_ref();

    let metadata = std::fs::metadata(path).map_err(|_| Error::PdfNotFound {
        path: path.display().to_string(),
    })?;
    if metadata.len() > max_bytes {
        return Err(Error::InputTooLarge {
            size: metadata.len(),
            max_size: max_bytes,
        });
    }

    let data = std::fs::read(path)?;
    validate_pdf(&data, max_bytes, "File")?;

    Ok(ResolvedPdf {
        data,
        source_name: path.display().to_string(),
    })
}

/// Resolve base64 encoded data to PDF data
pub fn resolve_base64(base64_data: &str, max_bytes: u64) -> Result<ResolvedPdf> {
    let engine = base64::engine::general_purpose::STANDARD;
    let data = engine.decode(base64_data.trim())?;
    validate_pdf(&data, max_bytes, "Decoded data")?;

    Ok(ResolvedPdf {
        data,
        source_name: "<base64>".to_string(),
    })
}

/// Resolve a cache key to PDF data
pub async fn resolve_cache(
    cache_key: &str,
    cache: &Arc<RwLock<CacheManager>>,
) -> Result<ResolvedPdf> {
    let cache_guard = cache.read().await;
    let data = cache_guard
        .get(cache_key)
        .ok_or_else(|| Error::CacheKeyNotFound {
            key: cache_key.to_string(),
        })?;

    Ok(ResolvedPdf {
        data,
        source_name: format!("<cache:{}>", cache_key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const LIMIT: u64 = 1024 * 1024;

    #[test]
    fn test_resolve_base64_valid() {
        // "%PDF-1.4"
        let resolved = resolve_base64("JVBERi0xLjQ=", LIMIT).unwrap();
        assert_eq!(resolved.data, b"%PDF-1.4");
        assert_eq!(resolved.source_name, "<base64>");
    }

    #[test]
    fn test_resolve_base64_not_pdf() {
        // Valid base64 but not PDF
        let result = resolve_base64("SGVsbG8gV29ybGQ=", LIMIT); // "Hello World"
        assert!(matches!(result, Err(Error::InvalidPdf { .. })));
    }

    #[test]
    fn test_resolve_base64_invalid_base64() {
        let result = resolve_base64("not valid base64!!!", LIMIT);
        assert!(matches!(result, Err(Error::Base64Decode(_))));
    }

    #[test]
    fn test_resolve_base64_too_large() {
        let result = resolve_base64("JVBERi0xLjQ=", 4);
        assert!(matches!(
            result,
            Err(Error::InputTooLarge {
                size: 8,
                max_size: 4
            })
        ));
    }

    #[test]
    fn test_resolve_path_not_found() {
        let result = resolve_path("/nonexistent/path/file.pdf", LIMIT);
        assert!(matches!(result, Err(Error::PdfNotFound { .. })));
    }

    #[test]
    fn test_resolve_path_valid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.7\n%%EOF\n").unwrap();

        let resolved = resolve_path(file.path(), LIMIT).unwrap();
        assert!(resolved.data.starts_with(b"%PDF"));
        assert_eq!(resolved.source_name, file.path().display().to_string());
    }

    #[test]
    fn test_resolve_path_too_large() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[b'%'; 64]).unwrap();

        let result = resolve_path(file.path(), 16);
        assert!(matches!(result, Err(Error::InputTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_resolve_cache() {
        let cache = Arc::new(RwLock::new(CacheManager::new(4, LIMIT as usize)));
        let key = cache.read().await.insert(b"%PDF".to_vec()).unwrap();

        let resolved = resolve_cache(&key, &cache).await.unwrap();
        assert_eq!(resolved.data, b"%PDF");
        assert_eq!(resolved.source_name, format!("<cache:{}>", key));

        let missing = resolve_cache("missing", &cache).await;
        assert!(matches!(missing, Err(Error::CacheKeyNotFound { .. })));
    }
}
