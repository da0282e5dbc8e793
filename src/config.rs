//! Server configuration
//!
//! Defaults can be overridden through environment variables:
//!
//! | variable | field |
//! |---|---|
//! | `PDF_PAGES_RESOURCE_DIRS` | `resource_dirs` (platform path list, e.g. `a:b` on Unix) |
//! | `PDF_PAGES_MAX_INPUT_BYTES` | `max_input_bytes` |
//! | `PDF_PAGES_CACHE_MAX_BYTES` | `cache_max_bytes` |
//! | `PDF_PAGES_CACHE_MAX_ENTRIES` | `cache_max_entries` |
//! | `PDF_PAGES_MAX_CONCURRENT_JOBS` | `max_concurrent_jobs` |
//! | `PDF_PAGES_MAX_TOTAL_PAGES` | `max_total_pages` |

use std::ffi::OsString;
use std::str::FromStr;

/// Security and resource configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directories that path sources and output paths must live under.
    /// Empty allows any path.
    pub resource_dirs: Vec<String>,
    /// Largest accepted input PDF in bytes (default: 100MB)
    pub max_input_bytes: u64,
    /// Maximum total bytes in cache (default: 512MB)
    pub cache_max_bytes: usize,
    /// Maximum number of cache entries (default: 100)
    pub cache_max_entries: usize,
    /// Documents processed at once by batch tools (default: 4)
    pub max_concurrent_jobs: usize,
    /// Largest caller-supplied page count accepted by `parse_page_range` (default: 100000)
    pub max_total_pages: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            resource_dirs: Vec::new(),
            max_input_bytes: 100 * 1024 * 1024, // 100MB
            cache_max_bytes: 512 * 1024 * 1024, // 512MB
            cache_max_entries: 100,
            max_concurrent_jobs: 4,
            max_total_pages: 100_000,
        }
    }
}

/// Parse a numeric override, keeping `default` when it is absent or unusable
fn numeric<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => {
            tracing::warn!(key, value = %raw, "ignoring invalid configuration value");
            default
        }
    }
}

impl ServerConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let resource_dirs = lookup("PDF_PAGES_RESOURCE_DIRS")
            .map(|raw| {
                std::env::split_paths(&OsString::from(raw))
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or(defaults.resource_dirs);

        Self {
            resource_dirs,
            max_input_bytes: numeric(
                &lookup,
                "PDF_PAGES_MAX_INPUT_BYTES",
                defaults.max_input_bytes,
            ),
            cache_max_bytes: numeric(
                &lookup,
                "PDF_PAGES_CACHE_MAX_BYTES",
                defaults.cache_max_bytes,
            ),
            cache_max_entries: numeric(
                &lookup,
                "PDF_PAGES_CACHE_MAX_ENTRIES",
                defaults.cache_max_entries,
            ),
            max_concurrent_jobs: numeric(
                &lookup,
                "PDF_PAGES_MAX_CONCURRENT_JOBS",
                defaults.max_concurrent_jobs,
            ),
            max_total_pages: numeric(
                &lookup,
                "PDF_PAGES_MAX_TOTAL_PAGES",
                defaults.max_total_pages,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = ServerConfig::from_lookup(|_| None);
        assert!(config.resource_dirs.is_empty());
        assert_eq!(config.max_input_bytes, 100 * 1024 * 1024);
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.max_concurrent_jobs, 4);
        assert_eq!(config.max_total_pages, 100_000);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PDF_PAGES_MAX_INPUT_BYTES", "2048"),
            ("PDF_PAGES_CACHE_MAX_ENTRIES", " 7 "),
            ("PDF_PAGES_MAX_CONCURRENT_JOBS", "16"),
            ("PDF_PAGES_MAX_TOTAL_PAGES", "500"),
        ]));
        assert_eq!(config.max_total_pages, 500);
        assert_eq!(config.max_input_bytes, 2048);
        assert_eq!(config.cache_max_entries, 7);
        assert_eq!(config.max_concurrent_jobs, 16);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PDF_PAGES_MAX_CONCURRENT_JOBS", "0"),
            ("PDF_PAGES_CACHE_MAX_BYTES", "lots"),
        ]));
        assert_eq!(config.max_concurrent_jobs, 4);
        assert_eq!(config.cache_max_bytes, 512 * 1024 * 1024);
    }

    #[cfg(unix)]
    #[test]
    fn test_resource_dirs_path_list() {
        let config = ServerConfig::from_lookup(lookup_from(&[(
            "PDF_PAGES_RESOURCE_DIRS",
            "/srv/pdfs::/tmp/out",
        )]));
        assert_eq!(config.resource_dirs, vec!["/srv/pdfs", "/tmp/out"]);
    }
}
