//! MCP Server implementation using rmcp

use crate::config::ServerConfig;
use crate::error::Error;
use crate::pages::{
    parse_page_selection, resolve_page_order, resolve_pages, IgnoredToken, SelectionPolicy,
};
use crate::pdf::QpdfWrapper;
use crate::source::{resolve_base64, resolve_cache, resolve_path, CacheManager, ResolvedPdf};
use anyhow::Result;
use futures_util::StreamExt;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// PDF source specification
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum PdfSource {
    /// File path (absolute or relative)
    Path {
        /// Path to the PDF file
        path: String,
    },
    /// Base64 encoded PDF data
    Base64 {
        /// Base64 encoded PDF content
        base64: String,
    },
    /// Reference to a PDF produced by an earlier tool call
    CacheRef {
        /// Cache key from previous operation
        cache_key: String,
    },
}

const SOURCE_KEYS: [&str; 3] = ["path", "base64", "cache_key"];

impl<'de> serde::Deserialize<'de> for PdfSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        let Some(obj) = value.as_object() else {
            return Err(serde::de::Error::custom(format!(
                "Invalid source: expected an object with one of {:?}, but got {}",
                SOURCE_KEYS, value
            )));
        };

        for key in SOURCE_KEYS {
            let Some(v) = obj.get(key) else {
                continue;
            };
            let Some(s) = v.as_str() else {
                return Err(serde::de::Error::custom(format!(
                    "\"{}\" must be a string",
                    key
                )));
            };
            let s = s.to_string();
            return Ok(match key {
                "path" => PdfSource::Path { path: s },
                "base64" => PdfSource::Base64 { base64: s },
                _ => PdfSource::CacheRef { cache_key: s },
            });
        }

        let keys: Vec<&String> = obj.keys().collect();
        Err(serde::de::Error::custom(format!(
            "Invalid source: expected an object with one of {:?}, but got keys: {:?}",
            SOURCE_KEYS, keys
        )))
    }
}

/// PDF pages MCP Server
#[derive(Clone)]
pub struct PdfServer {
    cache: Arc<RwLock<CacheManager>>,
    tool_router: ToolRouter<Self>,
    config: Arc<ServerConfig>,
}

// ============================================================================
// Request/Response types for parse_page_range
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ParsePageRangeParams {
    /// Page range expression, e.g. "1-3,5,7"
    pub range: String,
    /// Page count to validate against, at most `max_total_pages`. Give this or `source`, not both.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// PDF whose page count bounds the range. Give this or `total_pages`, not both.
    #[serde(default)]
    pub source: Option<PdfSource>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ParsePageRangeResult {
    /// The expression as given
    pub range: String,
    /// Page count the expression was resolved against
    pub total_pages: u32,
    /// Selected pages, ascending and without duplicates
    pub pages: Vec<u32>,
    /// Tokens that selected nothing
    pub ignored: Vec<IgnoredToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for page operations
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractPagesParams {
    /// Source PDF
    pub source: PdfSource,
    /// Pages to keep, e.g. "1-3,5". Must select at least one page.
    pub pages: String,
    /// Output file path (optional). If provided, saves PDF to this path.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RemovePagesParams {
    /// Source PDF
    pub source: PdfSource,
    /// Pages to delete, e.g. "2,4-6". Must leave at least one page.
    pub pages: String,
    /// Output file path (optional). If provided, saves PDF to this path.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

fn default_angle() -> i32 {
    90
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RotatePagesParams {
    /// Source PDF
    pub source: PdfSource,
    /// Pages to rotate, e.g. "1,3". Omit or leave blank to rotate every page.
    #[serde(default)]
    pub pages: Option<String>,
    /// Clockwise rotation in degrees, a multiple of 90 (default: 90)
    #[serde(default = "default_angle")]
    pub angle: i32,
    /// Output file path (optional). If provided, saves PDF to this path.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReorderPagesParams {
    /// Source PDF
    pub source: PdfSource,
    /// New page order, e.g. "3,1,2" or "5-1". Unlisted pages follow in their original order.
    pub order: String,
    /// Output file path (optional). If provided, saves PDF to this path.
    #[serde(default)]
    pub output_path: Option<String>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

/// Outcome shared by extract, remove, rotate and reorder
#[derive(Debug, Serialize, JsonSchema)]
pub struct PageOperationResult {
    /// Source identifier
    pub source: String,
    /// Pages the expression resolved to, in the order they were applied
    pub pages: Vec<u32>,
    /// Cache key for the output PDF, for chaining operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_cache_key: Option<String>,
    /// Number of pages in output PDF
    pub output_page_count: u32,
    /// Path where PDF was saved (if output_path was specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageOperationResult {
    fn failed(source: String, error: &Error) -> Self {
        Self {
            source,
            pages: Vec::new(),
            output_cache_key: None,
            output_page_count: 0,
            output_path: None,
            error: Some(error.client_message()),
        }
    }
}

// ============================================================================
// Request/Response types for merge_pdfs
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MergePdfsParams {
    /// PDF sources to merge (in order)
    pub sources: Vec<PdfSource>,
    /// Output file path (optional). If provided, saves the merged PDF to this path.
    #[serde(default)]
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct MergePdfsResult {
    /// Number of source PDFs merged
    pub source_count: u32,
    /// Cache key for the output PDF, for chaining operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_cache_key: Option<String>,
    /// Total pages in output PDF
    pub output_page_count: u32,
    /// Path where PDF was saved (if output_path was specified)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for get_page_count
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetPageCountParams {
    /// PDF sources to inspect
    pub sources: Vec<PdfSource>,
    /// Password for encrypted PDFs
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct PageCountResult {
    /// Source identifier
    pub source: String,
    pub page_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn respond<T: Serialize>(results: &[T]) -> String {
    let response = serde_json::json!({ "results": results });
    serde_json::to_string_pretty(&response).unwrap_or_default()
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl PdfServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new PdfServer with full configuration
    pub fn with_config(config: ServerConfig) -> Self {
        let cache = CacheManager::new(config.cache_max_entries, config.cache_max_bytes);
        Self {
            cache: Arc::new(RwLock::new(cache)),
            tool_router: Self::tool_router(),
            config: Arc::new(config),
        }
    }

    /// Resolve a page range expression without touching any document
    #[tool(
        description = "Resolve a page range expression to page numbers. Tokens are comma-separated single pages (\"5\") or ranges (\"2-4\"). Reversed ranges are accepted, ranges are clipped to the document, and tokens that cannot be used are listed under \"ignored\" instead of failing.

Bound the range with either total_pages or a source PDF. Source format: {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn parse_page_range(
        &self,
        Parameters(params): Parameters<ParsePageRangeParams>,
    ) -> String {
        let result = self
            .process_parse_page_range(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "parse_page_range failed");
                ParsePageRangeResult {
                    range: params.range.clone(),
                    total_pages: 0,
                    pages: Vec::new(),
                    ignored: Vec::new(),
                    error: Some(e.client_message()),
                }
            });

        respond(&[result])
    }

    /// Extract selected pages into a new PDF
    #[tool(
        description = "Create a new PDF containing only the selected pages, in ascending page order. The output is always cached (output_cache_key) for chaining with other tools.

Page range syntax: \"1-5\" (range), \"1,3,5\" (single pages), \"1-3,8,10-12\" (combined). A range that selects no pages is an error.

Source format: must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn extract_pages(&self, Parameters(params): Parameters<ExtractPagesParams>) -> String {
        let range = params.pages.clone();
        let result = self
            .process_page_operation(
                &params.source,
                params.password.clone(),
                &params.output_path,
                move |data, page_count, password| {
                    let pages = resolve_pages(
                        Some(range.as_str()),
                        page_count,
                        SelectionPolicy::RequireNonEmpty,
                    )?;
                    let output = QpdfWrapper::extract_pages(data, &pages, password)?;
                    Ok((output, pages))
                },
            )
            .await
            .unwrap_or_else(|e| Self::page_operation_failed("extract_pages", &params.source, e));

        respond(&[result])
    }

    /// Delete selected pages
    #[tool(
        description = "Delete the selected pages from a PDF. At least one page must be selected and at least one must remain. The output is always cached (output_cache_key) for chaining with other tools.

Page range syntax: \"1-5\" (range), \"1,3,5\" (single pages), \"1-3,8,10-12\" (combined).

Source format: must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn remove_pages(&self, Parameters(params): Parameters<RemovePagesParams>) -> String {
        let range = params.pages.clone();
        let result = self
            .process_page_operation(
                &params.source,
                params.password.clone(),
                &params.output_path,
                move |data, page_count, password| {
                    let pages = resolve_pages(
                        Some(range.as_str()),
                        page_count,
                        SelectionPolicy::RequireNonEmpty,
                    )?;
                    let output = QpdfWrapper::remove_pages(data, &pages, password)?;
                    Ok((output, pages))
                },
            )
            .await
            .unwrap_or_else(|e| Self::page_operation_failed("remove_pages", &params.source, e));

        respond(&[result])
    }

    /// Rotate selected pages
    #[tool(
        description = "Rotate pages clockwise by a multiple of 90 degrees (negative values rotate counter-clockwise). Without a page range every page is rotated. The output is always cached (output_cache_key) for chaining with other tools.

Page range syntax: \"1-5\" (range), \"1,3,5\" (single pages), \"1-3,8,10-12\" (combined).

Source format: must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn rotate_pages(&self, Parameters(params): Parameters<RotatePagesParams>) -> String {
        let range = params.pages.clone();
        let angle = params.angle;
        let result = self
            .process_page_operation(
                &params.source,
                params.password.clone(),
                &params.output_path,
                move |data, page_count, password| {
                    let pages = resolve_pages(
                        range.as_deref(),
                        page_count,
                        SelectionPolicy::AllWhenEmpty,
                    )?;
                    let output = QpdfWrapper::rotate_pages(data, &pages, angle, password)?;
                    Ok((output, pages))
                },
            )
            .await
            .unwrap_or_else(|e| Self::page_operation_failed("rotate_pages", &params.source, e));

        respond(&[result])
    }

    /// Put pages into a new order
    #[tool(
        description = "Reorder the pages of a PDF. Pages named in \"order\" come first, in the order written (\"3,1,2\", or \"5-1\" to reverse); every other page follows in its original order. The output is always cached (output_cache_key) for chaining with other tools.

Source format: must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn reorder_pages(&self, Parameters(params): Parameters<ReorderPagesParams>) -> String {
        let order = params.order.clone();
        let result = self
            .process_page_operation(
                &params.source,
                params.password.clone(),
                &params.output_path,
                move |data, page_count, password| {
                    let pages = resolve_page_order(&order, page_count)?;
                    let output = QpdfWrapper::reorder_pages(data, &pages, password)?;
                    Ok((output, pages))
                },
            )
            .await
            .unwrap_or_else(|e| Self::page_operation_failed("reorder_pages", &params.source, e));

        respond(&[result])
    }

    /// Merge multiple PDFs into one
    #[tool(
        description = "Merge multiple PDF files into a single PDF, in the order given. The output is always cached (output_cache_key) for chaining with other tools.

Source format: each element must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn merge_pdfs(&self, Parameters(params): Parameters<MergePdfsParams>) -> String {
        let result = self
            .process_merge_pdfs(&params)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "merge_pdfs failed");
                MergePdfsResult {
                    source_count: params.sources.len() as u32,
                    output_cache_key: None,
                    output_page_count: 0,
                    output_path: None,
                    error: Some(e.client_message()),
                }
            });

        respond(&[result])
    }

    /// Count pages of one or more PDFs
    #[tool(
        description = "Get the page count of one or more PDFs. Each source is reported separately; one failing source does not affect the others.

Source format: each element must be one of {\"path\": \"/absolute/path.pdf\"}, {\"base64\": \"...\"}, or {\"cache_key\": \"...\"}"
    )]
    async fn get_page_count(&self, Parameters(params): Parameters<GetPageCountParams>) -> String {
        let results = self.process_get_page_count(&params).await;
        respond(&results)
    }
}

impl PdfServer {
    fn source_name(source: &PdfSource) -> String {
        match source {
            PdfSource::Path { path } => path.clone(),
            PdfSource::Base64 { .. } => "<base64>".to_string(),
            PdfSource::CacheRef { cache_key } => format!("<cache:{}>", cache_key),
        }
    }

    async fn resolve_source(&self, source: &PdfSource) -> crate::error::Result<ResolvedPdf> {
        match source {
            PdfSource::Path { path } => {
                let checked = self.sandboxed(path, true)?;
                resolve_path(checked, self.config.max_input_bytes)
            }
            PdfSource::Base64 { base64 } => resolve_base64(base64, self.config.max_input_bytes),
            PdfSource::CacheRef { cache_key } => resolve_cache(cache_key, &self.cache).await,
        }
    }

    /// Check that `path` lies inside a configured resource directory.
    ///
    /// Existing paths are canonicalized directly. Output paths that do not
    /// exist yet are checked through their parent directory. With no resource
    /// directories configured every path is allowed.
    fn sandboxed(&self, path: &str, must_exist: bool) -> crate::error::Result<PathBuf> {
        if self.config.resource_dirs.is_empty() {
            return Ok(PathBuf::from(path));
        }

        let denied = || Error::PathAccessDenied {
            path: path.to_string(),
        };

        let target = Path::new(path);
        let canonical = if must_exist {
            std::fs::canonicalize(target).map_err(|_| denied())?
        } else {
            let parent = match target.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            let file_name = target.file_name().ok_or_else(denied)?;
            std::fs::canonicalize(parent)
                .map_err(|_| denied())?
                .join(file_name)
        };

        let allowed = self.config.resource_dirs.iter().any(|dir| {
            std::fs::canonicalize(dir)
                .map(|root| canonical.starts_with(root))
                .unwrap_or(false)
        });

        if allowed {
            Ok(canonical)
        } else {
            Err(denied())
        }
    }

    /// Write output data to a file path, with sandbox validation.
    fn write_output(
        &self,
        output_path: &Option<String>,
        data: &[u8],
    ) -> crate::error::Result<Option<String>> {
        let Some(path_str) = output_path else {
            return Ok(None);
        };

        // Sandboxed writes need the parent to exist already; otherwise create it.
        if self.config.resource_dirs.is_empty() {
            if let Some(parent) = Path::new(path_str).parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let target = self.sandboxed(path_str, false)?;
        std::fs::write(&target, data)?;
        tracing::debug!(path = %target.display(), bytes = data.len(), "wrote output PDF");
        Ok(Some(path_str.clone()))
    }

    /// Store an output document and return its key, if it fits in the cache
    async fn cache_output(&self, data: Vec<u8>) -> Option<String> {
        let size = data.len();
        let cache = self.cache.write().await;
        let key = cache.insert(data);
        match &key {
            Some(key) => tracing::debug!(
                %key,
                bytes = size,
                cached_bytes = cache.total_bytes(),
                entries = cache.len(),
                "cached output PDF"
            ),
            None => tracing::warn!(bytes = size, "output PDF too large to cache"),
        }
        key
    }

    async fn process_parse_page_range(
        &self,
        params: &ParsePageRangeParams,
    ) -> crate::error::Result<ParsePageRangeResult> {
        let total_pages = match (params.total_pages, &params.source) {
            (Some(total), None) if total > self.config.max_total_pages => {
                return Err(Error::InvalidRequest {
                    reason: format!(
                        "total_pages {} exceeds the limit of {}",
                        total, self.config.max_total_pages
                    ),
                })
            }
            (Some(total), None) => total,
            (None, Some(source)) => self.count_pages(source, params.password.clone()).await?,
            _ => {
                return Err(Error::InvalidRequest {
                    reason: "provide exactly one of total_pages or source".to_string(),
                })
            }
        };

        let selection = parse_page_selection(&params.range, total_pages);
        if !selection.ignored.is_empty() {
            tracing::debug!(
                range = %params.range,
                ignored = selection.ignored.len(),
                "page range contained unusable tokens"
            );
        }

        Ok(ParsePageRangeResult {
            range: params.range.clone(),
            total_pages,
            pages: selection.pages,
            ignored: selection.ignored,
            error: None,
        })
    }

    /// Shared flow for single-document page edits.
    ///
    /// Resolves the source, learns its page count, lets `apply` pick the
    /// pages and build the output on a blocking thread, then caches the
    /// output and optionally writes it to disk.
    async fn process_page_operation<F>(
        &self,
        source: &PdfSource,
        password: Option<String>,
        output_path: &Option<String>,
        apply: F,
    ) -> crate::error::Result<PageOperationResult>
    where
        F: FnOnce(&[u8], u32, Option<&str>) -> crate::error::Result<(Vec<u8>, Vec<u32>)>
            + Send
            + 'static,
    {
        let resolved = self.resolve_source(source).await?;
        let source_name = resolved.source_name;
        let data = resolved.data;

        let (output_data, pages, output_page_count) = tokio::task::spawn_blocking(move || {
            let page_count = QpdfWrapper::get_page_count(&data, password.as_deref())?;
            let (output_data, pages) = apply(&data, page_count, password.as_deref())?;
            let output_page_count = QpdfWrapper::get_page_count(&output_data, None)?;
            Ok::<_, Error>((output_data, pages, output_page_count))
        })
        .await
        .map_err(|e| Error::TaskJoin {
            reason: e.to_string(),
        })??;

        let output_path = self.write_output(output_path, &output_data)?;
        let output_cache_key = self.cache_output(output_data).await;

        tracing::info!(
            source = %source_name,
            selected = pages.len(),
            output_page_count,
            "page operation complete"
        );

        Ok(PageOperationResult {
            source: source_name,
            pages,
            output_cache_key,
            output_page_count,
            output_path,
            error: None,
        })
    }

    fn page_operation_failed(
        operation: &str,
        source: &PdfSource,
        e: Error,
    ) -> PageOperationResult {
        tracing::warn!(error = %e, "{} failed", operation);
        PageOperationResult::failed(Self::source_name(source), &e)
    }

    async fn process_merge_pdfs(
        &self,
        params: &MergePdfsParams,
    ) -> crate::error::Result<MergePdfsResult> {
        if params.sources.is_empty() {
            return Err(Error::InvalidRequest {
                reason: "No PDF sources provided".to_string(),
            });
        }

        let mut resolved_pdfs: Vec<Vec<u8>> = Vec::with_capacity(params.sources.len());
        for source in &params.sources {
            resolved_pdfs.push(self.resolve_source(source).await?.data);
        }

        let (output_data, output_page_count) = tokio::task::spawn_blocking(move || {
            let pdf_refs: Vec<&[u8]> = resolved_pdfs.iter().map(|v| v.as_slice()).collect();
            let output_data = QpdfWrapper::merge(&pdf_refs)?;
            let output_page_count = QpdfWrapper::get_page_count(&output_data, None)?;
            Ok::<_, Error>((output_data, output_page_count))
        })
        .await
        .map_err(|e| Error::TaskJoin {
            reason: e.to_string(),
        })??;

        let output_path = self.write_output(&params.output_path, &output_data)?;
        let output_cache_key = self.cache_output(output_data).await;

        tracing::info!(
            sources = params.sources.len(),
            output_page_count,
            "merged PDFs"
        );

        Ok(MergePdfsResult {
            source_count: params.sources.len() as u32,
            output_cache_key,
            output_page_count,
            output_path,
            error: None,
        })
    }

    async fn count_pages(
        &self,
        source: &PdfSource,
        password: Option<String>,
    ) -> crate::error::Result<u32> {
        let resolved = self.resolve_source(source).await?;
        tokio::task::spawn_blocking(move || {
            QpdfWrapper::get_page_count(&resolved.data, password.as_deref())
        })
        .await
        .map_err(|e| Error::TaskJoin {
            reason: e.to_string(),
        })?
    }

    /// Count pages of every source, at most `max_concurrent_jobs` at a time.
    /// Results keep the input order.
    async fn process_get_page_count(&self, params: &GetPageCountParams) -> Vec<PageCountResult> {
        let limit = self.config.max_concurrent_jobs.max(1);

        futures_util::stream::iter(params.sources.clone())
            .map(|source| {
                let server = self.clone();
                let password = params.password.clone();
                async move {
                    let name = Self::source_name(&source);
                    match server.count_pages(&source, password).await {
                        Ok(page_count) => PageCountResult {
                            source: name,
                            page_count,
                            error: None,
                        },
                        Err(e) => {
                            tracing::warn!(error = %e, "get_page_count failed");
                            PageCountResult {
                                source: name,
                                page_count: 0,
                                error: Some(e.client_message()),
                            }
                        }
                    }
                }
            })
            .buffered(limit)
            .collect::<Vec<_>>()
            .await
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "PDF pages MCP Server selects pages with human-style page ranges such as \
                 \"1-3,5\" and extracts, removes, rotates, reorders or merges them. \
                 Outputs are cached so tools can be chained via cache_key."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server with default configuration
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    tracing::debug!(?config, "server configuration");
    let server = PdfServer::with_config(config);

    tracing::info!("PDF pages MCP Server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}
