//! PDF Pages MCP Server - Entry point

use pdf_pages_mcp::{run_server_with_config, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the MCP transport
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_pages_mcp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        resource_dirs = config.resource_dirs.len(),
        max_concurrent_jobs = config.max_concurrent_jobs,
        "Starting PDF Pages MCP Server"
    );

    run_server_with_config(config).await
}
