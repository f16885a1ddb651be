use std::sync::Arc;

use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_common::redis::RedisCache;
use pura_connect::cache::CatalogCache;
use pura_connect::config::Config;
use pura_connect::loader::Catalog;
use pura_connect::search;
use pura_connect::server::PuraConnectServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries MCP JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting pura-connect MCP server");

    let config = Config::from_env()?;
    info!(
        catalog_path = ?config.catalog_path,
        deadline = %config.deadline,
        applications_closed = config.applications_closed,
        redis = config.redis_url.is_some(),
        "configuration loaded"
    );

    let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);
    info!(
        records = catalog.len(),
        domains = search::list_domains(catalog.records()).len() - 1,
        fingerprint = %catalog.fingerprint(),
        "catalog ready"
    );

    let redis_cache = RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without cache");
    }
    let cache = Arc::new(CatalogCache::new(redis_cache, catalog.fingerprint()));

    let server = PuraConnectServer::new(catalog, cache, config);

    if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
