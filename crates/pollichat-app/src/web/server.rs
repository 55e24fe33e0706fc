use anyhow::{Context, Result};
use axum::Router;
use colored::Colorize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

/// Static server configuration
#[derive(Debug, Clone)]
pub struct StaticServerConfig {
    pub bind_addr: SocketAddr,
    pub root: PathBuf,
}

/// Router serving `root`, with `index.html` answering every unknown path
pub fn static_router(root: &Path) -> Router {
    let index = ServeFile::new(root.join("index.html"));
    let assets = ServeDir::new(root).fallback(index);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().fallback_service(assets).layer(cors)
}

pub struct StaticServer {
    config: StaticServerConfig,
}

impl StaticServer {
    pub fn new(config: StaticServerConfig) -> Self {
        Self { config }
    }

    pub async fn start(self) -> Result<()> {
        let root = &self.config.root;
        if !root.join("index.html").exists() {
            log::warn!("{} has no index.html; unknown routes will return 404", root.display());
        }

        println!("🌐 Server running on http://{}", self.config.bind_addr);
        println!("   Serving files from: {}", root.display());

        let listener = tokio::net::TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.config.bind_addr))?;
        axum::serve(listener, static_router(root)).await?;

        Ok(())
    }
}
