use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::cli::ServeArgs;
use crate::web::{StaticServer, StaticServerConfig};

/// `pollichat serve`
pub async fn run_static_server(args: &ServeArgs) -> Result<()> {
    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.bind, args.port))?;

    let server = StaticServer::new(StaticServerConfig {
        bind_addr,
        root: args.dir.clone(),
    });
    server.start().await
}
