//! HTTP server persisting tree documents as named presets.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use treedeck::http;
use treedeck::store::{default_data_dir, PresetService, StoreHandle};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tree document preset server")]
struct Args {
    /// TCP listener for API clients (e.g. 0.0.0.0:3000)
    #[arg(long, default_value = "0.0.0.0:3000")]
    listen: SocketAddr,
    /// Directory holding the preset store and legacy document files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
    let service = PresetService::new(StoreHandle::new(&data_dir));
    let app = http::router(Arc::new(service));

    info!(listen = %args.listen, data_dir = %data_dir.display(), "preset server listening");
    let listener = tokio::net::TcpListener::bind(args.listen).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
}
