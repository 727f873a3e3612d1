use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::ErrorKind;
use std::net::SocketAddr;
use swiftmail_signup::{create_router, AppState, ServiceConfig};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    #[clap(long, default_value = "config.toml")]
    config: String,

    #[clap(long)]
    listen_addr: Option<String>,
}

fn load_config(path: &str) -> anyhow::Result<ServiceConfig> {
    match fs::read_to_string(path) {
        Ok(text) => ServiceConfig::from_toml(&text).context("parse config"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Config file {} not found, using defaults", path);
            Ok(ServiceConfig::default())
        }
        Err(e) => Err(e).context("read config"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = load_config(&args.config)?;

    if let Some(addr) = args.listen_addr {
        cfg = cfg.with_listen_addr(addr);
    }

    let addr: SocketAddr = cfg
        .listen_addr
        .parse()
        .context("parse listen_addr as SocketAddr")?;

    let state = AppState::from_config(&cfg.store)
        .await
        .context("open user store")?
        .with_body_limit(cfg.max_body_bytes);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!("Signup service listening on {}", addr);

    axum::serve(listener, app).await.context("serve http")?;
    Ok(())
}
