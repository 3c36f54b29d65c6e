mod routes;
mod session;
mod state;
mod views;

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paddock_core::GameContent;
use paddock_store::{load_content, GameStore};
use tracing_subscriber::EnvFilter;

use crate::state::{unix_now, AppState, ClockMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "paddock_daemon", about = "Racing team manager web server")]
struct Args {
    #[arg(long, env = "PADDOCK_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,
    #[arg(long, env = "PADDOCK_PORT", default_value_t = 5000)]
    port: u16,
    /// SQLite file holding every team.
    #[arg(long, env = "PADDOCK_DB", default_value = "data/paddock.db")]
    db: PathBuf,
    /// Game content JSON. Built-in content when omitted.
    #[arg(long, env = "PADDOCK_CONTENT")]
    content: Option<PathBuf>,
    #[arg(long, env = "PADDOCK_CLOCK", value_enum, default_value_t = ClockMode::RealTime)]
    clock: ClockMode,
    /// Make `/reset` delete every team instead of only forgetting the session.
    #[arg(long, env = "PADDOCK_RESET_WIPES_STORE")]
    reset_wipes_store: bool,
    #[arg(long, env = "PADDOCK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let content = match &args.content {
        Some(path) => load_content(path)?,
        None => GameContent::default(),
    };
    let store = GameStore::open(&args.db)?;
    tracing::info!(
        db = %args.db.display(),
        schema_version = store.schema_version()?,
        content_version = %content.content_version,
        "store ready"
    );

    let state = AppState {
        store: Arc::new(store),
        content: Arc::new(content),
        clock: args.clock,
        reset_wipes_store: args.reset_wipes_store,
        now: unix_now,
    };
    let app = routes::make_router(state);

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, clock = ?args.clock, "paddock daemon listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;
    tracing::info!("paddock daemon stopped");
    Ok(())
}
