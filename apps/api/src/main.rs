mod config;
mod document;
mod errors;
mod library;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::library::storage::{JsonFileStorage, LibraryStorage, MemoryStorage};
use crate::library::Library;
use crate::routes::build_router;
use crate::session::Session;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sira v{}", env!("CARGO_PKG_VERSION"));

    // Library first: hydrate once, fall back to first-run defaults on any failure
    let storage: Arc<dyn LibraryStorage> = if config.ephemeral {
        warn!("Ephemeral mode: the library is kept in memory and lost on exit");
        Arc::new(MemoryStorage::new())
    } else {
        let file = JsonFileStorage::in_dir(&config.data_dir);
        info!("Library record: {}", file.path().display());
        Arc::new(file)
    };
    let library = Library::open(storage);

    // Session second: runs the startup recovery transition
    let session = Session::new(library, config.autosave);
    info!(
        "Session ready (screen: {:?}, autosave: {})",
        session.screen(),
        config.autosave
    );

    let state = AppState::new(session, config.clone());

    // Local presentation shells call in from their own origin
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
