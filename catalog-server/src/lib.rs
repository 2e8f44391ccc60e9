//! catalog-server - HTTP transport for the song catalog using Axum

pub mod error;
pub mod routes;

pub use error::ApiError;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use core_runtime::config::ServiceConfig;
use core_service::SongService;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Create the catalog router
///
/// Every request is bounded by `request_timeout`.
pub fn create_router(service: Arc<SongService>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/songs", get(routes::list_songs))
        .route("/songs/all", get(routes::all_songs))
        .route("/song", axum::routing::post(routes::add_song))
        .route(
            "/song/{id}",
            get(routes::get_song)
                .put(routes::update_song)
                .delete(routes::delete_song),
        )
        .route("/song/{id}/lyrics", get(routes::song_lyrics))
        .route("/health", get(routes::health))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

/// Bootstrap the service and serve until Ctrl-C or SIGTERM
pub async fn run(config: ServiceConfig) -> Result<()> {
    let service = core_service::bootstrap(&config)
        .await
        .context("failed to initialize song service")?;
    let router = create_router(Arc::new(service), config.http.request_timeout);

    let addr = config.http.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(address = %addr, "Catalog server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Catalog server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", err);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => error!("failed to install SIGTERM handler: {}", err),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
