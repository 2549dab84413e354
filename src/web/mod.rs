//! HTTP surface: landing pages, the submission proxy and a health check.
//!
//! # Routes
//! - `GET /` home page
//! - `GET /flagship/{slug}` partner landing page, 404 page when the slug is unknown
//! - `POST /api/submit` relays the interest form to the partner webhook
//! - `POST /api/selection/{slug}` stores the signage picked on a partner page
//! - `GET /healthz` liveness

pub mod cache;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};

use crate::config::ServerConfig;
use crate::utils::error::Result;

pub use routes::router;
pub use state::AppState;

pub async fn serve(state: AppState, server: &ServerConfig) -> Result<()> {
    if server.prerender {
        state.prerender().await;
    }

    let app = router(state);

    let address = format!("0.0.0.0:{}", server.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
