//! HTTP server owning the route table

use axum::Router;
use std::net::SocketAddr;
use tracing::info;

use crate::{AppState, build_app};

/// Survey API server
///
/// Built once at startup. The router is complete before [`ApiServer::serve`]
/// binds the listener.
pub struct ApiServer {
    addr: SocketAddr,
    router: Router,
}

impl ApiServer {
    /// Create a server from the configuration held in `state`
    pub fn new(state: AppState) -> anyhow::Result<Self> {
        let addr = state.config.socket_addr()?;
        let router = build_app(state);
        Ok(Self { addr, router })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Route table, for driving the service without a socket
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind and serve until a shutdown signal arrives
    pub async fn serve(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        info!("Server is running on: {}", listener.local_addr()?);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Server error: {}", e))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received, draining connections");
}
