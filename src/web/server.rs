//! HTTP server for the marketplace API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::auth::RevocationRegistry;
use crate::config::Config;
use crate::{Database, DeliveryError, Result};

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
    /// Revocation registry purge interval.
    purge_interval: Duration,
}

impl WebServer {
    /// Create a new web server. The configuration is validated first.
    pub fn new(config: &Config, db: Database) -> Result<Self> {
        config.validate()?;

        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DeliveryError::Config(format!("invalid server address: {e}")))?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(db, &config.auth.jwt_secret)),
            cors_origins: config.server.cors_origins.clone(),
            purge_interval: Duration::from_secs(config.auth.revocation_purge_interval_secs),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shared application state.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.app_state)
    }

    /// Start the revocation purge background task.
    ///
    /// Tokens past their expiry are rejected anyway, so dropping their
    /// registry entries changes no verification outcome.
    fn start_revocation_purge_task(registry: Arc<RevocationRegistry>, every: Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let purged = registry.purge_expired(chrono::Utc::now().timestamp());
                if purged > 0 {
                    tracing::info!(purged, "Purged expired revocation entries");
                } else {
                    tracing::debug!("No expired revocation entries to purge");
                }
            }
        });
    }

    async fn bind(self) -> Result<(TcpListener, axum::Router, Arc<AppState>)> {
        let state = Arc::clone(&self.app_state);
        let router = create_router(self.app_state, &self.cors_origins);

        let listener = TcpListener::bind(self.addr).await?;

        Self::start_revocation_purge_task(Arc::clone(&state.revocations), self.purge_interval);
        tracing::info!(
            interval_secs = self.purge_interval.as_secs(),
            "Revocation purge task started"
        );

        Ok((listener, router, state))
    }

    /// Run the web server until Ctrl-C.
    ///
    /// The revocation registry is cleared on shutdown.
    pub async fn run(self) -> Result<()> {
        let (listener, router, state) = self.bind().await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        state.revocations.clear();
        tracing::info!("Web server stopped");
        Ok(())
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr> {
        let (listener, router, _state) = self.bind().await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
