//! HTTP server lifecycle
//!
//! `Server` binds and serves the API on localhost; `ServerManager` owns a
//! running instance and exposes start/stop/restart plus a watch channel
//! for the active port.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::sync::{oneshot, watch};
use tower_http::cors::{Any, CorsLayer};

use super::config::AppConfig;
use super::handlers::{self, AppState};

// ===== Server Handle =====

/// Handle to a running server
///
/// Dropping the handle shuts the server down.
pub struct ServerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    port: u16,
}

impl ServerHandle {
    /// Port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Shuts down the server
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// ===== Server =====

/// HTTP API server
pub struct Server {
    config_dir: PathBuf,
    state_override: Option<Arc<AppState>>,
}

impl Server {
    /// Creates a server that builds its state from configuration
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            state_override: None,
        }
    }

    /// Creates a server with pre-built handler state
    ///
    /// Used by tests to inject clients pointed at mock endpoints.
    pub fn with_state(config_dir: PathBuf, state: Arc<AppState>) -> Self {
        Self {
            config_dir,
            state_override: Some(state),
        }
    }

    /// Starts the server
    ///
    /// # Arguments
    /// * `port` - Optional port override; `None` uses the configured port.
    ///   Port 0 binds any free port.
    ///
    /// # Returns
    /// A handle carrying the bound port
    pub async fn start(&self, port: Option<u16>) -> Result<ServerHandle, String> {
        let mut config = AppConfig::load(&self.config_dir);
        config.apply_env_overrides();

        let port = port.unwrap_or(config.port);
        if port != 0 {
            AppConfig::validate_port(port)?;
        }

        let state = match &self.state_override {
            Some(state) => Arc::clone(state),
            None => Arc::new(AppState::from_config(&config)),
        };

        let app = build_router(state);

        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", port, e))?;

        // Port 0 resolves to an OS-assigned port; report the real one
        let actual_port = listener.local_addr().map(|a| a.port()).unwrap_or(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });

            if let Err(e) = server.await {
                eprintln!("[aml-web] Server error: {}", e);
            }
        });

        Ok(ServerHandle {
            shutdown_tx: Some(shutdown_tx),
            port: actual_port,
        })
    }

    /// Checks whether a port can be bound on localhost
    pub async fn check_port_available(port: u16) -> bool {
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        tokio::net::TcpListener::bind(addr).await.is_ok()
    }
}

/// Assembles the route table and middleware stack
fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/github-contributions",
            get(handlers::github_contributions),
        )
        .route("/api/github-stats", get(handlers::github_stats))
        .route("/api/github-day-details", get(handlers::github_day_details))
        .route("/api/contact", post(handlers::contact))
        .layer(cors)
        .with_state(state)
}

// ===== Server Manager =====

/// Owns the running server and its lifecycle
pub struct ServerManager {
    config_dir: PathBuf,
    handle: Option<ServerHandle>,
    port_tx: watch::Sender<u16>,
    port_rx: watch::Receiver<u16>,
}

impl ServerManager {
    /// Creates a manager for the given config directory
    pub fn new(config_dir: PathBuf) -> Self {
        let mut config = AppConfig::load(&config_dir);
        config.apply_env_overrides();
        let (port_tx, port_rx) = watch::channel(config.port);

        Self {
            config_dir,
            handle: None,
            port_tx,
            port_rx,
        }
    }

    /// Starts the server if it is not already running
    ///
    /// # Returns
    /// The port the server is listening on
    pub async fn start(&mut self) -> Result<u16, String> {
        if let Some(handle) = &self.handle {
            return Ok(handle.port());
        }

        let server = Server::new(self.config_dir.clone());
        let handle = server.start(None).await?;
        let port = handle.port();

        self.handle = Some(handle);
        let _ = self.port_tx.send(port);

        Ok(port)
    }

    /// Stops the server if it is running
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.shutdown();
        }
    }

    /// Restarts the server, optionally moving it to a new port
    ///
    /// A new port is validated and persisted to the settings file before
    /// the restart, so it survives the next launch.
    pub async fn restart(&mut self, new_port: Option<u16>) -> Result<u16, String> {
        if let Some(port) = new_port {
            if port != 0 {
                AppConfig::validate_port(port)?;
            }
            let mut config = AppConfig::load(&self.config_dir);
            config.port = port;
            config.save(&self.config_dir)?;
        }

        self.stop();
        // Let the old listener release its port before rebinding
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.start().await
    }

    /// Port of the running server, or the configured port when stopped
    pub fn current_port(&self) -> u16 {
        *self.port_rx.borrow()
    }

    /// Whether the server is currently running
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Watch channel tracking the active port
    pub fn port_receiver(&self) -> watch::Receiver<u16> {
        self.port_rx.clone()
    }
}

impl Drop for ServerManager {
    fn drop(&mut self) {
        self.stop();
    }
}
