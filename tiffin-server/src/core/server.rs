//! Server Implementation
//!
//! HTTP 服务器启动和优雅关闭

use std::net::SocketAddr;
use std::time::Duration;

use crate::core::{Config, Result, ServerError, ServerState};
use crate::services::https::build_app;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config)?,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("🍛 Tiffin server starting on {}", addr);

        let bus = state.bus.clone();
        let shutdown_timeout = Duration::from_millis(self.config.shutdown_timeout_ms);
        let app = build_app(&state).with_state(state);

        let shutdown = async move {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
            // live 连接收到信号后自行关闭
            bus.shutdown();
            tokio::spawn(async move {
                tokio::time::sleep(shutdown_timeout).await;
                tracing::warn!("Graceful shutdown timed out, exiting");
                std::process::exit(0);
            });
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Internal(e.into()))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
