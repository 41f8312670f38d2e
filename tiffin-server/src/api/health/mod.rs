//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /health | GET | 健康检查 | 无 |

use axum::{Json, Router, extract::State, routing::get};
use shared::error::ApiResponse;
use serde::Serialize;
use shared::message::Collection;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    database: &'static str,
    live_subscribers: usize,
}

async fn health(State(state): State<ServerState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match state.store.get(Collection::UserRoles, "__health__") {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Health check: store read failed");
            "error"
        }
    };

    crate::utils::ok(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        live_subscribers: state.bus.subscriber_count(),
    })
}
