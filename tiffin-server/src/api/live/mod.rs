//! Live 路由 (WebSocket)
//!
//! | 路径 | 说明 | 认证 |
//! |------|------|------|
//! | /api/live/orders?phone= | 顾客订单追踪 | 无 |
//! | /api/live/kitchen?token= | 厨房看板 | chef |
//! | /api/live/{collection}?token= | 后台列表 | admin |
//!
//! 浏览器无法在 WebSocket 升级请求上设置头，所以员工令牌通过 `?token=` 传递，
//! 由处理函数自行校验。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/live", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::orders))
        .route("/kitchen", get(handler::kitchen))
        .route("/{collection}", get(handler::collection))
}
