//! Pre-order API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/preorders | POST | 顾客下单 | 无 |
//! | /api/preorders?phone= | GET | 顾客查单 | 无 |
//! | /api/preorders | GET | 全部订单 | admin |
//! | /api/preorders/{id}/approve | POST | 接受 | admin |
//! | /api/preorders/{id}/reject | POST | 拒绝 | admin |
//! | /api/preorders/{id}/complete | POST | 完成取餐 | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/preorders", routes())
}

fn routes() -> Router<ServerState> {
    // 列表的权限在处理函数内判断 (带 phone 时公开)
    let public_routes = Router::new().route("/", post(handler::submit).get(handler::list));

    let manage_routes = Router::new()
        .route("/{id}/approve", post(handler::approve))
        .route("/{id}/reject", post(handler::reject))
        .route("/{id}/complete", post(handler::complete))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    public_routes.merge(manage_routes)
}
