//! Menu API Module
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/menu | GET | 菜品列表 (`?category=`) | 无 |
//! | /api/menu | POST | 新增菜品 | admin |
//! | /api/menu/{id} | DELETE | 删除菜品 | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
