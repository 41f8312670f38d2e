//! 认证路由
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/auth/login | POST | 邮箱密码登录 | 无 |
//! | /api/auth/logout | POST | 登出 | 需要 |
//! | /api/auth/me | GET | 当前身份 | 需要 |
//! | /api/auth/role | GET | 当前角色 | 需要 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/logout", post(handler::logout))
        .route("/me", get(handler::me))
        .route("/role", get(handler::role))
}
