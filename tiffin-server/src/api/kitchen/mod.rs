//! Kitchen API Module
//!
//! The chef board: orders between `approved` and `ready`, oldest first.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kitchen", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/orders", get(handler::list))
        .route("/orders/{id}/advance", post(handler::advance))
        .layer(middleware::from_fn(require_role(&[Role::Chef])))
}
