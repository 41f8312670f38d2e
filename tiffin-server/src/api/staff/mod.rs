//! Staff provisioning

mod handler;

use axum::{Router, middleware, routing::post};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/staff", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .layer(middleware::from_fn(require_role(&[Role::Admin])))
}
