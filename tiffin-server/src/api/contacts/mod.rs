//! Contact messages API Module
//!
//! Write-only for customers, listed by admins.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/contacts", routes())
}

fn routes() -> Router<ServerState> {
    let public_routes = Router::new().route("/", post(handler::create));

    let manage_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    public_routes.merge(manage_routes)
}
