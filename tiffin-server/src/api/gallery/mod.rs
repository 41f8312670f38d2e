//! Gallery API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/gallery", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::list));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
        .layer(middleware::from_fn(require_role(&[Role::Admin])));

    read_routes.merge(manage_routes)
}
