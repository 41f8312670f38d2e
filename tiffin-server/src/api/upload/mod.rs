//! Upload Routes
//!
//! `POST /api/uploads/image` (admin) forwards a menu photo to the image host.

mod handler;

use axum::{Router, extract::DefaultBodyLimit, middleware, routing::post};
use shared::models::Role;

use crate::auth::require_role;
use crate::core::ServerState;

/// Hard cap on the multipart body; the configured image limit is checked in the handler
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/uploads", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/image", post(handler::upload))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(require_role(&[Role::Admin])))
}
