//! Feedback Handlers

use axum::{Json, extract::State};
use shared::message::Collection;
use shared::models::{Feedback, FeedbackCreate};
use validator::Validate;

use crate::api::common::insert_stamped;
use crate::core::ServerState;
use crate::store::{Direction, Query};
use crate::utils::{ApiResult, ok};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackCreate>,
) -> ApiResult<Feedback> {
    payload.validate()?;
    let feedback: Feedback = insert_stamped(&state.store, Collection::Feedback, &payload)?;
    tracing::info!(id = %feedback.id, rating = feedback.rating, "Feedback received");
    Ok(ok(feedback))
}

pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Feedback>> {
    let feedback = state.store.query_as(
        Collection::Feedback,
        &Query::new().order_by("created_at", Direction::Desc),
    )?;
    Ok(ok(feedback))
}
