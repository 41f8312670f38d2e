//! Reservation Handlers

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::message::Collection;
use shared::models::{RESERVATION_PENDING, Reservation, ReservationCreate};
use validator::Validate;

use crate::api::common::parse;
use crate::core::ServerState;
use crate::store::{Direction, Query};
use crate::utils::{ApiResult, ok};

/// Stored body of a new reservation
#[derive(Serialize)]
struct NewReservation<'a> {
    #[serde(flatten)]
    body: &'a ReservationCreate,
    status: &'static str,
    created_at: DateTime<Utc>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> ApiResult<Reservation> {
    payload.validate()?;

    let doc = state.store.insert(
        Collection::Reservations,
        &NewReservation {
            body: &payload,
            status: RESERVATION_PENDING,
            created_at: shared::util::now(),
        },
    )?;
    let reservation: Reservation = parse(Collection::Reservations, doc)?;

    tracing::info!(
        id = %reservation.id,
        date = %reservation.date,
        party_size = reservation.party_size,
        "Reservation received"
    );

    Ok(ok(reservation))
}

/// Newest first
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Reservation>> {
    let reservations = state.store.query_as(
        Collection::Reservations,
        &Query::new().order_by("created_at", Direction::Desc),
    )?;
    Ok(ok(reservations))
}
