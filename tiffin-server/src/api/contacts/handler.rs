//! Contact Handlers

use axum::{Json, extract::State};
use shared::message::Collection;
use shared::models::{Contact, ContactCreate};
use validator::Validate;

use crate::api::common::insert_stamped;
use crate::core::ServerState;
use crate::store::{Direction, Query};
use crate::utils::{ApiResult, ok};

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ContactCreate>,
) -> ApiResult<Contact> {
    payload.validate()?;
    let contact: Contact = insert_stamped(&state.store, Collection::Contacts, &payload)?;
    tracing::info!(id = %contact.id, subject = %contact.subject, "Contact message received");
    Ok(ok(contact))
}

pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Contact>> {
    let contacts = state.store.query_as(
        Collection::Contacts,
        &Query::new().order_by("created_at", Direction::Desc),
    )?;
    Ok(ok(contacts))
}
