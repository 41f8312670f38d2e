//! Pre-order Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use shared::client::PhoneQuery;
use shared::message::Collection;
use shared::models::{PreOrder, PreOrderCreate, Role, RoleLookup};
use shared::order::OrderAction;

use crate::auth::{CurrentUser, authorize};
use crate::core::ServerState;
use crate::orders::queries;
use crate::utils::{ApiResult, ok};

/// Customer submission; always lands as `pending`
pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<PreOrderCreate>,
) -> ApiResult<PreOrder> {
    let order = state.orders.submit(payload)?;
    Ok(ok(order))
}

/// With a phone: that customer's orders, newest first (public).
/// Without: every order (admin).
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PhoneQuery>,
    user: Option<Extension<CurrentUser>>,
    lookup: Option<Extension<RoleLookup>>,
) -> ApiResult<Vec<PreOrder>> {
    let query = match params.phone.as_deref().and_then(shared::util::non_blank) {
        Some(phone) => queries::by_phone(phone),
        None => {
            authorize(
                user.as_ref().map(|Extension(u)| u),
                lookup.as_ref().map(|Extension(l)| l),
                &[Role::Admin],
            )?;
            queries::all()
        }
    };

    let orders: Vec<PreOrder> = state.store.query_as(Collection::Preorders, &query)?;
    Ok(ok(orders))
}

pub async fn approve(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<PreOrder> {
    act(&state, &id, OrderAction::Approve, &user)
}

pub async fn reject(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<PreOrder> {
    act(&state, &id, OrderAction::Reject, &user)
}

pub async fn complete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<PreOrder> {
    act(&state, &id, OrderAction::Complete, &user)
}

fn act(state: &ServerState, id: &str, action: OrderAction, user: &CurrentUser) -> ApiResult<PreOrder> {
    let order = state.orders.apply(id, action, user, Role::Admin)?;
    Ok(ok(order))
}
