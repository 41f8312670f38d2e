//! Kitchen Handlers

use axum::{
    Extension,
    extract::{Path, State},
};
use shared::message::Collection;
use shared::models::{PreOrder, Role};
use shared::order::OrderAction;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::queries;
use crate::utils::{ApiResult, ok};

pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<PreOrder>> {
    let orders: Vec<PreOrder> = state
        .store
        .query_as(Collection::Preorders, &queries::kitchen())?;
    Ok(ok(orders))
}

/// Next kitchen step: approved → taken → cooking → ready
pub async fn advance(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<PreOrder> {
    let order = state.orders.apply(&id, OrderAction::Advance, &user, Role::Chef)?;
    Ok(ok(order))
}
