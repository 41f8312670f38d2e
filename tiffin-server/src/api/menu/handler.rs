//! Menu Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::message::Collection;
use shared::models::{MenuCategory, MenuItem, MenuItemCreate};
use validator::Validate;

use crate::api::common::insert_stamped;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::{Direction, Query as StoreQuery};
use crate::utils::{ApiResult, AppError, ErrorCode, ok};

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// List menu items, optionally for one day-part
///
/// `category=all` or an empty value lists everything.
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<MenuQuery>,
) -> ApiResult<Vec<MenuItem>> {
    let category = match params.category.as_deref().and_then(shared::util::non_blank) {
        None | Some("all") => None,
        Some(raw) => Some(raw.parse::<MenuCategory>().map_err(|e| {
            AppError::with_message(ErrorCode::MenuCategoryInvalid, e.to_string())
        })?),
    };

    let query = match category {
        Some(category) => StoreQuery::new().eq("category", category.as_str()),
        None => StoreQuery::new(),
    }
    .order_by("created_at", Direction::Asc);

    let items: Vec<MenuItem> = state.store.query_as(Collection::MenuItems, &query)?;
    Ok(ok(items))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    payload.validate()?;
    if !payload.has_valid_price() {
        return Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            "Price must be greater than zero",
        ));
    }

    let item: MenuItem = insert_stamped(&state.store, Collection::MenuItems, &payload)?;

    audit_log!(user.uid, "menu_create", format!("menu_item:{}", item.id), item.name);
    tracing::info!(id = %item.id, category = %item.category, "Menu item created");

    Ok(ok(item))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<bool> {
    if !state.store.delete(Collection::MenuItems, &id)? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id));
    }

    audit_log!(user.uid, "menu_delete", format!("menu_item:{id}"));
    tracing::info!(id = %id, "Menu item deleted");

    Ok(ok(true))
}
