//! Gallery Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::message::Collection;
use shared::models::{GalleryItem, GalleryItemCreate};
use validator::Validate;

use crate::api::common::insert_stamped;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::store::{Direction, Query as StoreQuery};
use crate::utils::{ApiResult, AppError, ErrorCode, ok};

#[derive(Debug, Default, Deserialize)]
pub struct GalleryQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Gallery categories are free text, matched exactly
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<GalleryQuery>,
) -> ApiResult<Vec<GalleryItem>> {
    let mut query = StoreQuery::new();
    if let Some(category) = params.category.as_deref().and_then(shared::util::non_blank)
        && category != "all"
    {
        query = query.eq("category", category);
    }

    let items: Vec<GalleryItem> = state
        .store
        .query_as(Collection::Gallery, &query.order_by("created_at", Direction::Asc))?;
    Ok(ok(items))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<GalleryItemCreate>,
) -> ApiResult<GalleryItem> {
    payload.validate()?;

    let item: GalleryItem = insert_stamped(&state.store, Collection::Gallery, &payload)?;
    audit_log!(user.uid, "gallery_create", format!("gallery:{}", item.id), item.title);

    Ok(ok(item))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<bool> {
    if !state.store.delete(Collection::Gallery, &id)? {
        return Err(AppError::new(ErrorCode::GalleryItemNotFound).with_detail("id", id));
    }
    audit_log!(user.uid, "gallery_delete", format!("gallery:{id}"));
    Ok(ok(true))
}
