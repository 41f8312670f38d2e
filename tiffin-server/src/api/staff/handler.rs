//! Staff Handlers

use axum::{Extension, Json, extract::State};
use shared::client::{StaffCreate, UserInfo};
use validator::Validate;

use crate::audit_log;
use crate::auth::{CurrentUser, accounts, assign_role};
use crate::core::ServerState;
use crate::utils::{ApiResult, ok};

/// Create an account and give it a role in one step
pub async fn create(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentUser>,
    Json(payload): Json<StaffCreate>,
) -> ApiResult<UserInfo> {
    payload.validate()?;

    let user = accounts::provision_account(&state.store, &payload.email, &payload.password, |user| {
        Ok(assign_role(&state.store, &user.uid, payload.role)?)
    })?;

    audit_log!(
        admin.uid,
        "staff_create",
        format!("account:{}", user.uid),
        format!("{} as {}", user.email, payload.role)
    );

    Ok(ok(user))
}
