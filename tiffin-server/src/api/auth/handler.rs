//! Authentication Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, UserInfo};
use shared::models::RoleLookup;
use validator::Validate;

use crate::auth::{CurrentUser, accounts};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResult, AppError, ErrorCode, ok};

/// Fixed delay before answering a failed login
const AUTH_FAILURE_DELAY_MS: u64 = 300;

/// Login handler
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    req.validate()?;

    let Some(user) = accounts::authenticate(&state.store, &req.email, &req.password)? else {
        tokio::time::sleep(Duration::from_millis(AUTH_FAILURE_DELAY_MS)).await;
        security_log!(WARN, "login_failed", email = %accounts::normalize_email(&req.email));
        return Err(AppError::invalid_credentials());
    };

    let token = state
        .get_jwt_service()
        .generate_token(&user.uid, &user.email)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    security_log!(INFO, "login_success", uid = %user.uid, email = %user.email);
    tracing::info!(uid = %user.uid, "User logged in");

    Ok(ok(LoginResponse { token, user }))
}

/// Tokens are stateless; logout only records the event
pub async fn logout(user: CurrentUser) -> ApiResult<()> {
    security_log!(INFO, "logout", uid = %user.uid, email = %user.email);
    Ok(ok(()))
}

pub async fn me(user: CurrentUser) -> ApiResult<UserInfo> {
    Ok(ok(UserInfo {
        uid: user.uid,
        email: user.email,
    }))
}

/// Role of the caller
///
/// A failed lookup is an error response, never a default role.
pub async fn role(Extension(lookup): Extension<RoleLookup>) -> ApiResult<RoleLookup> {
    match lookup {
        RoleLookup::LookupError { message } => Err(AppError::with_message(
            ErrorCode::RoleLookupFailed,
            format!("Role lookup failed: {message}"),
        )),
        found_or_missing => Ok(ok(found_or_missing)),
    }
}
