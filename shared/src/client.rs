//! Request/response types shared between the server and `tiffin-client`

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Role;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Minimum staff password length
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub uid: String,
    pub email: String,
}

// =============================================================================
// Staff provisioning
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaffCreate {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: Role,
}

// =============================================================================
// Uploads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

// =============================================================================
// Queries
// =============================================================================

/// Query string for pre-order listing and the customer tracker socket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneQuery {
    #[serde(default)]
    pub phone: Option<String>,
}

/// Query string carrying a JWT on socket upgrades
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: Option<String>,
}
