//! Reservation Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Status every new reservation starts in
pub const RESERVATION_PENDING: &str = "pending";

/// Largest party a single reservation may book
pub const MAX_PARTY_SIZE: u32 = 20;

/// Reservation entity
///
/// `status` is free text: only `"pending"` is ever written by the site,
/// staff may use anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Requested date, `YYYY-MM-DD`
    pub date: String,
    /// Requested time, `HH:MM`
    pub time: String,
    pub party_size: u32,
    #[serde(default)]
    pub special_requests: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Create reservation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    #[validate(range(min = 1, max = 20, message = "Party size must be between 1 and 20"))]
    pub party_size: u32,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub special_requests: String,
}
