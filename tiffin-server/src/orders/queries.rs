//! Pre-order queries shared by the HTTP listings and the live sockets

use shared::order::OrderStatus;

use crate::store::{Direction, Query};

/// A customer's orders, newest first
pub fn by_phone(phone: &str) -> Query {
    Query::new()
        .eq("customer_info.phone", phone)
        .order_by("created_at", Direction::Desc)
}

/// Orders on the kitchen board, oldest first
pub fn kitchen() -> Query {
    Query::new()
        .any_of("status", OrderStatus::KITCHEN.map(|s| s.as_str()))
        .order_by("created_at", Direction::Asc)
}

/// Every order, newest first
pub fn all() -> Query {
    Query::new().order_by("created_at", Direction::Desc)
}
