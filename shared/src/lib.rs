//! Shared types for Tiffin
//!
//! Domain models, the pre-order status machine, the cart, the client route
//! table with its role gate, unified error codes and live-socket messages.
//! Everything here is pure logic and is used by both `tiffin-server` and
//! `tiffin-client`.

pub mod cart;
pub mod client;
pub mod error;
pub mod message;
pub mod models;
pub mod order;
pub mod route;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use message::{ChangeEvent, ChangeKind, Collection, LiveMessage};
pub use order::{OrderAction, OrderStatus};
pub use rust_decimal::Decimal;
