//! Pre-order lifecycle types

pub mod status;

pub use status::{OrderAction, OrderStatus, TransitionError};
