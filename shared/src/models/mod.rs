//! Data models
//!
//! Document bodies stored by the server and exchanged with clients.
//! Entities carry the store-assigned `id`; `*Create` payloads are what
//! forms submit and are checked with `validator`.

pub mod contact;
pub mod feedback;
pub mod gallery;
pub mod menu_item;
pub mod preorder;
pub mod reservation;
pub mod user_role;

// Re-exports
pub use contact::*;
pub use feedback::*;
pub use gallery::*;
pub use menu_item::*;
pub use preorder::*;
pub use reservation::*;
pub use user_role::*;
