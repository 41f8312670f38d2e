//! Tiffin Client - talks to `tiffin-server`
//!
//! - [`TiffinApi`] is the seam every view model uses; [`HttpClient`] is the
//!   network implementation.
//! - [`Subscription`] is an owned live feed. Dropping it closes the socket.
//! - [`Session`] holds the signed-in identity and its role lookup. It is a
//!   plain value owned by the caller.
//! - [`views`] holds the customer and back-office view models.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod notice;
pub mod session;
pub mod subscription;
pub mod views;

pub use api::TiffinApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use notice::{Notice, NoticeKind};
pub use session::Session;
pub use subscription::{LiveTopic, Subscription, SubscriptionFeed};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, UserInfo};
pub use shared::error::ApiResponse;
