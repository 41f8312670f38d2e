//! View models
//!
//! Each view owns its data and any live [`Subscription`](crate::Subscription)
//! it opened. Failures are caught where the call is made: they are logged
//! and come back as a [`Notice`](crate::Notice) for the user, never as a
//! panic or an unhandled error.
//!
//! Customer side: [`MenuView`], [`GalleryView`], [`PreOrderView`],
//! [`ReservationForm`], [`OrderTracker`], [`ContactForm`], [`FeedbackForm`].
//! Back office: [`LoginForm`], [`AdminDashboard`], [`ChefPanel`].

pub mod admin;
pub mod chef;
pub mod contact;
pub mod feedback;
pub mod gallery;
pub mod live;
pub mod login;
pub mod menu;
pub mod preorder;
pub mod reservation;
pub mod tracker;

pub use admin::{AdminDashboard, MenuDraft};
pub use chef::{ChefPanel, KitchenCard};
pub use contact::ContactForm;
pub use feedback::FeedbackForm;
pub use gallery::GalleryView;
pub use live::LiveList;
pub use login::LoginForm;
pub use menu::{MenuFilter, MenuSection, MenuView};
pub use preorder::PreOrderView;
pub use reservation::ReservationForm;
pub use tracker::{OrderTracker, TrackedOrder};

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use shared::message::LiveMessage;
use validator::ValidationErrors;

use crate::error::{ClientError, ClientResult};
use crate::notice::Notice;

/// Shown when a form fails local validation
pub const CHECK_FIELDS: &str = "Please check the highlighted fields.";

/// Decode a pushed frame into typed rows
///
/// A snapshot replaces whatever the view held; an error frame means the
/// server ended the subscription.
pub fn decode_snapshot<T: DeserializeOwned>(msg: LiveMessage) -> ClientResult<Vec<T>> {
    match msg {
        LiveMessage::Snapshot { documents, .. } => documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(ClientError::from))
            .collect(),
        LiveMessage::Error { code, message } => {
            let code = ErrorCode::try_from(code).unwrap_or(ErrorCode::Unknown);
            Err(AppError::with_message(code, message).into())
        }
    }
}

/// Field name to first message, for highlighting form inputs
pub fn field_errors(errors: &ValidationErrors) -> HashMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let message = errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {field}"))
            })?;
            Some((field.to_string(), message))
        })
        .collect()
}

/// Log a failed call and turn it into an error notice
pub(crate) fn failure(action: &str, err: &ClientError, description: &str) -> Notice {
    tracing::error!(action, error = %err, "Request failed");
    Notice::error(description)
}
