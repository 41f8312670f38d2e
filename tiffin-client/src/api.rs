//! The API surface the views depend on

use async_trait::async_trait;
use shared::client::LoginResponse;
use shared::models::{
    Contact, ContactCreate, Feedback, FeedbackCreate, GalleryItem, MenuItem, MenuItemCreate,
    PreOrder, PreOrderCreate, Reservation, ReservationCreate, RoleLookup,
};
use shared::order::OrderAction;

use crate::error::ClientResult;
use crate::subscription::{LiveTopic, Subscription};

/// Everything a Tiffin view can ask of the backend
///
/// [`crate::HttpClient`] talks to `tiffin-server`; tests use in-memory fakes.
/// Implementations keep the token from the last successful
/// [`TiffinApi::login`] and drop it on [`TiffinApi::logout`].
#[async_trait]
pub trait TiffinApi: Send + Sync {
    // ========== Auth ==========

    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    async fn logout(&self) -> ClientResult<()>;
    /// Role of the signed-in identity; errors mean the lookup failed
    async fn role(&self) -> ClientResult<RoleLookup>;

    // ========== Catalogue ==========

    async fn list_menu(&self) -> ClientResult<Vec<MenuItem>>;
    async fn create_menu_item(&self, item: &MenuItemCreate) -> ClientResult<MenuItem>;
    async fn delete_menu_item(&self, id: &str) -> ClientResult<()>;
    /// Returns the hosted image URL
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> ClientResult<String>;
    async fn list_gallery(&self) -> ClientResult<Vec<GalleryItem>>;

    // ========== Customer forms ==========

    async fn create_reservation(&self, reservation: &ReservationCreate) -> ClientResult<Reservation>;
    async fn submit_preorder(&self, order: &PreOrderCreate) -> ClientResult<PreOrder>;
    async fn send_contact(&self, contact: &ContactCreate) -> ClientResult<Contact>;
    async fn send_feedback(&self, feedback: &FeedbackCreate) -> ClientResult<Feedback>;

    // ========== Back office ==========

    async fn list_reservations(&self) -> ClientResult<Vec<Reservation>>;
    async fn list_preorders(&self) -> ClientResult<Vec<PreOrder>>;
    async fn list_contacts(&self) -> ClientResult<Vec<Contact>>;
    async fn list_feedback(&self) -> ClientResult<Vec<Feedback>>;
    async fn kitchen_orders(&self) -> ClientResult<Vec<PreOrder>>;
    async fn update_order(&self, id: &str, action: OrderAction) -> ClientResult<PreOrder>;

    // ========== Live ==========

    async fn subscribe(&self, topic: LiveTopic) -> ClientResult<Subscription>;
}

/// Endpoint for an order action
pub fn order_action_path(id: &str, action: OrderAction) -> String {
    match action {
        OrderAction::Advance => format!("/api/kitchen/orders/{id}/advance"),
        other => format!("/api/preorders/{id}/{}", other.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_action_paths() {
        assert_eq!(
            order_action_path("o-1", OrderAction::Approve),
            "/api/preorders/o-1/approve"
        );
        assert_eq!(
            order_action_path("o-1", OrderAction::Complete),
            "/api/preorders/o-1/complete"
        );
        assert_eq!(
            order_action_path("o-1", OrderAction::Advance),
            "/api/kitchen/orders/o-1/advance"
        );
    }
}
