//! Admin dashboard
//!
//! Owns three live subscriptions (menu items, reservations and pre-orders)
//! and releases all of them on [`AdminDashboard::close`] or drop. Writes go
//! through the API; the resulting snapshots bring the lists up to date.

use std::str::FromStr;

use rust_decimal::Decimal;
use shared::message::Collection;
use shared::models::{Contact, Feedback, MenuCategory, MenuItem, MenuItemCreate, PreOrder, Reservation};
use shared::order::{OrderAction, OrderStatus};
use validator::Validate;

use crate::api::TiffinApi;
use crate::error::ClientResult;
use crate::notice::Notice;
use crate::subscription::LiveTopic;
use crate::views::{LiveList, failure};

/// The "add menu item" form; price is kept as typed
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: MenuCategory,
    pub image: Option<String>,
}

impl Default for MenuDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: MenuCategory::Morning,
            image: None,
        }
    }
}

impl MenuDraft {
    /// Parse into a create payload, or say what is wrong
    pub fn to_create(&self) -> Result<MenuItemCreate, Notice> {
        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| Notice::error("Please enter a valid price."))?;

        let item = MenuItemCreate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            category: self.category,
            image: self.image.clone(),
        };
        item.validate()
            .map_err(|_| Notice::error("Please fill in the item name."))?;
        Ok(item)
    }
}

#[derive(Debug, Default)]
pub struct AdminDashboard {
    menu: LiveList<MenuItem>,
    reservations: LiveList<Reservation>,
    preorders: LiveList<PreOrder>,
    contacts: Vec<Contact>,
    feedback: Vec<Feedback>,
    pub draft: MenuDraft,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the three live lists
    ///
    /// All or nothing: if one subscription fails the others are released.
    pub async fn connect<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        match self.subscribe_all(api).await {
            Ok(()) => None,
            Err(e) => {
                self.close();
                Some(failure("admin_connect", &e, "Failed to load the dashboard."))
            }
        }
    }

    async fn subscribe_all<A: TiffinApi + ?Sized>(&mut self, api: &A) -> ClientResult<()> {
        let menu = api.subscribe(LiveTopic::Collection(Collection::MenuItems)).await?;
        self.menu.attach(menu);
        let reservations = api
            .subscribe(LiveTopic::Collection(Collection::Reservations))
            .await?;
        self.reservations.attach(reservations);
        let preorders = api
            .subscribe(LiveTopic::Collection(Collection::Preorders))
            .await?;
        self.preorders.attach(preorders);
        Ok(())
    }

    /// Fetch contact messages and feedback; these are not live
    pub async fn load_inbox<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        let contacts = match api.list_contacts().await {
            Ok(contacts) => contacts,
            Err(e) => return Some(failure("list_contacts", &e, "Failed to load messages.")),
        };
        let feedback = match api.list_feedback().await {
            Ok(feedback) => feedback,
            Err(e) => return Some(failure("list_feedback", &e, "Failed to load feedback.")),
        };
        self.contacts = contacts;
        self.feedback = feedback;
        None
    }

    /// Release every subscription
    pub fn close(&mut self) {
        self.menu.close();
        self.reservations.close();
        self.preorders.close();
    }

    pub fn is_live(&self) -> bool {
        self.menu.is_live() || self.reservations.is_live() || self.preorders.is_live()
    }

    /// Wait for a push on any list; `false` once none is live
    pub async fn update(&mut self) -> bool {
        let (menu_live, reservations_live, preorders_live) = (
            self.menu.is_live(),
            self.reservations.is_live(),
            self.preorders.is_live(),
        );
        tokio::select! {
            changed = self.menu.update(), if menu_live => changed,
            changed = self.reservations.update(), if reservations_live => changed,
            changed = self.preorders.update(), if preorders_live => changed,
            else => false,
        }
    }

    /// Apply pushes already received on all three lists
    pub fn drain(&mut self) -> usize {
        self.menu.drain() + self.reservations.drain() + self.preorders.drain()
    }

    pub fn menu_items(&self) -> &[MenuItem] {
        self.menu.rows()
    }

    pub fn reservations(&self) -> &[Reservation] {
        self.reservations.rows()
    }

    pub fn preorders(&self) -> &[PreOrder] {
        self.preorders.rows()
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn orders_with_status(&self, status: OrderStatus) -> Vec<&PreOrder> {
        self.preorders
            .rows()
            .iter()
            .filter(|o| o.status == status)
            .collect()
    }

    /// First error left by a live list, if any
    pub fn error(&self) -> Option<&Notice> {
        self.menu
            .error()
            .or_else(|| self.reservations.error())
            .or_else(|| self.preorders.error())
    }

    // ========== Menu ==========

    pub async fn add_menu_item<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Notice {
        let item = match self.draft.to_create() {
            Ok(item) => item,
            Err(notice) => return notice,
        };
        match api.create_menu_item(&item).await {
            Ok(created) => {
                tracing::info!(id = %created.id, "Menu item added");
                self.draft = MenuDraft::default();
                Notice::success("Menu Item Added", "New item has been added to the menu.")
            }
            Err(e) => failure("create_menu_item", &e, "Failed to add menu item."),
        }
    }

    pub async fn delete_menu_item<A: TiffinApi + ?Sized>(&mut self, api: &A, id: &str) -> Notice {
        match api.delete_menu_item(id).await {
            Ok(()) => Notice::success("Menu Item Deleted", "Item has been removed from the menu."),
            Err(e) => failure("delete_menu_item", &e, "Failed to delete menu item."),
        }
    }

    /// Upload a picture and attach its URL to the draft
    pub async fn upload_image<A: TiffinApi + ?Sized>(
        &mut self,
        api: &A,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Notice {
        match api.upload_image(file_name, bytes).await {
            Ok(url) => {
                self.draft.image = Some(url);
                Notice::success("Image Uploaded", "The image has been attached to the item.")
            }
            Err(e) => failure("upload_image", &e, "Failed to upload image."),
        }
    }

    // ========== Pre-orders ==========

    pub async fn approve<A: TiffinApi + ?Sized>(&mut self, api: &A, id: &str) -> Notice {
        self.update_order(api, id, OrderAction::Approve).await
    }

    pub async fn reject<A: TiffinApi + ?Sized>(&mut self, api: &A, id: &str) -> Notice {
        self.update_order(api, id, OrderAction::Reject).await
    }

    pub async fn complete<A: TiffinApi + ?Sized>(&mut self, api: &A, id: &str) -> Notice {
        self.update_order(api, id, OrderAction::Complete).await
    }

    async fn update_order<A: TiffinApi + ?Sized>(
        &mut self,
        api: &A,
        id: &str,
        action: OrderAction,
    ) -> Notice {
        match api.update_order(id, action).await {
            Ok(order) => Notice::success(
                "Order Status Updated",
                format!("Order has been {}.", order.status.as_str()),
            ),
            Err(e) => failure(action.as_str(), &e, "Failed to update order status."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_price_parsing() {
        let mut draft = MenuDraft {
            name: "Rava Dosa".into(),
            price: " 95.50 ".into(),
            ..Default::default()
        };
        let item = draft.to_create().unwrap();
        assert_eq!(item.price, Decimal::new(9550, 2));
        assert_eq!(item.category, MenuCategory::Morning);

        for bad in ["", "abc", "0", "-5"] {
            draft.price = bad.into();
            assert!(draft.to_create().unwrap_err().is_error(), "{bad}");
        }
    }

    #[test]
    fn test_draft_requires_name() {
        let draft = MenuDraft {
            name: "  ".into(),
            price: "40".into(),
            ..Default::default()
        };
        assert!(draft.to_create().is_err());
    }
}
