//! Pre-order page: menu, cart and pickup details

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::cart::Cart;
use shared::models::{CustomerInfo, PreOrder, PreOrderCreate};
use validator::Validate;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::{CHECK_FIELDS, MenuView, failure, field_errors};

pub const EMPTY_CART: &str = "Please add items to your order.";

#[derive(Debug, Clone, Default)]
pub struct PreOrderView {
    pub menu: MenuView,
    cart: Cart,
    pub customer: CustomerInfo,
    errors: HashMap<String, String>,
    last_order: Option<PreOrder>,
}

impl PreOrderView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        self.menu.load(api).await
    }

    /// Add one portion of a dish from the loaded menu
    pub fn add(&mut self, menu_item_id: &str) -> bool {
        match self.menu.items().iter().find(|i| i.id == menu_item_id) {
            Some(item) => {
                self.cart.add(item);
                true
            }
            None => false,
        }
    }

    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        self.cart.set_quantity(menu_item_id, quantity);
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// `None` when the cart total does not fit a `Decimal`
    pub fn total(&self) -> Option<Decimal> {
        self.cart.total()
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// The order written by the last successful submit
    pub fn last_order(&self) -> Option<&PreOrder> {
        self.last_order.as_ref()
    }

    /// Submit the cart as one pending pre-order
    ///
    /// An empty cart or incomplete pickup details never reach the server.
    /// On success the cart and the form are cleared; on failure both are
    /// kept so the customer can retry.
    pub async fn submit<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Notice {
        if self.cart.is_empty() {
            return Notice::error(EMPTY_CART);
        }
        if let Err(errors) = self.customer.validate() {
            self.errors = field_errors(&errors);
            return Notice::error(CHECK_FIELDS);
        }
        self.errors.clear();

        let order = PreOrderCreate {
            customer_info: self.customer.clone(),
            items: self.cart.to_lines(),
            total_amount: self.cart.total(),
        };
        match api.submit_preorder(&order).await {
            Ok(created) => {
                tracing::info!(order_id = %created.id, "Pre-order submitted");
                self.last_order = Some(created);
                self.cart.clear();
                self.customer = CustomerInfo::default();
                Notice::success(
                    "Pre-order Submitted!",
                    "Your order has been submitted for approval. We'll contact you soon.",
                )
            }
            Err(e) => failure(
                "submit_preorder",
                &e,
                "Failed to submit pre-order. Please try again.",
            ),
        }
    }
}
