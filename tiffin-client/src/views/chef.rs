//! Chef kitchen board

use shared::models::{OrderLine, PreOrder};
use shared::order::{OrderAction, OrderStatus};

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::subscription::LiveTopic;
use crate::views::{LiveList, failure};

/// One order card on the kitchen board
#[derive(Debug, Clone, PartialEq)]
pub struct KitchenCard {
    pub id: String,
    pub customer: String,
    pub pickup: String,
    pub status: OrderStatus,
    pub progress: u8,
    pub items: Vec<OrderLine>,
    /// Button for the next step; `None` when the order is ready
    pub action: Option<&'static str>,
}

impl From<&PreOrder> for KitchenCard {
    fn from(order: &PreOrder) -> Self {
        Self {
            id: order.id.clone(),
            customer: order.customer_info.name.clone(),
            pickup: format!(
                "{} {}",
                order.customer_info.order_date, order.customer_info.order_time
            ),
            status: order.status,
            progress: order.status.kitchen_progress().unwrap_or(0),
            items: order.items.clone(),
            action: order.status.kitchen_action_label(),
        }
    }
}

/// Orders the kitchen is working on, oldest first
#[derive(Debug, Default)]
pub struct ChefPanel {
    orders: LiveList<PreOrder>,
}

impl ChefPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn connect<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        match api.subscribe(LiveTopic::Kitchen).await {
            Ok(subscription) => {
                self.orders.attach(subscription);
                None
            }
            Err(e) => Some(failure("kitchen_connect", &e, "Failed to load kitchen orders.")),
        }
    }

    pub fn close(&mut self) {
        self.orders.close();
    }

    pub fn is_live(&self) -> bool {
        self.orders.is_live()
    }

    pub async fn update(&mut self) -> bool {
        self.orders.update().await
    }

    pub fn drain(&mut self) -> usize {
        self.orders.drain()
    }

    pub fn orders(&self) -> &[PreOrder] {
        self.orders.rows()
    }

    pub fn cards(&self) -> Vec<KitchenCard> {
        self.orders.rows().iter().map(KitchenCard::from).collect()
    }

    pub fn error(&self) -> Option<&Notice> {
        self.orders.error()
    }

    /// Move an order to its next kitchen step
    pub async fn advance<A: TiffinApi + ?Sized>(&mut self, api: &A, id: &str) -> Notice {
        match api.update_order(id, OrderAction::Advance).await {
            Ok(order) => Notice::success(
                "Order Updated",
                format!("Order status changed to {}.", order.status.as_str()),
            ),
            Err(e) => failure("advance", &e, "Failed to update order status."),
        }
    }
}
