//! Customer order tracker
//!
//! Looks up pre-orders by phone number and keeps them current over a live
//! subscription, newest first.

use rust_decimal::Decimal;
use shared::models::PreOrder;
use shared::order::OrderStatus;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::subscription::LiveTopic;
use crate::views::{LiveList, failure};

/// One row of the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedOrder {
    pub id: String,
    pub status: OrderStatus,
    pub label: &'static str,
    pub progress: u8,
    pub pickup: String,
    pub total: Decimal,
}

impl From<&PreOrder> for TrackedOrder {
    fn from(order: &PreOrder) -> Self {
        Self {
            id: order.id.clone(),
            status: order.status,
            label: order.status_label(),
            progress: order.progress_percent(),
            pickup: format!(
                "{} {}",
                order.customer_info.order_date, order.customer_info.order_time
            ),
            total: order.total_amount,
        }
    }
}

#[derive(Debug, Default)]
pub struct OrderTracker {
    phone: Option<String>,
    orders: LiveList<PreOrder>,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the orders placed with `phone`
    ///
    /// Blank input is ignored. A new search releases the previous
    /// subscription before opening the next one.
    pub async fn search<A: TiffinApi + ?Sized>(&mut self, api: &A, phone: &str) -> Option<Notice> {
        let phone = phone.trim();
        if phone.is_empty() {
            return None;
        }

        // dropping the old list releases its subscription
        self.orders = LiveList::default();
        self.phone = Some(phone.to_string());
        let topic = LiveTopic::Orders {
            phone: phone.to_string(),
        };
        match api.subscribe(topic).await {
            Ok(subscription) => {
                self.orders.attach(subscription);
                None
            }
            Err(e) => Some(failure(
                "track_orders",
                &e,
                "Failed to fetch orders. Please try again.",
            )),
        }
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Wait for the next push; `false` once the subscription ended
    pub async fn update(&mut self) -> bool {
        self.orders.update().await
    }

    pub fn orders(&self) -> &[PreOrder] {
        self.orders.rows()
    }

    pub fn rows(&self) -> Vec<TrackedOrder> {
        self.orders.rows().iter().map(TrackedOrder::from).collect()
    }

    pub fn error(&self) -> Option<&Notice> {
        self.orders.error()
    }

    pub fn is_live(&self) -> bool {
        self.orders.is_live()
    }

    /// Stop following
    pub fn close(&mut self) {
        self.orders.close();
    }
}
