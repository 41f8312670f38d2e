//! Pre-order Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::order::OrderStatus;

/// Who the order is for and when it will be collected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CustomerInfo {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    /// Also the lookup key customers use to track their orders
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Pickup date is required"))]
    pub order_date: String,
    #[validate(length(min = 1, message = "Pickup time is required"))]
    pub order_time: String,
}

/// One cart line; price is captured when the dish was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Most portions of one dish a single line may carry
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Highest unit price a dish or order line may carry, in rupees
pub const MAX_LINE_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

impl OrderLine {
    /// `None` when price × quantity does not fit in a `Decimal`
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    pub fn within_bounds(&self) -> bool {
        (1..=MAX_LINE_QUANTITY).contains(&self.quantity)
            && self.price >= Decimal::ZERO
            && self.price <= MAX_LINE_PRICE
    }
}

/// Σ price × quantity over the lines, `None` on overflow
pub fn compute_total(lines: &[OrderLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_total()?))
}

/// Pre-order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreOrder {
    pub id: String,
    pub customer_info: CustomerInfo,
    pub items: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl PreOrder {
    pub fn progress_percent(&self) -> u8 {
        self.status.progress_percent()
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }
}

/// Create pre-order payload
///
/// `total_amount` is what the customer saw; the server recomputes it from
/// `items` and never trusts this value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreOrderCreate {
    #[validate(nested)]
    pub customer_info: CustomerInfo,
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, name: &str, price: i64, quantity: u32) -> OrderLine {
        OrderLine {
            menu_item_id: id.into(),
            name: name.into(),
            quantity,
            price: Decimal::new(price, 0),
        }
    }

    #[test]
    fn test_compute_total_idli_and_dosa() {
        let lines = vec![
            line("idli", "Classic Idli Sambar", 120, 2),
            line("dosa", "Masala Dosa", 150, 1),
        ];
        assert_eq!(compute_total(&lines), Some(Decimal::new(390, 0)));
    }

    #[test]
    fn test_compute_total_empty_is_zero() {
        assert_eq!(compute_total(&[]), Some(Decimal::ZERO));
    }

    #[test]
    fn test_compute_total_overflow_is_none() {
        let mut huge = line("thali", "Mega Thali", 0, 4_000_000_000);
        huge.price = Decimal::MAX;
        assert_eq!(huge.line_total(), None);
        assert_eq!(compute_total(&[huge.clone()]), None);
        assert!(!huge.within_bounds());

        let mut max = line("idli", "Classic Idli Sambar", 0, MAX_LINE_QUANTITY);
        max.price = MAX_LINE_PRICE;
        assert!(max.within_bounds());
        assert_eq!(compute_total(&[max.clone(), max]), Some(Decimal::new(1_998_000_000, 0)));
    }

    #[test]
    fn test_customer_info_requires_phone() {
        let info = CustomerInfo {
            name: "Arun".into(),
            phone: String::new(),
            order_date: "2026-11-02".into(),
            order_time: "08:00".into(),
        };
        let errors = info.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn test_preorder_wire_format() {
        let json = serde_json::json!({
            "id": "o-1",
            "customer_info": {
                "name": "Arun",
                "phone": "98400",
                "order_date": "2026-11-02",
                "order_time": "08:00"
            },
            "items": [{"menu_item_id": "idli", "name": "Idli", "quantity": 2, "price": 120.0}],
            "total_amount": 240.0,
            "status": "cooking",
            "created_at": "2026-11-01T10:00:00Z"
        });
        let order: PreOrder = serde_json::from_value(json).unwrap();
        assert_eq!(order.status, OrderStatus::Cooking);
        assert_eq!(order.progress_percent(), 75);
        assert_eq!(order.status_label(), "Cooking");
        assert_eq!(order.total_amount, Decimal::new(240, 0));
    }
}
