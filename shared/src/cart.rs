//! Customer cart
//!
//! Lines are keyed by menu item id and keep the order in which dishes were
//! first added. The price on a line is the menu price at add time.

use rust_decimal::Decimal;

use crate::models::{MAX_LINE_QUANTITY, MenuItem, OrderLine};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<OrderLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total number of portions across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, menu_item_id: &str) -> u32 {
        self.line(menu_item_id).map(|l| l.quantity).unwrap_or(0)
    }

    fn line(&self, menu_item_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|l| l.menu_item_id == menu_item_id)
    }

    fn position(&self, menu_item_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.menu_item_id == menu_item_id)
    }

    /// Add one portion of `item`, merging into an existing line
    pub fn add(&mut self, item: &MenuItem) {
        match self.position(&item.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = (line.quantity + 1).min(MAX_LINE_QUANTITY);
            }
            None => self.lines.push(OrderLine {
                menu_item_id: item.id.clone(),
                name: item.name.clone(),
                quantity: 1,
                price: item.price,
            }),
        }
    }

    /// Set a line's quantity; zero removes the line. Unknown ids are ignored.
    ///
    /// Quantities above [`MAX_LINE_QUANTITY`] are clamped.
    pub fn set_quantity(&mut self, menu_item_id: &str, quantity: u32) {
        let Some(idx) = self.position(menu_item_id) else {
            return;
        };
        if quantity == 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = quantity.min(MAX_LINE_QUANTITY);
        }
    }

    pub fn increment(&mut self, menu_item_id: &str) {
        let current = self.quantity_of(menu_item_id);
        if current > 0 {
            self.set_quantity(menu_item_id, current.saturating_add(1));
        }
    }

    /// Remove one portion; the line disappears at zero
    pub fn decrement(&mut self, menu_item_id: &str) {
        let current = self.quantity_of(menu_item_id);
        self.set_quantity(menu_item_id, current.saturating_sub(1));
    }

    pub fn remove(&mut self, menu_item_id: &str) {
        self.set_quantity(menu_item_id, 0);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// `None` only if the lines overflow a `Decimal`
    pub fn total(&self) -> Option<Decimal> {
        crate::models::compute_total(&self.lines)
    }

    /// Hand the lines over for submission
    pub fn to_lines(&self) -> Vec<OrderLine> {
        self.lines.clone()
    }
}
