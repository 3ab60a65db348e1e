//! Cart state aggregate
//!
//! `total_items`, `total_price`, `discount`, and `final_total` are derived:
//! they are recomputed from `items`/`coupon` after every mutation and never
//! set directly by callers.

use crate::money::{line_total, to_decimal, to_f64};
use crate::types::{CartLineItem, Coupon};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cart aggregate, persisted as a unit per identity key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Line items in insertion order
    pub items: Vec<CartLineItem>,
    /// Derived: sum of all quantities
    pub total_items: u32,
    /// Derived: sum of price * quantity across items
    pub total_price: f64,
    /// Applied coupon, at most one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
    /// Derived: coupon.discount when a coupon is present, else 0
    pub discount: f64,
    /// Derived: max(0, total_price - discount)
    pub final_total: f64,
    /// Creation timestamp (millis)
    #[serde(default)]
    pub created_at: i64,
    /// Last mutation timestamp (millis)
    #[serde(default)]
    pub updated_at: i64,
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

impl CartState {
    /// Create a new empty cart
    pub fn new() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: 0.0,
            coupon: None,
            discount: 0.0,
            final_total: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the cart has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Advisory free-shipping flag from the applied coupon
    /// (consumed by checkout, not enforced here)
    pub fn has_free_shipping(&self) -> bool {
        self.coupon.as_ref().is_some_and(|c| c.free_shipping)
    }

    /// Recompute all derived fields from `items` and `coupon`
    ///
    /// Removing the last item invalidates any applied coupon. The coupon's
    /// `discount` is taken as-is; `final_total` is clamped to zero when the
    /// discount exceeds the subtotal.
    pub fn recompute(&mut self) {
        if self.items.is_empty() {
            self.coupon = None;
        }

        let subtotal: Decimal = self
            .items
            .iter()
            .map(|item| line_total(item.price, item.quantity))
            .sum();
        let discount = self
            .coupon
            .as_ref()
            .map(|c| to_decimal(c.discount))
            .unwrap_or(Decimal::ZERO);

        self.total_items = self.items.iter().map(|item| item.quantity).sum();
        self.total_price = to_f64(subtotal);
        self.discount = to_f64(discount);
        self.final_total = to_f64((subtotal - discount).max(Decimal::ZERO));
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}
