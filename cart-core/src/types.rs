//! Shared types for the cart state store

use serde::{Deserialize, Serialize};

// ============================================================================
// Identity
// ============================================================================

/// Authenticated user descriptor read from session state
///
/// `None` in the store APIs means a guest session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// User ID
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

// ============================================================================
// Product / Line Item
// ============================================================================

/// Product fields snapshotted into a cart line at add time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSnapshot {
    /// Product ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Regular selling price
    pub selling_price: f64,
    /// Discounted price, when the product is on offer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    /// Image reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductSnapshot {
    /// Effective unit price: the discounted price when present and strictly
    /// positive, otherwise the selling price. A zero discount price counts
    /// as absent.
    pub fn unit_price(&self) -> f64 {
        match self.discount_price {
            Some(p) if p > 0.0 => p,
            _ => self.selling_price,
        }
    }
}

/// One row in the cart: a product/variant combination and its quantity
///
/// Line identity is the `(product.id, selected_color, selected_size)` tuple.
/// Two additions with the same identity merge by summing quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Product snapshot taken at add time
    pub product: ProductSnapshot,
    /// Quantity, always >= 1
    pub quantity: u32,
    /// Selected color variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    /// Selected size variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    /// Unit price frozen at insertion time (not re-derived on later reads)
    pub price: f64,
}

impl CartLineItem {
    /// Whether this line matches the identity tuple exactly.
    /// `None` variant fields never match `Some`.
    pub fn matches(&self, product_id: &str, color: Option<&str>, size: Option<&str>) -> bool {
        self.product.id == product_id
            && self.selected_color.as_deref() == color
            && self.selected_size.as_deref() == size
    }
}

// ============================================================================
// Coupon
// ============================================================================

/// Discount kind carried by a coupon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    Percentage,
    Fixed,
}

/// Coupon applied to the cart subtotal
///
/// `discount` is the absolute amount computed by the coupon-verification
/// service and is trusted as-is; the store never re-derives it from `value`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    /// Coupon code (uppercase by convention)
    pub code: String,
    /// Discount kind
    #[serde(rename = "type")]
    pub kind: CouponType,
    /// Discount magnitude (percentage points or currency amount)
    pub value: f64,
    /// Absolute amount to subtract from the subtotal
    pub discount: f64,
    /// Advisory flag consumed by checkout, not enforced by the cart
    #[serde(default)]
    pub free_shipping: bool,
}

impl Coupon {
    /// Create a coupon, normalizing the code to uppercase
    pub fn new(code: impl Into<String>, kind: CouponType, value: f64, discount: f64) -> Self {
        Self {
            code: code.into().to_uppercase(),
            kind,
            value,
            discount,
            free_shipping: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, selling: f64, discounted: Option<f64>) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            name: "Test".to_string(),
            selling_price: selling,
            discount_price: discounted,
            image: None,
        }
    }

    #[test]
    fn test_unit_price_prefers_discount_price() {
        assert_eq!(product("p1", 100.0, Some(80.0)).unit_price(), 80.0);
        assert_eq!(product("p1", 100.0, None).unit_price(), 100.0);
    }

    #[test]
    fn test_unit_price_zero_discount_counts_as_absent() {
        assert_eq!(product("p1", 100.0, Some(0.0)).unit_price(), 100.0);
    }

    #[test]
    fn test_line_matches_requires_exact_variant_fields() {
        let line = CartLineItem {
            product: product("p1", 10.0, None),
            quantity: 1,
            selected_color: Some("red".to_string()),
            selected_size: None,
            price: 10.0,
        };

        assert!(line.matches("p1", Some("red"), None));
        assert!(!line.matches("p1", Some("blue"), None));
        assert!(!line.matches("p1", None, None));
        assert!(!line.matches("p1", Some("red"), Some("M")));
        assert!(!line.matches("p2", Some("red"), None));
    }

    #[test]
    fn test_coupon_code_uppercased() {
        let coupon = Coupon::new("save20", CouponType::Fixed, 20.0, 20.0);
        assert_eq!(coupon.code, "SAVE20");
        assert!(!coupon.free_shipping);
    }

    #[test]
    fn test_coupon_serde_type_field() {
        let coupon = Coupon::new("HALF", CouponType::Percentage, 50.0, 25.0);
        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["type"], "PERCENTAGE");

        // free_shipping may be absent in older persisted blobs
        let parsed: Coupon = serde_json::from_str(
            r#"{"code":"HALF","type":"PERCENTAGE","value":50.0,"discount":25.0}"#,
        )
        .unwrap();
        assert!(!parsed.free_shipping);
    }
}
