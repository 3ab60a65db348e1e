//! Core data model for the shopping cart and coupon state store
//!
//! Pure types and arithmetic only: line items, coupons, the `CartState`
//! aggregate, and precise money calculation. Persistence and the stateful
//! store live in the `cart-store` crate.

pub mod money;
pub mod state;
pub mod types;

// Re-exports
pub use state::CartState;
pub use types::{CartLineItem, Coupon, CouponType, Identity, ProductSnapshot};
