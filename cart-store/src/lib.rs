//! Cart & Coupon State Store
//!
//! Single source of truth for the shopping cart: line items, at-most-one
//! coupon, and derived totals, persisted per identity so that one device
//! keeps separate carts for each logged-in user plus a guest cart.
//!
//! - **store**: `CartStore` with the mutating operations and read access
//! - **storage**: pluggable blob persistence (`redb`-backed and in-memory)
//! - **keys**: per-identity storage key resolution
//!
//! # Data Flow
//!
//! ```text
//! Mutation → CartStore → CartState recompute → Storage (best-effort)
//!                              ↓
//!                       Rendering layer reads
//! ```
//!
//! Persistence is deliberately best-effort: cart state is a convenience
//! cache, the authoritative copy is established at order-placement time.

pub mod keys;
pub mod storage;
pub mod store;

// Re-exports
pub use keys::StorageKey;
pub use storage::{CartStorage, MemoryCartStorage, RedbCartStorage, StorageError, StorageResult};
pub use store::CartStore;

// Re-export core types for convenience
pub use cart_core::{CartLineItem, CartState, Coupon, CouponType, Identity, ProductSnapshot};
