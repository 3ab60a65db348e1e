//! The cart store: single source of truth for items, coupon, and totals
//!
//! Every mutation recomputes the derived totals and then persists the full
//! state to the currently resolved identity key. Persistence is best-effort:
//! a failed read degrades to an empty cart, a failed write is logged and
//! swallowed. The authoritative state is established at order-placement time
//! against the server, so the persisted cart is only a convenience cache.
//!
//! Mutations take `&mut self`, so operations cannot interleave; callers that
//! drive the store from concurrent collaborators (e.g. coupon verification)
//! sequence the results before calling in.

use crate::keys::StorageKey;
use crate::storage::CartStorage;
use cart_core::{CartLineItem, CartState, Coupon, Identity, ProductSnapshot};

/// Reducer-style cart store with per-identity persistence scoping
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: StorageKey,
    state: CartState,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store for the given identity, loading any persisted cart
    pub fn new(storage: S, identity: Option<&Identity>) -> Self {
        let key = StorageKey::resolve(identity);
        let state = Self::load(&storage, &key);
        Self { storage, key, state }
    }

    // ========== Read Access ==========

    /// The full aggregate, for the rendering layer
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Line items in insertion order
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    /// Sum of all quantities
    pub fn total_items(&self) -> u32 {
        self.state.total_items
    }

    /// Subtotal before any coupon discount
    pub fn total_price(&self) -> f64 {
        self.state.total_price
    }

    /// The applied coupon, if any
    pub fn coupon(&self) -> Option<&Coupon> {
        self.state.coupon.as_ref()
    }

    /// Absolute discount amount from the applied coupon
    pub fn discount(&self) -> f64 {
        self.state.discount
    }

    /// Amount due: max(0, total_price - discount)
    pub fn final_total(&self) -> f64 {
        self.state.final_total
    }

    // ========== Mutations ==========

    /// Add a product to the cart
    ///
    /// A line with the same `(product id, color, size)` identity merges by
    /// summing quantity, keeping the price frozen at first insertion;
    /// otherwise a new line is appended with the price snapshotted from the
    /// product (discounted price when present, else selling price).
    pub fn add_item(
        &mut self,
        product: ProductSnapshot,
        quantity: u32,
        selected_color: Option<String>,
        selected_size: Option<String>,
    ) {
        if quantity == 0 {
            return;
        }

        let existing = self.state.items.iter_mut().find(|line| {
            line.matches(
                &product.id,
                selected_color.as_deref(),
                selected_size.as_deref(),
            )
        });

        match existing {
            Some(line) => line.quantity += quantity,
            None => {
                let price = product.unit_price();
                self.state.items.push(CartLineItem {
                    product,
                    quantity,
                    selected_color,
                    selected_size,
                    price,
                });
            }
        }

        self.commit();
    }

    /// Remove the line matching the identity tuple exactly
    ///
    /// `None` variant fields only match lines with `None` in the same field.
    /// Removing the last item clears any applied coupon.
    pub fn remove_item(&mut self, product_id: &str, color: Option<&str>, size: Option<&str>) {
        self.state
            .items
            .retain(|line| !line.matches(product_id, color, size));
        self.commit();
    }

    /// Overwrite the quantity of the matching line
    ///
    /// A quantity of 0 removes the line. Nothing happens when no line
    /// matches the identity tuple.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        color: Option<&str>,
        size: Option<&str>,
        quantity: u32,
    ) {
        if quantity == 0 {
            self.remove_item(product_id, color, size);
            return;
        }

        if let Some(line) = self
            .state
            .items
            .iter_mut()
            .find(|line| line.matches(product_id, color, size))
        {
            line.quantity = quantity;
            self.commit();
        }
    }

    /// Apply a verified coupon, replacing any existing one
    ///
    /// The store records the coupon as-is; validation against cart contents,
    /// minimum-order rules, and expiry is the verification service's job.
    pub fn apply_coupon(&mut self, coupon: Coupon) {
        self.state.coupon = Some(coupon);
        self.commit();
    }

    /// Clear the applied coupon and its discount
    pub fn remove_coupon(&mut self) {
        self.state.coupon = None;
        self.commit();
    }

    /// Empty the cart: items, coupon, and all totals
    pub fn clear(&mut self) {
        self.state = CartState::new();
        self.commit();
    }

    /// Discard in-memory state and re-read the cart persisted for `identity`
    ///
    /// Call after login, logout, and session restore so each identity sees
    /// only its own cart.
    pub fn reload(&mut self, identity: Option<&Identity>) {
        self.key = StorageKey::resolve(identity);
        self.state = Self::load(&self.storage, &self.key);
        tracing::debug!(
            key = %self.key,
            items = self.state.items.len(),
            "cart reloaded"
        );
    }

    // ========== Persistence ==========

    fn commit(&mut self) {
        self.state.recompute();
        self.persist();
    }

    /// Best-effort write; failures are logged and swallowed
    fn persist(&self) {
        let bytes = match serde_json::to_vec(&self.state) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to serialize cart state");
                return;
            }
        };

        if let Err(err) = self.storage.set(self.key.as_str(), &bytes) {
            tracing::warn!(key = %self.key, error = %err, "failed to persist cart state");
        }
    }

    /// Best-effort read; missing, unreadable, or corrupt entries degrade to
    /// an empty cart
    fn load(storage: &S, key: &StorageKey) -> CartState {
        let bytes = match storage.get(key.as_str()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return CartState::new(),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to read cart state");
                return CartState::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "corrupt cart state, starting empty");
                CartState::new()
            }
        }
    }
}
