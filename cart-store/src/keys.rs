//! Per-identity storage key resolution
//!
//! The persisted cart is scoped by a key resolved from the current identity,
//! which makes the cart implicitly multi-tenant on a single device without
//! any server round trip.

use cart_core::Identity;

const GUEST_KEY: &str = "cart:guest";

/// Resolved storage key scoping persisted cart state to one identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey(String);

impl StorageKey {
    /// Resolve the key for the given identity: `cart:user:<id>` when
    /// authenticated, the constant `cart:guest` otherwise.
    pub fn resolve(identity: Option<&Identity>) -> Self {
        match identity {
            Some(user) => Self(format!("cart:user:{}", user.id)),
            None => Self(GUEST_KEY.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_key() {
        assert_eq!(StorageKey::resolve(None).as_str(), "cart:guest");
    }

    #[test]
    fn test_user_key() {
        let user = Identity::new("42");
        assert_eq!(StorageKey::resolve(Some(&user)).as_str(), "cart:user:42");
    }

    #[test]
    fn test_distinct_users_get_distinct_keys() {
        let a = StorageKey::resolve(Some(&Identity::new("a")));
        let b = StorageKey::resolve(Some(&Identity::new("b")));
        assert_ne!(a, b);
        assert_ne!(a, StorageKey::resolve(None));
    }
}
