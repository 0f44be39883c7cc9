//! Storefront identity model.
//!
//! The storefront itself never authenticates anyone; identity is supplied by
//! the WordPress JWT layer and used only to scope per-user state (the
//! wishlist). Everything falls back to [`Identity::Guest`].

use serde::{Deserialize, Serialize};

use super::CustomerId;

/// The current user context: guest or an authenticated WordPress customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Identity {
    /// Anonymous visitor.
    #[default]
    Guest,
    /// Authenticated customer, identified by WordPress user ID.
    User(CustomerId),
}

impl Identity {
    /// Storage key for this identity's wishlist collection.
    ///
    /// Switching identity switches the active collection entirely; guest
    /// items are not migrated on login.
    #[must_use]
    pub fn wishlist_storage_key(&self) -> String {
        match self {
            Self::Guest => "wishlist_guest".to_string(),
            Self::User(id) => format!("wishlist_{id}"),
        }
    }

    /// The customer ID, if authenticated.
    #[must_use]
    pub const fn customer_id(&self) -> Option<CustomerId> {
        match self {
            Self::Guest => None,
            Self::User(id) => Some(*id),
        }
    }
}

impl From<Option<CustomerId>> for Identity {
    fn from(id: Option<CustomerId>) -> Self {
        id.map_or(Self::Guest, Self::User)
    }
}

/// Profile record supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: CustomerId,
    pub email: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wishlist_storage_key() {
        assert_eq!(Identity::Guest.wishlist_storage_key(), "wishlist_guest");
        assert_eq!(
            Identity::User(CustomerId::new(42)).wishlist_storage_key(),
            "wishlist_42"
        );
    }

    #[test]
    fn test_identity_from_optional_customer() {
        assert_eq!(Identity::from(None), Identity::Guest);
        assert_eq!(
            Identity::from(Some(CustomerId::new(7))),
            Identity::User(CustomerId::new(7))
        );
    }

    #[test]
    fn test_customer_id_accessor() {
        assert_eq!(Identity::Guest.customer_id(), None);
        assert_eq!(
            Identity::User(CustomerId::new(3)).customer_id(),
            Some(CustomerId::new(3))
        );
    }
}
