//! Wishlist aggregate, scoped per identity.
//!
//! Shaped like the cart but without quantities: at most one entry per
//! product, most recently wishlisted first. Each identity (guest or
//! authenticated customer) owns its own storage key; switching identity
//! switches the active collection entirely, with no merge.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dgency_core::Identity;

use super::bus::{ChangeBus, Subscription};
use super::storage::{StorageBackend, read_list, write_list};

/// One saved-for-later product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
}

/// The wishlist collections, one per identity.
pub struct WishlistStore {
    backend: Arc<dyn StorageBackend>,
    bus: Arc<ChangeBus<WishlistEntry>>,
    op_lock: Mutex<()>,
}

impl WishlistStore {
    /// Create a wishlist store over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            bus: Arc::new(ChangeBus::new()),
            op_lock: Mutex::new(()),
        }
    }

    /// Current wishlist for `identity` (empty on missing or corrupt storage).
    #[must_use]
    pub fn items(&self, identity: Identity) -> Vec<WishlistEntry> {
        read_list(self.backend.as_ref(), &identity.wishlist_storage_key())
    }

    /// Register an observer for wishlist changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<WishlistEntry>
    where
        F: Fn(&[WishlistEntry]) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    /// Prepend `entry` if absent; no-op when the id is already wishlisted.
    pub fn add(&self, identity: Identity, entry: WishlistEntry) -> Vec<WishlistEntry> {
        let _guard = self.lock_ops();
        let mut entries = self.items(identity);
        if entries.iter().any(|e| e.id == entry.id) {
            return entries;
        }
        entries.insert(0, entry);
        self.write(identity, &entries);
        entries
    }

    /// Remove the entry with the given id. No-op if absent.
    pub fn remove(&self, identity: Identity, id: &str) -> Vec<WishlistEntry> {
        let _guard = self.lock_ops();
        let mut entries = self.items(identity);
        entries.retain(|e| e.id != id);
        self.write(identity, &entries);
        entries
    }

    /// Add `entry` if absent, remove it if present.
    pub fn toggle(&self, identity: Identity, entry: WishlistEntry) -> Vec<WishlistEntry> {
        let _guard = self.lock_ops();
        let mut entries = self.items(identity);
        if entries.iter().any(|e| e.id == entry.id) {
            entries.retain(|e| e.id != entry.id);
        } else {
            entries.insert(0, entry);
        }
        self.write(identity, &entries);
        entries
    }

    /// Whether the id is currently wishlisted for `identity`.
    #[must_use]
    pub fn is_wished(&self, identity: Identity, id: &str) -> bool {
        self.items(identity).iter().any(|e| e.id == id)
    }

    /// Empty the wishlist for `identity`.
    pub fn clear(&self, identity: Identity) {
        let _guard = self.lock_ops();
        self.write(identity, &[]);
    }

    fn write(&self, identity: Identity, entries: &[WishlistEntry]) {
        write_list(
            self.backend.as_ref(),
            &identity.wishlist_storage_key(),
            entries,
        );
        self.bus.publish(entries);
    }

    fn lock_ops(&self) -> std::sync::MutexGuard<'_, ()> {
        self.op_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;
    use dgency_core::CustomerId;

    fn store() -> WishlistStore {
        WishlistStore::new(Arc::new(MemoryStorage::new()))
    }

    fn entry(id: &str) -> WishlistEntry {
        WishlistEntry {
            id: id.to_string(),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            price: Decimal::from(25),
            image: format!("https://cdn.example/{id}.jpg"),
            original_price: None,
            discount: None,
            in_stock: Some(true),
        }
    }

    #[test]
    fn test_add_is_idempotent_and_prepends() {
        let wishlist = store();
        wishlist.add(Identity::Guest, entry("1"));
        wishlist.add(Identity::Guest, entry("2"));
        wishlist.add(Identity::Guest, entry("1"));

        let items = wishlist.items(Identity::Guest);
        assert_eq!(items.len(), 2);
        // Most recently wishlisted first
        assert_eq!(items.first().map(|e| e.id.as_str()), Some("2"));
    }

    #[test]
    fn test_toggle_round_trip() {
        let wishlist = store();
        wishlist.toggle(Identity::Guest, entry("5"));
        assert!(wishlist.is_wished(Identity::Guest, "5"));

        wishlist.toggle(Identity::Guest, entry("5"));
        assert!(!wishlist.is_wished(Identity::Guest, "5"));
    }

    #[test]
    fn test_identity_isolation() {
        let wishlist = store();
        wishlist.add(Identity::Guest, entry("1"));

        let user = Identity::User(CustomerId::new(42));
        assert!(wishlist.items(user).is_empty());

        wishlist.add(user, entry("2"));
        assert_eq!(wishlist.items(user).len(), 1);
        assert_eq!(wishlist.items(Identity::Guest).len(), 1);
        assert!(!wishlist.is_wished(user, "1"));
    }

    #[test]
    fn test_remove_and_clear() {
        let wishlist = store();
        wishlist.add(Identity::Guest, entry("1"));
        wishlist.add(Identity::Guest, entry("2"));

        let items = wishlist.remove(Identity::Guest, "1");
        assert_eq!(items.len(), 1);

        wishlist.clear(Identity::Guest);
        assert!(wishlist.items(Identity::Guest).is_empty());
    }

    #[test]
    fn test_optional_fields_survive_round_trip() {
        let wishlist = store();
        let mut discounted = entry("9");
        discounted.original_price = Some(Decimal::from(40));
        discounted.discount = Some(38);
        wishlist.add(Identity::Guest, discounted.clone());

        let items = wishlist.items(Identity::Guest);
        assert_eq!(items.first(), Some(&discounted));
    }
}
