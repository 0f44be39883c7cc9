//! Cart aggregate over the persisted store.
//!
//! One [`CartLine`] per product: adding an existing product increments its
//! quantity instead of duplicating the row. Every operation is a complete
//! read-modify-write against the storage backend, immediately persisted,
//! and broadcast to subscribers.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use dgency_core::ProductId;

use super::bus::{ChangeBus, Subscription};
use super::storage::{StorageBackend, read_list, write_list};

/// Storage key for the cart collection.
pub const CART_STORAGE_KEY: &str = "dgency_cart";

/// One product row in the cart.
///
/// `price` is the unit price at the time of adding; it is not re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Canonical product identifier (numeric string once reconciled).
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    pub image: String,
    pub slug: String,
}

/// Cart line input: everything but the quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemInput {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub slug: String,
}

/// Errors surfaced to the user by cart operations.
#[derive(Debug, Clone, Error)]
pub enum CartError {
    /// The product identifier is not valid after legacy-prefix stripping.
    #[error("Invalid product, please refresh")]
    InvalidProductId(String),
}

/// The cart collection, persisted under [`CART_STORAGE_KEY`].
pub struct CartStore {
    backend: Arc<dyn StorageBackend>,
    bus: Arc<ChangeBus<CartLine>>,
    // Serializes read-modify-write cycles across handler tasks.
    op_lock: Mutex<()>,
}

impl CartStore {
    /// Create a cart store over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            bus: Arc::new(ChangeBus::new()),
            op_lock: Mutex::new(()),
        }
    }

    /// Current cart contents (empty on missing or corrupt storage).
    #[must_use]
    pub fn items(&self) -> Vec<CartLine> {
        read_list(self.backend.as_ref(), CART_STORAGE_KEY)
    }

    /// Register an observer for cart changes.
    pub fn subscribe<F>(&self, callback: F) -> Subscription<CartLine>
    where
        F: Fn(&[CartLine]) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback)
    }

    /// Add `quantity` of `item` to the cart, merging with an existing line.
    ///
    /// The identifier is validated (and canonicalized) through
    /// [`ProductId::parse_legacy`]; stale product data from the retired
    /// static catalog is rejected rather than persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidProductId`] if the identifier is not a
    /// strictly positive integer after legacy-prefix stripping.
    pub fn add(&self, item: CartItemInput, quantity: u32) -> Result<Vec<CartLine>, CartError> {
        let id = ProductId::parse_legacy(&item.id)
            .ok_or_else(|| CartError::InvalidProductId(item.id.clone()))?;
        let canonical = id.to_string();
        let quantity = quantity.max(1);

        let _guard = self.lock_ops();
        let mut lines = self.items();
        if let Some(existing) = lines.iter_mut().find(|line| line.id == canonical) {
            // Repeated adds must never wrap past zero
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            lines.push(CartLine {
                id: canonical,
                name: item.name,
                price: item.price,
                quantity,
                image: item.image,
                slug: item.slug,
            });
        }
        self.write(&lines);
        Ok(lines)
    }

    /// Remove the line with the given identifier. No-op if absent.
    pub fn remove(&self, id: &str) -> Vec<CartLine> {
        let _guard = self.lock_ops();
        let mut lines = self.items();
        lines.retain(|line| line.id != id);
        self.write(&lines);
        lines
    }

    /// Set the quantity on a line; `quantity <= 0` removes the line.
    ///
    /// No-op if the identifier is not in the cart.
    pub fn update_quantity(&self, id: &str, quantity: i64) -> Vec<CartLine> {
        if quantity <= 0 {
            return self.remove(id);
        }
        // quantity > 0 here, and any value past u32::MAX is clamped
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let _guard = self.lock_ops();
        let mut lines = self.items();
        let Some(line) = lines.iter_mut().find(|line| line.id == id) else {
            return lines;
        };
        line.quantity = quantity;
        self.write(&lines);
        lines
    }

    /// Empty the cart.
    pub fn clear(&self) {
        let _guard = self.lock_ops();
        self.write(&[]);
    }

    /// Replace the whole collection (reconciliation only).
    pub(crate) fn replace(&self, lines: Vec<CartLine>) -> Vec<CartLine> {
        let _guard = self.lock_ops();
        self.write(&lines);
        lines
    }

    fn write(&self, lines: &[CartLine]) {
        write_list(self.backend.as_ref(), CART_STORAGE_KEY, lines);
        self.bus.publish(lines);
    }

    fn lock_ops(&self) -> std::sync::MutexGuard<'_, ()> {
        self.op_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Sum of `price * quantity` over all lines.
#[must_use]
pub fn total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum()
}

/// Sum of quantities over all lines.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::storage::MemoryStorage;

    fn store() -> CartStore {
        CartStore::new(Arc::new(MemoryStorage::new()))
    }

    fn input(id: &str, price: i64) -> CartItemInput {
        CartItemInput {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            image: format!("https://cdn.example/{id}.jpg"),
            slug: format!("product-{id}"),
        }
    }

    #[test]
    fn test_add_merges_by_id() {
        let cart = store();
        cart.add(input("7", 10), 2).expect("add");
        let lines = cart.add(input("7", 10), 3).expect("add");

        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(5));
    }

    #[test]
    fn test_add_canonicalizes_legacy_prefix() {
        let cart = store();
        let lines = cart.add(input("p42", 10), 1).expect("add");
        assert_eq!(lines.first().map(|l| l.id.as_str()), Some("42"));

        // A later add with the bare id merges into the same line
        let lines = cart.add(input("42", 10), 1).expect("add");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_add_saturates_instead_of_wrapping() {
        let cart = store();
        cart.add(input("7", 10), u32::MAX).expect("add");
        let lines = cart.add(input("7", 10), 1).expect("add");

        assert_eq!(lines.first().map(|l| l.quantity), Some(u32::MAX));
        assert!(cart.items().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn test_add_rejects_invalid_id() {
        let cart = store();
        let err = cart.add(input("pABC", 10), 1).expect_err("invalid id");
        assert!(matches!(err, CartError::InvalidProductId(_)));
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_update_quantity_floor_removes() {
        let cart = store();
        cart.add(input("3", 10), 2).expect("add");

        let lines = cart.update_quantity("3", 0);
        assert!(lines.is_empty());

        cart.add(input("3", 10), 2).expect("add");
        let lines = cart.update_quantity("3", -4);
        assert!(lines.is_empty());
        assert!(cart.items().iter().all(|l| l.quantity > 0));
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let cart = store();
        cart.add(input("3", 10), 2).expect("add");
        let lines = cart.update_quantity("3", 7);
        assert_eq!(lines.first().map(|l| l.quantity), Some(7));
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let cart = store();
        cart.add(input("3", 10), 2).expect("add");
        let lines = cart.update_quantity("99", 5);
        assert_eq!(lines, cart.items());
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_remove_and_clear() {
        let cart = store();
        cart.add(input("1", 10), 1).expect("add");
        cart.add(input("2", 20), 1).expect("add");

        let lines = cart.remove("1");
        assert_eq!(lines.len(), 1);

        cart.clear();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_totals() {
        let cart = store();
        cart.add(input("1", 10), 2).expect("add");
        cart.add(input("2", 5), 3).expect("add");

        let lines = cart.items();
        assert_eq!(total(&lines), Decimal::from(35));
        assert_eq!(item_count(&lines), 5);
    }

    #[test]
    fn test_mutations_broadcast_new_list() {
        let cart = store();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _sub = cart.subscribe(move |lines| {
            sink.lock().expect("lock").push(lines.to_vec());
        });

        cart.add(input("1", 10), 1).expect("add");
        cart.update_quantity("1", 4);
        cart.clear();

        let events = seen.lock().expect("lock");
        assert_eq!(events.len(), 3);
        assert_eq!(events.first().map(Vec::len), Some(1));
        assert_eq!(
            events.get(1).and_then(|e| e.first()).map(|l| l.quantity),
            Some(4)
        );
        assert_eq!(events.get(2).map(Vec::len), Some(0));
    }

    #[test]
    fn test_persists_across_store_instances() {
        let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
        let cart = CartStore::new(Arc::clone(&backend));
        cart.add(input("9", 15), 2).expect("add");

        let reopened = CartStore::new(backend);
        let lines = reopened.items();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.quantity), Some(2));
    }
}
