//! Client-local cart and wishlist persistence.
//!
//! # Architecture
//!
//! This is the one subsystem the storefront owns outright: a storage-backed
//! mutable collection kept consistent across observers through an explicit
//! change bus. Everything follows a single shape:
//!
//! 1. Read the full collection from the [`storage`] backend (soft-failing to
//!    an empty list on missing or corrupt data).
//! 2. Apply the mutation in memory.
//! 3. Write back synchronously, then publish the new list on the [`bus`].
//!
//! The store object is built once at startup and handed to anything that
//! needs cart/wishlist access; there is no ambient global state. Operations
//! are serialized per collection by a mutex, so every mutation is a complete
//! read-modify-write. Writes from other processes sharing the same data
//! directory race at last-write-wins; the storage medium offers no locking.
//!
//! [`reconcile`] runs once at process start to evict cart entries left over
//! from the retired static catalog (legacy `p`-prefixed identifiers).

pub mod bus;
pub mod cart;
pub mod reconcile;
pub mod storage;
pub mod wishlist;

pub use bus::{ChangeBus, Subscription};
pub use cart::{CartError, CartItemInput, CartLine, CartStore, item_count, total};
pub use reconcile::{ReconcileSummary, reconcile_cart};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use wishlist::{WishlistEntry, WishlistStore};
