//! Integration tests for the Dgency storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dgency-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `store_persistence` - file-backed cart/wishlist behavior across
//!   process-like store instances
//! - `cart_reconciliation` - startup migration of carts persisted against
//!   the retired static catalog
//!
//! The tests exercise the library APIs directly over temporary data
//! directories; no running server or WooCommerce instance is required.
