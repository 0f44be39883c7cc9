//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Catalog
//! GET  /api/products                - Product listing (category/search filters)
//! GET  /api/products/{slug}         - Product detail
//! GET  /api/categories              - Category listing
//!
//! # Site
//! GET  /api/site/currency           - Currency display settings
//! GET  /api/site/menu               - Navigation menu
//!
//! # Shipping
//! GET  /api/shipping/zones          - Shipping zones
//! GET  /api/shipping/zones/{id}/methods - Enabled methods for a zone
//!
//! # Cart
//! GET  /api/cart                    - Cart contents with totals
//! GET  /api/cart/count              - Item count badge
//! POST /api/cart/add                - Add an item (merges by product id)
//! POST /api/cart/update             - Set a line quantity (<= 0 removes)
//! POST /api/cart/remove             - Remove a line
//! POST /api/cart/clear              - Empty the cart
//!
//! # Wishlist (scoped by X-User-Id header; guest without it)
//! GET  /api/wishlist                - Wishlist contents
//! POST /api/wishlist/toggle         - Toggle an entry
//! POST /api/wishlist/remove         - Remove an entry
//! POST /api/wishlist/clear          - Empty the wishlist
//!
//! # Orders
//! POST /api/checkout                - Submit a cash-on-delivery order
//! GET  /api/account/orders          - Order history (requires X-User-Id)
//! ```

pub mod cart;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod site;
pub mod wishlist;

use axum::{
    Router,
    http::HeaderMap,
    routing::{get, post},
};

use dgency_core::{CustomerId, Identity};

use crate::error::AppError;
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
        .route("/categories", get(products::categories))
}

/// Create the site routes router.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/currency", get(site::currency))
        .route("/menu", get(site::menu))
}

/// Create the shipping routes router.
pub fn shipping_routes() -> Router<AppState> {
    Router::new()
        .route("/zones", get(site::shipping_zones))
        .route("/zones/{id}/methods", get(site::shipping_methods))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/toggle", post(wishlist::toggle))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/checkout", post(checkout::submit))
        .route("/account/orders", get(orders::index))
}

/// Resolve the acting identity from the `X-User-Id` header.
///
/// Absent header means guest. A present but malformed header is a client
/// error rather than a silent fallback to the guest collection.
pub fn identity_from_headers(headers: &HeaderMap) -> Result<Identity, AppError> {
    let Some(value) = headers.get("x-user-id") else {
        return Ok(Identity::Guest);
    };
    let id = value
        .to_str()
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Invalid X-User-Id header".to_string()))?;
    Ok(Identity::User(CustomerId::new(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_missing_header_is_guest() {
        let headers = HeaderMap::new();
        assert_eq!(identity_from_headers(&headers).ok(), Some(Identity::Guest));
    }

    #[test]
    fn test_identity_numeric_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "42".parse().expect("header value"));
        assert_eq!(
            identity_from_headers(&headers).ok(),
            Some(Identity::User(CustomerId::new(42)))
        );
    }

    #[test]
    fn test_identity_malformed_header_is_rejected() {
        for bad in ["abc", "0", "-5", ""] {
            let mut headers = HeaderMap::new();
            headers.insert("x-user-id", bad.parse().expect("header value"));
            assert!(identity_from_headers(&headers).is_err(), "accepted {bad:?}");
        }
    }
}
