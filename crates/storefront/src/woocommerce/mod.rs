//! WooCommerce REST API client.
//!
//! # Architecture
//!
//! - WooCommerce is source of truth - NO local catalog sync, direct API calls
//! - In-memory caching via `moka` for API responses (5 minute TTL)
//! - Raw REST payloads are normalized in [`conversions`] before anything
//!   else sees them
//!
//! # APIs
//!
//! ## WooCommerce REST API (`/wp-json/wc/v3`)
//! - Products, categories, store settings, shipping zones and methods
//! - Order history and cash-on-delivery order creation
//! - Authenticated with consumer key/secret query parameters
//!
//! ## WordPress menus (`/wp-json/wp-api-menus/v2`)
//! - Navigation menus, with a category-derived fallback when the menus
//!   plugin is not installed
//!
//! # Example
//!
//! ```rust,ignore
//! use dgency_storefront::woocommerce::WooClient;
//!
//! let client = WooClient::new(&config.woocommerce);
//!
//! // List products in a category
//! let products = client
//!     .get_products(&ProductQuery {
//!         category: Some("gadgets".to_string()),
//!         ..ProductQuery::default()
//!     })
//!     .await?;
//! ```

mod cache;
mod client;
pub mod conversions;
pub mod types;

pub use client::WooClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the WooCommerce API.
#[derive(Debug, Error)]
pub enum WooError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Status {
        status: u16,
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller (e.g., a bad product id at checkout).
    #[error("User error: {0}")]
    UserError(String),
}
