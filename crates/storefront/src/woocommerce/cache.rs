//! Cache types for WooCommerce API responses.

use dgency_core::CurrencySettings;

use super::types::{Category, MenuItem, Product, ShippingMethod, ShippingZone};

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Currency(CurrencySettings),
    ShippingZones(Vec<ShippingZone>),
    ShippingMethods(Vec<ShippingMethod>),
    Menu(Vec<MenuItem>),
}
