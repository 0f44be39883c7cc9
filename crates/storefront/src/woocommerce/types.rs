//! Clean storefront-facing types for WooCommerce/WordPress data.
//!
//! These are the shapes the rest of the storefront works with; the raw REST
//! payloads (string-typed prices, HTML-entity symbols, plugin-dependent
//! metadata) are normalized in [`super::conversions`] at the boundary.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dgency_core::{CategoryId, CustomerId, MenuItemId, OrderId, ProductId, ShippingZoneId};

/// A catalog product, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Slug of the first assigned category, `"uncategorized"` if none.
    pub category: String,
    pub price: Decimal,
    /// Regular price before any sale; equals `price` when not on sale.
    pub original_price: Decimal,
    /// Sale discount in whole percent, 0 when not on sale.
    pub discount: u32,
    /// Primary image URL (placeholder when the product has none).
    pub image: String,
    pub images: Vec<String>,
    pub rating: Decimal,
    pub in_stock: bool,
    /// Short description with HTML tags stripped.
    pub description: String,
    /// Full description, HTML preserved.
    pub full_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub attributes: Vec<ProductAttribute>,
}

/// Simplified product attribute (name plus flat option strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProductAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub options: Vec<String>,
}

/// Query options for the product listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    /// Category slug filter.
    pub category: Option<String>,
    /// Exact product slug (single-product lookup).
    pub slug: Option<String>,
    /// Free-text search.
    pub search: Option<String>,
    pub per_page: Option<u32>,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub count: u32,
}

/// A navigation menu item; `children` is populated by tree building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub title: String,
    pub url: String,
    pub slug: String,
    /// Parent menu item id; 0 for top-level entries.
    pub parent: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

/// A configured shipping zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingZone {
    pub id: ShippingZoneId,
    pub name: String,
}

impl ShippingZone {
    /// Fallback zone used when none can be fetched.
    #[must_use]
    pub fn default_zone() -> Self {
        Self {
            id: ShippingZoneId::new(0),
            name: "Default Zone".to_string(),
        }
    }
}

/// An enabled shipping method within a zone.
///
/// Only `flat_rate` and `free_shipping` are surfaced to the checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub instance_id: i64,
    pub method_id: String,
    pub title: String,
    /// Flat-rate cost; zero for free shipping.
    pub cost: Decimal,
}

impl ShippingMethod {
    /// Fallback method used when none can be fetched for a zone.
    #[must_use]
    pub fn free_shipping() -> Self {
        Self {
            instance_id: 0,
            method_id: "free_shipping".to_string(),
            title: "Free shipping".to_string(),
            cost: Decimal::ZERO,
        }
    }
}

/// A past order, summarized for the account page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub number: String,
    pub status: String,
    pub total: Decimal,
    pub currency: String,
    pub date_created: NaiveDateTime,
    pub line_items: Vec<OrderLineItem>,
}

/// One line of a past order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: u32,
    pub total: Decimal,
}

/// Billing or shipping address submitted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// One line item in a checkout submission.
///
/// The product id arrives as a string from the client and is validated
/// before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLineItem {
    pub product_id: String,
    pub quantity: u32,
}

/// A selected shipping method for the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    pub method_id: String,
    pub method_title: String,
    pub total: Decimal,
}

/// Checkout submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub billing: Address,
    pub shipping: Address,
    pub line_items: Vec<CheckoutLineItem>,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
}

/// Confirmation returned after a successful order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfirmation {
    pub order_id: OrderId,
    pub order_number: String,
    pub status: String,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}
