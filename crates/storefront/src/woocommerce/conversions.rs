//! Conversions from raw WooCommerce/WordPress REST payloads to clean types.
//!
//! The REST layer is loosely typed: prices arrive as strings or numbers,
//! the currency symbol as HTML entities, brands in whichever attribute or
//! meta key the active plugin uses. Everything is normalized here so the
//! rest of the storefront never sees a raw payload.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use dgency_core::{
    CategoryId, CurrencyPosition, CurrencySettings, MenuItemId, OrderId, ProductId,
};

use super::types::{
    Category, CheckoutConfirmation, MenuItem, OrderLineItem, OrderSummary, Product,
    ProductAttribute, ShippingMethod,
};

/// Placeholder shown for products without images.
const FALLBACK_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop";

// =============================================================================
// Raw payload types
// =============================================================================

/// A JSON field that may be a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(f64),
}

impl StringOrNumber {
    /// Parse as a decimal, defaulting to zero on anything unparseable.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Self::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
            Self::Number(n) => Decimal::try_from(*n).unwrap_or(Decimal::ZERO),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub id: StringOrNumber,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub categories: Vec<RawCategoryRef>,
    pub price: Option<StringOrNumber>,
    pub regular_price: Option<StringOrNumber>,
    pub sale_price: Option<StringOrNumber>,
    #[serde(default)]
    pub images: Vec<RawImage>,
    pub average_rating: Option<StringOrNumber>,
    #[serde(default)]
    pub stock_status: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
    #[serde(default)]
    pub meta_data: Vec<RawMeta>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategoryRef {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct RawImage {
    pub src: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawAttribute {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub options: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMeta {
    pub key: Option<String>,
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub image: Option<RawImage>,
    #[serde(default)]
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawSetting {
    pub id: Option<String>,
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawCurrency {
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawShippingMethod {
    /// Instance id.
    pub id: Option<i64>,
    pub method_id: Option<String>,
    pub title: Option<String>,
    pub enabled: Option<serde_json::Value>,
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawMenu {
    pub slug: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub items: Vec<RawMenuItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawMenuItem {
    #[serde(rename = "ID")]
    pub upper_id: Option<i64>,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub post_title: Option<String>,
    #[serde(default)]
    pub url: String,
    pub slug: Option<String>,
    pub post_name: Option<String>,
    pub menu_item_parent: Option<StringOrNumber>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrder {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub status: String,
    pub total: Option<StringOrNumber>,
    #[serde(default)]
    pub currency: String,
    pub date_created: chrono::NaiveDateTime,
    #[serde(default)]
    pub line_items: Vec<RawOrderLineItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawOrderLineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
    pub total: Option<StringOrNumber>,
}

/// Order fields returned by a checkout POST.
#[derive(Debug, Deserialize)]
pub struct RawCheckoutOrder {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub status: String,
    pub total: Option<StringOrNumber>,
    pub payment_url: Option<String>,
}

// =============================================================================
// Products
// =============================================================================

/// Normalize a raw product. Returns `None` when the id is unusable.
#[must_use]
pub fn convert_product(raw: RawProduct) -> Option<Product> {
    let id = match &raw.id {
        StringOrNumber::String(s) => ProductId::parse_legacy(s)?,
        StringOrNumber::Number(n) => {
            let n = *n as i64;
            (n > 0).then_some(ProductId::new(n))?
        }
    };

    let price = raw
        .price
        .as_ref()
        .map_or(Decimal::ZERO, StringOrNumber::to_decimal);
    let original_price = raw
        .regular_price
        .as_ref()
        .map_or(price, StringOrNumber::to_decimal);
    let discount = discount_percent(original_price, raw.sale_price.as_ref());

    let images: Vec<String> = raw.images.iter().filter_map(|i| i.src.clone()).collect();
    let image = images
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_PRODUCT_IMAGE.to_string());

    let description = {
        let short = strip_html(&raw.short_description);
        if short.is_empty() {
            strip_html(&raw.description)
        } else {
            short
        }
    };

    let brand = extract_brand(&raw.attributes, &raw.meta_data);
    let attributes = raw
        .attributes
        .iter()
        .map(|a| ProductAttribute {
            name: a.name.clone(),
            options: a.options.iter().filter_map(option_name).collect(),
        })
        .collect();

    Some(Product {
        id,
        name: raw.name,
        slug: raw.slug,
        category: raw
            .categories
            .first()
            .map(|c| c.slug.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "uncategorized".to_string()),
        price,
        original_price,
        discount,
        image,
        images,
        rating: raw
            .average_rating
            .as_ref()
            .map_or(Decimal::ZERO, StringOrNumber::to_decimal),
        in_stock: raw.stock_status == "instock",
        description,
        full_description: raw.description,
        brand,
        attributes,
    })
}

/// Whole-percent discount derived from regular vs. sale price.
fn discount_percent(regular: Decimal, sale: Option<&StringOrNumber>) -> u32 {
    let Some(sale) = sale.filter(|s| !s.is_empty()) else {
        return 0;
    };
    if regular <= Decimal::ZERO {
        return 0;
    }
    let sale = sale.to_decimal();
    let percent = (regular - sale) * Decimal::from(100) / regular;
    percent.round().to_u32().unwrap_or(0)
}

/// Brand lives wherever the active plugin put it: a `brand` attribute, or
/// meta keys like `_brand` / `product_brand` / `yith_product_brand`.
fn extract_brand(attributes: &[RawAttribute], meta: &[RawMeta]) -> Option<String> {
    let from_attr = attributes
        .iter()
        .find(|a| {
            let name = a.name.as_deref().unwrap_or("").to_lowercase();
            let slug = a.slug.as_deref().unwrap_or("").to_lowercase();
            name == "brand" || slug.contains("brand")
        })
        .and_then(|a| a.options.first())
        .and_then(option_name);
    if from_attr.is_some() {
        return from_attr;
    }

    meta.iter()
        .find(|m| {
            matches!(
                m.key.as_deref(),
                Some("brand" | "_brand" | "product_brand" | "yith_product_brand")
            )
        })
        .and_then(|m| m.value.as_ref())
        .and_then(meta_brand_name)
}

fn meta_brand_name(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        serde_json::Value::Array(items) => items.first().and_then(meta_brand_name),
        serde_json::Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("title"))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from),
        _ => None,
    }
}

/// Attribute options come as plain strings or `{name}`/`{title}` objects.
fn option_name(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("title"))
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.is_empty())
            .map(String::from),
        _ => None,
    }
}

// =============================================================================
// Categories, menus, shipping
// =============================================================================

#[must_use]
pub fn convert_category(raw: RawCategory) -> Category {
    Category {
        id: CategoryId::new(raw.id),
        name: raw.name,
        slug: raw.slug,
        image: raw.image.and_then(|i| i.src),
        count: raw.count,
    }
}

#[must_use]
pub fn convert_menu_item(raw: RawMenuItem) -> MenuItem {
    let id = raw.upper_id.or(raw.id).unwrap_or(0);
    MenuItem {
        id: MenuItemId::new(id),
        title: raw.title.or(raw.post_title).unwrap_or_default(),
        url: raw.url,
        slug: raw.slug.or(raw.post_name).unwrap_or_default(),
        parent: raw
            .menu_item_parent
            .as_ref()
            .map_or(Decimal::ZERO, StringOrNumber::to_decimal)
            .to_i64()
            .unwrap_or(0),
        children: Vec::new(),
    }
}

/// Nest flat menu items under their parents, preserving order.
///
/// Items whose parent never appears are kept at the top level rather than
/// dropped.
#[must_use]
pub fn build_menu_tree(flat: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut remaining = flat;
    let mut roots = extract_children(0, &mut remaining);
    for root in &mut roots {
        attach_children(root, &mut remaining);
    }
    roots.append(&mut remaining);
    roots
}

fn attach_children(node: &mut MenuItem, remaining: &mut Vec<MenuItem>) {
    let mut children = extract_children(node.id.as_i64(), remaining);
    for child in &mut children {
        attach_children(child, remaining);
    }
    node.children = children;
}

fn extract_children(parent: i64, remaining: &mut Vec<MenuItem>) -> Vec<MenuItem> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < remaining.len() {
        if remaining.get(i).is_some_and(|m| m.parent == parent) {
            out.push(remaining.remove(i));
        } else {
            i += 1;
        }
    }
    out
}

/// Normalize an enabled `flat_rate`/`free_shipping` method; other methods
/// and disabled instances yield `None`.
#[must_use]
pub fn convert_shipping_method(raw: RawShippingMethod) -> Option<ShippingMethod> {
    let enabled = match raw.enabled.as_ref() {
        Some(serde_json::Value::Bool(b)) => *b,
        Some(serde_json::Value::String(s)) => s == "yes",
        _ => false,
    };
    let method_id = raw.method_id.as_deref().unwrap_or("");
    if !enabled || !matches!(method_id, "flat_rate" | "free_shipping") {
        return None;
    }

    let cost = if method_id == "flat_rate" {
        raw.settings
            .get("cost")
            .map_or(Decimal::ZERO, shipping_cost)
    } else {
        Decimal::ZERO
    };

    Some(ShippingMethod {
        instance_id: raw.id.unwrap_or(0),
        method_id: method_id.to_string(),
        title: raw.title.unwrap_or_else(|| {
            if method_id == "free_shipping" {
                "Free shipping".to_string()
            } else {
                "Shipping".to_string()
            }
        }),
        cost,
    })
}

/// `settings.cost` may be a `{value}` object or a bare string/number.
fn shipping_cost(value: &serde_json::Value) -> Decimal {
    let raw = match value {
        serde_json::Value::Object(obj) => obj.get("value").unwrap_or(value),
        other => other,
    };
    match raw {
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        serde_json::Value::Number(n) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

// =============================================================================
// Currency settings
// =============================================================================

/// Build [`CurrencySettings`] from the general settings list plus the
/// separately fetched symbol (which arrives HTML-encoded).
#[must_use]
pub fn convert_currency_settings(
    settings: &[RawSetting],
    symbol: Option<String>,
) -> CurrencySettings {
    let defaults = CurrencySettings::default();

    let configured_code = setting_value(settings, "woocommerce_currency").map(|v| v.to_uppercase());
    let code = configured_code
        .clone()
        .unwrap_or_else(|| defaults.code.clone());
    let position = setting_value(settings, "woocommerce_currency_pos")
        .map_or(defaults.position, |v| CurrencyPosition::parse(&v));
    let thousand_separator = setting_value(settings, "woocommerce_price_thousand_sep")
        .unwrap_or(defaults.thousand_separator);
    let decimal_separator = setting_value(settings, "woocommerce_price_decimal_sep")
        .unwrap_or(defaults.decimal_separator);
    let decimals = setting_value(settings, "woocommerce_price_num_decimals")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.decimals);

    // Missing symbol: a configured currency falls back to its code, an
    // unconfigured store keeps the default symbol
    let symbol = symbol
        .map(|s| normalize_symbol(&s))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| configured_code.unwrap_or_else(|| defaults.symbol.clone()));

    CurrencySettings {
        code,
        symbol,
        position,
        thousand_separator,
        decimal_separator,
        decimals,
    }
}

fn setting_value(settings: &[RawSetting], id: &str) -> Option<String> {
    settings
        .iter()
        .find(|s| s.id.as_deref() == Some(id))
        .and_then(|s| s.value.as_ref())
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

/// Decode HTML entities in the symbol and normalize whitespace.
#[must_use]
pub fn normalize_symbol(raw: &str) -> String {
    decode_html_entities(raw).replace('\u{a0}', " ").trim().to_string()
}

/// Decode numeric (`&#2547;`, `&#x09F3;`) and common named HTML entities.
#[must_use]
pub fn decode_html_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut parts = input.split('&');
    if let Some(head) = parts.next() {
        out.push_str(head);
    }
    for part in parts {
        match part.split_once(';').and_then(|(entity, tail)| {
            decode_entity(entity).map(|decoded| (decoded, tail))
        }) {
            Some((decoded, tail)) => {
                out.push(decoded);
                out.push_str(tail);
            }
            None => {
                out.push('&');
                out.push_str(part);
            }
        }
    }
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let (digits, radix) = num
            .strip_prefix(['x', 'X'])
            .map_or((num, 10), |hex| (hex, 16));
        let cp = u32::from_str_radix(digits, radix).ok()?;
        return char::from_u32(cp);
    }
    match entity {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// Remove HTML tags, keeping text content.
#[must_use]
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

// =============================================================================
// Orders
// =============================================================================

#[must_use]
pub fn convert_order(raw: RawOrder) -> OrderSummary {
    OrderSummary {
        id: OrderId::new(raw.id),
        number: raw.number,
        status: raw.status,
        total: raw
            .total
            .as_ref()
            .map_or(Decimal::ZERO, StringOrNumber::to_decimal),
        currency: raw.currency,
        date_created: raw.date_created,
        line_items: raw
            .line_items
            .into_iter()
            .map(|li| OrderLineItem {
                name: li.name,
                quantity: li.quantity,
                total: li
                    .total
                    .as_ref()
                    .map_or(Decimal::ZERO, StringOrNumber::to_decimal),
            })
            .collect(),
    }
}

#[must_use]
pub fn convert_checkout_order(raw: RawCheckoutOrder) -> CheckoutConfirmation {
    CheckoutConfirmation {
        order_id: OrderId::new(raw.id),
        order_number: raw.number,
        status: raw.status,
        total: raw
            .total
            .as_ref()
            .map_or(Decimal::ZERO, StringOrNumber::to_decimal),
        payment_url: raw.payment_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_html_entities_numeric() {
        assert_eq!(decode_html_entities("&#2547;"), "\u{09f3}");
        assert_eq!(decode_html_entities("&#x09F3;"), "\u{09f3}");
        assert_eq!(decode_html_entities("R&#36;"), "R$");
    }

    #[test]
    fn test_decode_html_entities_named_and_passthrough() {
        assert_eq!(decode_html_entities("a&amp;b"), "a&b");
        assert_eq!(decode_html_entities("&nbsp;$"), "\u{a0}$");
        // Unknown entities are left untouched
        assert_eq!(decode_html_entities("&bogus;x"), "&bogus;x");
        assert_eq!(decode_html_entities("no entities"), "no entities");
        assert_eq!(decode_html_entities("dangling &"), "dangling &");
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("&nbsp;&#36;&nbsp;"), "$");
        assert_eq!(normalize_symbol(" \u{20ac} "), "\u{20ac}");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_convert_product_sale_price_discount() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Widget",
            "slug": "widget",
            "categories": [{"id": 1, "slug": "gadgets"}],
            "price": "30.00",
            "regular_price": "40.00",
            "sale_price": "30.00",
            "images": [{"src": "https://cdn.example/w.jpg"}],
            "average_rating": "4.5",
            "stock_status": "instock",
            "short_description": "<p>Short</p>",
            "description": "<p>Long</p>"
        }))
        .expect("raw product");

        let product = convert_product(raw).expect("product");
        assert_eq!(product.id, ProductId::new(42));
        assert_eq!(product.category, "gadgets");
        assert_eq!(product.price, Decimal::new(30, 0));
        assert_eq!(product.original_price, Decimal::new(40, 0));
        assert_eq!(product.discount, 25);
        assert!(product.in_stock);
        assert_eq!(product.description, "Short");
        assert_eq!(product.full_description, "<p>Long</p>");
    }

    #[test]
    fn test_convert_product_defaults() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": "7",
            "name": "Bare",
            "slug": "bare",
            "stock_status": "outofstock"
        }))
        .expect("raw product");

        let product = convert_product(raw).expect("product");
        assert_eq!(product.category, "uncategorized");
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.discount, 0);
        assert_eq!(product.image, FALLBACK_PRODUCT_IMAGE);
        assert!(!product.in_stock);
    }

    #[test]
    fn test_convert_product_rejects_bad_id() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": "not-a-number",
            "name": "Broken",
            "slug": "broken"
        }))
        .expect("raw product");
        assert!(convert_product(raw).is_none());
    }

    #[test]
    fn test_brand_from_attribute() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "X",
            "slug": "x",
            "attributes": [{"name": "Brand", "options": ["Acme"]}]
        }))
        .expect("raw product");
        let product = convert_product(raw).expect("product");
        assert_eq!(product.brand.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_brand_from_meta_object() {
        let raw: RawProduct = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "X",
            "slug": "x",
            "meta_data": [{"key": "_brand", "value": {"name": "Globex"}}]
        }))
        .expect("raw product");
        let product = convert_product(raw).expect("product");
        assert_eq!(product.brand.as_deref(), Some("Globex"));
    }

    #[test]
    fn test_build_menu_tree() {
        let flat = vec![
            MenuItem {
                id: MenuItemId::new(1),
                title: "Shop".into(),
                url: "/shop".into(),
                slug: "shop".into(),
                parent: 0,
                children: Vec::new(),
            },
            MenuItem {
                id: MenuItemId::new(2),
                title: "Gadgets".into(),
                url: "/category/gadgets".into(),
                slug: "gadgets".into(),
                parent: 1,
                children: Vec::new(),
            },
            MenuItem {
                id: MenuItemId::new(3),
                title: "Widgets".into(),
                url: "/category/widgets".into(),
                slug: "widgets".into(),
                parent: 2,
                children: Vec::new(),
            },
            MenuItem {
                id: MenuItemId::new(4),
                title: "Orphan".into(),
                url: "/orphan".into(),
                slug: "orphan".into(),
                parent: 99,
                children: Vec::new(),
            },
        ];

        let tree = build_menu_tree(flat);
        assert_eq!(tree.len(), 2);
        let shop = tree.first().expect("root");
        assert_eq!(shop.children.len(), 1);
        let gadgets = shop.children.first().expect("child");
        assert_eq!(gadgets.children.len(), 1);
        // Orphans surface at the top level instead of being dropped
        assert_eq!(tree.get(1).map(|m| m.slug.as_str()), Some("orphan"));
    }

    #[test]
    fn test_convert_shipping_method_flat_rate_cost() {
        let raw: RawShippingMethod = serde_json::from_value(serde_json::json!({
            "id": 3,
            "method_id": "flat_rate",
            "title": "Courier",
            "enabled": true,
            "settings": {"cost": {"id": "cost", "value": "12.50"}}
        }))
        .expect("raw method");

        let method = convert_shipping_method(raw).expect("method");
        assert_eq!(method.instance_id, 3);
        assert_eq!(method.cost, Decimal::new(1250, 2));
    }

    #[test]
    fn test_convert_shipping_method_filters() {
        let disabled: RawShippingMethod = serde_json::from_value(serde_json::json!({
            "id": 1, "method_id": "flat_rate", "enabled": "no"
        }))
        .expect("raw method");
        assert!(convert_shipping_method(disabled).is_none());

        let unsupported: RawShippingMethod = serde_json::from_value(serde_json::json!({
            "id": 2, "method_id": "local_pickup", "enabled": true
        }))
        .expect("raw method");
        assert!(convert_shipping_method(unsupported).is_none());

        let free: RawShippingMethod = serde_json::from_value(serde_json::json!({
            "id": 4, "method_id": "free_shipping", "enabled": "yes"
        }))
        .expect("raw method");
        let method = convert_shipping_method(free).expect("method");
        assert_eq!(method.cost, Decimal::ZERO);
        assert_eq!(method.title, "Free shipping");
    }

    #[test]
    fn test_convert_currency_settings() {
        let settings: Vec<RawSetting> = serde_json::from_value(serde_json::json!([
            {"id": "woocommerce_currency", "value": "bdt"},
            {"id": "woocommerce_currency_pos", "value": "left_space"},
            {"id": "woocommerce_price_thousand_sep", "value": ","},
            {"id": "woocommerce_price_decimal_sep", "value": "."},
            {"id": "woocommerce_price_num_decimals", "value": "0"}
        ]))
        .expect("settings");

        let currency = convert_currency_settings(&settings, Some("&#2547;".to_string()));
        assert_eq!(currency.code, "BDT");
        assert_eq!(currency.symbol, "\u{09f3}");
        assert_eq!(currency.position, CurrencyPosition::LeftSpace);
        assert_eq!(currency.decimals, 0);
    }

    #[test]
    fn test_convert_currency_settings_defaults() {
        let currency = convert_currency_settings(&[], None);
        assert_eq!(currency, CurrencySettings::default());
    }

    #[test]
    fn test_configured_currency_without_symbol_falls_back_to_code() {
        let settings: Vec<RawSetting> = serde_json::from_value(serde_json::json!([
            {"id": "woocommerce_currency", "value": "bdt"}
        ]))
        .expect("settings");

        let currency = convert_currency_settings(&settings, None);
        assert_eq!(currency.code, "BDT");
        assert_eq!(currency.symbol, "BDT");
    }
}
