//! WooCommerce REST API client implementation.
//!
//! Uses `reqwest` for HTTP with consumer key/secret query authentication.
//! Caches catalog and settings responses using `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use dgency_core::{CurrencySettings, CustomerId, MenuItemId, ProductId};

use crate::config::WooCommerceConfig;

use super::WooError;
use super::cache::CacheValue;
use super::conversions::{
    RawCategory, RawCheckoutOrder, RawCurrency, RawMenu, RawOrder, RawProduct, RawSetting,
    RawShippingMethod, build_menu_tree, convert_category, convert_checkout_order,
    convert_currency_settings, convert_menu_item, convert_order, convert_product,
    convert_shipping_method,
};
use super::types::{
    Category, CheckoutConfirmation, CheckoutRequest, MenuItem, OrderSummary, Product, ProductQuery,
    ShippingMethod, ShippingZone,
};

// =============================================================================
// WooClient
// =============================================================================

/// Client for the WooCommerce and WordPress REST APIs.
///
/// Provides normalized access to products, categories, store settings,
/// shipping configuration, menus, and orders. Catalog and settings
/// responses are cached for 5 minutes; order and checkout calls never are.
#[derive(Clone)]
pub struct WooClient {
    inner: Arc<WooClientInner>,
}

struct WooClientInner {
    client: reqwest::Client,
    /// Store base URL without a trailing slash.
    base_url: String,
    consumer_key: String,
    consumer_secret: SecretString,
    cache: Cache<String, CacheValue>,
}

impl WooClient {
    /// Create a new WooCommerce API client.
    #[must_use]
    pub fn new(config: &WooCommerceConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(WooClientInner {
                client: reqwest::Client::new(),
                base_url: config.store_url.trim_end_matches('/').to_string(),
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                cache,
            }),
        }
    }

    /// Build an authenticated URL for a `wc/v3` endpoint.
    fn wc_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, WooError> {
        self.build_url(&format!("/wp-json/wc/v3/{path}"), params, true)
    }

    /// Build a URL for a WordPress (non-WooCommerce) endpoint.
    fn wp_url(&self, path: &str) -> Result<Url, WooError> {
        self.build_url(path, &[], false)
    }

    fn build_url(
        &self,
        path: &str,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Url, WooError> {
        let mut url = Url::parse(&format!("{}{path}", self.inner.base_url))
            .map_err(|e| WooError::UserError(format!("Invalid store URL: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            if authenticated {
                pairs.append_pair("consumer_key", &self.inner.consumer_key);
                pairs.append_pair(
                    "consumer_secret",
                    self.inner.consumer_secret.expose_secret(),
                );
            }
        }
        Ok(url)
    }

    /// Execute a GET request and parse the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WooError> {
        let response = self.inner.client.get(url).send().await?;
        Self::parse_response(response).await
    }

    /// Execute a POST request with a JSON body and parse the JSON response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &serde_json::Value,
    ) -> Result<T, WooError> {
        let response = self.inner.client.post(url).json(body).send().await?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WooError> {
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "WooCommerce API returned non-success status"
            );
            // WooCommerce errors carry a `message` field worth surfacing
            let message = serde_json::from_str::<serde_json::Value>(&response_text)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(String::from)
                })
                .unwrap_or_else(|| response_text.chars().take(200).collect());
            return Err(WooError::Status {
                status: status.as_u16(),
                message,
            });
        }

        match serde_json::from_str(&response_text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse WooCommerce response"
                );
                Err(WooError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a list of products, optionally filtered by category slug, exact
    /// product slug, or free-text search.
    ///
    /// Products that fail id normalization are dropped rather than failing
    /// the whole listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, WooError> {
        let per_page = query.per_page.unwrap_or(50);
        let cache_key = format!(
            "products:{}:{}:{per_page}",
            query.category.as_deref().unwrap_or(""),
            query.slug.as_deref().unwrap_or("")
        );

        // Check cache (only for queries without search)
        if query.search.is_none()
            && let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let per_page = per_page.to_string();
        let mut params: Vec<(&str, &str)> = vec![("per_page", &per_page), ("status", "publish")];

        // WooCommerce filters by category id, not slug
        let category_id;
        if let Some(slug) = query.category.as_deref() {
            category_id = self.find_category_id(slug).await?.to_string();
            params.push(("category", &category_id));
        }
        if let Some(slug) = query.slug.as_deref() {
            params.push(("slug", slug));
        }
        if let Some(search) = query.search.as_deref() {
            params.push(("search", search));
        }

        let url = self.wc_url("products", &params)?;
        let raw: Vec<RawProduct> = self.get_json(url).await?;
        let products: Vec<Product> = raw.into_iter().filter_map(convert_product).collect();

        // Cache if not a search query
        if query.search.is_none() {
            self.inner
                .cache
                .insert(cache_key, CacheValue::Products(products.clone()))
                .await;
        }

        Ok(products)
    }

    /// Get a single product by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::NotFound`] if no published product has the slug,
    /// or an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, WooError> {
        let products = self
            .get_products(&ProductQuery {
                slug: Some(slug.to_string()),
                ..ProductQuery::default()
            })
            .await?;
        products
            .into_iter()
            .next()
            .ok_or_else(|| WooError::NotFound(format!("Product not found: {slug}")))
    }

    /// Get all non-empty product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, WooError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let url = self.wc_url(
            "products/categories",
            &[("per_page", "100"), ("hide_empty", "true")],
        )?;
        let raw: Vec<RawCategory> = self.get_json(url).await?;
        let categories: Vec<Category> = raw.into_iter().map(convert_category).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    async fn find_category_id(&self, slug: &str) -> Result<i64, WooError> {
        let categories = self.get_categories().await?;
        categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.id.as_i64())
            .ok_or_else(|| WooError::NotFound(format!("Category not found: {slug}")))
    }

    // =========================================================================
    // Settings Methods
    // =========================================================================

    /// Get the store's currency configuration.
    ///
    /// Combines the general settings list with the current currency's
    /// HTML-encoded symbol, normalized into display-ready settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings request fails. A failure to fetch
    /// the symbol alone falls back to the currency code.
    #[instrument(skip(self))]
    pub async fn get_currency_settings(&self) -> Result<CurrencySettings, WooError> {
        let cache_key = "currency".to_string();

        if let Some(CacheValue::Currency(currency)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for currency settings");
            return Ok(currency);
        }

        let settings_url = self.wc_url("settings/general", &[])?;
        let settings: Vec<RawSetting> = self.get_json(settings_url).await?;

        // The symbol endpoint is best-effort; the code is a usable fallback
        let symbol = match self.wc_url("data/currencies/current", &[]) {
            Ok(url) => match self.get_json::<RawCurrency>(url).await {
                Ok(currency) => currency.symbol,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to fetch currency symbol");
                    None
                }
            },
            Err(_) => None,
        };

        let currency = convert_currency_settings(&settings, symbol);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Currency(currency.clone()))
            .await;

        Ok(currency)
    }

    // =========================================================================
    // Shipping Methods
    // =========================================================================

    /// Get the configured shipping zones.
    ///
    /// Infallible by design: any failure falls back to a single default
    /// zone so checkout can proceed.
    #[instrument(skip(self))]
    pub async fn get_shipping_zones(&self) -> Vec<ShippingZone> {
        let cache_key = "shipping_zones".to_string();

        if let Some(CacheValue::ShippingZones(zones)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for shipping zones");
            return zones;
        }

        let zones = match self.fetch_shipping_zones().await {
            Ok(zones) if !zones.is_empty() => zones,
            Ok(_) => vec![ShippingZone::default_zone()],
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch shipping zones, using default");
                return vec![ShippingZone::default_zone()];
            }
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::ShippingZones(zones.clone()))
            .await;

        zones
    }

    async fn fetch_shipping_zones(&self) -> Result<Vec<ShippingZone>, WooError> {
        let url = self.wc_url("shipping/zones", &[])?;
        self.get_json(url).await
    }

    /// Get the enabled shipping methods for a zone.
    ///
    /// Only `flat_rate` and `free_shipping` methods are surfaced. Infallible
    /// by design: any failure, or a zone with no supported methods, falls
    /// back to free shipping.
    #[instrument(skip(self), fields(zone_id = zone_id))]
    pub async fn get_shipping_methods(&self, zone_id: i64) -> Vec<ShippingMethod> {
        let cache_key = format!("shipping_methods:{zone_id}");

        if let Some(CacheValue::ShippingMethods(methods)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for shipping methods");
            return methods;
        }

        let methods = match self.fetch_shipping_methods(zone_id).await {
            Ok(methods) if !methods.is_empty() => methods,
            Ok(_) => vec![ShippingMethod::free_shipping()],
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    zone_id,
                    "Failed to fetch shipping methods, using free shipping"
                );
                return vec![ShippingMethod::free_shipping()];
            }
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::ShippingMethods(methods.clone()))
            .await;

        methods
    }

    async fn fetch_shipping_methods(&self, zone_id: i64) -> Result<Vec<ShippingMethod>, WooError> {
        let url = self.wc_url(&format!("shipping/zones/{zone_id}/methods"), &[])?;
        let raw: Vec<RawShippingMethod> = self.get_json(url).await?;
        Ok(raw.into_iter().filter_map(convert_shipping_method).collect())
    }

    // =========================================================================
    // Menu Methods
    // =========================================================================

    /// Get the navigation menu for a location slug.
    ///
    /// Tries the `wp-api-menus` plugin endpoint first; when the plugin is
    /// missing or the menu is empty, falls back to a menu derived from the
    /// product categories with an "All Products" entry at the head.
    ///
    /// # Errors
    ///
    /// Returns an error only if the category fallback also fails.
    #[instrument(skip(self), fields(location = %location))]
    pub async fn get_menu(&self, location: &str) -> Result<Vec<MenuItem>, WooError> {
        let cache_key = format!("menu:{location}");

        if let Some(CacheValue::Menu(menu)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu");
            return Ok(menu);
        }

        let menu = match self.fetch_plugin_menu(location).await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => self.category_fallback_menu().await?,
            Err(e) => {
                tracing::debug!(error = %e, "Menus plugin unavailable, deriving menu from categories");
                self.category_fallback_menu().await?
            }
        };

        self.inner
            .cache
            .insert(cache_key, CacheValue::Menu(menu.clone()))
            .await;

        Ok(menu)
    }

    async fn fetch_plugin_menu(&self, location: &str) -> Result<Vec<MenuItem>, WooError> {
        let url = self.wp_url("/wp-json/wp-api-menus/v2/menus")?;
        let menus: Vec<RawMenu> = self.get_json(url).await?;

        let menu = menus
            .into_iter()
            .find(|m| {
                m.slug.as_deref() == Some(location)
                    || m.name.as_deref().is_some_and(|n| n.eq_ignore_ascii_case(location))
            })
            .ok_or_else(|| WooError::NotFound(format!("Menu not found: {location}")))?;

        let flat: Vec<MenuItem> = menu.items.into_iter().map(convert_menu_item).collect();
        Ok(build_menu_tree(flat))
    }

    async fn category_fallback_menu(&self) -> Result<Vec<MenuItem>, WooError> {
        let categories = self.get_categories().await?;

        let mut menu = vec![MenuItem {
            id: MenuItemId::new(0),
            title: "All Products".to_string(),
            url: "/products".to_string(),
            slug: "products".to_string(),
            parent: 0,
            children: Vec::new(),
        }];
        menu.extend(categories.into_iter().map(|c| MenuItem {
            id: MenuItemId::new(c.id.as_i64()),
            title: c.name,
            url: format!("/category/{}", c.slug),
            slug: c.slug,
            parent: 0,
            children: Vec::new(),
        }));
        Ok(menu)
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Get the order history for a customer, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(customer_id = %customer_id))]
    pub async fn get_orders(&self, customer_id: CustomerId) -> Result<Vec<OrderSummary>, WooError> {
        let customer = customer_id.to_string();
        let url = self.wc_url(
            "orders",
            &[
                ("customer", &customer),
                ("per_page", "50"),
                ("orderby", "date"),
                ("order", "desc"),
            ],
        )?;
        let raw: Vec<RawOrder> = self.get_json(url).await?;
        Ok(raw.into_iter().map(convert_order).collect())
    }

    /// Submit a cash-on-delivery order.
    ///
    /// Every line item's product id is validated (and canonicalized) before
    /// anything is sent; the order is created unpaid with the `cod` payment
    /// method.
    ///
    /// # Errors
    ///
    /// Returns [`WooError::UserError`] if the cart is empty or a product id
    /// is invalid, or an error if the order creation request fails.
    #[instrument(skip(self, request))]
    pub async fn submit_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutConfirmation, WooError> {
        if request.line_items.is_empty() {
            return Err(WooError::UserError("Cart is empty".to_string()));
        }

        let mut line_items = Vec::with_capacity(request.line_items.len());
        for item in &request.line_items {
            let id = ProductId::parse_legacy(&item.product_id).ok_or_else(|| {
                WooError::UserError(format!("Invalid product id: {}", item.product_id))
            })?;
            line_items.push(serde_json::json!({
                "product_id": id.as_i64(),
                "quantity": item.quantity,
            }));
        }

        let shipping_lines: Vec<serde_json::Value> = request
            .shipping_lines
            .iter()
            .map(|line| {
                serde_json::json!({
                    "method_id": line.method_id,
                    "method_title": line.method_title,
                    "total": line.total.to_string(),
                })
            })
            .collect();

        let mut payload = serde_json::json!({
            "payment_method": "cod",
            "payment_method_title": "Cash on Delivery",
            "set_paid": false,
            "billing": request.billing,
            "shipping": request.shipping,
            "line_items": line_items,
            "shipping_lines": shipping_lines,
        });
        if let (Some(customer_id), Some(obj)) = (request.customer_id, payload.as_object_mut()) {
            obj.insert(
                "customer_id".to_string(),
                serde_json::json!(customer_id.as_i64()),
            );
        }

        let url = self.wc_url("orders", &[])?;
        let raw: RawCheckoutOrder = self.post_json(url, &payload).await?;

        tracing::info!(order_id = raw.id, status = %raw.status, "Order created");
        Ok(convert_checkout_order(raw))
    }
}
