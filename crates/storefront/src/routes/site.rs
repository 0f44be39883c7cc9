//! Site settings, navigation, and shipping route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use dgency_core::CurrencySettings;

use crate::error::Result;
use crate::state::AppState;
use crate::woocommerce::{MenuItem, ShippingMethod, ShippingZone};

/// `GET /api/site/currency` - currency display settings.
#[instrument(skip(state))]
pub async fn currency(State(state): State<AppState>) -> Result<Json<CurrencySettings>> {
    let settings = state.woo().get_currency_settings().await?;
    Ok(Json(settings))
}

/// `GET /api/site/menu` - navigation menu for the configured location.
#[instrument(skip(state))]
pub async fn menu(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>> {
    let location = state.config().menu_location.clone();
    let menu = state.woo().get_menu(&location).await?;
    Ok(Json(menu))
}

/// `GET /api/shipping/zones` - shipping zones (default zone on failure).
#[instrument(skip(state))]
pub async fn shipping_zones(State(state): State<AppState>) -> Json<Vec<ShippingZone>> {
    Json(state.woo().get_shipping_zones().await)
}

/// `GET /api/shipping/zones/{id}/methods` - enabled methods for a zone
/// (free shipping on failure).
#[instrument(skip(state), fields(zone_id = zone_id))]
pub async fn shipping_methods(
    State(state): State<AppState>,
    Path(zone_id): Path<i64>,
) -> Json<Vec<ShippingMethod>> {
    Json(state.woo().get_shipping_methods(zone_id).await)
}
