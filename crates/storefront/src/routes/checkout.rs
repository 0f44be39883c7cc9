//! Checkout route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::woocommerce::{CheckoutConfirmation, CheckoutRequest};

/// `POST /api/checkout` - submit a cash-on-delivery order.
///
/// The persisted cart is cleared only after the order is confirmed; a
/// failed submission leaves the cart intact for retry.
#[instrument(skip(state, request), fields(line_items = request.line_items.len()))]
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutConfirmation>> {
    let confirmation = state.woo().submit_checkout(&request).await?;

    state.cart().clear();
    tracing::info!(order_id = %confirmation.order_id, "Checkout complete, cart cleared");

    Ok(Json(confirmation))
}
