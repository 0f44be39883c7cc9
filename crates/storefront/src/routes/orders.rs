//! Order history route handlers.

use axum::{Json, extract::State, http::HeaderMap};
use tracing::instrument;

use dgency_core::Identity;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::woocommerce::OrderSummary;

use super::identity_from_headers;

/// `GET /api/account/orders` - order history for the authenticated customer.
///
/// Unlike the wishlist, this endpoint has no guest collection to fall back
/// to, so a missing `X-User-Id` header is rejected.
#[instrument(skip(state, headers))]
pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<OrderSummary>>> {
    let Identity::User(customer_id) = identity_from_headers(&headers)? else {
        return Err(AppError::Unauthorized(
            "Order history requires a signed-in customer".to_string(),
        ));
    };

    let orders = state.woo().get_orders(customer_id).await?;
    Ok(Json(orders))
}
