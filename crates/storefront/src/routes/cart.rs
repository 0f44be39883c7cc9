//! Cart route handlers.
//!
//! All mutations return the complete post-mutation cart with derived
//! totals, so clients never compute their own view of the state.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::{self, CartItemInput, CartLine};

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub total: Decimal,
    pub item_count: u64,
}

impl CartResponse {
    fn from_lines(items: Vec<CartLine>) -> Self {
        let total = store::total(&items);
        let item_count = store::item_count(&items);
        Self {
            items,
            total,
            item_count,
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    #[serde(flatten)]
    pub item: CartItemInput,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub id: String,
}

/// `GET /api/cart` - current cart contents.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartResponse> {
    Json(CartResponse::from_lines(state.cart().items()))
}

/// `GET /api/cart/count` - item count for the header badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<serde_json::Value> {
    let count = store::item_count(&state.cart().items());
    Json(serde_json::json!({ "count": count }))
}

/// `POST /api/cart/add` - add an item, merging with an existing line.
#[instrument(skip(state, request), fields(product_id = %request.item.id))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<CartResponse>> {
    let lines = state
        .cart()
        .add(request.item, request.quantity.unwrap_or(1))?;
    Ok(Json(CartResponse::from_lines(lines)))
}

/// `POST /api/cart/update` - set a line quantity; `<= 0` removes the line.
#[instrument(skip(state, request), fields(product_id = %request.id))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateRequest>,
) -> Json<CartResponse> {
    let lines = state.cart().update_quantity(&request.id, request.quantity);
    Json(CartResponse::from_lines(lines))
}

/// `POST /api/cart/remove` - remove a line.
#[instrument(skip(state, request), fields(product_id = %request.id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveRequest>,
) -> Json<CartResponse> {
    let lines = state.cart().remove(&request.id);
    Json(CartResponse::from_lines(lines))
}

/// `POST /api/cart/clear` - empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartResponse> {
    state.cart().clear();
    Json(CartResponse::from_lines(Vec::new()))
}
