//! Wishlist route handlers.
//!
//! The acting identity comes from the `X-User-Id` header; requests without
//! it operate on the guest collection. Collections are fully isolated per
//! identity - signing in switches lists, it never merges them.

use axum::{Json, extract::State, http::HeaderMap};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::store::WishlistEntry;

use super::identity_from_headers;

/// Remove from wishlist request body.
#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    pub id: String,
}

/// `GET /api/wishlist` - current wishlist for the acting identity.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WishlistEntry>>> {
    let identity = identity_from_headers(&headers)?;
    Ok(Json(state.wishlist().items(identity)))
}

/// `POST /api/wishlist/toggle` - add the entry if absent, remove if present.
#[instrument(skip(state, headers, entry), fields(product_id = %entry.id))]
pub async fn toggle(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(entry): Json<WishlistEntry>,
) -> Result<Json<Vec<WishlistEntry>>> {
    let identity = identity_from_headers(&headers)?;
    Ok(Json(state.wishlist().toggle(identity, entry)))
}

/// `POST /api/wishlist/remove` - remove an entry by product id.
#[instrument(skip(state, headers, request), fields(product_id = %request.id))]
pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<Vec<WishlistEntry>>> {
    let identity = identity_from_headers(&headers)?;
    Ok(Json(state.wishlist().remove(identity, &request.id)))
}

/// `POST /api/wishlist/clear` - empty the wishlist for the acting identity.
#[instrument(skip(state, headers))]
pub async fn clear(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WishlistEntry>>> {
    let identity = identity_from_headers(&headers)?;
    state.wishlist().clear(identity);
    Ok(Json(Vec::new()))
}
