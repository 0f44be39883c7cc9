//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;
use crate::woocommerce::{Category, Product, ProductQuery};

/// `GET /api/products` - product listing with optional filters.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.woo().get_products(&query).await?;
    Ok(Json(products))
}

/// `GET /api/products/{slug}` - single product detail.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = state.woo().get_product_by_slug(&slug).await?;
    Ok(Json(product))
}

/// `GET /api/categories` - non-empty product categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.woo().get_categories().await?;
    Ok(Json(categories))
}
