//! Public catalog handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::storage::{ProductDetail, ProductSummary};

use super::AppState;
use super::error::ApiError;

/// `GET /api/products` - every product's summary fields, ordered by
/// (category, name).
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    Ok(Json(state.db()?.list_products().await?))
}

/// `GET /api/products/{slug}` - aggregated product detail; 404 when the slug
/// is unknown.
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    Ok(Json(state.db()?.get_product_detail(&slug).await?))
}
