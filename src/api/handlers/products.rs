use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::api::response::{ApiError, MessageResponse, PRODUCT_DELETED};
use crate::api::submission::ProductSubmission;
use crate::storage::Product;
use crate::AppState;

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.list_products()?;
    Ok(Json(products))
}

/// Responds with `null` rather than 404 when the id is unknown.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<Product>>, ApiError> {
    let product = state.db.get_product(&id)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    submission: ProductSubmission,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let fields = submission.into_create_fields()?;
    let product = state.db.create_product(fields)?;

    tracing::debug!(product_id = %product.id, images = product.images.len(), "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    submission: ProductSubmission,
) -> Result<Json<Option<Product>>, ApiError> {
    let product = state
        .db
        .update_product(&id, submission.into_update_fields())?;

    tracing::debug!(product_id = %id, found = product.is_some(), "Updated product");
    Ok(Json(product))
}

/// Confirms deletion whether or not the product existed.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.db.delete_product(&id)?;

    tracing::debug!(product_id = %id, deleted, "Deleted product");
    Ok(MessageResponse::new(PRODUCT_DELETED))
}
