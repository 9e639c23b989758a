use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

/// Prefix every product route is mounted under.
pub const PRODUCTS_PATH: &str = "/api/products";

pub fn create_router(state: Arc<AppState>) -> Router {
    let body_limit = match state.config.server.max_upload_size {
        Some(max) => DefaultBodyLimit::max(max as usize),
        None => DefaultBodyLimit::disable(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            PRODUCTS_PATH,
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            &format!("{PRODUCTS_PATH}/:id"),
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
