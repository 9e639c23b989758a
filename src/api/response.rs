use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;
use crate::uploads::IntakeError;

/// Body returned for every failed request.
pub const SERVER_ERROR: &str = "Server Error";

/// Confirmation body returned after a delete.
pub const PRODUCT_DELETED: &str = "Product deleted successfully";

// ============================================================================
// Message envelope
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<MessageResponse> {
        Json(MessageResponse {
            message: message.into(),
        })
    }
}

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Everything a handler can fail with.
///
/// The variants are kept apart so logs say what went wrong, but every one of
/// them renders as the same `500 {"message": "Server Error"}` response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Intake(#[from] IntakeError),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(e) => e.kind(),
            ApiError::Intake(_) => "intake",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "Request failed");
        (self.status(), MessageResponse::new(SERVER_ERROR)).into_response()
    }
}
