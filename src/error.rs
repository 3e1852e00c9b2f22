//! Error types for the storefront service
//!
//! Provides unified error handling using thiserror.
//!
//! The cache and cart swallow their own storage failures; this type only
//! covers the HTTP layer, where an error finally becomes user-visible.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;

// == Store Error Enum ==
/// Unified error type for the storefront API.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Catalog backend failed or answered with an error
    #[error("Upstream catalog error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CatalogError> for StoreError {
    fn from(err: CatalogError) -> Self {
        StoreError::Upstream(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            StoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            StoreError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            StoreError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront API.
pub type Result<T> = std::result::Result<T, StoreError>;
