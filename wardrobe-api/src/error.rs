//! Error types for wardrobe-api
//!
//! Every failure leaves the API as `{"success": false, "error": "..."}`.
//! Store failures are logged with their cause and reported generically.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a store failure to a generic internal error, logging the cause
    ///
    /// ```rust,ignore
    /// let items = list_all_items(&state.db)
    ///     .await
    ///     .map_err(ApiError::store("Failed to fetch items"))?;
    /// ```
    pub fn store(message: &'static str) -> impl FnOnce(wardrobe_common::Error) -> ApiError {
        move |e| {
            error!("{}: {}", message, e);
            ApiError::Internal(message.to_string())
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
