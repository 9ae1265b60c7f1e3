//! HTTP API handlers for wardrobe-api

pub mod collections;
pub mod health;
pub mod recommendations;
pub mod wardrobe;

use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, ApiResult};

pub use collections::collection_routes;
pub use health::health_routes;
pub use recommendations::recommendation_routes;
pub use wardrobe::wardrobe_routes;

/// Success envelope: `{"success": true, "data": ...}` or `{"success": true, "message": ...}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            message: Some(message.into()),
        })
    }
}

/// Parse a numeric path id; anything else is an unmatched route
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(route_not_found());
    }
    raw.parse().map_err(|_| route_not_found())
}

pub(crate) fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Fallback for every unmatched route
pub async fn fallback() -> ApiError {
    route_not_found()
}

/// Empty strings are stored as absent values
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Distinguishes an absent JSON key (`None`) from an explicit `null` (`Some(None)`)
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
