//! Recommendation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use super::Envelope;
use crate::error::ApiResult;
use crate::recommend::{self, OutfitQuery, OutfitRecommendation, PurchaseRecommendation};
use crate::AppState;

/// POST /recommendations/outfit
pub async fn outfit(
    State(state): State<AppState>,
    payload: Result<Json<OutfitQuery>, JsonRejection>,
) -> ApiResult<Json<Envelope<OutfitRecommendation>>> {
    let Json(query) = payload?;
    let recommendation = recommend::recommend_outfit(&state.db, query).await?;

    info!("Outfit recommendation: {}", recommendation.reasoning);
    Ok(Envelope::data(recommendation))
}

/// GET /recommendations/purchase
pub async fn purchases(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<PurchaseRecommendation>>>> {
    let recommendations = recommend::recommend_purchases(&state.db).await?;

    info!("Returning {} purchase recommendations", recommendations.len());
    Ok(Envelope::data(recommendations))
}

/// Build recommendation routes
pub fn recommendation_routes() -> Router<AppState> {
    Router::new()
        .route("/recommendations/outfit", post(outfit))
        .route("/recommendations/purchase", get(purchases))
}
