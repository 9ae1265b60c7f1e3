//! Outfit and purchase recommendations
//!
//! Each call performs one bulk read of the item store followed by pure,
//! deterministic rule evaluation. Nothing is written back.

pub mod classifier;
pub mod outfit;
pub mod purchases;

use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::debug;
use wardrobe_common::db::items::list_all_items;

use crate::error::{ApiError, ApiResult};

pub use classifier::{categories_of, classify, Category};
pub use outfit::{OutfitRecommendation, OutfitRequest};
pub use purchases::{Priority, PurchaseRecommendation, SuggestedDetails};

/// Raw outfit request body, validated into an [`OutfitRequest`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutfitQuery {
    pub occasion: Option<String>,
    pub location: Option<String>,
    pub weather: Option<String>,
    pub season: Option<String>,
    #[serde(alias = "colorPreference")]
    pub color_preference: Option<String>,
}

impl OutfitQuery {
    /// Occasion and location must be present and non-empty
    pub fn validate(self) -> ApiResult<OutfitRequest> {
        let occasion = self.occasion.filter(|s| !s.is_empty());
        let location = self.location.filter(|s| !s.is_empty());

        match (occasion, location) {
            (Some(occasion), Some(location)) => Ok(OutfitRequest {
                occasion,
                location,
                weather: self.weather,
                season: self.season,
                color_preference: self.color_preference,
            }),
            _ => Err(ApiError::BadRequest(
                "Occasion and location are required".to_string(),
            )),
        }
    }
}

/// Validate the request, then select an outfit from the whole wardrobe
pub async fn recommend_outfit(
    pool: &SqlitePool,
    query: OutfitQuery,
) -> ApiResult<OutfitRecommendation> {
    let request = query.validate()?;
    debug!(
        "Outfit request: occasion={}, location={}, season={:?}, weather={:?}, color={:?}",
        request.occasion, request.location, request.season, request.weather, request.color_preference
    );

    let items = list_all_items(pool)
        .await
        .map_err(ApiError::store("Failed to generate outfit recommendation"))?;

    Ok(outfit::recommend_outfit(&items, &request))
}

/// Analyze the whole wardrobe for purchase gaps
pub async fn recommend_purchases(pool: &SqlitePool) -> ApiResult<Vec<PurchaseRecommendation>> {
    let items = list_all_items(pool)
        .await
        .map_err(ApiError::store("Failed to generate purchase recommendations"))?;

    let recommendations = purchases::recommend_purchases(&items);
    debug!(
        "Generated {} purchase recommendations from {} items",
        recommendations.len(),
        items.len()
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_common::db::init::init_in_memory;
    use wardrobe_common::db::items::create_item;
    use wardrobe_common::db::NewWardrobeItem;

    fn query(occasion: Option<&str>, location: Option<&str>) -> OutfitQuery {
        OutfitQuery {
            occasion: occasion.map(str::to_string),
            location: location.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_requires_occasion_and_location() {
        for invalid in [
            query(None, Some("city")),
            query(Some("casual"), None),
            query(Some(""), Some("city")),
            query(None, None),
        ] {
            let err = invalid.validate().unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(_)));
            assert_eq!(err.to_string(), "Occasion and location are required");
        }

        let request = query(Some("casual"), Some("city")).validate().unwrap();
        assert_eq!(request, OutfitRequest::new("casual", "city"));
    }

    #[test]
    fn test_color_preference_alias() {
        let query: OutfitQuery = serde_json::from_str(
            r#"{"occasion": "gala", "location": "hall", "colorPreference": "black"}"#,
        )
        .unwrap();
        assert_eq!(query.color_preference.as_deref(), Some("black"));
    }

    #[tokio::test]
    async fn test_recommend_outfit_from_store() {
        let pool = init_in_memory().await.unwrap();
        let jeans = create_item(
            &pool,
            &NewWardrobeItem {
                name: "Blue Jeans".to_string(),
                cloth_type: "jeans".to_string(),
                condition: Some("good".to_string()),
                occasion: Some("casual".to_string()),
                location: Some("city".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let outfit = recommend_outfit(&pool, query(Some("casual"), Some("city")))
            .await
            .unwrap();
        assert_eq!(outfit.bottom, Some(jeans.id));
        assert!(outfit.reasoning.contains("Bottom: Blue Jeans."));
    }

    #[tokio::test]
    async fn test_validation_precedes_store_access() {
        let pool = init_in_memory().await.unwrap();
        pool.close().await;

        let err = recommend_outfit(&pool, query(None, Some("city")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_store_failure_is_generic() {
        let pool = init_in_memory().await.unwrap();
        pool.close().await;

        let err = recommend_outfit(&pool, query(Some("casual"), Some("city")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.to_string(), "Failed to generate outfit recommendation");

        let err = recommend_purchases(&pool).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate purchase recommendations");
    }

    #[tokio::test]
    async fn test_recommend_purchases_empty_store() {
        let pool = init_in_memory().await.unwrap();

        let recommendations = recommend_purchases(&pool).await.unwrap();
        assert_eq!(recommendations.len(), purchases::MAX_PURCHASE_RECOMMENDATIONS);
        assert_eq!(recommendations[0].priority, Priority::High);
        assert_eq!(recommendations[9].priority, Priority::Medium);
    }
}
