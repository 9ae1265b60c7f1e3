//! Purchase gap analysis
//!
//! Three passes over the wardrobe (essentials, seasonal coverage, worn out
//! items) each propose purchases; the merged list is ordered by priority.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use wardrobe_common::db::WardrobeItem;

/// Maximum number of purchase recommendations returned
pub const MAX_PURCHASE_RECOMMENDATIONS: usize = 10;

/// Essentials below this count are recommended
const ESSENTIAL_MIN_COUNT: usize = 2;

/// Seasons with fewer tagged items than this are recommended
const SEASONAL_MIN_COUNT: usize = 3;

const SEASONS: [&str; 4] = ["spring", "summer", "fall", "winter"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuggestedDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseRecommendation {
    pub category: String,
    pub item_type: String,
    pub reason: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_details: Option<SuggestedDetails>,
}

/// A wardrobe basic everyone should own a couple of
struct Essential {
    keyword: &'static str,
    category: &'static str,
    priority: Priority,
}

const ESSENTIALS: [Essential; 6] = [
    Essential { keyword: "t-shirt", category: "tops", priority: Priority::High },
    Essential { keyword: "shirt", category: "tops", priority: Priority::High },
    Essential { keyword: "pants", category: "bottoms", priority: Priority::High },
    Essential { keyword: "jeans", category: "bottoms", priority: Priority::High },
    Essential { keyword: "jacket", category: "outerwear", priority: Priority::Medium },
    Essential { keyword: "shoes", category: "footwear", priority: Priority::High },
];

fn essential_details() -> SuggestedDetails {
    SuggestedDetails {
        color: Some("neutral colors (black, white, navy, beige)".to_string()),
        fabric: Some("cotton or cotton blend".to_string()),
        season: Some("all-season".to_string()),
    }
}

fn essentials_pass(items: &[WardrobeItem], out: &mut Vec<PurchaseRecommendation>) {
    let labels: Vec<String> = items.iter().map(|item| item.cloth_type.to_lowercase()).collect();

    for essential in &ESSENTIALS {
        let count = labels
            .iter()
            .filter(|label| label.contains(essential.keyword))
            .count();

        if count < ESSENTIAL_MIN_COUNT {
            out.push(PurchaseRecommendation {
                category: essential.category.to_string(),
                item_type: essential.keyword.to_string(),
                reason: format!(
                    "You have {} {}(s). Consider adding more for variety.",
                    count, essential.keyword
                ),
                priority: essential.priority,
                suggested_details: Some(essential_details()),
            });
        }
    }
}

fn seasonal_pass(items: &[WardrobeItem], out: &mut Vec<PurchaseRecommendation>) {
    for season in SEASONS {
        let count = items
            .iter()
            .filter(|item| {
                item.season
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(season))
            })
            .count();

        if count < SEASONAL_MIN_COUNT {
            out.push(PurchaseRecommendation {
                category: "seasonal".to_string(),
                item_type: format!("{} clothing", season),
                reason: format!(
                    "Limited {} wardrobe. Consider adding {}-appropriate items.",
                    season, season
                ),
                priority: Priority::Medium,
                suggested_details: Some(SuggestedDetails {
                    season: Some(season.to_string()),
                    ..Default::default()
                }),
            });
        }
    }
}

/// One replacement per distinct garment label among poor-condition items
fn condition_pass(items: &[WardrobeItem], out: &mut Vec<PurchaseRecommendation>) {
    let mut worn_labels: Vec<&str> = Vec::new();
    for item in items {
        let is_poor = item
            .condition
            .as_deref()
            .is_some_and(|c| c.eq_ignore_ascii_case("poor"));
        if is_poor && !worn_labels.contains(&item.cloth_type.as_str()) {
            worn_labels.push(&item.cloth_type);
        }
    }

    for label in worn_labels {
        out.push(PurchaseRecommendation {
            category: "replacement".to_string(),
            item_type: label.to_string(),
            reason: format!(
                "Some {} items are in poor condition and may need replacement.",
                label
            ),
            priority: Priority::Low,
            suggested_details: None,
        });
    }
}

/// Analyze the full item list and propose up to ten purchases, highest priority first
pub fn recommend_purchases(items: &[WardrobeItem]) -> Vec<PurchaseRecommendation> {
    let mut recommendations = Vec::new();
    essentials_pass(items, &mut recommendations);
    seasonal_pass(items, &mut recommendations);
    condition_pass(items, &mut recommendations);

    // Stable: equal priorities keep pass order
    recommendations.sort_by_key(|r| Reverse(r.priority.rank()));
    recommendations.truncate(MAX_PURCHASE_RECOMMENDATIONS);
    recommendations
}
