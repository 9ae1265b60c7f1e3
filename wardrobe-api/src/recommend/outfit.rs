//! Outfit selection
//!
//! Picks one item per outfit slot from the items suitable for a request.
//! Selection is a pure function of the item list and the request.

use std::cmp::Ordering;

use serde::Serialize;
use wardrobe_common::db::WardrobeItem;

use super::classifier::Category;

/// Accessories included in a single outfit
pub const MAX_ACCESSORIES: usize = 3;

/// Validated outfit request
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitRequest {
    pub occasion: String,
    pub location: String,
    pub weather: Option<String>,
    pub season: Option<String>,
    pub color_preference: Option<String>,
}

impl OutfitRequest {
    pub fn new(occasion: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            occasion: occasion.into(),
            location: location.into(),
            weather: None,
            season: None,
            color_preference: None,
        }
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }
}

/// Selected item ids per slot; an absent slot means nothing suitable was found
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outerwear: Option<i64>,
    /// Footwear slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoes: Option<i64>,
    pub accessories: Vec<i64>,
    pub reasoning: String,
}

/// Condition rank: excellent 3, good 2, poor 0, anything else 1
///
/// Missing and unrecognized conditions rank exactly like "fair".
pub fn condition_rank(condition: Option<&str>) -> u8 {
    match condition.map(str::to_lowercase).as_deref() {
        Some("excellent") => 3,
        Some("good") => 2,
        Some("poor") => 0,
        _ => 1,
    }
}

/// Absent tags match anything; present tags match when either string
/// contains the other, ignoring case
fn tag_matches(item_tag: Option<&str>, requested: &str) -> bool {
    match item_tag.filter(|tag| !tag.is_empty()) {
        None => true,
        Some(tag) => {
            let tag = tag.to_lowercase();
            let requested = requested.to_lowercase();
            tag.contains(&requested) || requested.contains(&tag)
        }
    }
}

fn season_matches(item_season: Option<&str>, requested: Option<&str>) -> bool {
    let requested = requested.filter(|s| !s.is_empty());
    let item_season = item_season.filter(|s| !s.is_empty());
    match (item_season, requested) {
        (Some(item_season), Some(requested)) => item_season.eq_ignore_ascii_case(requested),
        _ => true,
    }
}

/// Whether an item can be worn for the requested occasion, location and season
pub fn is_suitable(item: &WardrobeItem, request: &OutfitRequest) -> bool {
    tag_matches(item.occasion.as_deref(), &request.occasion)
        && tag_matches(item.location.as_deref(), &request.location)
        && season_matches(item.season.as_deref(), request.season.as_deref())
}

/// `Greater` when `a` is the better pick: higher condition, then newer
fn compare_preference(a: &WardrobeItem, b: &WardrobeItem) -> Ordering {
    let by_condition =
        condition_rank(a.condition.as_deref()).cmp(&condition_rank(b.condition.as_deref()));

    by_condition.then_with(|| match (a.created_at, b.created_at) {
        (Some(a_created), Some(b_created)) => a_created.cmp(&b_created),
        _ => Ordering::Equal,
    })
}

/// Best candidate; on a full tie the earliest in store order wins
fn select_best<'a>(candidates: &[&'a WardrobeItem]) -> Option<&'a WardrobeItem> {
    candidates.iter().copied().fold(None, |best, item| match best {
        Some(current) if compare_preference(item, current) != Ordering::Greater => Some(current),
        _ => Some(item),
    })
}

/// Select an outfit from the full item list (store order, newest first)
pub fn recommend_outfit(items: &[WardrobeItem], request: &OutfitRequest) -> OutfitRecommendation {
    let suitable: Vec<&WardrobeItem> = items
        .iter()
        .filter(|item| is_suitable(item, request))
        .collect();

    let candidates = |category: Category| {
        suitable
            .iter()
            .copied()
            .filter(|item| category.matches(&item.cloth_type))
            .collect::<Vec<_>>()
    };

    let top = select_best(&candidates(Category::Top));
    let bottom = select_best(&candidates(Category::Bottom));
    let outerwear = select_best(&candidates(Category::Outerwear));
    let shoes = select_best(&candidates(Category::Footwear));
    let accessories: Vec<i64> = candidates(Category::Accessory)
        .into_iter()
        .take(MAX_ACCESSORIES)
        .map(|item| item.id)
        .collect();

    let mut reasoning = format!(
        "Recommended outfit for {} at {}.",
        request.occasion, request.location
    );
    for (label, selected) in [
        ("Top", top),
        ("Bottom", bottom),
        ("Outerwear", outerwear),
        ("Shoes", shoes),
    ] {
        if let Some(item) = selected {
            reasoning.push_str(&format!(" {}: {}.", label, item.name));
        }
    }
    if !accessories.is_empty() {
        reasoning.push_str(" Accessories included.");
    }

    OutfitRecommendation {
        top: top.map(|item| item.id),
        bottom: bottom.map(|item| item.id),
        outerwear: outerwear.map(|item| item.id),
        shoes: shoes.map(|item| item.id),
        accessories,
        reasoning,
    }
}
