//! Database models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single garment or accessory in the wardrobe
///
/// `name` and `cloth_type` are always present; every descriptive attribute
/// is optional and stays `None` rather than empty when unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: i64,
    pub name: String,
    /// Free-text garment label ("t-shirt", "leather boots", ...)
    pub cloth_type: String,
    pub gsm: Option<i64>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    /// "excellent" | "good" | "fair" | "poor", any case; free text otherwise
    pub condition: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WardrobeItem {
    /// Item with only the required fields set
    pub fn new(id: i64, name: impl Into<String>, cloth_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cloth_type: cloth_type.into(),
            gsm: None,
            fabric: None,
            color: None,
            size: None,
            brand: None,
            purchase_date: None,
            purchase_price: None,
            condition: None,
            season: None,
            occasion: None,
            location: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Fields of an item that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWardrobeItem {
    pub name: String,
    pub cloth_type: String,
    pub gsm: Option<i64>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_price: Option<f64>,
    pub condition: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// A named group of wardrobe items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeCollection {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Comma-joined item ids
    pub item_ids: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields of a collection that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWardrobeCollection {
    pub name: String,
    pub description: Option<String>,
    pub item_ids: Option<String>,
}

/// Current time in the fixed-width format stored in `created_at`/`updated_at`
///
/// Fixed width keeps lexicographic and chronological order identical.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
