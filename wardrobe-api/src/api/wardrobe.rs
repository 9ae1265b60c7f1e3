//! Wardrobe item endpoints
//!
//! Request bodies accept both snake_case and camelCase keys for multiword
//! fields (`cloth_type` / `clothType`, ...).

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use wardrobe_common::db::items::{create_item, delete_item, get_item, list_all_items, update_item};
use wardrobe_common::db::{NewWardrobeItem, WardrobeItem};

use super::{non_empty, parse_id, present, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /wardrobe body
#[derive(Debug, Default, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    #[serde(alias = "clothType")]
    pub cloth_type: Option<String>,
    pub gsm: Option<i64>,
    pub fabric: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    #[serde(alias = "purchaseDate")]
    pub purchase_date: Option<String>,
    #[serde(alias = "purchasePrice")]
    pub purchase_price: Option<f64>,
    pub condition: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CreateItemRequest {
    fn into_new_item(self) -> ApiResult<NewWardrobeItem> {
        let (Some(name), Some(cloth_type)) = (non_empty(self.name), non_empty(self.cloth_type))
        else {
            return Err(ApiError::BadRequest(
                "Name and cloth_type are required".to_string(),
            ));
        };

        Ok(NewWardrobeItem {
            name,
            cloth_type,
            gsm: self.gsm,
            fabric: non_empty(self.fabric),
            color: non_empty(self.color),
            size: non_empty(self.size),
            brand: non_empty(self.brand),
            purchase_date: non_empty(self.purchase_date),
            purchase_price: self.purchase_price,
            condition: non_empty(self.condition),
            season: non_empty(self.season),
            occasion: non_empty(self.occasion),
            location: non_empty(self.location),
            notes: non_empty(self.notes),
        })
    }
}

/// PUT /wardrobe/:id body
///
/// Keys that are present overwrite the stored value (`null` clears it);
/// absent keys leave the stored value untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    #[serde(alias = "clothType")]
    pub cloth_type: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub gsm: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub fabric: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub size: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", alias = "purchaseDate")]
    pub purchase_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", alias = "purchasePrice")]
    pub purchase_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub condition: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub season: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub occasion: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

fn overwrite<T>(field: &mut Option<T>, update: Option<Option<T>>) {
    if let Some(value) = update {
        *field = value;
    }
}

impl UpdateItemRequest {
    pub fn apply(self, item: &mut WardrobeItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(cloth_type) = self.cloth_type {
            item.cloth_type = cloth_type;
        }
        overwrite(&mut item.gsm, self.gsm);
        overwrite(&mut item.fabric, self.fabric);
        overwrite(&mut item.color, self.color);
        overwrite(&mut item.size, self.size);
        overwrite(&mut item.brand, self.brand);
        overwrite(&mut item.purchase_date, self.purchase_date);
        overwrite(&mut item.purchase_price, self.purchase_price);
        overwrite(&mut item.condition, self.condition);
        overwrite(&mut item.season, self.season);
        overwrite(&mut item.occasion, self.occasion);
        overwrite(&mut item.location, self.location);
        overwrite(&mut item.notes, self.notes);
    }
}

async fn find_item(state: &AppState, raw_id: &str, failure: &'static str) -> ApiResult<WardrobeItem> {
    let id = parse_id(raw_id)?;
    get_item(&state.db, id)
        .await
        .map_err(ApiError::store(failure))?
        .ok_or_else(|| ApiError::NotFound("Item not found".to_string()))
}

/// GET /wardrobe
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<WardrobeItem>>>> {
    let items = list_all_items(&state.db)
        .await
        .map_err(ApiError::store("Failed to fetch items"))?;

    Ok(Envelope::data(items))
}

/// POST /wardrobe
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<WardrobeItem>>)> {
    let Json(request) = payload?;
    let new_item = request.into_new_item()?;

    let item = create_item(&state.db, &new_item)
        .await
        .map_err(ApiError::store("Failed to create item"))?;

    info!("Created wardrobe item {} ({})", item.id, item.cloth_type);
    Ok((StatusCode::CREATED, Envelope::data(item)))
}

/// GET /wardrobe/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<WardrobeItem>>> {
    let item = find_item(&state, &raw_id, "Failed to fetch item").await?;
    Ok(Envelope::data(item))
}

/// PUT /wardrobe/:id
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<WardrobeItem>>> {
    let mut item = find_item(&state, &raw_id, "Failed to update item").await?;
    let Json(request) = payload?;

    request.apply(&mut item);
    let updated = update_item(&state.db, &item)
        .await
        .map_err(ApiError::store("Failed to update item"))?;

    info!("Updated wardrobe item {}", updated.id);
    Ok(Envelope::data(updated))
}

/// DELETE /wardrobe/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let item = find_item(&state, &raw_id, "Failed to delete item").await?;

    delete_item(&state.db, item.id)
        .await
        .map_err(ApiError::store("Failed to delete item"))?;

    info!("Deleted wardrobe item {}", item.id);
    Ok(Envelope::message("Item deleted successfully"))
}

/// Build wardrobe item routes
pub fn wardrobe_routes() -> Router<AppState> {
    Router::new()
        .route("/wardrobe", get(list_items).post(create))
        .route("/wardrobe/:id", get(get_one).put(update).delete(delete))
}
