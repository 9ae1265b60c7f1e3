//! Wardrobe collection endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use wardrobe_common::db::collections::{
    create_collection, delete_collection, get_collection, list_all_collections, update_collection,
};
use wardrobe_common::db::{NewWardrobeCollection, WardrobeCollection};

use super::{non_empty, parse_id, present, Envelope};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Item ids as sent by clients: a JSON array or an already joined string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ItemIds {
    List(Vec<Value>),
    Joined(String),
}

impl ItemIds {
    /// Comma-joined storage form
    pub fn joined(self) -> String {
        match self {
            ItemIds::List(values) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            ItemIds::Joined(joined) => joined,
        }
    }
}

/// POST /collections body
#[derive(Debug, Default, Deserialize)]
pub struct CreateCollectionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "itemIds")]
    pub item_ids: Option<ItemIds>,
}

impl CreateCollectionRequest {
    fn into_new_collection(self) -> ApiResult<NewWardrobeCollection> {
        let Some(name) = non_empty(self.name) else {
            return Err(ApiError::BadRequest("Name is required".to_string()));
        };

        Ok(NewWardrobeCollection {
            name,
            description: non_empty(self.description),
            item_ids: non_empty(self.item_ids.map(ItemIds::joined)),
        })
    }
}

/// PUT /collections/:id body; present keys overwrite, `null` clears
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCollectionRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", alias = "itemIds")]
    pub item_ids: Option<Option<ItemIds>>,
}

impl UpdateCollectionRequest {
    pub fn apply(self, collection: &mut WardrobeCollection) {
        if let Some(name) = self.name {
            collection.name = name;
        }
        if let Some(description) = self.description {
            collection.description = description;
        }
        if let Some(item_ids) = self.item_ids {
            collection.item_ids = item_ids.map(ItemIds::joined);
        }
    }
}

async fn find_collection(
    state: &AppState,
    raw_id: &str,
    failure: &'static str,
) -> ApiResult<WardrobeCollection> {
    let id = parse_id(raw_id)?;
    get_collection(&state.db, id)
        .await
        .map_err(ApiError::store(failure))?
        .ok_or_else(|| ApiError::NotFound("Collection not found".to_string()))
}

/// GET /collections
pub async fn list_collections(
    State(state): State<AppState>,
) -> ApiResult<Json<Envelope<Vec<WardrobeCollection>>>> {
    let collections = list_all_collections(&state.db)
        .await
        .map_err(ApiError::store("Failed to fetch collections"))?;

    Ok(Envelope::data(collections))
}

/// POST /collections
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCollectionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<WardrobeCollection>>)> {
    let Json(request) = payload?;
    let new_collection = request.into_new_collection()?;

    let collection = create_collection(&state.db, &new_collection)
        .await
        .map_err(ApiError::store("Failed to create collection"))?;

    info!("Created collection {} ({})", collection.id, collection.name);
    Ok((StatusCode::CREATED, Envelope::data(collection)))
}

/// GET /collections/:id
pub async fn get_one(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<WardrobeCollection>>> {
    let collection = find_collection(&state, &raw_id, "Failed to fetch collection").await?;
    Ok(Envelope::data(collection))
}

/// PUT /collections/:id
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateCollectionRequest>, JsonRejection>,
) -> ApiResult<Json<Envelope<WardrobeCollection>>> {
    let mut collection = find_collection(&state, &raw_id, "Failed to update collection").await?;
    let Json(request) = payload?;

    request.apply(&mut collection);
    let updated = update_collection(&state.db, &collection)
        .await
        .map_err(ApiError::store("Failed to update collection"))?;

    info!("Updated collection {}", updated.id);
    Ok(Envelope::data(updated))
}

/// DELETE /collections/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Envelope<()>>> {
    let collection = find_collection(&state, &raw_id, "Failed to delete collection").await?;

    delete_collection(&state.db, collection.id)
        .await
        .map_err(ApiError::store("Failed to delete collection"))?;

    info!("Deleted collection {}", collection.id);
    Ok(Envelope::message("Collection deleted successfully"))
}

/// Build collection routes
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/collections", get(list_collections).post(create))
        .route("/collections/:id", get(get_one).put(update).delete(delete))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_joined() {
        let list: ItemIds = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(list.joined(), "1,2,3");

        let mixed: ItemIds = serde_json::from_str(r#"[4, "5"]"#).unwrap();
        assert_eq!(mixed.joined(), "4,5");

        let joined: ItemIds = serde_json::from_str(r#""7,8""#).unwrap();
        assert_eq!(joined.joined(), "7,8");
    }

    #[test]
    fn test_create_collection_request() {
        let request: CreateCollectionRequest =
            serde_json::from_str(r#"{"name": "Gym", "itemIds": []}"#).unwrap();
        let collection = request.into_new_collection().unwrap();
        assert_eq!(collection.name, "Gym");
        assert_eq!(collection.item_ids, None);

        let nameless: CreateCollectionRequest =
            serde_json::from_str(r#"{"item_ids": [1]}"#).unwrap();
        assert_eq!(
            nameless.into_new_collection().unwrap_err().to_string(),
            "Name is required"
        );
    }

    #[test]
    fn test_update_collection_request() {
        let mut collection = WardrobeCollection {
            id: 1,
            name: "Gym".to_string(),
            description: Some("weekday".to_string()),
            item_ids: Some("1,2".to_string()),
            created_at: None,
            updated_at: None,
        };

        let request: UpdateCollectionRequest =
            serde_json::from_str(r#"{"item_ids": [3], "description": null}"#).unwrap();
        request.apply(&mut collection);

        assert_eq!(collection.name, "Gym");
        assert_eq!(collection.description, None);
        assert_eq!(collection.item_ids.as_deref(), Some("3"));
    }
}
