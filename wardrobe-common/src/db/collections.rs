//! Wardrobe collection persistence

use crate::db::models::{timestamp_now, NewWardrobeCollection, WardrobeCollection};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn row_to_collection(row: &SqliteRow) -> Result<WardrobeCollection> {
    Ok(WardrobeCollection {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        item_ids: row.try_get("item_ids")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Load every collection, newest first
pub async fn list_all_collections(pool: &SqlitePool) -> Result<Vec<WardrobeCollection>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, description, item_ids, created_at, updated_at
        FROM wardrobe_collections
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_collection).collect()
}

/// Load a single collection by id
pub async fn get_collection(pool: &SqlitePool, id: i64) -> Result<Option<WardrobeCollection>> {
    let row = sqlx::query(
        r#"
        SELECT id, name, description, item_ids, created_at, updated_at
        FROM wardrobe_collections
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_collection).transpose()
}

/// Insert a new collection
pub async fn create_collection(
    pool: &SqlitePool,
    collection: &NewWardrobeCollection,
) -> Result<WardrobeCollection> {
    let now = timestamp_now();

    let result = sqlx::query(
        r#"
        INSERT INTO wardrobe_collections (name, description, item_ids, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&collection.name)
    .bind(&collection.description)
    .bind(&collection.item_ids)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_collection(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("wardrobe collection {id}")))
}

/// Overwrite name, description and item ids of an existing collection
pub async fn update_collection(
    pool: &SqlitePool,
    collection: &WardrobeCollection,
) -> Result<WardrobeCollection> {
    let result = sqlx::query(
        r#"
        UPDATE wardrobe_collections
        SET name = ?, description = ?, item_ids = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&collection.name)
    .bind(&collection.description)
    .bind(&collection.item_ids)
    .bind(timestamp_now())
    .bind(collection.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("wardrobe collection {}", collection.id)));
    }

    get_collection(pool, collection.id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("wardrobe collection {}", collection.id)))
}

/// Delete a collection; returns false when no such collection existed
pub async fn delete_collection(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM wardrobe_collections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_in_memory;

    #[tokio::test]
    async fn test_collection_lifecycle() {
        let pool = init_in_memory().await.expect("Failed to create in-memory database");

        let created = create_collection(
            &pool,
            &NewWardrobeCollection {
                name: "Office week".to_string(),
                description: None,
                item_ids: Some("1,2,3".to_string()),
            },
        )
        .await
        .expect("Failed to create collection");
        assert_eq!(created.item_ids.as_deref(), Some("1,2,3"));

        let mut edited = created.clone();
        edited.description = Some("Monday to Friday".to_string());
        let updated = update_collection(&pool, &edited).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Monday to Friday"));
        assert_eq!(updated.created_at, created.created_at);

        assert_eq!(list_all_collections(&pool).await.unwrap().len(), 1);

        assert!(delete_collection(&pool, created.id).await.unwrap());
        assert!(get_collection(&pool, created.id).await.unwrap().is_none());
    }
}
