//! Wardrobe item persistence

use crate::db::models::{timestamp_now, NewWardrobeItem, WardrobeItem};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const ITEM_COLUMNS: &str = r#"
    id, name, cloth_type, gsm, fabric, color, size, brand, purchase_date,
    purchase_price, condition, season, occasion, location, notes,
    created_at, updated_at
"#;

fn row_to_item(row: &SqliteRow) -> Result<WardrobeItem> {
    Ok(WardrobeItem {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        cloth_type: row.try_get("cloth_type")?,
        gsm: row.try_get("gsm")?,
        fabric: row.try_get("fabric")?,
        color: row.try_get("color")?,
        size: row.try_get("size")?,
        brand: row.try_get("brand")?,
        purchase_date: row.try_get("purchase_date")?,
        purchase_price: row.try_get("purchase_price")?,
        condition: row.try_get("condition")?,
        season: row.try_get("season")?,
        occasion: row.try_get("occasion")?,
        location: row.try_get("location")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Load every item, newest first
///
/// Items created within the same instant fall back to id order, so the
/// sequence is stable across calls.
pub async fn list_all_items(pool: &SqlitePool) -> Result<Vec<WardrobeItem>> {
    let rows = sqlx::query(&format!(
        "SELECT {ITEM_COLUMNS} FROM wardrobe_items ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_item).collect()
}

/// Load a single item by id
pub async fn get_item(pool: &SqlitePool, id: i64) -> Result<Option<WardrobeItem>> {
    let row = sqlx::query(&format!(
        "SELECT {ITEM_COLUMNS} FROM wardrobe_items WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(row_to_item).transpose()
}

/// Insert a new item and return it with its assigned id and timestamps
pub async fn create_item(pool: &SqlitePool, item: &NewWardrobeItem) -> Result<WardrobeItem> {
    let now = timestamp_now();

    let result = sqlx::query(
        r#"
        INSERT INTO wardrobe_items (
            name, cloth_type, gsm, fabric, color, size, brand, purchase_date,
            purchase_price, condition, season, occasion, location, notes,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&item.name)
    .bind(&item.cloth_type)
    .bind(item.gsm)
    .bind(&item.fabric)
    .bind(&item.color)
    .bind(&item.size)
    .bind(&item.brand)
    .bind(&item.purchase_date)
    .bind(item.purchase_price)
    .bind(&item.condition)
    .bind(&item.season)
    .bind(&item.occasion)
    .bind(&item.location)
    .bind(&item.notes)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_item(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("wardrobe item {id}")))
}

/// Overwrite every mutable field of an existing item
///
/// `created_at` is preserved and `updated_at` is refreshed.
pub async fn update_item(pool: &SqlitePool, item: &WardrobeItem) -> Result<WardrobeItem> {
    let result = sqlx::query(
        r#"
        UPDATE wardrobe_items SET
            name = ?, cloth_type = ?, gsm = ?, fabric = ?, color = ?, size = ?,
            brand = ?, purchase_date = ?, purchase_price = ?, condition = ?,
            season = ?, occasion = ?, location = ?, notes = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&item.name)
    .bind(&item.cloth_type)
    .bind(item.gsm)
    .bind(&item.fabric)
    .bind(&item.color)
    .bind(&item.size)
    .bind(&item.brand)
    .bind(&item.purchase_date)
    .bind(item.purchase_price)
    .bind(&item.condition)
    .bind(&item.season)
    .bind(&item.occasion)
    .bind(&item.location)
    .bind(&item.notes)
    .bind(timestamp_now())
    .bind(item.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("wardrobe item {}", item.id)));
    }

    get_item(pool, item.id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("wardrobe item {}", item.id)))
}

/// Delete an item; returns false when no such item existed
pub async fn delete_item(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM wardrobe_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
