//! Tests for on-disk database initialization

use wardrobe_common::db::init::init_database;
use wardrobe_common::db::items::{create_item, list_all_items};
use wardrobe_common::db::NewWardrobeItem;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("nested").join("wardrobe.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("wardrobe.db");

    let pool = init_database(&db_path).await.unwrap();
    create_item(
        &pool,
        &NewWardrobeItem {
            name: "Rain Jacket".to_string(),
            cloth_type: "jacket".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    pool.close().await;

    // Schema creation is idempotent; reopening must not lose rows
    let reopened = init_database(&db_path).await;
    assert!(reopened.is_ok(), "Failed to open existing database: {:?}", reopened.err());

    let items = list_all_items(&reopened.unwrap()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Rain Jacket");
}

#[tokio::test]
async fn test_schema_tables_exist() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("wardrobe.db")).await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name LIKE 'wardrobe_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(tables, vec!["wardrobe_collections", "wardrobe_items"]);
}
