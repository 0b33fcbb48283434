//! PostgreSQL store against a live database, gated by TEST_DATABASE_URL.
//! Run with `TEST_DATABASE_URL=postgres://... cargo test --test postgres_store -- --ignored`.

use inventory_admin::models::{InventoryItem, ItemChanges, NewUser, Role, Supplier, UserField};
use inventory_admin::{ensure_database_exists, ensure_tables, PgStore, Store, StoreError};
use sqlx::postgres::PgPoolOptions;

const SKIP: &str = "SKIP-TEST-POSTGRES: set TEST_DATABASE_URL to run";

async fn connect() -> Option<PgStore> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) if !url.is_empty() => url,
        _ => {
            eprintln!("{}", SKIP);
            return None;
        }
    };
    ensure_database_exists(&url).await.unwrap();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    ensure_tables(&pool).await.unwrap();
    Some(PgStore::new(pool))
}

/// Keys unlikely to collide between runs sharing one database.
fn unique_key(offset: i64) -> i64 {
    chrono::Utc::now().timestamp_micros() * 10 + offset
}

fn widget(item_id: i64, image_path: Option<&str>) -> InventoryItem {
    InventoryItem {
        item_id,
        item_name: "Widget".into(),
        item_quantity: 5,
        item_cost: 2.5,
        supplier_name: "Acme".into(),
        supplier_id: 1,
        image_path: image_path.map(str::to_string),
    }
}

fn changes(image_path: Option<&str>) -> ItemChanges {
    ItemChanges {
        item_name: "Widget v2".into(),
        item_quantity: 6,
        item_cost: 3.0,
        supplier_name: "Acme".into(),
        image_path: image_path.map(str::to_string),
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn item_update_keeps_image_unless_replaced() {
    let Some(store) = connect().await else { return };
    let id = unique_key(1);
    store
        .insert_item(&widget(id, Some("/uploads/1.png")))
        .await
        .unwrap();

    assert!(store.update_item(id, &changes(None)).await.unwrap());
    let item = find_item(&store, id).await;
    assert_eq!(item.item_name, "Widget v2");
    assert_eq!(item.image_path.as_deref(), Some("/uploads/1.png"));

    assert!(store
        .update_item(id, &changes(Some("/uploads/2.jpg")))
        .await
        .unwrap());
    let item = find_item(&store, id).await;
    assert_eq!(item.image_path.as_deref(), Some("/uploads/2.jpg"));

    store.delete_item(id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn duplicate_keys_are_conflicts() {
    let Some(store) = connect().await else { return };
    let id = unique_key(2);
    store.insert_item(&widget(id, None)).await.unwrap();
    let err = store.insert_item(&widget(id, None)).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict("Item ID")));
    store.delete_item(id).await.unwrap();

    let userid = format!("pg-{}", unique_key(3));
    let new_user = || NewUser {
        name: Some("Ann".into()),
        userid: userid.clone(),
        password: "$argon2id$placeholder".into(),
        email: Some("ann@example.com".into()),
        contact: Some("0123456789".into()),
        approved: false,
        role: Role::User,
    };
    let user_id = store.insert_user(new_user()).await.unwrap();
    let err = store.insert_user(new_user()).await.unwrap_err();
    assert!(matches!(err, StoreError::Conflict("User ID")));
    store.delete_user(user_id).await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn delete_item_returns_the_removed_row() {
    let Some(store) = connect().await else { return };
    let id = unique_key(4);
    store
        .insert_item(&widget(id, Some("/uploads/3.png")))
        .await
        .unwrap();

    let removed = store.delete_item(id).await.unwrap().unwrap();
    assert_eq!(removed.item_id, id);
    assert_eq!(removed.image_path.as_deref(), Some("/uploads/3.png"));
    assert!(store.delete_item(id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL; opt-in via TEST_DATABASE_URL"]
async fn writes_to_missing_rows_report_nothing_affected() {
    let Some(store) = connect().await else { return };
    let missing = unique_key(5);
    assert!(!store.update_item(missing, &changes(None)).await.unwrap());
    assert!(!store.approve_user(missing).await.unwrap());
    assert!(!store.delete_user(missing).await.unwrap());
    assert!(!store
        .update_user_field(missing, UserField::Email, Some("x@example.com"))
        .await
        .unwrap());
    assert!(!store.delete_supplier(missing).await.unwrap());

    let supplier = Supplier {
        supplier_id: missing,
        supplier_name: "Acme".into(),
        contact: "555".into(),
        address: Some(String::new()),
        email: Some(String::new()),
    };
    store.insert_supplier(&supplier).await.unwrap();
    assert!(store.delete_supplier(missing).await.unwrap());
}

async fn find_item(store: &PgStore, item_id: i64) -> InventoryItem {
    store
        .list_items()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.item_id == item_id)
        .unwrap()
}
