//! Restart round-trips and corruption recovery against file-backed storage.

use std::sync::Arc;

use go_marketplace_cart::{CartStore, FileStorage, SnapshotStorage};
use go_marketplace_core::CartItem;
use go_marketplace_integration_tests::{TEST_STORAGE_KEY, catalog_item, test_config};

#[tokio::test]
async fn cart_survives_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());

    let store = CartStore::open_file_backed(config.clone())
        .await
        .expect("open store");
    store.add_to_cart(catalog_item("p1", "Shirt", 1000));
    store.add_to_cart(catalog_item("p1", "Shirt", 1000));
    store.add_to_cart(catalog_item("p2", "Mug", 550));
    store.flush().await;
    let before = store.products();
    drop(store);

    // Same directory, fresh process as far as the store is concerned.
    let reopened = CartStore::open_file_backed(config)
        .await
        .expect("reopen store");
    assert_eq!(reopened.products(), before);
}

#[tokio::test]
async fn snapshot_on_disk_is_the_documented_wire_format() {
    let dir = tempfile::tempdir().expect("tempdir");

    let store = CartStore::open_file_backed(test_config(dir.path()))
        .await
        .expect("open store");
    store.add_to_cart(catalog_item("p1", "Shirt", 1000));
    store.flush().await;

    // Read the snapshot back through a second storage handle on the same
    // directory the config pointed at.
    let storage = FileStorage::new(dir.path());
    let raw = storage
        .get(TEST_STORAGE_KEY)
        .await
        .expect("get")
        .expect("snapshot present");
    let snapshot: Vec<CartItem> = serde_json::from_str(&raw).expect("valid snapshot");
    assert_eq!(snapshot, store.products());

    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    let entry = value
        .as_array()
        .and_then(|entries| entries.first())
        .and_then(serde_json::Value::as_object)
        .expect("array of objects");
    for field in ["id", "title", "image_url", "price", "quantity"] {
        assert!(entry.contains_key(field), "missing field {field}");
    }
}

#[tokio::test]
async fn corrupt_snapshot_degrades_to_an_empty_cart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(FileStorage::new(dir.path()));
    storage
        .set(TEST_STORAGE_KEY, "{\"not\": \"a cart\"")
        .await
        .expect("seed corrupt snapshot");

    let store = CartStore::open(test_config(dir.path()), storage.clone())
        .await
        .expect("open store");
    assert!(store.products().is_empty());

    // The store is fully usable afterwards and overwrites the bad snapshot.
    store.add_to_cart(catalog_item("p1", "Shirt", 1000));
    store.flush().await;
    let raw = storage
        .get(TEST_STORAGE_KEY)
        .await
        .expect("get")
        .expect("snapshot present");
    let snapshot: Vec<CartItem> = serde_json::from_str(&raw).expect("valid snapshot");
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn rapid_mutations_converge_on_the_final_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path());

    let store = CartStore::open_file_backed(config.clone())
        .await
        .expect("open store");
    for i in 0..20 {
        store.add_to_cart(catalog_item(&format!("p{i}"), "Item", 100));
    }
    for i in 0..10 {
        store.decrement(&format!("p{i}").into());
    }
    store.flush().await;
    let before = store.products();
    assert_eq!(before.len(), 10);
    drop(store);

    let reopened = CartStore::open_file_backed(config)
        .await
        .expect("reopen store");
    assert_eq!(reopened.products(), before);
}
