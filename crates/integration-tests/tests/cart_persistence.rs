//! Integration tests for cart persistence on the file-backed store.
//!
//! Each test opens a cart, mutates it, then opens a second cart on the same
//! directory to play the part of the app after a restart.

use go_marketplace_cart::{
    CartConfig, CartErrorKind, CartStore, FileStore, KeyValueStore, MatchKey, snapshot,
};
use go_marketplace_integration_tests::line_item;

async fn open(dir: &std::path::Path, config: CartConfig) -> CartStore<FileStore> {
    let cart = CartStore::new(FileStore::new(dir), config);
    cart.initialize().await.unwrap();
    cart
}

// =============================================================================
// Restart Tests
// =============================================================================

#[tokio::test]
async fn test_fresh_directory_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let cart = open(dir.path(), CartConfig::default()).await;
    assert!(cart.products().is_empty());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let cart = open(dir.path(), CartConfig::default()).await;
    cart.add_to_cart(line_item("1", "Shirt", 1)).await.unwrap();
    cart.add_to_cart(line_item("2", "Mug", 1)).await.unwrap();
    cart.increment(&"1".into()).await.unwrap();
    cart.add_to_cart(line_item("3", "Hat", 1)).await.unwrap();
    cart.decrement(&"3".into()).await.unwrap();
    let before = cart.products();
    drop(cart);

    let restarted = open(dir.path(), CartConfig::default()).await;
    assert_eq!(restarted.products(), before);
    assert_eq!(restarted.item_count(), 3);
}

#[tokio::test]
async fn test_snapshot_file_uses_app_format() {
    let dir = tempfile::tempdir().unwrap();
    let cart = open(dir.path(), CartConfig::default()).await;
    cart.add_to_cart(line_item("1", "Shirt", 2)).await.unwrap();

    let path = cart.storage().path_for("@GoMarketplace:cartProducts");
    let raw: serde_json::Value =
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap();

    assert_eq!(
        raw,
        serde_json::json!([{
            "id": "1",
            "title": "Shirt",
            "image_url": "https://cdn.example.com/1.png",
            "price": 19.9,
            "quantity": 2
        }])
    );
}

#[tokio::test]
async fn test_restores_snapshot_written_by_app() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set(
            "@GoMarketplace:cartProducts",
            br#"[{"id":"7","title":"Lamp","image_url":"x","price":120.5,"quantity":3}]"#.to_vec(),
        )
        .await
        .unwrap();

    let cart = open(dir.path(), CartConfig::default()).await;
    let products = cart.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Lamp");
    assert_eq!(products[0].quantity.get(), 3);
}

#[tokio::test]
async fn test_corrupt_snapshot_reports_read_error_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store
        .set("@GoMarketplace:cartProducts", b"[{\"id\":".to_vec())
        .await
        .unwrap();

    let cart = CartStore::new(FileStore::new(dir.path()), CartConfig::default());
    let err = cart.initialize().await.unwrap_err();
    assert_eq!(err.kind(), CartErrorKind::StorageRead);
    assert!(cart.products().is_empty());

    // The next mutation replaces the corrupt blob with a valid snapshot.
    cart.add_to_cart(line_item("1", "Shirt", 1)).await.unwrap();
    let bytes = store.get("@GoMarketplace:cartProducts").await.unwrap().unwrap();
    assert_eq!(snapshot::decode(&bytes).unwrap(), cart.products());
}

#[tokio::test]
async fn test_carts_with_different_keys_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let first = open(dir.path(), CartConfig::default()).await;
    let second = open(
        dir.path(),
        CartConfig::default().with_storage_key("@GoMarketplace:wishlist"),
    )
    .await;

    first.add_to_cart(line_item("1", "Shirt", 1)).await.unwrap();
    second.add_to_cart(line_item("2", "Mug", 1)).await.unwrap();

    let first_again = open(dir.path(), CartConfig::default()).await;
    assert_eq!(first_again.products(), vec![line_item("1", "Shirt", 1)]);
}

// =============================================================================
// Identity Key Tests
// =============================================================================

#[tokio::test]
async fn test_title_matching_merges_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = CartConfig::default().with_match_key(MatchKey::Title);

    let cart = open(dir.path(), config.clone()).await;
    cart.add_to_cart(line_item("a", "Shirt", 1)).await.unwrap();
    drop(cart);

    let restarted = open(dir.path(), config).await;
    restarted.add_to_cart(line_item("b", "Shirt", 1)).await.unwrap();

    let products = restarted.products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id.as_str(), "a");
    assert_eq!(products[0].quantity.get(), 2);
}

#[tokio::test]
async fn test_id_matching_keeps_same_title_products_apart() {
    let dir = tempfile::tempdir().unwrap();
    let cart = open(dir.path(), CartConfig::default()).await;

    cart.add_to_cart(line_item("a", "Shirt", 1)).await.unwrap();
    cart.add_to_cart(line_item("b", "Shirt", 1)).await.unwrap();
    cart.decrement(&"b".into()).await.unwrap();

    assert_eq!(cart.products(), vec![line_item("a", "Shirt", 1)]);
}
