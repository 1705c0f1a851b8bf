//! Integration tests for overlapping cart mutations.
//!
//! Cloned handles mutate the cart from separate tasks. Whatever order the
//! tasks run in, the last persisted snapshot must equal the in-memory cart.

use std::sync::Arc;

use go_marketplace_cart::{CartConfig, CartStore, KeyValueStore, MemoryStore, snapshot};
use go_marketplace_integration_tests::line_item;

const KEY: &str = "@GoMarketplace:cartProducts";

async fn persisted(store: &MemoryStore) -> Vec<go_marketplace_core::LineItem> {
    let bytes = store.get(KEY).await.unwrap().unwrap();
    snapshot::decode(&bytes).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_all_applied_and_persisted() {
    let storage = Arc::new(MemoryStore::new());
    let cart = CartStore::new(Arc::clone(&storage), CartConfig::default());
    cart.initialize().await.unwrap();
    cart.add_to_cart(line_item("1", "Shirt", 1)).await.unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let cart = cart.clone();
            tokio::spawn(async move { cart.increment(&"1".into()).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(cart.item_count(), 51);
    assert_eq!(persisted(&storage).await, cart.products());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_mixed_burst_leaves_consistent_snapshot() {
    let storage = Arc::new(MemoryStore::new());
    let cart = CartStore::new(Arc::clone(&storage), CartConfig::default());
    cart.initialize().await.unwrap();

    let tasks: Vec<_> = (0..20)
        .map(|n| {
            let cart = cart.clone();
            tokio::spawn(async move {
                let id = format!("p{}", n % 5);
                cart.add_to_cart(line_item(&id, &id, 1)).await.unwrap();
                cart.add_to_cart(line_item(&id, &id, 1)).await.unwrap();
                cart.decrement(&id.into()).await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    // Every task nets +1 unit on one of five products.
    assert_eq!(cart.products().len(), 5);
    assert_eq!(cart.item_count(), 20);
    assert!(cart.products().iter().all(|item| item.quantity.get() == 4));
    assert_eq!(persisted(&storage).await, cart.products());
}

#[tokio::test]
async fn test_subscriber_observes_latest_state() {
    let cart = CartStore::new(MemoryStore::new(), CartConfig::default());
    let mut rx = cart.subscribe();
    cart.initialize().await.unwrap();

    let writer = cart.clone();
    let handle = tokio::spawn(async move {
        for _ in 0..3 {
            writer.add_to_cart(line_item("1", "Shirt", 1)).await.unwrap();
        }
    });
    handle.await.unwrap();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update()[0].quantity.get(), 3);
}
