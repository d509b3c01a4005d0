//! Live-query behavior of the in-memory backend: snapshot delivery,
//! full-replacement semantics, and cancellation.

use doc_store::{DocumentStore, Fields, MemoryDocumentStore, SortDirection, CREATED_AT};
use serde_json::json;

fn fields(value: serde_json::Value) -> Fields {
    value.as_object().cloned().expect("object literal")
}

#[tokio::test]
async fn first_snapshot_matches_query_ordered() {
    let store = MemoryDocumentStore::new();
    for caption in ["one", "two"] {
        store
            .add_document("posts", fields(json!({"caption": caption})))
            .await
            .unwrap();
    }

    let one_shot = store
        .query_ordered("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();
    let mut sub = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();

    let initial = sub.next_snapshot().await.unwrap();
    assert_eq!(initial, one_shot);
}

#[tokio::test]
async fn every_commit_delivers_a_full_replacement_snapshot() {
    let store = MemoryDocumentStore::new();
    let mut sub = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();
    assert!(sub.next_snapshot().await.unwrap().is_empty());

    store
        .add_document("posts", fields(json!({"caption": "first"})))
        .await
        .unwrap();
    let snapshot = sub.next_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 1);

    store
        .add_document("posts", fields(json!({"caption": "second"})))
        .await
        .unwrap();
    let snapshot = sub.next_snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].field("caption"), Some(&json!("second")));
    assert_eq!(snapshot[1].field("caption"), Some(&json!("first")));
}

#[tokio::test]
async fn updates_to_watched_collection_notify_too() {
    let store = MemoryDocumentStore::new();
    store
        .set_document("users", "user123", fields(json!({"name": "Demo User"})))
        .await
        .unwrap();

    let mut sub = store
        .subscribe("users", CREATED_AT, SortDirection::Ascending)
        .await
        .unwrap();
    sub.next_snapshot().await.unwrap();

    store
        .update_document("users", "user123", fields(json!({"bio": "hello"})))
        .await
        .unwrap();
    let snapshot = sub.next_snapshot().await.unwrap();
    assert_eq!(snapshot[0].field("bio"), Some(&json!("hello")));
}

#[tokio::test]
async fn cancelled_watch_receives_nothing_from_later_writes() {
    let store = MemoryDocumentStore::new();
    let mut sub = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();
    sub.next_snapshot().await.unwrap();

    assert!(sub.cancel());

    // Notification fan-out happens inside the write, so by the time the
    // add returns, a live watch would already have its snapshot queued.
    store
        .add_document("posts", fields(json!({"caption": "after cancel"})))
        .await
        .unwrap();
    assert!(sub.try_snapshot().is_none());
}

#[tokio::test]
async fn cancelling_twice_is_a_no_op() {
    let store = MemoryDocumentStore::new();
    let sub = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();

    let handle = sub.handle();
    assert!(handle.cancel());
    assert!(!handle.cancel());
    assert!(!sub.cancel());
}

#[tokio::test]
async fn watchers_are_independent() {
    let store = MemoryDocumentStore::new();
    let mut kept = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();
    let mut dropped = store
        .subscribe("posts", CREATED_AT, SortDirection::Descending)
        .await
        .unwrap();
    kept.next_snapshot().await.unwrap();
    dropped.next_snapshot().await.unwrap();

    dropped.cancel();
    store
        .add_document("posts", fields(json!({"caption": "still flowing"})))
        .await
        .unwrap();

    assert_eq!(kept.next_snapshot().await.unwrap().len(), 1);
    assert!(dropped.try_snapshot().is_none());
}
