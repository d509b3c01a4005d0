//! In-memory reference backend.
//!
//! Collections live behind one `RwLock`; every write stamps its timestamps
//! from a strictly-increasing commit clock and synchronously recomputes the
//! ordered snapshot for each standing watch on the collection, so a
//! subscription never observes a document before its `createdAt` is
//! assigned. Detached and disconnected watchers are dropped on the next
//! notification sweep.

use crate::document::{compare_values, Document, Fields, CREATED_AT, UPDATED_AT};
use crate::store::{DocumentStore, SortDirection};
use crate::subscription::{Subscription, SubscriptionHandle};
use async_trait::async_trait;
use chrono::Utc;
use error_types::{AppError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredDocument {
    fields: Fields,
    /// Insertion order, used as the tie-break for equal sort keys.
    seq: u64,
}

struct Watcher {
    handle: SubscriptionHandle,
    field: String,
    direction: SortDirection,
    tx: UnboundedSender<Vec<Document>>,
}

#[derive(Default)]
struct CollectionState {
    documents: HashMap<String, StoredDocument>,
    watchers: Vec<Watcher>,
}

/// Commit clock: wall time in epoch millis, bumped past the previous stamp
/// whenever the wall clock has not advanced. Timestamps are therefore
/// strictly increasing per store instance.
#[derive(Default)]
struct CommitClock {
    last_millis: i64,
}

impl CommitClock {
    fn tick(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_millis = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis
    }
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, CollectionState>,
    clock: CommitClock,
    next_seq: u64,
}

/// In-memory [`DocumentStore`] with live-query support.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<StoreState>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute and deliver the ordered snapshot to every live watcher of
    /// the collection, dropping the detached and the disconnected.
    fn notify(collection: &str, col: &mut CollectionState) {
        let documents = &col.documents;
        let before = col.watchers.len();
        col.watchers.retain(|watcher| {
            if watcher.handle.is_cancelled() {
                return false;
            }
            let snapshot = ordered_snapshot(documents, &watcher.field, watcher.direction);
            watcher.tx.send(snapshot).is_ok()
        });
        let dropped = before - col.watchers.len();
        if dropped > 0 {
            tracing::debug!(
                collection,
                dropped,
                remaining = col.watchers.len(),
                "dropped detached watchers"
            );
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let state = self.inner.read().await;
        Ok(state
            .collections
            .get(collection)
            .and_then(|col| col.documents.get(id))
            .map(|doc| Document::new(id, doc.fields.clone())))
    }

    async fn set_document(&self, collection: &str, id: &str, mut fields: Fields) -> Result<()> {
        let mut state = self.inner.write().await;
        let state = &mut *state;
        let ts = state.clock.tick();
        let col = state.collections.entry(collection.to_string()).or_default();

        // A replace keeps the original insertion slot.
        let seq = match col.documents.get(id) {
            Some(existing) => existing.seq,
            None => {
                state.next_seq += 1;
                state.next_seq
            }
        };

        fields.insert(CREATED_AT.to_string(), Value::from(ts));
        fields.insert(UPDATED_AT.to_string(), Value::from(ts));
        col.documents
            .insert(id.to_string(), StoredDocument { fields, seq });
        Self::notify(collection, col);
        Ok(())
    }

    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        let mut state = self.inner.write().await;
        let state = &mut *state;
        let ts = state.clock.tick();
        let col = state
            .collections
            .get_mut(collection)
            .ok_or_else(|| AppError::not_found(collection, id))?;
        let doc = col
            .documents
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(collection, id))?;

        for (key, value) in fields {
            doc.fields.insert(key, value);
        }
        doc.fields.insert(UPDATED_AT.to_string(), Value::from(ts));
        Self::notify(collection, col);
        Ok(())
    }

    async fn add_document(&self, collection: &str, mut fields: Fields) -> Result<String> {
        let mut state = self.inner.write().await;
        let state = &mut *state;
        let id = Uuid::new_v4().to_string();
        let ts = state.clock.tick();
        state.next_seq += 1;
        let seq = state.next_seq;

        let col = state.collections.entry(collection.to_string()).or_default();
        fields.insert(CREATED_AT.to_string(), Value::from(ts));
        col.documents
            .insert(id.clone(), StoredDocument { fields, seq });
        Self::notify(collection, col);
        tracing::debug!(collection, document_id = %id, "document added");
        Ok(id)
    }

    async fn query_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>> {
        let state = self.inner.read().await;
        Ok(state
            .collections
            .get(collection)
            .map(|col| ordered_snapshot(&col.documents, field, direction))
            .unwrap_or_default())
    }

    async fn subscribe(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Subscription> {
        let mut state = self.inner.write().await;
        let col = state.collections.entry(collection.to_string()).or_default();

        let (tx, rx) = unbounded_channel();
        let handle = SubscriptionHandle::new();

        // The first snapshot is delivered at registration, before any
        // later commit can race ahead of it.
        let initial = ordered_snapshot(&col.documents, field, direction);
        let _ = tx.send(initial);

        col.watchers.push(Watcher {
            handle: handle.clone(),
            field: field.to_string(),
            direction,
            tx,
        });
        tracing::debug!(collection, watchers = col.watchers.len(), "watch registered");
        Ok(Subscription::new(rx, handle))
    }
}

/// Snapshot sorted by `field` with insertion order as tie-break; documents
/// missing the sort field are omitted. Direction applies to the composite
/// key.
fn ordered_snapshot(
    documents: &HashMap<String, StoredDocument>,
    field: &str,
    direction: SortDirection,
) -> Vec<Document> {
    let mut entries: Vec<(&String, &StoredDocument)> = documents
        .iter()
        .filter(|(_, doc)| doc.fields.contains_key(field))
        .collect();
    entries.sort_by(|(_, a), (_, b)| {
        compare_values(
            a.fields.get(field).unwrap_or(&Value::Null),
            b.fields.get(field).unwrap_or(&Value::Null),
        )
        .then_with(|| a.seq.cmp(&b.seq))
    });
    if direction == SortDirection::Descending {
        entries.reverse();
    }
    entries
        .into_iter()
        .map(|(id, doc)| Document::new(id.clone(), doc.fields.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().expect("object literal")
    }

    #[tokio::test]
    async fn point_read_of_absent_document_is_none() {
        let store = MemoryDocumentStore::new();
        let doc = store.get_document("users", "user123").await.unwrap();
        assert!(doc.is_none());
    }

    #[tokio::test]
    async fn set_stamps_both_timestamps() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("users", "user123", fields(json!({"name": "Demo User"})))
            .await
            .unwrap();

        let doc = store
            .get_document("users", "user123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.field("name"), Some(&json!("Demo User")));
        assert!(doc.created_at().is_some());
        assert_eq!(doc.created_at(), doc.updated_at());
    }

    #[tokio::test]
    async fn set_replaces_the_whole_document() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("users", "u1", fields(json!({"name": "A", "bio": "old"})))
            .await
            .unwrap();
        store
            .set_document("users", "u1", fields(json!({"name": "B"})))
            .await
            .unwrap();

        let doc = store.get_document("users", "u1").await.unwrap().unwrap();
        assert_eq!(doc.field("name"), Some(&json!("B")));
        assert!(doc.field("bio").is_none());
    }

    #[tokio::test]
    async fn update_of_missing_document_is_not_found() {
        let store = MemoryDocumentStore::new();
        let err = store
            .update_document("users", "ghost", fields(json!({"bio": "hi"})))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(store.get_document("users", "ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_merges_and_refreshes_updated_at_only() {
        let store = MemoryDocumentStore::new();
        store
            .set_document("users", "u1", fields(json!({"name": "A", "bio": "old"})))
            .await
            .unwrap();
        let before = store.get_document("users", "u1").await.unwrap().unwrap();

        store
            .update_document("users", "u1", fields(json!({"bio": "new"})))
            .await
            .unwrap();
        let after = store.get_document("users", "u1").await.unwrap().unwrap();

        assert_eq!(after.field("name"), Some(&json!("A")));
        assert_eq!(after.field("bio"), Some(&json!("new")));
        assert_eq!(after.created_at(), before.created_at());
        assert!(after.updated_at() > before.updated_at());
    }

    #[tokio::test]
    async fn add_generates_unique_ids_and_increasing_timestamps() {
        let store = MemoryDocumentStore::new();
        let a = store
            .add_document("posts", fields(json!({"caption": "a"})))
            .await
            .unwrap();
        let b = store
            .add_document("posts", fields(json!({"caption": "b"})))
            .await
            .unwrap();
        assert_ne!(a, b);

        let doc_a = store.get_document("posts", &a).await.unwrap().unwrap();
        let doc_b = store.get_document("posts", &b).await.unwrap().unwrap();
        assert!(doc_b.created_at() > doc_a.created_at());
    }

    #[tokio::test]
    async fn query_orders_descending_by_field() {
        let store = MemoryDocumentStore::new();
        for caption in ["first", "second", "third"] {
            store
                .add_document("posts", fields(json!({"caption": caption})))
                .await
                .unwrap();
        }

        let docs = store
            .query_ordered("posts", CREATED_AT, SortDirection::Descending)
            .await
            .unwrap();
        let captions: Vec<_> = docs
            .iter()
            .map(|d| d.field("caption").cloned().unwrap())
            .collect();
        assert_eq!(captions, vec![json!("third"), json!("second"), json!("first")]);
    }

    #[tokio::test]
    async fn documents_missing_the_sort_field_are_omitted() {
        let store = MemoryDocumentStore::new();
        store
            .add_document("posts", fields(json!({"caption": "kept"})))
            .await
            .unwrap();
        store
            .set_document("posts", "odd-one", fields(json!({"note": "no caption here"})))
            .await
            .unwrap();

        let docs = store
            .query_ordered("posts", "caption", SortDirection::Ascending)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].field("caption"), Some(&json!("kept")));
    }

    #[tokio::test]
    async fn query_of_unknown_collection_is_empty() {
        let store = MemoryDocumentStore::new();
        let docs = store
            .query_ordered("nowhere", CREATED_AT, SortDirection::Descending)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }
}
