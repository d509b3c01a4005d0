//! The store seam: one trait, six operations, no retries.

use crate::document::{Document, Fields};
use crate::subscription::Subscription;
use async_trait::async_trait;
use error_types::Result;

/// Sort direction for ordered queries and subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Contract every backing store must satisfy.
///
/// Each operation is a single round trip and surfaces the backend failure
/// verbatim as [`error_types::AppError::Store`]; absent documents on a point
/// read are `Ok(None)`, never an error.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read. Absent is not an error.
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Full-document create or replace. Stamps `createdAt` and `updatedAt`
    /// at commit time.
    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Partial merge into an existing document. Stamps `updatedAt` only;
    /// fails with `NotFound` if the document does not exist.
    async fn update_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()>;

    /// Create with a store-generated id. Stamps `createdAt`.
    /// Returns the new id.
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String>;

    /// One-shot snapshot of the collection, sorted server-side by `field`.
    /// Documents missing the sort field are omitted; ties break by
    /// store-assigned insertion order.
    async fn query_ordered(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Vec<Document>>;

    /// Standing watch over the same ordered query. The subscription's
    /// channel receives the current full snapshot immediately and the full
    /// recomputed snapshot after every commit touching the collection,
    /// always a complete replacement, never a diff.
    async fn subscribe(
        &self,
        collection: &str,
        field: &str,
        direction: SortDirection,
    ) -> Result<Subscription>;
}
