//! Document-store contract for the Snapfeed data layer.
//!
//! Two collections back the whole app: `users` (keyed by the external user
//! id) and `posts` (store-generated ids, ordered by creation time). The
//! [`DocumentStore`] trait is the seam for swapping the backing store; the
//! in-memory backend in [`memory`] is the reference implementation and the
//! one the tests and the demo binary run against.
//!
//! Timestamps are assigned by the store at commit time as epoch-millisecond
//! integers, strictly increasing per store instance, so `createdAt` is a
//! usable sort key the moment a write becomes visible.

pub mod document;
pub mod memory;
pub mod store;
pub mod subscription;

pub use document::{Document, Fields, CREATED_AT, UPDATED_AT};
pub use memory::MemoryDocumentStore;
pub use store::{DocumentStore, SortDirection};
pub use subscription::{Subscription, SubscriptionHandle};

pub use error_types::{AppError, Result};
