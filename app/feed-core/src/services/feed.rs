//! Live feed synchronizer.
//!
//! Holds the one standing watch over the posts collection and republishes
//! each full snapshot through a `tokio::sync::watch` channel. Two states:
//! loading until the first snapshot lands, live from then on. Every later
//! snapshot atomically replaces the whole list, never patches it.

use crate::models::post::Post;
use crate::services::POSTS_COLLECTION;
use doc_store::{Document, DocumentStore, SortDirection, SubscriptionHandle, CREATED_AT};
use error_types::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

/// Feed view state as seen by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeedState {
    /// Before the first snapshot.
    #[default]
    Loading,
    /// Snapshot received; stays live through all later updates.
    Live(Vec<Post>),
}

impl FeedState {
    pub fn posts(&self) -> &[Post] {
        match self {
            FeedState::Loading => &[],
            FeedState::Live(posts) => posts,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FeedState::Live(_))
    }
}

/// Owner of the standing posts watch.
///
/// Dropping the synchronizer detaches the watch, so a screen-scoped
/// instance cleans up when the view leaves scope.
pub struct FeedSynchronizer {
    state: watch::Receiver<FeedState>,
    active: Arc<AtomicBool>,
    handle: SubscriptionHandle,
}

impl FeedSynchronizer {
    /// Open the watch on `posts` ordered by `createdAt` descending and
    /// drive it from a background task.
    pub async fn spawn(store: Arc<dyn DocumentStore>) -> Result<Self> {
        let mut subscription = store
            .subscribe(POSTS_COLLECTION, CREATED_AT, SortDirection::Descending)
            .await?;
        let handle = subscription.handle();
        let (tx, rx) = watch::channel(FeedState::Loading);
        let active = Arc::new(AtomicBool::new(true));

        let task_active = Arc::clone(&active);
        tokio::spawn(async move {
            while let Some(snapshot) = subscription.next_snapshot().await {
                // A snapshot still queued when the watch was detached is
                // discarded here, not applied.
                if !task_active.load(Ordering::SeqCst) {
                    break;
                }
                match decode_posts(&snapshot) {
                    Ok(posts) => {
                        debug!(count = posts.len(), "feed snapshot applied");
                        let _ = tx.send(FeedState::Live(posts));
                    }
                    Err(err) => {
                        // Keep showing last-known data.
                        error!("feed snapshot dropped: {err}");
                    }
                }
            }
            debug!("feed watch closed");
        });

        Ok(Self {
            state: rx,
            active,
            handle,
        })
    }

    /// Watch channel for consumers; the value is always the latest full
    /// snapshot.
    pub fn state(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }

    /// Current post list; empty while still loading.
    pub fn posts(&self) -> Vec<Post> {
        self.state.borrow().posts().to_vec()
    }

    pub fn is_live(&self) -> bool {
        self.state.borrow().is_live()
    }

    /// Detach the watch. Idempotent; snapshots produced after this call
    /// are never applied.
    pub fn detach(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            self.handle.cancel();
            debug!("feed synchronizer detached");
        }
    }
}

impl Drop for FeedSynchronizer {
    fn drop(&mut self) {
        self.detach();
    }
}

fn decode_posts(docs: &[Document]) -> Result<Vec<Post>> {
    docs.iter().map(Post::from_document).collect()
}
