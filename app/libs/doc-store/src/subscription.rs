//! Live-query subscription handles.
//!
//! A [`Subscription`] owns the snapshot channel; its clonable
//! [`SubscriptionHandle`] detaches the watch. Cancellation is a synchronous
//! flag flip: the producer never emits to a cancelled watch, but a snapshot
//! already queued in the channel may still be consumed once, so consumers
//! keep their own active flag for that case.

use crate::document::Document;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Clonable cancel handle for a standing watch.
///
/// Calling [`cancel`](Self::cancel) more than once is a no-op. The backend
/// drops the detached watcher on its next notification sweep.
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    cancelled: Arc<AtomicBool>,
}

impl SubscriptionHandle {
    pub(crate) fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Detach the watch. Returns `true` only for the call that actually
    /// performed the detach.
    pub fn cancel(&self) -> bool {
        let detached = !self.cancelled.swap(true, Ordering::SeqCst);
        if detached {
            tracing::debug!("subscription cancelled");
        }
        detached
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A standing watch over one ordered query.
///
/// The first snapshot is delivered at registration; every later commit to
/// the collection delivers the full recomputed result set.
pub struct Subscription {
    rx: UnboundedReceiver<Vec<Document>>,
    handle: SubscriptionHandle,
}

impl Subscription {
    pub(crate) fn new(rx: UnboundedReceiver<Vec<Document>>, handle: SubscriptionHandle) -> Self {
        Self { rx, handle }
    }

    /// Wait for the next full snapshot. Returns `None` once the watch is
    /// detached and the backend has dropped its sender.
    pub async fn next_snapshot(&mut self) -> Option<Vec<Document>> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`next_snapshot`](Self::next_snapshot).
    pub fn try_snapshot(&mut self) -> Option<Vec<Document>> {
        self.rx.try_recv().ok()
    }

    /// Cancel handle for this watch, usable from outside the receive loop.
    pub fn handle(&self) -> SubscriptionHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) -> bool {
        self.handle.cancel()
    }
}
