// ── Reactive request streams ──
//
// Subscription types for consuming feed changes.

mod filter;

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::feed::{FeedState, Snapshot};

pub use filter::RequestFilter;

/// A subscription to the feed's request snapshot.
///
/// Provides point-in-time access to the snapshot and change notification
/// via [`changed()`](Self::changed) or by converting into a `Stream` of
/// full [`FeedState`] values.
pub struct RequestStream {
    current: Snapshot,
    receiver: watch::Receiver<FeedState>,
}

impl RequestStream {
    pub(crate) fn new(receiver: watch::Receiver<FeedState>) -> Self {
        let current = Arc::clone(&receiver.borrow().requests);
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Snapshot {
        Arc::clone(&self.receiver.borrow().requests)
    }

    /// The latest full state, including loading and error flags.
    pub fn state(&self) -> FeedState {
        self.receiver.borrow().clone()
    }

    /// Wait until the snapshot is replaced, returning the new one.
    ///
    /// Loading or error transitions that leave the snapshot untouched are
    /// skipped. Returns `None` once the feed has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot> {
        loop {
            self.receiver.changed().await.ok()?;
            let snap = Arc::clone(&self.receiver.borrow_and_update().requests);
            if !Arc::ptr_eq(&snap, &self.current) {
                self.current = Arc::clone(&snap);
                return Some(snap);
            }
        }
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> FeedStateStream {
        FeedStateStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by the feed's `watch::Receiver`.
///
/// Yields the current state first, then every subsequent state change.
pub struct FeedStateStream {
    inner: WatchStream<FeedState>,
}

impl Stream for FeedStateStream {
    type Item = FeedState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
