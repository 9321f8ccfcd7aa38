// ── Request feed ──
//
// Keeps a live snapshot of service requests. `start()` performs the initial
// fetch and spawns the single background poll task; mutations patch the
// snapshot with the server's copy of the one request they touched.
//
// Every state write goes through `update()`, which refuses to write once
// the feed has been stopped. That is what keeps late HTTP responses from
// mutating a feed nobody is watching any more.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::activity::{Activity, ActivitySource};
use crate::config::{FeedConfig, PollingConfig, SnapshotOrder};
use crate::error::CoreError;
use crate::model::{RequestChanges, RequestId, RequestStatus, ServiceRequest};
use crate::source::RequestSource;
use crate::stream::RequestStream;

const FETCH_FAILED: &str = "Failed to fetch requests";
const APPROVE_FAILED: &str = "Failed to approve request";
const DECLINE_FAILED: &str = "Failed to decline request";
const UPDATE_FAILED: &str = "Failed to update request status";

/// An immutable request list. Replaced wholesale, never mutated in place,
/// so consumers detect change with `Arc::ptr_eq`.
pub type Snapshot = Arc<Vec<Arc<ServiceRequest>>>;

// ── FeedState ────────────────────────────────────────────────────

/// Observable state of a feed.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub requests: Snapshot,
    /// `true` until the first user-visible fetch settles, and during any
    /// later fetch that asked for a loading indicator.
    pub loading: bool,
    /// Message of the most recent failure, cleared by the next successful
    /// fetch or when a mutation begins.
    pub error: Option<String>,
    pub polling_enabled: bool,
}

// ── Transition ───────────────────────────────────────────────────

/// The backend call used to move a request to a new status.
///
/// Dedicated endpoints record server-side bookkeeping (activity log
/// entries, completion timestamps) that a plain field update skips, so
/// they are always preferred when one exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Assign,
    Cancel,
    Complete,
    Update(RequestChanges),
}

impl Transition {
    /// Narrowest transition that reaches `target`.
    pub fn for_target(target: RequestStatus) -> Self {
        match target {
            RequestStatus::Completed => Self::Complete,
            RequestStatus::Cancelled => Self::Cancel,
            RequestStatus::Assigned => Self::Assign,
            other => Self::Update(RequestChanges::status(other)),
        }
    }
}

// ── RequestFeed ──────────────────────────────────────────────────

/// Live, self-refreshing view of every service request.
///
/// Cheaply cloneable; clones share one snapshot and one poll task. The
/// poll task holds only a weak reference, so dropping the last handle
/// shuts it down.
pub struct RequestFeed<S: RequestSource> {
    inner: Arc<FeedInner<S>>,
}

impl<S: RequestSource> Clone for RequestFeed<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct FeedInner<S: RequestSource> {
    source: S,
    activity: watch::Receiver<Activity>,
    order: SnapshotOrder,
    state: watch::Sender<FeedState>,
    polling: Mutex<PollingConfig>,
    started: AtomicBool,
    /// Parent of every poll task's token. Cancelled by `stop()` and on drop.
    cancel: CancellationToken,
    poller: Mutex<Option<Poller>>,
}

struct Poller {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl<S: RequestSource> Drop for FeedInner<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: RequestSource> RequestFeed<S> {
    /// Create a feed. Nothing is fetched until [`start()`](Self::start).
    pub fn new(source: S, activity: &impl ActivitySource, config: FeedConfig) -> Self {
        let state = watch::Sender::new(FeedState {
            requests: Arc::new(Vec::new()),
            loading: true,
            error: None,
            polling_enabled: config.polling.enabled,
        });

        Self {
            inner: Arc::new(FeedInner {
                source,
                activity: activity.subscribe(),
                order: config.order,
                state,
                polling: Mutex::new(config.polling),
                started: AtomicBool::new(false),
                cancel: CancellationToken::new(),
                poller: Mutex::new(None),
            }),
        }
    }

    /// The request source backing this feed.
    pub fn source(&self) -> &S {
        &self.inner.source
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Perform the initial fetch (with loading indicator), then start
    /// background polling. Calling it again is a no-op.
    pub async fn start(&self) {
        if self.is_stopped() || self.inner.started.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("starting request feed");
        self.refetch(true).await;
        self.respawn_poller();
    }

    /// Stop polling and freeze the state.
    ///
    /// Calls already in flight are not aborted, but nothing they return is
    /// written any more. A stopped feed cannot be restarted.
    pub fn stop(&self) {
        if self.inner.cancel.is_cancelled() {
            return;
        }
        self.inner.cancel.cancel();
        lock(&self.inner.poller).take();
        info!("request feed stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// `true` while a background poll task is alive.
    pub fn is_polling(&self) -> bool {
        lock(&self.inner.poller)
            .as_ref()
            .is_some_and(|p| !p.cancel.is_cancelled() && !p.handle.is_finished())
    }

    // ── State access ─────────────────────────────────────────────

    pub fn state(&self) -> FeedState {
        self.inner.state.borrow().clone()
    }

    pub fn requests(&self) -> Snapshot {
        Arc::clone(&self.inner.state.borrow().requests)
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error.clone()
    }

    /// Raw state receiver, notified on every state change.
    pub fn watch_state(&self) -> watch::Receiver<FeedState> {
        self.inner.state.subscribe()
    }

    /// Snapshot subscription that only wakes when the list is replaced.
    pub fn subscribe(&self) -> RequestStream {
        RequestStream::new(self.inner.state.subscribe())
    }

    // ── Fetching ─────────────────────────────────────────────────

    /// Replace the snapshot with the backend's current list.
    ///
    /// On failure the previous snapshot stays in place and the error
    /// message is stored. Nothing is returned: callers render `error`.
    /// `loading` is only touched when `show_loading` is set, so background
    /// polls never flash a loading state.
    pub async fn refetch(&self, show_loading: bool) {
        if show_loading {
            self.update(|s| !std::mem::replace(&mut s.loading, true));
        }

        match self.inner.source.list().await {
            Ok(list) => {
                let count = list.len();
                let snapshot: Snapshot =
                    Arc::new(self.inner.order.arrange(list).into_iter().map(Arc::new).collect());
                let written = self.update(|s| {
                    s.requests = snapshot;
                    s.error = None;
                    if show_loading {
                        s.loading = false;
                    }
                    true
                });
                if written {
                    debug!(count, "request snapshot replaced");
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch requests");
                let message = e.user_message(FETCH_FAILED);
                self.update(|s| {
                    s.error = Some(message);
                    if show_loading {
                        s.loading = false;
                    }
                    true
                });
            }
        }
    }

    // ── Mutations ────────────────────────────────────────────────

    /// Ask the backend to assign the request, then patch it in place.
    pub async fn approve(&self, id: &RequestId) -> Result<Arc<ServiceRequest>, CoreError> {
        self.mutate(id, Transition::Assign, APPROVE_FAILED).await
    }

    /// Ask the backend to cancel the request, then patch it in place.
    pub async fn decline(&self, id: &RequestId) -> Result<Arc<ServiceRequest>, CoreError> {
        self.mutate(id, Transition::Cancel, DECLINE_FAILED).await
    }

    /// Move a request to `target` through the narrowest backend call.
    ///
    /// Completed, cancelled and assigned use their dedicated endpoints;
    /// every other status goes through a generic `{ status }` update.
    pub async fn update_status(
        &self,
        id: &RequestId,
        target: RequestStatus,
    ) -> Result<Arc<ServiceRequest>, CoreError> {
        self.mutate(id, Transition::for_target(target), UPDATE_FAILED)
            .await
    }

    async fn mutate(
        &self,
        id: &RequestId,
        transition: Transition,
        failure: &str,
    ) -> Result<Arc<ServiceRequest>, CoreError> {
        self.update(|s| s.error.take().is_some());
        debug!(%id, ?transition, "mutating request");

        let source = &self.inner.source;
        let result = match &transition {
            Transition::Assign => source.approve(id).await,
            Transition::Cancel => source.decline(id).await,
            Transition::Complete => source.complete(id).await,
            Transition::Update(changes) => source.update(id, changes).await,
        };

        match result {
            Ok(updated) => {
                let updated = Arc::new(updated);
                self.patch(&updated);
                Ok(updated)
            }
            Err(e) => {
                warn!(%id, error = %e, "request mutation failed");
                let message = e.user_message(failure);
                self.update(|s| {
                    s.error = Some(message);
                    true
                });
                Err(e)
            }
        }
    }

    /// Swap in the server's copy of one request. Other entries keep their
    /// `Arc`; an id that isn't in the snapshot changes nothing.
    fn patch(&self, updated: &Arc<ServiceRequest>) {
        let patched = self.update(|s| {
            if !s.requests.iter().any(|r| r.id == updated.id) {
                return false;
            }
            let next = s
                .requests
                .iter()
                .map(|r| {
                    if r.id == updated.id {
                        Arc::clone(updated)
                    } else {
                        Arc::clone(r)
                    }
                })
                .collect();
            s.requests = Arc::new(next);
            true
        });
        if !patched {
            trace!(id = %updated.id, "patch target not in snapshot");
        }
    }

    /// Apply `f` to the state unless the feed has been stopped. Returns
    /// whether subscribers were notified.
    fn update(&self, f: impl FnOnce(&mut FeedState) -> bool) -> bool {
        let cancel = &self.inner.cancel;
        self.inner
            .state
            .send_if_modified(|state| !cancel.is_cancelled() && f(state))
    }

    // ── Polling configuration ────────────────────────────────────

    pub fn polling_config(&self) -> PollingConfig {
        *lock(&self.inner.polling)
    }

    /// Replace the polling configuration, restarting the poll task.
    pub fn set_polling_config(&self, config: PollingConfig) {
        *lock(&self.inner.polling) = config;
        self.update(|s| {
            let changed = s.polling_enabled != config.enabled;
            s.polling_enabled = config.enabled;
            changed
        });
        self.respawn_poller();
    }

    pub fn set_polling_enabled(&self, enabled: bool) {
        self.set_polling_config(PollingConfig {
            enabled,
            ..self.polling_config()
        });
    }

    pub fn set_polling_interval(&self, interval: Duration) {
        self.set_polling_config(PollingConfig {
            interval,
            ..self.polling_config()
        });
    }

    pub fn set_only_when_active(&self, only_when_active: bool) {
        self.set_polling_config(PollingConfig {
            only_when_active,
            ..self.polling_config()
        });
    }

    /// Tear down the live poll task (if any) and spawn one for the current
    /// configuration. Does nothing before `start()` or after `stop()`.
    fn respawn_poller(&self) {
        let mut slot = lock(&self.inner.poller);
        if let Some(old) = slot.take() {
            old.cancel.cancel();
        }

        if !self.inner.started.load(Ordering::SeqCst) || self.is_stopped() {
            return;
        }
        let config = self.polling_config();
        if !config.enabled || config.interval.is_zero() {
            debug!("background polling disabled");
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("no tokio runtime; background polling not started");
            return;
        };

        let cancel = self.inner.cancel.child_token();
        let handle = runtime.spawn(poll_task(
            Arc::downgrade(&self.inner),
            self.inner.activity.clone(),
            config,
            cancel.clone(),
        ));
        debug!(interval = ?config.interval, "background polling started");
        *slot = Some(Poller { cancel, handle });
    }
}

// ── Background task ──────────────────────────────────────────────

fn upgrade<S: RequestSource>(feed: &Weak<FeedInner<S>>) -> Option<RequestFeed<S>> {
    feed.upgrade().map(|inner| RequestFeed { inner })
}

/// Periodic refresh plus refresh-on-resume.
///
/// Ticks fire every `interval`, starting one interval after spawn. A tick
/// is skipped while inactive when `only_when_active` is set. An inactive to
/// active transition refreshes immediately without moving the tick phase.
async fn poll_task<S: RequestSource>(
    feed: Weak<FeedInner<S>>,
    mut activity: watch::Receiver<Activity>,
    config: PollingConfig,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut was_active = activity.borrow_and_update().is_active();
    let mut activity_open = true;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if config.only_when_active && !activity.borrow().is_active() {
                    trace!("inactive; skipping background refresh");
                } else {
                    let Some(live) = upgrade(&feed) else { break };
                    live.refetch(false).await;
                }
            }
            changed = activity.changed(), if activity_open => {
                if changed.is_err() {
                    // Activity source dropped: keep the last known value.
                    activity_open = false;
                } else {
                    let now_active = activity.borrow_and_update().is_active();
                    let resumed = now_active && !was_active;
                    was_active = now_active;
                    if resumed {
                        debug!("activity resumed; refreshing");
                        let Some(live) = upgrade(&feed) else { break };
                        live.refetch(false).await;
                    }
                }
            }
        }
    }
    trace!("poll task exited");
}
