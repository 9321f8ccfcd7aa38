// ── Activity sources ──
//
// Whether anyone is looking at the feed. Background polls are suppressed
// while inactive (when configured), and coming back to active triggers an
// immediate refresh.

use tokio::sync::watch;

/// Foreground/background state of whatever is consuming the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

impl Activity {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Injectable source of activity transitions.
pub trait ActivitySource: Send + Sync + 'static {
    /// A receiver whose value is the current activity and which is
    /// notified on every transition.
    fn subscribe(&self) -> watch::Receiver<Activity>;
}

/// An activity source that never goes inactive (CLI `watch`, daemons).
#[derive(Debug)]
pub struct AlwaysActive {
    tx: watch::Sender<Activity>,
}

impl AlwaysActive {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(Activity::Active),
        }
    }
}

impl Default for AlwaysActive {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySource for AlwaysActive {
    fn subscribe(&self) -> watch::Receiver<Activity> {
        self.tx.subscribe()
    }
}

/// An activity source driven explicitly by the embedder.
///
/// Starts active. Cheap to clone; clones share the same state.
#[derive(Debug, Clone)]
pub struct ManualActivity {
    tx: watch::Sender<Activity>,
}

impl ManualActivity {
    pub fn new() -> Self {
        Self {
            tx: watch::Sender::new(Activity::Active),
        }
    }

    /// Set the activity. Subscribers are only notified on an actual change.
    pub fn set(&self, activity: Activity) {
        self.tx.send_if_modified(|current| {
            if *current == activity {
                false
            } else {
                *current = activity;
                true
            }
        });
    }

    pub fn set_active(&self, active: bool) {
        self.set(if active {
            Activity::Active
        } else {
            Activity::Inactive
        });
    }

    pub fn current(&self) -> Activity {
        *self.tx.borrow()
    }
}

impl Default for ManualActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySource for ManualActivity {
    fn subscribe(&self) -> watch::Receiver<Activity> {
        self.tx.subscribe()
    }
}
