// ── Feed configuration ──
//
// Runtime knobs for a `RequestFeed`. Built by the config crate from the
// user's config file, or directly by embedders and tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::ServiceRequest;

/// Background polling behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Period between background refreshes. The first tick fires one full
    /// interval after polling starts.
    pub interval: Duration,
    pub enabled: bool,
    /// Suppress background refreshes while the activity source reports
    /// inactive. Ticks still fire on schedule; they just do nothing.
    pub only_when_active: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
            only_when_active: true,
        }
    }
}

/// How a freshly fetched list is ordered before it becomes the snapshot.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SnapshotOrder {
    /// Reverse of the backend's order: an oldest-first backend list is
    /// shown newest-first.
    #[default]
    Reversed,
    /// Exactly as the backend returned it.
    AsReturned,
    /// Sorted by `created_at`, newest first, regardless of backend order.
    /// Ties keep their backend order; undated requests go last.
    NewestFirst,
}

impl SnapshotOrder {
    pub fn arrange(self, mut requests: Vec<ServiceRequest>) -> Vec<ServiceRequest> {
        match self {
            Self::Reversed => requests.reverse(),
            Self::AsReturned => {}
            Self::NewestFirst => requests.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        requests
    }
}

/// Everything a `RequestFeed` needs besides its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedConfig {
    pub polling: PollingConfig,
    pub order: SnapshotOrder,
}
