// ── Service request domain types ──

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

// ── RequestId ───────────────────────────────────────────────────────

/// Opaque, server-assigned request identifier (`_id` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl FromStr for RequestId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl AsRef<str> for RequestId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── RequestType ─────────────────────────────────────────────────────

/// Department a request is routed to.
///
/// Unknown tags from newer backends are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Housekeeping,
    Maintenance,
    RoomService,
    FrontDesk,
    Spa,
    Activity,
    Transport,
    Laundry,
    Other(String),
}

impl RequestType {
    /// The backend's tag for this type.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Housekeeping => "housekeeping",
            Self::Maintenance => "maintenance",
            Self::RoomService => "roomService",
            Self::FrontDesk => "frontDesk",
            Self::Spa => "spa",
            Self::Activity => "activity",
            Self::Transport => "transport",
            Self::Laundry => "laundry",
            Self::Other(tag) => tag,
        }
    }

    /// Human-readable label ("Room Service").
    pub fn label(&self) -> &str {
        match self {
            Self::Housekeeping => "Housekeeping",
            Self::Maintenance => "Maintenance",
            Self::RoomService => "Room Service",
            Self::FrontDesk => "Front Desk",
            Self::Spa => "Spa",
            Self::Activity => "Activity",
            Self::Transport => "Transport",
            Self::Laundry => "Laundry",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for RequestType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "housekeeping" => Self::Housekeeping,
            "maintenance" => Self::Maintenance,
            "roomService" => Self::RoomService,
            "frontDesk" => Self::FrontDesk,
            "spa" => Self::Spa,
            "activity" => Self::Activity,
            "transport" => Self::Transport,
            "laundry" => Self::Laundry,
            _ => Self::Other(tag),
        }
    }
}

impl From<RequestType> for String {
    fn from(t: RequestType) -> Self {
        match t {
            RequestType::Other(tag) => tag,
            known => known.as_wire().to_owned(),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Urgency ─────────────────────────────────────────────────────────

/// Guest-declared urgency, ordered `Low < Normal < High < Urgent`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Urgency {
    Low,
    Normal,
    High,
    Urgent,
}

// ── RequestStatus ───────────────────────────────────────────────────

/// Lifecycle status, ordered in the sequence a request moves through.
///
/// ```text
/// pending ──approve──▶ assigned ──▶ in-progress ──complete──▶ completed
///    └──────────────┴──────────────┴──decline──▶ cancelled
/// ```
///
/// `Unknown` stands in for tags a newer backend may send. It is never
/// parsed from user input and is skipped by [`all()`](Self::all).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum RequestStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    #[strum(disabled)]
    Unknown,
}

impl RequestStatus {
    /// Parse a backend tag, mapping unrecognised tags to `Unknown`.
    pub fn from_wire(tag: &str) -> Self {
        tag.parse().unwrap_or(Self::Unknown)
    }

    /// The backend's tag for this status.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    /// Completed or cancelled: no further transition is expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether the backend's state machine allows moving to `target`.
    ///
    /// Informational only: the feed never refuses a transition, the backend
    /// does.
    pub fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (from, Self::Cancelled) => !from.is_terminal(),
            (Self::Pending, Self::Assigned)
            | (Self::Assigned, Self::InProgress)
            | (Self::InProgress, Self::Completed) => true,
            _ => false,
        }
    }

    /// All known statuses in lifecycle order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ── Request payload ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub quantity: u32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDetails {
    pub items: Vec<RequestItem>,
    pub time_preference: Option<String>,
    pub urgency: Option<Urgency>,
    pub message: Option<String>,
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub rating: Option<f64>,
    pub comment: Option<String>,
}

/// One entry of a request's append-only activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub action: String,
    pub performed_by: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

// ── ServiceRequest ──────────────────────────────────────────────────

/// A guest-service request, the entity the feed keeps fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    /// Human-facing reference (e.g. `REQ-1042`).
    pub request_id: Option<String>,
    /// Token of the in-room device that raised the request.
    pub token: Option<String>,
    pub room: Option<String>,
    pub room_number: Option<u32>,
    pub guest: Option<String>,
    pub request_type: RequestType,
    pub category: Option<String>,
    pub details: RequestDetails,
    pub priority: i64,
    pub status: RequestStatus,
    /// Only meaningful once `status >= Assigned`.
    pub assigned_to: Option<String>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
    pub feedback: Option<Feedback>,
    /// Ascending by timestamp.
    pub logs: Vec<ActivityLog>,
    /// `None` when the backend omits or garbles the timestamp.
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceRequest {
    pub fn urgency(&self) -> Option<Urgency> {
        self.details.urgency
    }

    /// Past its estimated completion time and still open.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.estimated_completion_time.is_some_and(|eta| eta < now)
    }

    /// Time since creation (zero if the clock is behind the backend's).
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.created_at
            .map(|created| (now - created).max(TimeDelta::zero()))
    }

    /// Assignee, hidden while the request has not reached `Assigned`.
    pub fn assignee(&self) -> Option<&str> {
        if self.status >= RequestStatus::Assigned {
            self.assigned_to.as_deref()
        } else {
            None
        }
    }

    /// Short item summary, e.g. `"2x Towels, 1x Shampoo"`.
    pub fn items_summary(&self) -> String {
        self.details
            .items
            .iter()
            .map(|item| format!("{}x {}", item.quantity, item.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ── Partial update ──────────────────────────────────────────────────

/// Fields a generic update may change. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestChanges {
    pub status: Option<RequestStatus>,
    pub assigned_to: Option<String>,
    pub priority: Option<i64>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
}

impl RequestChanges {
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

// ── Statistics ──────────────────────────────────────────────────────

/// Per-status counts over a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    pub total: usize,
    pub pending: usize,
    pub assigned: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub unknown: usize,
}

impl RequestStats {
    pub fn from_requests<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a ServiceRequest>,
    {
        requests.into_iter().fold(Self::default(), |mut stats, req| {
            stats.total += 1;
            match req.status {
                RequestStatus::Pending => stats.pending += 1,
                RequestStatus::Assigned => stats.assigned += 1,
                RequestStatus::InProgress => stats.in_progress += 1,
                RequestStatus::Completed => stats.completed += 1,
                RequestStatus::Cancelled => stats.cancelled += 1,
                RequestStatus::Unknown => stats.unknown += 1,
            }
            stats
        })
    }

    /// Requests that still need staff attention.
    pub fn open(&self) -> usize {
        self.pending + self.assigned + self.in_progress
    }
}
