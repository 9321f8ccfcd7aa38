//! Reactive data layer between `frontdesk-api` and its consumers.
//!
//! - **[`RequestFeed`]**: a live snapshot of every service request.
//!   [`start()`](RequestFeed::start) performs the initial fetch and spawns a
//!   single background poll task; [`approve`](RequestFeed::approve),
//!   [`decline`](RequestFeed::decline) and
//!   [`update_status`](RequestFeed::update_status) patch the snapshot with
//!   the server's authoritative copy.
//!
//! - **[`RequestSource`]**: the seam between the feed and the backend,
//!   implemented for [`frontdesk_api::ApiClient`] and easy to stub.
//!
//! - **[`ActivitySource`]**: tells the feed whether anyone is looking, so
//!   background polls can pause and resume.
//!
//! - **Domain model** ([`model`]): `ServiceRequest`, `Room`, `Guest` and
//!   `Booking`, converted from wire records in [`convert`].

pub mod activity;
pub mod config;
pub mod convert;
pub mod error;
pub mod feed;
pub mod model;
pub mod source;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use activity::{Activity, ActivitySource, AlwaysActive, ManualActivity};
pub use config::{FeedConfig, PollingConfig, SnapshotOrder};
pub use error::CoreError;
pub use feed::{FeedState, RequestFeed, Snapshot, Transition};
pub use source::RequestSource;
pub use stream::{FeedStateStream, RequestFilter, RequestStream};

pub use model::{
    Booking, Guest, RequestChanges, RequestId, RequestStats, RequestStatus, RequestType, Room,
    RoomInfo, RoomStatus, ServiceRequest, Urgency,
};
