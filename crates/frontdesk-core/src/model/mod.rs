// ── Domain model ──
//
// Canonical types consumed by the feed and the CLI. Wire quirks (string
// enums, populated references, numbers-as-strings) are resolved in
// `convert` before anything reaches these types.

pub mod booking;
pub mod guest;
pub mod request;
pub mod room;

pub use booking::{Booking, RoomInfo};
pub use guest::{Guest, GuestPreferences, QuietHours};
pub use request::{
    ActivityLog, Feedback, RequestChanges, RequestDetails, RequestId, RequestItem, RequestStats,
    RequestStatus, RequestType, ServiceRequest, Urgency,
};
pub use room::{Housekeeping, Room, RoomFeatures, RoomStatus};
