// Wire types for the hotel backend REST API.
//
// Field names follow the backend's camelCase JSON. Enumerations (request
// type, status, urgency, room status) stay as plain strings here; the core
// crate validates them into closed enums. Every entity keeps unknown fields
// in an `extra` map so records from older backends still decode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::client::non_blank;
use crate::error::Error;

// ── Envelope ─────────────────────────────────────────────────────────

/// The `{ success, data, message?, error? }` wrapper around every payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    /// Strip the envelope, returning `data`.
    pub fn into_data(self) -> Result<T, Error> {
        if !self.success {
            return Err(self.rejection());
        }
        self.data.ok_or_else(|| Error::Deserialization {
            message: "response envelope has no `data` field".into(),
            body: String::new(),
        })
    }

    /// Strip the envelope when the payload is irrelevant (e.g. DELETE).
    pub fn into_unit(self) -> Result<(), Error> {
        if self.success {
            Ok(())
        } else {
            Err(self.rejection())
        }
    }

    fn rejection(self) -> Error {
        Error::Rejected {
            message: non_blank(self.error)
                .or_else(|| non_blank(self.message))
                .unwrap_or_else(|| "request was not successful".into()),
        }
    }
}

// ── Shared shapes ────────────────────────────────────────────────────

/// A reference to another document: either a bare id or a populated
/// object carrying at least `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(String),
    Populated {
        #[serde(rename = "_id")]
        id: String,
        #[serde(flatten)]
        extra: HashMap<String, serde_json::Value>,
    },
}

impl EntityRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Populated { id, .. } => id,
        }
    }
}

/// Room numbers and area ids arrive as either JSON numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u64),
    Text(String),
}

impl NumberOrString {
    /// Numeric value, parsing the text form when needed.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => u32::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for NumberOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────────

/// A guest-service request as the backend stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRequest {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub room: Option<EntityRef>,
    #[serde(default)]
    pub room_number: Option<NumberOrString>,
    #[serde(default)]
    pub guest: Option<EntityRef>,
    #[serde(rename = "type", default)]
    pub request_type: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub details: RequestDetails,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub estimated_completion_time: Option<String>,
    #[serde(default)]
    pub feedback: Option<Feedback>,
    #[serde(default)]
    pub logs: Vec<RequestLog>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Legacy or unrecognised fields, kept only for forward compatibility.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetails {
    #[serde(default)]
    pub items: Vec<RequestItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    pub action: String,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for `POST /requests`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<String>,
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub details: RequestDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

/// Partial body for `PUT /requests/:id`. Only populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_completion_time: Option<String>,
}

impl RequestUpdate {
    /// An update that only changes the status field.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }
}

// ── Rooms ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<NumberOrString>,
    #[serde(default)]
    pub alexa_device_id: Option<String>,
    #[serde(default)]
    pub floor: Option<i64>,
    #[serde(rename = "type", default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_guest: Option<EntityRef>,
    #[serde(default)]
    pub features: Option<RoomFeatures>,
    #[serde(default)]
    pub housekeeping_status: Option<HousekeepingStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFeatures {
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub max_occupancy: u32,
    #[serde(default)]
    pub has_balcony: bool,
    #[serde(default)]
    pub has_kitchenette: bool,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousekeepingStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scheduled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /rooms`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoom {
    pub room_name: String,
    pub room_number: String,
    pub alexa_device_id: String,
    pub floor: i64,
    #[serde(rename = "type")]
    pub room_type: String,
    pub status: String,
    pub features: RoomFeatures,
    pub housekeeping_status: HousekeepingStatus,
}

/// Partial body for `PUT /rooms/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i64>,
}

// ── Guests ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub room_number: Option<NumberOrString>,
    #[serde(default)]
    pub room: Option<EntityRef>,
    #[serde(default)]
    pub check_in_date: Option<String>,
    #[serde(default)]
    pub check_out_date: Option<String>,
    #[serde(default)]
    pub preferences: Option<GuestPreferences>,
    #[serde(default)]
    pub loyalty_points: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillow_type: Option<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub special_requests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_not_disturb: Option<DoNotDisturb>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoNotDisturb {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<QuietHours>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: String,
    pub end: String,
}

/// Body for `POST /guests`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub preferences: GuestPreferences,
    pub loyalty_points: i64,
}

/// Body for `POST /guests/assign-room`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRoom {
    pub guest_id: String,
    pub room_id: String,
}

// ── Bookings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub room_price: Option<f64>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_confirmed: Option<bool>,
    #[serde(default)]
    pub room_number: Option<NumberOrString>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub area_id: Option<NumberOrString>,
    #[serde(default)]
    pub adults: Option<u32>,
    #[serde(rename = "children_0_5", default)]
    pub children_0_5: Option<u32>,
    #[serde(rename = "children_6_12", default)]
    pub children_6_12: Option<u32>,
    #[serde(default)]
    pub booking_summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn rejection_skips_blank_error_field() {
        let env: Envelope<serde_json::Value> = serde_json::from_value(json!({
            "success": false,
            "error": " ",
            "message": "Room is occupied"
        }))
        .unwrap();
        assert_eq!(
            env.into_unit().unwrap_err().to_string(),
            "Backend rejected the request: Room is occupied"
        );
    }

    #[test]
    fn sparse_request_record_still_decodes() {
        let req: HotelRequest = serde_json::from_value(json!({ "status": "assigned" })).unwrap();
        assert_eq!(req.id, "");
        assert_eq!(req.request_type, "");
        assert_eq!(req.status, "assigned");
    }

    #[test]
    fn request_decodes_populated_refs_and_unknown_fields() {
        let raw = json!({
            "_id": "r1",
            "room": { "_id": "room-9", "roomNumber": "101" },
            "roomNumber": 101,
            "guest": "guest-3",
            "type": "housekeeping",
            "details": { "items": [{ "name": "Towels", "quantity": 2 }] },
            "status": "pending",
            "priority": 2,
            "createdAt": "2025-01-01T10:00:00Z",
            "updatedAt": "2025-01-01T10:00:00Z",
            "__v": 0
        });

        let req: HotelRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.room.as_ref().map(EntityRef::id), Some("room-9"));
        assert_eq!(req.guest.as_ref().map(EntityRef::id), Some("guest-3"));
        assert_eq!(req.room_number.and_then(|n| n.as_u32()), Some(101));
        assert_eq!(req.details.items[0].quantity, 2);
        assert!(req.extra.contains_key("__v"));
    }

    #[test]
    fn status_update_serializes_only_status() {
        let body = serde_json::to_value(RequestUpdate::status("in-progress")).unwrap();
        assert_eq!(body, json!({ "status": "in-progress" }));
    }

    #[test]
    fn envelope_failure_prefers_error_field() {
        let env: Envelope<serde_json::Value> = serde_json::from_value(json!({
            "success": false,
            "error": "Room not found",
            "message": "ignored"
        }))
        .unwrap();

        match env.into_data() {
            Err(Error::Rejected { message }) => assert_eq!(message, "Room not found"),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn booking_keeps_child_counts() {
        let b: Booking = serde_json::from_value(json!({
            "_id": "b1",
            "children_0_5": 1,
            "children_6_12": 2,
            "areaId": "204"
        }))
        .unwrap();
        assert_eq!(b.children_0_5, Some(1));
        assert_eq!(b.children_6_12, Some(2));
        assert_eq!(b.area_id.and_then(|a| a.as_u32()), Some(204));
    }
}
