// ── API-to-domain type conversions ──
//
// Bridges raw `frontdesk_api::types` records into `frontdesk_core::model`
// types. String enums are validated, timestamps parsed, and populated
// references flattened to their ids. Only a record without an id is
// rejected; unknown tags and bad timestamps degrade to `Unknown`/`None`.

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

use frontdesk_api::types as wire;

use crate::error::CoreError;
use crate::model::{
    ActivityLog, Booking, Feedback, Guest, GuestPreferences, Housekeeping, QuietHours,
    RequestChanges, RequestDetails, RequestItem, RequestStatus, RequestType, Room, RoomFeatures,
    ServiceRequest, Urgency,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp, silently dropping unparseable values.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn ref_id(r: Option<wire::EntityRef>) -> Option<String> {
    r.map(|r| r.id().to_owned())
}

/// Convert a list of wire records, skipping (and logging) invalid ones so a
/// single bad record never blanks the whole list.
pub fn convert_list<W, D>(raw: Vec<W>, kind: &str) -> Vec<D>
where
    D: TryFrom<W, Error = CoreError>,
{
    raw.into_iter()
        .filter_map(|record| match D::try_from(record) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(kind, error = %e, "skipping invalid record");
                None
            }
        })
        .collect()
}

// ── Requests ───────────────────────────────────────────────────────

impl TryFrom<wire::HotelRequest> for ServiceRequest {
    type Error = CoreError;

    fn try_from(raw: wire::HotelRequest) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "request has an empty id".into(),
            });
        }
        let status = RequestStatus::from_wire(&raw.status);
        if status == RequestStatus::Unknown {
            warn!(id = %raw.id, status = %raw.status, "unrecognised request status");
        }
        let created_at = parse_datetime(raw.created_at.as_deref());
        let updated_at = parse_datetime(raw.updated_at.as_deref()).or(created_at);

        let mut logs: Vec<ActivityLog> = raw
            .logs
            .into_iter()
            .filter_map(|log| {
                Some(ActivityLog {
                    timestamp: parse_datetime(log.timestamp.as_deref())?,
                    action: log.action,
                    performed_by: log.performed_by,
                    notes: log.notes,
                })
            })
            .collect();
        logs.sort_by_key(|log| log.timestamp);

        Ok(Self {
            id: raw.id.into(),
            request_id: raw.request_id,
            token: raw.token,
            room: ref_id(raw.room),
            room_number: raw.room_number.as_ref().and_then(wire::NumberOrString::as_u32),
            guest: ref_id(raw.guest),
            request_type: RequestType::from(raw.request_type),
            category: raw.category,
            details: raw.details.into(),
            priority: raw.priority,
            status,
            assigned_to: raw.assigned_to.filter(|a| !a.is_empty()),
            estimated_completion_time: parse_datetime(raw.estimated_completion_time.as_deref()),
            feedback: raw.feedback.map(|f| Feedback {
                rating: f.rating,
                comment: f.comment,
            }),
            logs,
            created_at,
            updated_at,
        })
    }
}

impl From<wire::RequestDetails> for RequestDetails {
    fn from(raw: wire::RequestDetails) -> Self {
        Self {
            items: raw
                .items
                .into_iter()
                .map(|item| RequestItem {
                    name: item.name,
                    quantity: item.quantity,
                    notes: item.notes,
                })
                .collect(),
            time_preference: raw.time_preference,
            urgency: raw.urgency.and_then(|u| u.parse::<Urgency>().ok()),
            message: raw.message.filter(|m| !m.trim().is_empty()),
            requested_at: parse_datetime(raw.requested_at.as_deref()),
        }
    }
}

impl From<&RequestChanges> for wire::RequestUpdate {
    fn from(changes: &RequestChanges) -> Self {
        Self {
            status: changes.status.map(|s| s.to_string()),
            assigned_to: changes.assigned_to.clone(),
            priority: changes.priority,
            estimated_completion_time: changes
                .estimated_completion_time
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

// ── Rooms ──────────────────────────────────────────────────────────

impl TryFrom<wire::Room> for Room {
    type Error = CoreError;

    fn try_from(raw: wire::Room) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "room has an empty id".into(),
            });
        }
        let features = raw.features.unwrap_or_default();
        let housekeeping = raw.housekeeping_status.unwrap_or_default();

        Ok(Self {
            id: raw.id,
            room_number: raw.room_number.map(|n| n.to_string()),
            room_name: raw.room_name,
            device_id: raw.alexa_device_id.filter(|d| !d.is_empty()),
            floor: raw.floor,
            room_type: raw.room_type,
            status: raw.status.and_then(|s| s.parse().ok()),
            current_guest: ref_id(raw.current_guest),
            features: RoomFeatures {
                beds: features.beds,
                max_occupancy: features.max_occupancy,
                has_balcony: features.has_balcony,
                has_kitchenette: features.has_kitchenette,
                amenities: features.amenities,
            },
            housekeeping: Housekeeping {
                last_cleaned: parse_datetime(housekeeping.last_cleaned.as_deref()),
                next_scheduled: parse_datetime(housekeeping.next_scheduled.as_deref()),
                notes: housekeeping.notes,
            },
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        })
    }
}

// ── Guests ─────────────────────────────────────────────────────────

impl TryFrom<wire::Guest> for Guest {
    type Error = CoreError;

    fn try_from(raw: wire::Guest) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "guest has an empty id".into(),
            });
        }
        let prefs = raw.preferences.unwrap_or_default();
        let do_not_disturb = prefs
            .do_not_disturb
            .filter(|dnd| dnd.enabled)
            .and_then(|dnd| dnd.hours)
            .map(|h| QuietHours {
                start: h.start,
                end: h.end,
            });

        Ok(Self {
            id: raw.id,
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            email: raw.email,
            phone: raw.phone,
            room_number: raw
                .room_number
                .map(|n| n.to_string())
                .filter(|n| !n.is_empty()),
            room: ref_id(raw.room),
            check_in: parse_datetime(raw.check_in_date.as_deref()),
            check_out: parse_datetime(raw.check_out_date.as_deref()),
            preferences: GuestPreferences {
                pillow_type: prefs.pillow_type,
                dietary_restrictions: prefs.dietary_restrictions,
                special_requests: prefs.special_requests,
                do_not_disturb,
            },
            loyalty_points: raw.loyalty_points.unwrap_or(0),
            is_active: raw.is_active.unwrap_or(true),
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        })
    }
}

// ── Bookings ───────────────────────────────────────────────────────

impl TryFrom<wire::Booking> for Booking {
    type Error = CoreError;

    fn try_from(raw: wire::Booking) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "booking has an empty id".into(),
            });
        }

        Ok(Self {
            id: raw.id,
            check_in: parse_datetime(raw.check_in.as_deref()),
            check_out: parse_datetime(raw.check_out.as_deref()),
            customer_name: raw.customer_name,
            customer_phone: raw.customer_phone,
            room_price: raw.room_price,
            stage: raw.stage,
            payment_status: raw.payment_status,
            payment_confirmed: raw.payment_confirmed.unwrap_or(false),
            room_number: raw.room_number.map(|n| n.to_string()),
            room_type: raw.room_type,
            area_id: raw.area_id.map(|a| a.to_string()),
            adults: raw.adults.unwrap_or(0),
            children_0_5: raw.children_0_5.unwrap_or(0),
            children_6_12: raw.children_6_12.unwrap_or(0),
            summary: raw.booking_summary,
            created_at: parse_datetime(raw.created_at.as_deref()),
            updated_at: parse_datetime(raw.updated_at.as_deref()),
        })
    }
}
